use anyhow::Result;

mod app;

mod commands;
mod input;
mod modal;
mod suggest;
mod view;
mod views;

// Make core TUI types/helpers available to submodules via `super::...`.
use app::{App, CommandDef, Modal, ModalKind, TextInputAction, UiMode};
use view::{RenderCtx, View, render_view_chrome};

pub fn run() -> Result<()> {
    run_with_options(crate::tui::TuiRunOptions::default())
}

pub fn run_with_options(opts: crate::tui::TuiRunOptions) -> Result<()> {
    app::run(opts)
}
