use std::io::{self, IsTerminal};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use time::OffsetDateTime;

use crate::dispatch::{self, Origin};
use crate::generator::{DraftGenerator, GeneratorConfig};
use crate::model::{
    ActivityLog, ConnectionDescriptor, DescriptorField, LogSink, Severity, StoreEvent,
};
use crate::realtime::FirebaseStore;
use crate::session::Session;
use crate::settings::SettingsStore;

use super::input::Input;
use super::modal;
use super::suggest::{score_def, sort_scored_suggestions};
use super::view::{RenderCtx, View};
use super::views::{ControlView, SettingsView};

mod cmd_dispatch;
mod control_actions;
mod event_loop;
mod lifecycle;
mod modal_output;
mod render;
mod settings_actions;
mod time_utils;
mod types;
mod view_nav;
mod worker;

use self::time_utils::fmt_clock;
pub(super) use self::types::{CommandDef, Modal, ModalKind, TextInputAction, UiMode};
use self::worker::{ChannelLog, WorkerMsg};

pub(super) fn run(opts: crate::tui::TuiRunOptions) -> Result<()> {
    if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
        anyhow::bail!("TUI requires an interactive terminal (TTY)");
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("iot-bridge-io")
        .build()
        .context("start async runtime")?;
    let _guard = runtime.enter();

    let mut stdout = io::stdout();
    enable_raw_mode().context("enable raw mode")?;
    execute!(stdout, EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let mut app = App::load(opts.settings, runtime.handle().clone());
    let res = event_loop::run_loop(&mut terminal, &mut app);
    app.session.close();

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

struct ViewFrame {
    view: Box<dyn View>,
}

pub(super) struct App {
    settings: SettingsStore,
    /// Last saved descriptor; the session follows this one.
    descriptor: ConnectionDescriptor,

    runtime: tokio::runtime::Handle,
    session: Session<FirebaseStore>,
    connect_err: Option<String>,

    generator: Option<DraftGenerator>,
    generator_err: Option<String>,

    worker_tx: mpsc::Sender<WorkerMsg>,
    worker_rx: mpsc::Receiver<WorkerMsg>,

    log: ActivityLog,
    last_command: Option<String>,

    modal: Option<Modal>,

    input: Input,
    suggestions: Vec<CommandDef>,
    suggestion_selected: usize,

    // frames[0] is always the control view.
    frames: Vec<ViewFrame>,

    quit: bool,
}

impl App {
    pub(super) fn new(settings: SettingsStore, runtime: tokio::runtime::Handle) -> Self {
        let (worker_tx, worker_rx) = mpsc::channel();
        let store_tx = worker_tx.clone();
        let session = Session::new(move |generation, event| {
            let _ = store_tx.send(WorkerMsg::Store { generation, event });
        });

        let (generator, generator_err) = match GeneratorConfig::from_env()
            .and_then(DraftGenerator::new)
        {
            Ok(g) => (Some(g), None),
            Err(err) => (None, Some(err.to_string())),
        };

        Self {
            settings,
            descriptor: ConnectionDescriptor::default(),
            runtime,
            session,
            connect_err: None,
            generator,
            generator_err,
            worker_tx,
            worker_rx,
            log: ActivityLog::default(),
            last_command: None,
            modal: None,
            input: Input::default(),
            suggestions: Vec::new(),
            suggestion_selected: 0,
            frames: vec![ViewFrame {
                view: Box::new(ControlView::new()),
            }],
            quit: false,
        }
    }
}

#[cfg(test)]
#[path = "../tests/tui_shell/app_tests.rs"]
mod tests;
