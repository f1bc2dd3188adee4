use anyhow::Result;

use crate::settings::SettingsStore;

#[derive(Clone, Debug)]
pub struct TuiRunOptions {
    pub settings: SettingsStore,
}

impl Default for TuiRunOptions {
    fn default() -> Self {
        Self {
            settings: SettingsStore::default_location(),
        }
    }
}

pub fn run() -> Result<()> {
    crate::tui_shell::run()
}

pub fn run_with_options(opts: TuiRunOptions) -> Result<()> {
    crate::tui_shell::run_with_options(opts)
}
