pub(super) mod control;
pub(super) mod settings;

pub(in crate::tui_shell) use control::ControlView;
pub(in crate::tui_shell) use settings::SettingsView;
