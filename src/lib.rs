pub mod devserver;
pub mod dispatch;
pub mod error;
pub mod generator;
pub mod logging;
pub mod model;
pub mod realtime;
pub mod repo_files;
pub mod session;
pub mod settings;
pub mod tui;

mod tui_shell;
