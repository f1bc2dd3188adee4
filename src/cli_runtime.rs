use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use iot_bridge::logging::{self, LogTarget};

use crate::Commands;

#[derive(Parser)]
#[command(name = "iot-bridge")]
#[command(about = "Console for pushing commands to realtime-database IoT devices", long_about = None)]
pub(crate) struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH", env = "IOT_BRIDGE_CONFIG")]
    config: Option<PathBuf>,

    /// Write diagnostics here while the TUI runs
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    let settings = crate::settings_store(cli.config);

    match cli.command {
        None => {
            logging::init(match cli.log_file {
                Some(path) => LogTarget::File(path),
                None => LogTarget::Off,
            })?;
            iot_bridge::tui::run_with_options(iot_bridge::tui::TuiRunOptions { settings })?;
        }
        Some(command) => {
            if cli.log_file.is_some() {
                anyhow::bail!("`--log-file` is only supported when running the TUI (no subcommand)");
            }
            logging::init(LogTarget::Stderr)?;
            crate::cli_exec::handle_command(&settings, command)?
        }
    }

    Ok(())
}
