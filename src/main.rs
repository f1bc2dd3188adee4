use std::path::PathBuf;

use clap::Subcommand;

mod cli_exec;
mod cli_runtime;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Write a command to the configured database path
    Send {
        /// JSON object, JSON value, or plain text
        payload: String,
        /// Send as a device text message (action PRINT)
        #[arg(long)]
        text: bool,
        /// Override the database path
        #[arg(long)]
        path: Option<String>,
    },

    /// Print the live value at the database path as it changes
    Watch {
        /// Exit after the first value
        #[arg(long)]
        once: bool,
        /// Override the database path
        #[arg(long)]
        path: Option<String>,
    },

    /// Ask the AI service to draft a command
    Generate {
        /// Natural-language request, e.g. "blink the led 5 times"
        prompt: String,
        /// Write the draft to the database right away
        #[arg(long)]
        send: bool,
    },

    /// Show or change the saved connection
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigCommands {
    /// Show the saved connection
    Show {
        /// Emit JSON (includes the API key)
        #[arg(long)]
        json: bool,
    },

    /// Import a pasted firebaseConfig object (`-` reads stdin); the path is kept
    Import { json: String },

    /// Set one field, e.g. `config set databaseURL https://...`
    Set { field: String, value: String },

    /// Print the settings file location
    Path,
}

pub(crate) fn settings_store(config: Option<PathBuf>) -> iot_bridge::settings::SettingsStore {
    match config {
        Some(path) => iot_bridge::settings::SettingsStore::at(path),
        None => iot_bridge::settings::SettingsStore::default_location(),
    }
}

fn main() {
    if let Err(err) = cli_runtime::run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
