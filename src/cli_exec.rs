use std::io::Read;

use anyhow::{Context, Result};
use serde_json::Value;

use iot_bridge::dispatch::{self, Origin};
use iot_bridge::generator::{DraftGenerator, GeneratorConfig};
use iot_bridge::model::{
    ConnectionDescriptor, DbPath, DescriptorField, LogSink, Severity, StoreEvent,
};
use iot_bridge::realtime::{FirebaseStore, RealtimeStore};
use iot_bridge::session::Session;
use iot_bridge::settings::SettingsStore;

use crate::{Commands, ConfigCommands};

/// Activity-log entries go to stderr so stdout stays machine-readable.
struct StderrLog;

impl LogSink for StderrLog {
    fn log(&mut self, severity: Severity, message: String) {
        eprintln!("{: <7} {}", severity.as_str(), message);
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("start async runtime")
}

fn configured(settings: &SettingsStore, path: Option<String>) -> Result<ConnectionDescriptor> {
    let mut descriptor = settings.load()?;
    if let Some(path) = path {
        descriptor.database_path = path;
    }
    descriptor
        .validate()
        .with_context(|| format!("check settings in {}", settings.path().display()))?;
    Ok(descriptor)
}

pub(crate) fn handle_command(settings: &SettingsStore, command: Commands) -> Result<()> {
    match command {
        Commands::Send {
            payload,
            text,
            path,
        } => {
            let descriptor = configured(settings, path)?;
            let (raw, origin) = if text {
                let msg = dispatch::text_message(&payload, dispatch::now_millis())
                    .context("message text is empty")?;
                (msg, Origin::Text)
            } else {
                (payload, Origin::Manual)
            };
            let rt = runtime()?;
            let sent = rt.block_on(send(&descriptor, &raw, origin))?;
            println!(
                "{}",
                serde_json::to_string_pretty(&sent).context("serialize written value")?
            );
        }

        Commands::Watch { once, path } => {
            let descriptor = configured(settings, path)?;
            let rt = runtime()?;
            rt.block_on(watch(&descriptor, once))?;
        }

        Commands::Generate { prompt, send: also_send } => {
            let generator = DraftGenerator::new(GeneratorConfig::from_env()?)?;
            let rt = runtime()?;
            let draft = rt.block_on(async {
                let mut log = StderrLog;
                log.info("Asking Gemini to generate command...");
                generator.generate(&prompt).await
            })?;
            println!("{}", draft);
            if also_send {
                let descriptor = configured(settings, None)?;
                rt.block_on(send(&descriptor, &draft, Origin::Ai))?;
            }
        }

        Commands::Config { command } => handle_config_command(settings, command)?,
    }

    Ok(())
}

async fn send(descriptor: &ConnectionDescriptor, raw: &str, origin: Origin) -> Result<Value> {
    let store = FirebaseStore::connect(descriptor)?;
    let path = DbPath::parse(&descriptor.database_path)?;
    let written = dispatch::dispatch(&store, &path, raw, origin, &mut StderrLog).await?;
    Ok(written.to_json())
}

async fn watch(descriptor: &ConnectionDescriptor, once: bool) -> Result<()> {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let mut session = Session::<FirebaseStore>::open(descriptor, move |_, event| {
        let _ = tx.send(event);
    })?;
    StderrLog.info(format!(
        "Watching {} (Ctrl-C to stop)",
        descriptor.database_path
    ));

    loop {
        tokio::select! {
            event = rx.recv() => match event {
                Some(StoreEvent::Value(value)) => {
                    println!("{}", StoreEvent::display_value(value.as_ref()));
                    if once {
                        break;
                    }
                }
                Some(StoreEvent::ReadError(err)) => StderrLog.error(format!("Read failed: {}", err)),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    session.close();
    Ok(())
}

fn handle_config_command(settings: &SettingsStore, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show { json } => {
            let descriptor = settings.load()?;
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&descriptor).context("serialize config json")?
                );
            } else {
                for field in DescriptorField::ALL {
                    let value = descriptor.get(field);
                    let shown = if field.is_secret() && !value.is_empty() {
                        "(set)"
                    } else {
                        value
                    };
                    println!("{: <18} {}", format!("{}:", field.key()), shown);
                }
                if !descriptor.is_configured() {
                    println!("Configuration Required");
                }
            }
        }
        ConfigCommands::Import { json } => {
            let raw = if json == "-" {
                let mut buf = String::new();
                std::io::stdin()
                    .read_to_string(&mut buf)
                    .context("read config from stdin")?;
                buf
            } else {
                json
            };
            let current = settings.load()?;
            let imported = current
                .import_vendor_config(&raw)
                .context("import config")?;
            settings.save(&imported)?;
            println!("Firebase configuration saved locally.");
        }
        ConfigCommands::Set { field, value } => {
            let field = DescriptorField::parse(&field)
                .with_context(|| format!("unknown field: {}", field))?;
            let mut descriptor = settings.load()?;
            descriptor.set(field, value);
            settings.save(&descriptor)?;
            println!("Firebase configuration saved locally.");
        }
        ConfigCommands::Path => println!("{}", settings.path().display()),
    }
    Ok(())
}
