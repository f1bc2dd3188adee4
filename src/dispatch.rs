use std::fmt;

use serde_json::Value;

use crate::error::BridgeResult;
use crate::model::{DbPath, LogSink, RemoteValue};
use crate::realtime::RealtimeStore;

/// Field injected into structured payloads that lack it.
pub const TIMESTAMP_FIELD: &str = "timestamp";

pub const DEFAULT_DRAFT: &str = r#"{"action": "HELLO", "val": 1}"#;

/// Where a dispatched command came from; shows up in the activity log.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Manual,
    Ai,
    Text,
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Origin::Manual => "Manual",
            Origin::Ai => "AI",
            Origin::Text => "Text",
        })
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Preset {
    pub name: &'static str,
    pub label: &'static str,
    pub payload: &'static str,
}

pub const PRESETS: [Preset; 3] = [
    Preset {
        name: "led-on",
        label: "LED ON",
        payload: r#"{"action": "SET_LED", "state": true}"#,
    },
    Preset {
        name: "led-off",
        label: "LED OFF",
        payload: r#"{"action": "SET_LED", "state": false}"#,
    },
    Preset {
        name: "reboot",
        label: "Reboot",
        payload: r#"{"action": "REBOOT"}"#,
    },
];

pub fn find_preset(name: &str) -> Option<&'static Preset> {
    let name = name.trim().to_lowercase();
    PRESETS
        .iter()
        .find(|p| p.name == name || p.label.to_lowercase() == name)
}

pub fn now_millis() -> i64 {
    (time::OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000) as i64
}

/// Decides what `raw` becomes on the wire.
///
/// A JSON object is sent as an object, with `timestamp = now_ms` added when
/// the field is missing or null. A JSON array is sent as parsed. Anything
/// else, including JSON strings, numbers, booleans and `null`, is sent as
/// the original text, unchanged.
pub fn prepare_payload(raw: &str, now_ms: i64) -> RemoteValue {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(mut map)) => {
            let missing = map.get(TIMESTAMP_FIELD).is_none_or(Value::is_null);
            if missing {
                map.insert(TIMESTAMP_FIELD.to_string(), Value::from(now_ms));
            }
            RemoteValue::Structured(map)
        }
        Ok(Value::Array(items)) => RemoteValue::List(items),
        _ => RemoteValue::Scalar(raw.to_string()),
    }
}

/// Builds the text-message command shown on the device display.
/// Returns `None` for blank text.
pub fn text_message(text: &str, now_ms: i64) -> Option<String> {
    if text.trim().is_empty() {
        return None;
    }
    let payload = serde_json::json!({
        "action": "PRINT",
        "text": text,
        TIMESTAMP_FIELD: now_ms,
    });
    Some(payload.to_string())
}

/// Prepares `raw` and writes it at `path`, logging start and outcome.
pub async fn dispatch<S, L>(
    store: &S,
    path: &DbPath,
    raw: &str,
    origin: Origin,
    log: &mut L,
) -> BridgeResult<RemoteValue>
where
    S: RealtimeStore,
    L: LogSink + Send,
{
    log.info(format!("Writing {} command to Firebase...", origin));
    let payload = prepare_payload(raw, now_millis());
    match store.write(path, &payload).await {
        Ok(()) => {
            log.success("Data successfully written to Firebase!");
            Ok(payload)
        }
        Err(err) => {
            log.error(format!("Write failed: {}", err));
            Err(err)
        }
    }
}

#[cfg(test)]
#[path = "tests/dispatch_tests.rs"]
mod tests;
