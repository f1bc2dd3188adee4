use serde_json::{Map, Value};

/// A value written to the store.
#[derive(Clone, Debug, PartialEq)]
pub enum RemoteValue {
    /// Plain text, stored verbatim as a JSON string.
    Scalar(String),
    /// A JSON object.
    Structured(Map<String, Value>),
    /// A JSON array.
    List(Vec<Value>),
}

impl RemoteValue {
    pub fn to_json(&self) -> Value {
        match self {
            RemoteValue::Scalar(s) => Value::String(s.clone()),
            RemoteValue::Structured(m) => Value::Object(m.clone()),
            RemoteValue::List(v) => Value::Array(v.clone()),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RemoteValue::Scalar(_) => "text",
            RemoteValue::Structured(_) => "object",
            RemoteValue::List(_) => "array",
        }
    }
}

/// Delivered to a subscriber, in arrival order.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreEvent {
    /// Full value at the subscribed path; `None` when nothing is stored there.
    Value(Option<Value>),
    /// The stream failed or was cancelled by the store; the subscription
    /// stays alive and reconnects.
    ReadError(String),
}

impl StoreEvent {
    /// Text shown in the live-value panel for a value event.
    pub fn display_value(value: Option<&Value>) -> String {
        match value {
            None | Some(Value::Null) => "null (No data at this path)".to_string(),
            Some(v) => serde_json::to_string_pretty(v).unwrap_or_else(|_| v.to_string()),
        }
    }
}
