use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{BridgeError, BridgeResult};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Clone, Debug)]
pub struct GeneratorConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

impl GeneratorConfig {
    /// Reads `GEMINI_API_KEY` (or `API_KEY`), plus optional
    /// `IOT_BRIDGE_GEMINI_MODEL` and `IOT_BRIDGE_GEMINI_BASE` overrides.
    pub fn from_env() -> BridgeResult<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                BridgeError::config("no generation API key (set GEMINI_API_KEY or API_KEY)")
            })?;
        Ok(Self {
            api_key,
            model: std::env::var("IOT_BRIDGE_GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            base_url: std::env::var("IOT_BRIDGE_GEMINI_BASE")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
        })
    }
}

/// Turns a natural-language request into a draft device command.
#[derive(Clone, Debug)]
pub struct DraftGenerator {
    config: GeneratorConfig,
    client: reqwest::Client,
}

impl DraftGenerator {
    pub fn new(config: GeneratorConfig) -> BridgeResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent("iot-bridge")
            .build()
            .map_err(|err| BridgeError::config(format!("build http client: {}", err)))?;
        Ok(Self { config, client })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// One round trip; the returned text is an unvalidated draft.
    pub async fn generate(&self, prompt: &str) -> BridgeResult<String> {
        if prompt.trim().is_empty() {
            return Err(BridgeError::Generation("prompt is empty".to_string()));
        }
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );
        tracing::info!(model = %self.config.model, "requesting command draft");

        let resp = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&build_request(prompt))
            .send()
            .await
            .map_err(|err| generation_failed(err.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|err| generation_failed(err.to_string()))?;
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "generation request rejected");
            return Err(generation_failed(service_error(status, &body)));
        }

        let parsed: GenerateResponse = serde_json::from_str(&body)
            .map_err(|err| generation_failed(format!("unreadable response: {}", err)))?;
        parsed
            .text()
            .ok_or_else(|| generation_failed("response contained no text".to_string()))
    }
}

fn generation_failed(detail: String) -> BridgeError {
    BridgeError::Generation(format!("Failed to generate AI command: {}", detail))
}

fn service_error(status: reqwest::StatusCode, body: &str) -> String {
    let message = serde_json::from_str::<Value>(body).ok().and_then(|v| {
        v.pointer("/error/message")
            .and_then(Value::as_str)
            .map(str::to_string)
    });
    match message {
        Some(m) => format!("{} {}", status.as_u16(), m),
        None => status.to_string(),
    }
}

/// Request body: the instruction plus the fixed command schema.
pub fn build_request(prompt: &str) -> Value {
    let instruction = format!(
        "Translate the following user request into a JSON command for an ESP32 IoT device.\n\
         \n\
         User Request: \"{}\"\n\
         \n\
         Return only a JSON object, without markdown fences.\n\
         Use intuitive keys: lights use \"state\" and \"color\" (hex), text display uses \"text\", \
         servos use \"value\" for the angle, and motion uses \"speed\".",
        prompt.trim()
    );
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": instruction }],
        }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": command_schema(),
        },
    })
}

fn command_schema() -> Value {
    json!({
        "type": "OBJECT",
        "description": "IoT Command Object",
        "properties": {
            "command": {
                "type": "STRING",
                "description": "The primary action key, e.g., SET_LED, DISPLAY_TEXT",
            },
            "parameters": {
                "type": "OBJECT",
                "description": "Parameters for the command",
                "properties": {
                    "state": { "type": "STRING" },
                    "value": { "type": "NUMBER" },
                    "color": { "type": "STRING" },
                    "text": { "type": "STRING" },
                    "speed": { "type": "INTEGER" },
                },
            },
        },
        "required": ["command", "parameters"],
    })
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
