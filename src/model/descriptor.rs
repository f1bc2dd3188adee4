use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BridgeError, BridgeResult};

pub const DEFAULT_DATABASE_PATH: &str = "/devices/esp32/command";

/// Identifies one realtime-store endpoint plus the path the device listens on.
///
/// Field names on the wire match the vendor's web config object so a pasted
/// config can be imported as-is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionDescriptor {
    #[serde(rename = "apiKey", default)]
    pub api_key: String,
    #[serde(rename = "authDomain", default)]
    pub auth_domain: String,
    #[serde(rename = "databaseURL", default)]
    pub database_url: String,
    #[serde(rename = "projectId", default)]
    pub project_id: String,
    #[serde(rename = "storageBucket", default)]
    pub storage_bucket: String,
    #[serde(rename = "messagingSenderId", default)]
    pub messaging_sender_id: String,
    #[serde(rename = "appId", default)]
    pub app_id: String,
    #[serde(rename = "databasePath", default = "default_database_path")]
    pub database_path: String,
}

fn default_database_path() -> String {
    DEFAULT_DATABASE_PATH.to_string()
}

impl Default for ConnectionDescriptor {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            auth_domain: String::new(),
            database_url: String::new(),
            project_id: String::new(),
            storage_bucket: String::new(),
            messaging_sender_id: String::new(),
            app_id: String::new(),
            database_path: default_database_path(),
        }
    }
}

/// Text of one field in a pasted vendor config. Strings are taken as-is,
/// numbers and `true` are rendered; falsy values, nested values and
/// missing keys become empty.
fn vendor_field(config: &Value, key: &str) -> String {
    match config.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        Some(Value::Bool(true)) => "true".to_string(),
        _ => String::new(),
    }
}

impl ConnectionDescriptor {
    /// True once an API key is present; the console only subscribes then.
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Checks the fields the store client cannot work without.
    pub fn validate(&self) -> BridgeResult<()> {
        if self.database_url.trim().is_empty() || self.database_path.trim().is_empty() {
            return Err(BridgeError::config("Missing Database Configuration"));
        }
        Ok(())
    }

    /// Builds a new descriptor from a pasted vendor config object.
    ///
    /// All connection fields come from `raw` (missing ones become empty);
    /// `database_path` is carried over from `self`, or defaulted if blank.
    /// On malformed input `self` is untouched and a parse error is returned.
    pub fn import_vendor_config(&self, raw: &str) -> BridgeResult<Self> {
        let parsed: Value = serde_json::from_str(raw.trim())?;
        let database_path = if self.database_path.trim().is_empty() {
            default_database_path()
        } else {
            self.database_path.clone()
        };
        Ok(Self {
            api_key: vendor_field(&parsed, "apiKey"),
            auth_domain: vendor_field(&parsed, "authDomain"),
            database_url: vendor_field(&parsed, "databaseURL"),
            project_id: vendor_field(&parsed, "projectId"),
            storage_bucket: vendor_field(&parsed, "storageBucket"),
            messaging_sender_id: vendor_field(&parsed, "messagingSenderId"),
            app_id: vendor_field(&parsed, "appId"),
            database_path,
        })
    }

    pub fn get(&self, field: DescriptorField) -> &str {
        match field {
            DescriptorField::ApiKey => &self.api_key,
            DescriptorField::AuthDomain => &self.auth_domain,
            DescriptorField::DatabaseUrl => &self.database_url,
            DescriptorField::ProjectId => &self.project_id,
            DescriptorField::StorageBucket => &self.storage_bucket,
            DescriptorField::MessagingSenderId => &self.messaging_sender_id,
            DescriptorField::AppId => &self.app_id,
            DescriptorField::DatabasePath => &self.database_path,
        }
    }

    pub fn set(&mut self, field: DescriptorField, value: impl Into<String>) {
        let value = value.into();
        let slot = match field {
            DescriptorField::ApiKey => &mut self.api_key,
            DescriptorField::AuthDomain => &mut self.auth_domain,
            DescriptorField::DatabaseUrl => &mut self.database_url,
            DescriptorField::ProjectId => &mut self.project_id,
            DescriptorField::StorageBucket => &mut self.storage_bucket,
            DescriptorField::MessagingSenderId => &mut self.messaging_sender_id,
            DescriptorField::AppId => &mut self.app_id,
            DescriptorField::DatabasePath => &mut self.database_path,
        };
        *slot = value;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DescriptorField {
    ApiKey,
    AuthDomain,
    DatabaseUrl,
    ProjectId,
    StorageBucket,
    MessagingSenderId,
    AppId,
    DatabasePath,
}

impl DescriptorField {
    pub const ALL: [DescriptorField; 8] = [
        DescriptorField::ApiKey,
        DescriptorField::AuthDomain,
        DescriptorField::DatabaseUrl,
        DescriptorField::ProjectId,
        DescriptorField::StorageBucket,
        DescriptorField::MessagingSenderId,
        DescriptorField::AppId,
        DescriptorField::DatabasePath,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DescriptorField::ApiKey => "API Key",
            DescriptorField::AuthDomain => "Auth Domain",
            DescriptorField::DatabaseUrl => "Database URL",
            DescriptorField::ProjectId => "Project ID",
            DescriptorField::StorageBucket => "Storage Bucket",
            DescriptorField::MessagingSenderId => "Messaging Sender ID",
            DescriptorField::AppId => "App ID",
            DescriptorField::DatabasePath => "Database Path",
        }
    }

    /// Wire key, also accepted by `set <field>`.
    pub fn key(self) -> &'static str {
        match self {
            DescriptorField::ApiKey => "apiKey",
            DescriptorField::AuthDomain => "authDomain",
            DescriptorField::DatabaseUrl => "databaseURL",
            DescriptorField::ProjectId => "projectId",
            DescriptorField::StorageBucket => "storageBucket",
            DescriptorField::MessagingSenderId => "messagingSenderId",
            DescriptorField::AppId => "appId",
            DescriptorField::DatabasePath => "databasePath",
        }
    }

    /// Parses a field name case-insensitively, ignoring `-` and `_`.
    pub fn parse(s: &str) -> Option<Self> {
        let norm: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_lowercase();
        let short = match norm.as_str() {
            "url" => Some(DescriptorField::DatabaseUrl),
            "path" => Some(DescriptorField::DatabasePath),
            "project" => Some(DescriptorField::ProjectId),
            "key" => Some(DescriptorField::ApiKey),
            _ => None,
        };
        short.or_else(|| {
            Self::ALL
                .into_iter()
                .find(|f| f.key().to_lowercase() == norm)
        })
    }

    /// Fields whose value should not be echoed in full.
    pub fn is_secret(self) -> bool {
        matches!(self, DescriptorField::ApiKey)
    }
}

#[cfg(test)]
#[path = "../tests/model/descriptor_tests.rs"]
mod tests;
