use std::fmt;

use crate::error::{BridgeError, BridgeResult};

/// A slash-delimited location inside the realtime store, always with a
/// leading slash and no empty segments. The root is `/`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DbPath(String);

const FORBIDDEN: &[char] = &['.', '#', '$', '[', ']'];

impl DbPath {
    pub fn parse(raw: &str) -> BridgeResult<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(BridgeError::config("database path is empty"));
        }
        let mut segments = Vec::new();
        for seg in raw.split('/') {
            if seg.is_empty() {
                continue;
            }
            if let Some(c) = seg.chars().find(|c| FORBIDDEN.contains(c) || c.is_control()) {
                return Err(BridgeError::config(format!(
                    "database path segment {:?} contains invalid character {:?}",
                    seg, c
                )));
            }
            segments.push(seg);
        }
        Ok(Self(format!("/{}", segments.join("/"))))
    }

    pub fn root() -> Self {
        Self("/".to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// `{base}{path}.json`; the root maps to `{base}/.json`.
    pub fn rest_url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        if self.is_root() {
            format!("{}/.json", base)
        } else {
            format!("{}{}.json", base, self.0)
        }
    }
}

impl fmt::Display for DbPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
