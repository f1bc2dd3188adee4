use crate::error::{BridgeError, BridgeResult};

/// Maps a non-success response to an error built by `make`, carrying the
/// status and the store's `error` message when the body has one.
pub(super) async fn ensure_ok(
    resp: reqwest::Response,
    make: fn(String) -> BridgeError,
) -> BridgeResult<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(make(describe_failure(status, &body)))
}

pub(super) fn describe_failure(status: reqwest::StatusCode, body: &str) -> String {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_string()
        });
    match status {
        reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
            format!("{} {} (check database rules)", status.as_u16(), detail)
        }
        _ => format!("{} {}", status.as_u16(), detail),
    }
}
