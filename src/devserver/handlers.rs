use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, Uri, header};
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::{IntoResponse, Response};
use futures_util::Stream;
use serde_json::{Value, json};
use tokio::sync::broadcast::error::RecvError;

use super::{DevState, http_error, overlaps};
use crate::model::DbPath;

const KEEP_ALIVE: Duration = Duration::from_secs(30);

pub(super) async fn healthz() -> &'static str {
    "ok"
}

/// Every `*.json` path is data; everything else is 404.
pub(super) async fn data(
    State(state): State<Arc<DevState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = match data_path(uri.path()) {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match method {
        Method::GET if wants_stream(&headers) => stream(state, path).into_response(),
        Method::GET => Json(state.value_at(&path).await.unwrap_or(Value::Null)).into_response(),
        Method::PUT => match parse_body(&body) {
            Ok(v) => {
                state.put(&path, v.clone()).await;
                Json(v).into_response()
            }
            Err(resp) => resp,
        },
        Method::PATCH => match parse_body(&body) {
            Ok(v @ Value::Object(_)) => {
                state.patch(&path, v.clone()).await;
                Json(v).into_response()
            }
            Ok(_) => http_error::bad_request("Invalid data; patch requires an object"),
            Err(resp) => resp,
        },
        Method::DELETE => {
            state.put(&path, Value::Null).await;
            Json(Value::Null).into_response()
        }
        _ => http_error::method_not_allowed(),
    }
}

fn data_path(raw: &str) -> Result<String, Response> {
    let Some(stripped) = raw.strip_suffix(".json") else {
        return Err(http_error::not_found());
    };
    let path = if stripped.is_empty() || stripped == "/" {
        DbPath::root()
    } else {
        DbPath::parse(stripped).map_err(|err| http_error::bad_request(&err.to_string()))?
    };
    Ok(path.as_str().to_string())
}

fn wants_stream(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("text/event-stream"))
}

fn parse_body(body: &Bytes) -> Result<Value, Response> {
    serde_json::from_slice(body).map_err(|_| {
        http_error::bad_request("Invalid data; couldn't parse JSON object, array, or value.")
    })
}

fn put_event(value: Option<Value>) -> Event {
    let body = json!({ "path": "/", "data": value.unwrap_or(Value::Null) });
    Event::default().event("put").data(body.to_string())
}

/// Sends the current value, then the full value again after every write
/// that touches the watched path.
fn stream(
    state: Arc<DevState>,
    path: String,
) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static> {
    let rx = state.changes.subscribe();
    tracing::debug!(%path, "listener attached");
    let stream = futures_util::stream::unfold(
        (true, rx, state, path),
        |(first, mut rx, state, path)| async move {
            if !first {
                loop {
                    match rx.recv().await {
                        Ok(changed) if overlaps(&changed, &path) => break,
                        Ok(_) => continue,
                        Err(RecvError::Lagged(_)) => break,
                        Err(RecvError::Closed) => return None,
                    }
                }
            }
            let event = put_event(state.value_at(&path).await);
            Some((Ok(event), (false, rx, state, path)))
        },
    );
    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(KEEP_ALIVE)
            .event(Event::default().event("keep-alive").data("null")),
    )
}
