use anyhow::Result;
use axum::http::StatusCode;
use serde_json::{Value, json};

use iot_bridge::dispatch::{self, Origin};
use iot_bridge::model::{ActivityLog, DbPath, RemoteValue, Severity};
use iot_bridge::realtime::{FirebaseStore, RealtimeStore};

mod common;

#[tokio::test]
async fn structured_command_is_stored_with_a_timestamp() -> Result<()> {
    let server = common::start_devserver().await?;
    let d = common::descriptor(&server.base_url, "/d/cmd", "p1");
    let store = FirebaseStore::connect(&d)?;
    let path = DbPath::parse(&d.database_path)?;
    let mut log = ActivityLog::default();

    let before = dispatch::now_millis();
    let sent = dispatch::dispatch(
        &store,
        &path,
        r#"{"action":"SET_LED","state":true}"#,
        Origin::Manual,
        &mut log,
    )
    .await?;
    assert!(matches!(sent, RemoteValue::Structured(_)));

    let stored = server.state.value_at("/d/cmd").await.expect("value stored");
    assert_eq!(stored["action"], json!("SET_LED"));
    assert_eq!(stored["state"], json!(true));
    let ts = stored["timestamp"].as_i64().expect("numeric timestamp");
    assert!(ts >= before);

    let entries = log.entries();
    assert_eq!(entries[0].message, "Writing Manual command to Firebase...");
    assert_eq!(entries.last().map(|e| e.severity), Some(Severity::Success));
    Ok(())
}

#[tokio::test]
async fn existing_timestamp_is_left_alone() -> Result<()> {
    let server = common::start_devserver().await?;
    let d = common::descriptor(&server.base_url, "/d/cmd", "p1");
    let store = FirebaseStore::connect(&d)?;
    let path = DbPath::parse(&d.database_path)?;

    dispatch::dispatch(
        &store,
        &path,
        r#"{"action":"REBOOT","timestamp":42}"#,
        Origin::Manual,
        &mut ActivityLog::default(),
    )
    .await?;

    let stored = server.state.value_at("/d/cmd").await.expect("value stored");
    assert_eq!(stored, json!({"action": "REBOOT", "timestamp": 42}));
    Ok(())
}

#[tokio::test]
async fn non_json_text_is_stored_verbatim() -> Result<()> {
    let server = common::start_devserver().await?;
    let d = common::descriptor(&server.base_url, "/d/cmd", "p1");
    let store = FirebaseStore::connect(&d)?;
    let path = DbPath::parse(&d.database_path)?;

    for raw in ["blink twice", "42", "{broken"] {
        dispatch::dispatch(&store, &path, raw, Origin::Text, &mut ActivityLog::default()).await?;
        let stored = server.state.value_at("/d/cmd").await;
        assert_eq!(stored, Some(Value::String(raw.to_string())));
    }
    Ok(())
}

#[tokio::test]
async fn arrays_are_sent_as_parsed() -> Result<()> {
    let server = common::start_devserver().await?;
    let d = common::descriptor(&server.base_url, "/d/cmd", "p1");
    let store = FirebaseStore::connect(&d)?;
    let path = DbPath::parse(&d.database_path)?;

    dispatch::dispatch(&store, &path, "[1, 2]", Origin::Manual, &mut ActivityLog::default())
        .await?;
    assert_eq!(server.state.value_at("/d/cmd").await, Some(json!([1, 2])));
    Ok(())
}

#[tokio::test]
async fn rejected_write_is_logged_with_the_store_message() -> Result<()> {
    let mock = common::start_mock(|_| {
        (
            StatusCode::UNAUTHORIZED,
            r#"{"error":"Permission denied"}"#.to_string(),
        )
    })
    .await?;
    let d = common::descriptor(&mock.base_url, "/d/cmd", "p1");
    let store = FirebaseStore::connect(&d)?;
    let path = DbPath::parse(&d.database_path)?;
    let mut log = ActivityLog::default();

    let res = dispatch::dispatch(&store, &path, r#"{"a":1}"#, Origin::Manual, &mut log).await;
    assert!(res.is_err());

    let last = log.last().expect("log entry");
    assert_eq!(last.severity, Severity::Error);
    assert!(last.message.starts_with("Write failed: "), "{}", last.message);
    assert!(last.message.contains("Permission denied"), "{}", last.message);

    let reqs = mock.requests();
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].method, axum::http::Method::PUT);
    assert_eq!(reqs[0].uri, "/d/cmd.json");
    Ok(())
}

#[tokio::test]
async fn clearing_the_log_starts_the_next_dispatch_from_empty() -> Result<()> {
    let server = common::start_devserver().await?;
    let d = common::descriptor(&server.base_url, "/d/cmd", "p1");
    let store = FirebaseStore::connect(&d)?;
    let path = DbPath::parse(&d.database_path)?;
    let mut log = ActivityLog::default();

    dispatch::dispatch(&store, &path, "one", Origin::Manual, &mut log).await?;
    assert_eq!(log.len(), 2);
    log.clear();
    assert!(log.is_empty());
    dispatch::dispatch(&store, &path, "two", Origin::Manual, &mut log).await?;
    assert_eq!(log.len(), 2);
    assert_eq!(log.entries()[0].message, "Writing Manual command to Firebase...");
    Ok(())
}
