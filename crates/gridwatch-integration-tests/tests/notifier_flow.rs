// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of gridwatch.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use chrono::{NaiveDate, NaiveDateTime};
use gridwatch_core::StateStore;
use gridwatch_main::{NotifierConfig, run_notifier};
use gridwatch_types::{EventKind, GridStatus};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use std::collections::HashMap;
use std::path::Path;
use tempfile::tempdir;

const SOLAX_PATH: &str = "/proxyApp/proxy/api/getRealtimeInfo.do";
const BOT_TOKEN: &str = "123:TEST";

fn now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 10, 18)
        .unwrap()
        .and_hms_opt(21, 5, 0)
        .unwrap()
}

fn config(solax: &ServerGuard, telegram: &ServerGuard, data_dir: &Path) -> NotifierConfig {
    let vars: HashMap<&str, String> = HashMap::from([
        ("SOLAX_API_URL", format!("{}{SOLAX_PATH}", solax.url())),
        ("SOLAX_TOKEN", "solax-token".to_owned()),
        ("SOLAX_SN", "SWTEST0001".to_owned()),
        ("TELEGRAM_TOKEN", BOT_TOKEN.to_owned()),
        ("TELEGRAM_API_URL", telegram.url()),
        ("GRIDWATCH_DATA_DIR", data_dir.display().to_string()),
    ]);
    NotifierConfig::from_lookup(|name| vars.get(name).cloned()).unwrap()
}

fn seed(data_dir: &Path, state: &serde_json::Value, subscribers: &serde_json::Value) {
    std::fs::write(
        data_dir.join("solax_state_2025.json"),
        serde_json::to_string_pretty(state).unwrap(),
    )
    .unwrap();
    std::fs::write(
        data_dir.join("subscribers.json"),
        serde_json::to_string(subscribers).unwrap(),
    )
    .unwrap();
}

#[tokio::test]
async fn test_grid_loss_is_broadcast_and_persisted() {
    let dir = tempdir().unwrap();
    seed(
        dir.path(),
        &json!({"grid_status": "ON", "inverter_online": true, "last_off_time": null, "history": []}),
        &json!([111, "@ops"]),
    );

    let mut solax = Server::new_async().await;
    let realtime = solax
        .mock("GET", SOLAX_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("tokenId".into(), "solax-token".into()),
            Matcher::UrlEncoded("sn".into(), "SWTEST0001".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "success": true,
                "exception": "Query success!",
                "result": {
                    "inverterSN": "SWTEST0001",
                    "acpower": 500.0,
                    "feedinpower": 0.0,
                    "soc": 80.0,
                    "uploadTime": "2025-10-18 21:04:30"
                },
                "code": 0
            })
            .to_string(),
        )
        .create_async()
        .await;

    let mut telegram = Server::new_async().await;
    let send_path = format!("/bot{BOT_TOKEN}/sendMessage");
    let delivered = telegram
        .mock("POST", send_path.as_str())
        .match_body(Matcher::AllOf(vec![
            Matcher::PartialJson(json!({"chat_id": 111})),
            Matcher::Regex("Power went out".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"ok":true,"result":{"message_id":1,"chat":{"id":111}}}"#)
        .create_async()
        .await;
    let blocked = telegram
        .mock("POST", send_path.as_str())
        .match_body(Matcher::PartialJson(json!({"chat_id": "@ops"})))
        .with_status(403)
        .with_body(r#"{"ok":false,"error_code":403,"description":"Forbidden: bot was blocked by the user"}"#)
        .create_async()
        .await;

    let report = run_notifier(&config(&solax, &telegram, dir.path()), now())
        .await
        .unwrap();

    assert_eq!(report.events, vec![EventKind::GridOff]);
    assert_eq!(report.grid_status, Some(GridStatus::Off));
    assert_eq!(report.messages_attempted, 2);
    assert_eq!(report.messages_delivered, 1);

    let state = StateStore::new(dir.path()).load(2025).unwrap();
    assert_eq!(state.grid_status, Some(GridStatus::Off));
    assert_eq!(state.last_off_time, Some(now()));
    assert_eq!(state.history.len(), 1);
    assert_eq!(state.history[0].time, "18.10.2025 21:05:00");
    assert!(state.history[0].message.contains("SOC: 80%"));

    realtime.assert_async().await;
    delivered.assert_async().await;
    blocked.assert_async().await;
}

#[tokio::test]
async fn test_api_failure_reports_inverter_unavailable_once() {
    let dir = tempdir().unwrap();
    seed(
        dir.path(),
        &json!({"grid_status": "ON", "inverter_online": true, "history": []}),
        &json!([111]),
    );

    let mut solax = Server::new_async().await;
    let realtime = solax
        .mock("GET", SOLAX_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({"success": false, "exception": "Query failed", "code": 102}).to_string())
        .expect(2)
        .create_async()
        .await;

    let mut telegram = Server::new_async().await;
    let send = telegram
        .mock("POST", format!("/bot{BOT_TOKEN}/sendMessage").as_str())
        .match_body(Matcher::Regex("Inverter is unavailable".into()))
        .with_status(200)
        .with_body(r#"{"ok":true,"result":{}}"#)
        .expect(1)
        .create_async()
        .await;

    let config = config(&solax, &telegram, dir.path());
    let first = run_notifier(&config, now()).await.unwrap();
    assert_eq!(first.events, vec![EventKind::InverterOffline]);
    assert!(!first.telemetry_available);
    assert!(!first.inverter_online);

    // Still down on the next run: no repeat notice
    let second = run_notifier(&config, now()).await.unwrap();
    assert!(second.events.is_empty());

    let state = StateStore::new(dir.path()).load(2025).unwrap();
    assert!(!state.inverter_online);
    assert_eq!(state.grid_status, Some(GridStatus::On));
    assert_eq!(state.history.len(), 1);

    realtime.assert_async().await;
    send.assert_async().await;
}

#[tokio::test]
async fn test_first_run_without_files_is_silent() {
    let dir = tempdir().unwrap();

    let mut solax = Server::new_async().await;
    solax
        .mock("GET", SOLAX_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({
                "success": true,
                "result": {"acpower": 300.0, "feedinpower": 1200.0, "soc": 95.0, "uploadTime": "2025-10-18 21:03:00"}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let mut telegram = Server::new_async().await;
    let send = telegram
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let report = run_notifier(&config(&solax, &telegram, dir.path()), now())
        .await
        .unwrap();

    assert!(report.events.is_empty());
    assert_eq!(report.grid_status, Some(GridStatus::On));
    assert!(dir.path().join("solax_state_2025.json").exists());
    assert!(!dir.path().join("subscribers.json").exists());

    send.assert_async().await;
}
