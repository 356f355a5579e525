// Integration tests for `Monitor` against a wiremock server.
#![allow(clippy::unwrap_used)]

use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use netwatch_core::{
    CoreError, HistoryCategory, HistoryRecord, HistoryView, Monitor, MonitorConfig,
    PurgeConfirmation, Selection, TimeWindow, filter_by_window, project,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Monitor) {
    let server = MockServer::start().await;
    let mut config = MonitorConfig::new(server.uri().parse().unwrap());
    config.timeout = Duration::from_secs(5);
    let monitor = Monitor::new(config).unwrap();
    (server, monitor)
}

fn at(h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, 10)
        .unwrap()
        .and_hms_opt(h, m, 0)
        .unwrap()
}

// ── Fetch ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_speedtest_then_filter_and_project() {
    let (server, monitor) = setup().await;

    Mock::given(method("GET"))
        .and(path("/speedtest/historico"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "historico": [
                { "timestamp": "2024-05-10 10:00:00", "download_mb": 50.0, "upload_mb": 5.0, "ping_ms": 30 },
                { "timestamp": "2024-05-10 11:30:00", "download_mb": 90.0, "upload_mb": 9.5, "ping_ms": 12 },
            ]
        })))
        .mount(&server)
        .await;

    let records = monitor.fetch_history(HistoryCategory::Speedtest).await;
    assert_eq!(records.len(), 2);

    let visible = filter_by_window(&records, TimeWindow::LastHour, at(12, 0));
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].label(), "2024-05-10 11:30:00");

    let series = project(HistoryCategory::Speedtest, &visible);
    assert_eq!(series.len(), 3);
    assert!(series.iter().all(|s| s.values.len() == 1));
    assert_eq!(series[0].values, vec![Some(90.0)]);
    assert_eq!(series[2].values, vec![Some(12.0)]);
}

#[tokio::test]
async fn test_fetch_devices_normalizes_rows() {
    let (server, monitor) = setup().await;

    Mock::given(method("GET"))
        .and(path("/devices/db"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dispositivos": [
                { "ip": "192.168.0.10", "mac": "aa:bb:cc:dd:ee:01", "online": 1,
                  "ultima_verificacao": "2024-05-10 11:59:00" },
                { "ip": "192.168.0.11", "mac": "aa:bb:cc:dd:ee:02", "online": 0 },
            ]
        })))
        .mount(&server)
        .await;

    let records = monitor.fetch_history(HistoryCategory::Devices).await;

    match &records[..] {
        [HistoryRecord::Device(first), HistoryRecord::Device(second)] => {
            assert!(first.online);
            assert!(!second.online);
            assert_eq!(second.last_checked, None);
        }
        other => panic!("unexpected records: {other:?}"),
    }

    let series = project(HistoryCategory::Devices, &records);
    assert_eq!(series[0].values, vec![Some(1.0), Some(2.0)]);
}

#[tokio::test]
async fn test_fetch_failure_yields_empty_list() {
    let (server, monitor) = setup().await;

    Mock::given(method("GET"))
        .and(path("/trafego/historico"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "erro": "boom" })))
        .mount(&server)
        .await;

    assert!(monitor.fetch_history(HistoryCategory::Traffic).await.is_empty());

    let err = monitor
        .try_fetch_history(HistoryCategory::Traffic)
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Api { status: Some(500), .. }));
}

#[tokio::test]
async fn test_missing_envelope_yields_empty_list() {
    let (server, monitor) = setup().await;

    Mock::given(method("GET"))
        .and(path("/trafego/sessoes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "dados": [] })))
        .mount(&server)
        .await;

    assert!(monitor.fetch_history(HistoryCategory::Sessions).await.is_empty());
    assert!(matches!(
        monitor.try_fetch_history(HistoryCategory::Sessions).await,
        Err(CoreError::MalformedResponse { .. })
    ));
}

#[tokio::test]
async fn test_unreachable_server_yields_empty_list() {
    // Bind then drop a server so the port is closed.
    let uri = {
        let server = MockServer::start().await;
        server.uri()
    };
    let monitor = Monitor::new(MonitorConfig::new(uri.parse().unwrap())).unwrap();

    assert!(monitor.fetch_history(HistoryCategory::Speedtest).await.is_empty());
    assert!(matches!(
        monitor.try_fetch_history(HistoryCategory::Speedtest).await,
        Err(CoreError::ConnectionFailed { .. })
    ));
}

// ── Purge ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_purge_with_matching_confirmation() {
    let (server, monitor) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/deletar/speedtest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "mensagem": "Histórico de speedtest apagado com sucesso!"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let receipt = monitor
        .purge(
            HistoryCategory::Speedtest,
            PurgeConfirmation::confirm(HistoryCategory::Speedtest),
        )
        .await
        .unwrap();
    assert!(receipt.message.is_some());
}

#[tokio::test]
async fn test_purge_mismatch_sends_nothing() {
    let (server, monitor) = setup().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "mensagem": "ok" })))
        .expect(0)
        .mount(&server)
        .await;

    let err = monitor
        .purge(
            HistoryCategory::Devices,
            PurgeConfirmation::confirm(HistoryCategory::Traffic),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::PurgeNotConfirmed { .. }));
}

#[tokio::test]
async fn test_purge_failure_propagates() {
    let (server, monitor) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/deletar/sessoes"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "erro": "locked" })))
        .mount(&server)
        .await;

    let err = monitor
        .purge(
            HistoryCategory::Sessions,
            PurgeConfirmation::confirm(HistoryCategory::Sessions),
        )
        .await
        .unwrap_err();
    assert!(err.to_string().contains("locked"));
}

// ── View + fetch ────────────────────────────────────────────────────

#[tokio::test]
async fn test_view_discards_superseded_fetch() {
    let (server, monitor) = setup().await;

    Mock::given(method("GET"))
        .and(path("/trafego/historico"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "historico": [{ "timestamp": "2024-05-10 11:59:00", "download_mb": 1, "upload_mb": 2 }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/trafego/sessoes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "sessoes": [] })))
        .mount(&server)
        .await;

    let mut view = HistoryView::new(Selection::default(), *monitor.windows());
    let traffic = view.select_category(HistoryCategory::Traffic).unwrap();
    let sessions = view.select_category(HistoryCategory::Sessions).unwrap();

    let traffic_rows = monitor.fetch_history(traffic.category()).await;
    let session_rows = monitor.fetch_history(sessions.category()).await;

    assert!(!view.apply(traffic, traffic_rows));
    assert!(view.apply(sessions, session_rows));
    assert!(view.records().is_empty());
    assert_eq!(view.selection().category, HistoryCategory::Sessions);
}

// ── Live readings ───────────────────────────────────────────────────

#[tokio::test]
async fn test_session_conflict_is_rejected() {
    let (server, monitor) = setup().await;

    Mock::given(method("POST"))
        .and(path("/trafego/sessao/iniciar"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "erro": "Já existe uma sessão ativa" })),
        )
        .mount(&server)
        .await;

    let err = monitor.start_session().await.unwrap_err();
    assert!(matches!(err, CoreError::Rejected { .. }));
}

#[tokio::test]
async fn test_scan_devices_normalizes_rows() {
    let (server, monitor) = setup().await;

    Mock::given(method("GET"))
        .and(path("/devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dispositivos": [{ "ip": "192.168.0.20", "mac": "aa:aa:aa:aa:aa:20", "online": true,
                               "fabricante": "Apple", "tipo": "Smartphone" }]
        })))
        .mount(&server)
        .await;

    let devices = monitor.scan_devices().await.unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].vendor.as_deref(), Some("Apple"));
    assert!(devices[0].online);
}
