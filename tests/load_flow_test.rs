//! 読み込みフローの結合テスト
//!
//! ローカルに1回だけ応答するHTTPサーバーを立て、
//! 取得 → 状態置換 → マーカー導出までを検証

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use well_map::cli::SourceArgs;
use well_map::config::Config;
use well_map::error::WellMapError;
use well_map::source::HttpSource;
use well_map::wells::load_store;
use well_map_common::{
    derive_markers, load_into, Error, LoadOutcome, LoadScope, PopupField, RecordingDiagnostics,
    WellStore,
};

/// 1回だけ応答するサーバーを起動し、エンドポイントURLを返す
async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind失敗");
    let addr = listener.local_addr().expect("アドレス取得失敗");

    tokio::spawn(async move {
        if let Ok((mut socket, _)) = listener.accept().await {
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });

    format!("http://{}/api/wells", addr)
}

/// 接続できないエンドポイント
const UNREACHABLE: &str = "http://127.0.0.1:1/api/wells";

async fn load(endpoint: &str) -> (LoadOutcome, WellStore, RecordingDiagnostics) {
    let source = HttpSource::new(endpoint, 5).expect("クライアント生成失敗");
    let diagnostics = RecordingDiagnostics::new();
    let mut store = WellStore::new();
    let outcome = load_into(&source, &LoadScope::new(), &diagnostics, |action| {
        store.dispatch(action);
    })
    .await;
    (outcome, store, diagnostics)
}

/// 1件のレスポンス → マーカー1件、ポップアップにフォールバック表示
#[tokio::test]
async fn test_single_well_end_to_end() {
    let endpoint = serve_once(
        "200 OK",
        r#"[{"LATITUDE":"48.21","LONGITUDE":"-103.6","WELL_NAME":"Well A"}]"#,
    )
    .await;

    let (outcome, store, diagnostics) = load(&endpoint).await;
    assert!(outcome.is_applied());
    assert!(diagnostics.events().is_empty());

    let layer = derive_markers(store.wells());
    assert_eq!(layer.len(), 1);

    let marker = &layer.markers[0];
    assert_eq!(marker.position.lat, 48.21);
    assert_eq!(marker.position.lng, -103.6);

    let lines: Vec<String> = marker.popup.iter().map(|l| l.to_string()).collect();
    assert!(lines.contains(&"Well Name: Well A".to_string()));
    assert!(lines.contains(&"Status: Unknown".to_string()));
    assert_eq!(marker.popup_line(PopupField::Status).map(|l| l.value.as_str()), Some("Unknown"));
}

/// 空配列 → マーカー0件、エラーなし
#[tokio::test]
async fn test_empty_response() {
    let endpoint = serve_once("200 OK", "[]").await;

    let (outcome, store, diagnostics) = load(&endpoint).await;
    assert!(matches!(outcome, LoadOutcome::Applied { received: 0, unplaceable: 0 }));
    assert!(derive_markers(store.wells()).is_empty());
    assert!(diagnostics.events().is_empty());
}

/// 通信エラー → マーカー0件、状態変更なし、エラーを記録
#[tokio::test]
async fn test_network_error() {
    let (outcome, store, diagnostics) = load(UNREACHABLE).await;

    assert!(matches!(outcome, LoadOutcome::Failed(Error::Network(_))));
    assert!(store.wells().is_empty());
    assert_eq!(store.revision(), 0);
    assert!(derive_markers(store.wells()).is_empty());
    assert_eq!(diagnostics.errors(), 1);
}

/// 2xx以外 → 失敗
#[tokio::test]
async fn test_server_error_status() {
    let endpoint = serve_once("500 Internal Server Error", r#"{"error":"boom"}"#).await;

    let (outcome, store, diagnostics) = load(&endpoint).await;
    assert!(matches!(outcome, LoadOutcome::Failed(Error::Status { status: 500, .. })));
    assert!(store.wells().is_empty());
    assert_eq!(diagnostics.errors(), 1);
}

/// JSONでない本文 → 失敗
#[tokio::test]
async fn test_non_json_body() {
    let endpoint = serve_once("200 OK", "<html>maintenance</html>").await;

    let (outcome, store, _) = load(&endpoint).await;
    assert!(matches!(outcome, LoadOutcome::Failed(Error::Json(_))));
    assert!(store.wells().is_empty());
}

/// 座標が不正なレコードはスキップして件数を記録
#[tokio::test]
async fn test_invalid_coordinates_are_counted() {
    let endpoint = serve_once(
        "200 OK",
        r#"[{"LATITUDE":"not-a-number","LONGITUDE":"-103.6","WELL_NAME":"Bad"},
            {"LATITUDE":"48.21","LONGITUDE":"-103.6","WELL_NAME":"Good"}]"#,
    )
    .await;

    let (outcome, store, diagnostics) = load(&endpoint).await;
    assert!(matches!(outcome, LoadOutcome::Applied { received: 2, unplaceable: 1 }));
    assert_eq!(store.wells().len(), 2);
    assert_eq!(diagnostics.events().len(), 1);
    assert_eq!(diagnostics.errors(), 0);

    let layer = derive_markers(store.wells());
    assert_eq!(layer.len(), 1);
    assert_eq!(layer.skipped, vec![0]);
}

/// CLIの読み込みは失敗をエラーとして返す
#[tokio::test]
async fn test_load_store_network_error() {
    let args = SourceArgs {
        endpoint: Some(UNREACHABLE.to_string()),
        input: None,
    };
    let result = load_store(&args, &Config::default()).await;
    assert!(matches!(result, Err(WellMapError::Load(Error::Network(_)))));
}

#[tokio::test]
async fn test_load_store_from_endpoint() {
    let endpoint = serve_once(
        "200 OK",
        r#"[{"LATITUDE":"48.1","LONGITUDE":"-103.2"},{"LATITUDE":"47.9","LONGITUDE":"-102.8"}]"#,
    )
    .await;
    let args = SourceArgs {
        endpoint: Some(endpoint),
        input: None,
    };

    let store = load_store(&args, &Config::default()).await.expect("読み込み失敗");
    assert_eq!(store.wells().len(), 2);
    assert_eq!(store.revision(), 1);
}
