//! データローダー
//!
//! APIから井戸データを1回だけ取得し、ビューモデルへ `ReplaceWellSet` を送る。
//! 通信部分は `WellSource` として差し替え可能（ブラウザは fetch、CLIは reqwest）。
//!
//! - 失敗時: `Diagnostics` に記録し、状態は変更しない
//! - リトライ・ポーリングはしない
//! - `LoadScope` がキャンセル済みなら、解決後の結果は捨てる

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::Value;

use crate::error::{Error, Result};
use crate::marker::count_unplaceable;
use crate::types::WellRecord;
use crate::view_model::{LoadStatus, WellAction};

/// HTTPレスポンス（ステータスと本文）
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// 井戸データの取得元
#[allow(async_fn_in_trait)]
pub trait WellSource {
    fn endpoint(&self) -> &str;

    /// GETを1回発行する。通信自体の失敗は `Error::Network`
    async fn fetch(&self) -> Result<HttpReply>;
}

/// レスポンス本文をパースする
///
/// 最上位がJSON配列であることだけを確認し、各要素はそのまま WellRecord にする。
/// フィールドの型は検証しない。同じ項目が大文字・camelCase の両方で来ても捨てない。
/// オブジェクトでない要素は空のレコードになる（マーカーは置かれない）。
pub fn parse_wells(body: &str) -> Result<Vec<WellRecord>> {
    let value: Value = serde_json::from_str(body)?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(_) => return Err(Error::NotAnArray("object")),
        Value::String(_) => return Err(Error::NotAnArray("string")),
        Value::Number(_) => return Err(Error::NotAnArray("number")),
        Value::Bool(_) => return Err(Error::NotAnArray("boolean")),
        Value::Null => return Err(Error::NotAnArray("null")),
    };

    Ok(items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            WellRecord::from_object(item).unwrap_or_else(|| {
                log::warn!("{}件目がオブジェクトではないため空のレコードとして扱う", index);
                WellRecord::default()
            })
        })
        .collect())
}

/// 取得してパースする（2xx以外は失敗）
pub async fn fetch_wells<S: WellSource>(source: &S) -> Result<Vec<WellRecord>> {
    let reply = source.fetch().await?;
    if !reply.is_success() {
        return Err(Error::Status {
            status: reply.status,
            endpoint: source.endpoint().to_string(),
        });
    }
    parse_wells(&reply.body)
}

/// キャンセル可能な読み込みスコープ
///
/// ビューの破棄時に `cancel()` すると、その後に届いた結果は反映されない。
#[derive(Debug, Clone, Default)]
pub struct LoadScope {
    cancelled: Arc<AtomicBool>,
}

impl LoadScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// 観測用の出力先
pub trait Diagnostics {
    fn load_failed(&self, endpoint: &str, error: &Error);
    fn records_skipped(&self, endpoint: &str, skipped: usize, total: usize);
}

/// `log` クレートへ出力する
#[derive(Debug, Clone, Copy, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn load_failed(&self, endpoint: &str, error: &Error) {
        log::error!("井戸データの取得に失敗: {} ({})", endpoint, error);
    }

    fn records_skipped(&self, endpoint: &str, skipped: usize, total: usize) {
        log::warn!(
            "座標が不正なため {}/{} 件をスキップ: {}",
            skipped,
            total,
            endpoint
        );
    }
}

/// 記録されたイベント
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosticEvent {
    LoadFailed { endpoint: String, message: String },
    RecordsSkipped { endpoint: String, skipped: usize, total: usize },
}

/// イベントをメモリに溜める（テスト・CLIの集計用）
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    pub fn errors(&self) -> usize {
        self.events()
            .iter()
            .filter(|e| matches!(e, DiagnosticEvent::LoadFailed { .. }))
            .count()
    }

    fn push(&self, event: DiagnosticEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Diagnostics for RecordingDiagnostics {
    fn load_failed(&self, endpoint: &str, error: &Error) {
        self.push(DiagnosticEvent::LoadFailed {
            endpoint: endpoint.to_string(),
            message: error.to_string(),
        });
    }

    fn records_skipped(&self, endpoint: &str, skipped: usize, total: usize) {
        self.push(DiagnosticEvent::RecordsSkipped {
            endpoint: endpoint.to_string(),
            skipped,
            total,
        });
    }
}

/// 読み込み結果
#[derive(Debug)]
pub enum LoadOutcome {
    /// `ReplaceWellSet` を送った
    Applied { received: usize, unplaceable: usize },
    /// 取得・パースに失敗した（状態は変更なし）
    Failed(Error),
    /// スコープがキャンセル済みだったため結果を捨てた
    Cancelled,
}

impl LoadOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, LoadOutcome::Applied { .. })
    }

    /// 画面に出す読み込み状態。キャンセル時は None（もう表示先がない）
    pub fn status(&self) -> Option<LoadStatus> {
        match self {
            LoadOutcome::Applied {
                received,
                unplaceable,
            } => Some(LoadStatus::Loaded {
                received: *received,
                placed: received.saturating_sub(*unplaceable),
            }),
            LoadOutcome::Failed(error) => Some(LoadStatus::Failed(error.to_string())),
            LoadOutcome::Cancelled => None,
        }
    }
}

/// 1回読み込んで、成功したら `dispatch` に `ReplaceWellSet` を渡す
pub async fn load_into<S, D, F>(
    source: &S,
    scope: &LoadScope,
    diagnostics: &D,
    dispatch: F,
) -> LoadOutcome
where
    S: WellSource,
    D: Diagnostics + ?Sized,
    F: FnOnce(WellAction),
{
    let result = fetch_wells(source).await;

    if scope.is_cancelled() {
        log::debug!("読み込みスコープはキャンセル済み: {}", source.endpoint());
        return LoadOutcome::Cancelled;
    }

    match result {
        Ok(records) => {
            let received = records.len();
            let unplaceable = count_unplaceable(&records);
            if unplaceable > 0 {
                diagnostics.records_skipped(source.endpoint(), unplaceable, received);
            }
            dispatch(WellAction::ReplaceWellSet(records));
            LoadOutcome::Applied {
                received,
                unplaceable,
            }
        }
        Err(error) => {
            diagnostics.load_failed(source.endpoint(), &error);
            LoadOutcome::Failed(error)
        }
    }
}
