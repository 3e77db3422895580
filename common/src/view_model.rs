//! ビューモデル
//!
//! 井戸データ集合（WellSet）を1つだけ保持する状態セルと、その遷移。
//! 遷移は `ReplaceWellSet` のみで、それ以外は `Unknown` として何もしない。

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;

use crate::types::WellRecord;

/// 井戸データ集合（APIレスポンスの順序を保持）
///
/// 中身は不変で、置き換え時は新しい参照になる。
/// 参照が変わったかどうか（`ptr_eq`）が再描画のきっかけになる。
#[derive(Debug, Clone, Default)]
pub struct WellSet(Arc<Vec<WellRecord>>);

impl WellSet {
    pub fn new(records: Vec<WellRecord>) -> Self {
        Self(Arc::new(records))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn records(&self) -> &[WellRecord] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WellRecord> {
        self.0.iter()
    }

    /// 同じ参照かどうか
    pub fn ptr_eq(&self, other: &WellSet) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl From<Vec<WellRecord>> for WellSet {
    fn from(records: Vec<WellRecord>) -> Self {
        Self::new(records)
    }
}

/// 状態遷移
///
/// メッセージ形式 `{"type": "SET_WELLS", "payload": [...]}` からも読み込める。
/// 知らない `type` は `payload` の有無・形に関係なく `Unknown` になる。
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "ActionMessage")]
pub enum WellAction {
    ReplaceWellSet(Vec<WellRecord>),
    Unknown,
}

const SET_WELLS: &str = "SET_WELLS";

#[derive(Deserialize)]
struct ActionMessage {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: Option<Value>,
}

impl TryFrom<ActionMessage> for WellAction {
    type Error = String;

    fn try_from(message: ActionMessage) -> Result<Self, Self::Error> {
        if message.kind != SET_WELLS {
            return Ok(WellAction::Unknown);
        }
        match message.payload {
            Some(Value::Array(items)) => Ok(WellAction::ReplaceWellSet(
                items.into_iter().map(WellRecord::from_value).collect(),
            )),
            _ => Err(format!("{} の payload は配列である必要があります", SET_WELLS)),
        }
    }
}

/// 遷移を適用した次の状態を返す
pub fn reduce(state: &WellSet, action: WellAction) -> WellSet {
    match action {
        WellAction::ReplaceWellSet(records) => WellSet::new(records),
        WellAction::Unknown => state.clone(),
    }
}

/// 遷移を適用し、参照が変わったときだけ次の状態を返す
///
/// 状態コンテナ（CLIの `WellStore`、ブラウザのシグナル）はこれで更新を判定する。
pub fn apply(state: &WellSet, action: WellAction) -> Option<WellSet> {
    let next = reduce(state, action);
    (!next.ptr_eq(state)).then_some(next)
}

/// 状態コンテナ
///
/// トップレベルのビューが所有し、参照で地図ビューへ渡す。
#[derive(Debug, Default)]
pub struct WellStore {
    wells: WellSet,
    revision: u64,
}

impl WellStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wells(&self) -> &WellSet {
        &self.wells
    }

    /// 参照が変わった回数
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// 遷移を適用する。参照が変わったら true
    pub fn dispatch(&mut self, action: WellAction) -> bool {
        let Some(next) = apply(&self.wells, action) else {
            return false;
        };
        self.wells = next;
        self.revision += 1;
        true
    }
}

/// データ読み込みの状態（画面表示用）
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded { received: usize, placed: usize },
    Failed(String),
}

impl LoadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStatus::Idle => "idle",
            LoadStatus::Loading => "loading",
            LoadStatus::Loaded { .. } => "loaded",
            LoadStatus::Failed(_) => "failed",
        }
    }
}
