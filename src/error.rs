use thiserror::Error;

#[derive(Error, Debug)]
pub enum WellMapError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("井戸データの読み込みに失敗: {0}")]
    Load(#[from] well_map_common::Error),

    #[error("読み込みがキャンセルされました")]
    Cancelled,

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WellMapError>;
