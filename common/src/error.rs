//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Could not read {path}: {message}")]
    Read { path: String, message: String },

    #[error("HTTP status {status} from {endpoint}")]
    Status { status: u16, endpoint: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON array of wells, got {0}")]
    NotAnArray(&'static str),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
