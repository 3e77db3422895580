//! 井戸データの読み込み（CLI用）

use std::time::Instant;

use well_map_common::{load_into, LoadOutcome, LoadScope, LogDiagnostics, WellStore};

use crate::cli::SourceArgs;
use crate::config::Config;
use crate::error::{Result, WellMapError};
use crate::source::{FileSource, HttpSource};

/// 取得元の表示名
pub fn source_label(args: &SourceArgs, config: &Config) -> String {
    match (&args.input, &args.endpoint) {
        (Some(path), _) => path.display().to_string(),
        (None, Some(endpoint)) => endpoint.clone(),
        (None, None) => config.endpoint(),
    }
}

/// 1回だけ読み込んで状態コンテナを返す。失敗はエラーとして返す
pub async fn load_store(args: &SourceArgs, config: &Config) -> Result<WellStore> {
    let mut store = WellStore::new();
    let scope = LoadScope::new();
    let started = Instant::now();

    let outcome = match &args.input {
        Some(path) => {
            if !path.exists() {
                return Err(WellMapError::FileNotFound(path.display().to_string()));
            }
            let source = FileSource::new(path);
            load_into(&source, &scope, &LogDiagnostics, |action| {
                store.dispatch(action);
            })
            .await
        }
        None => {
            let endpoint = args.endpoint.clone().unwrap_or_else(|| config.endpoint());
            let source = HttpSource::new(endpoint, config.timeout_seconds)?;
            load_into(&source, &scope, &LogDiagnostics, |action| {
                store.dispatch(action);
            })
            .await
        }
    };

    tracing::debug!(elapsed_ms = started.elapsed().as_millis() as u64, "load finished");

    match outcome {
        LoadOutcome::Applied { .. } => Ok(store),
        LoadOutcome::Failed(e) => Err(e.into()),
        LoadOutcome::Cancelled => Err(WellMapError::Cancelled),
    }
}
