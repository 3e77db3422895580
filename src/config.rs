use crate::error::{Result, WellMapError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use well_map_common::{ViewerConfig, ViewportPreset, DEFAULT_ENDPOINT};

/// エンドポイントを上書きする環境変数
pub const ENDPOINT_ENV: &str = "WELL_MAP_ENDPOINT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub endpoint: Option<String>,
    pub preset: ViewportPreset,
    pub scroll_wheel_zoom: bool,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            preset: ViewportPreset::WellField,
            scroll_wheel_zoom: false,
            timeout_seconds: 30,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| WellMapError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("well-map").join("config.json"))
    }

    /// エンドポイント（環境変数 > 設定ファイル > デフォルト）
    pub fn endpoint(&self) -> String {
        if let Ok(endpoint) = std::env::var(ENDPOINT_ENV) {
            if !endpoint.trim().is_empty() {
                return endpoint;
            }
        }

        self.endpoint
            .clone()
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }

    /// 地図ビューア設定に変換
    pub fn viewer_config(&self, preset: Option<ViewportPreset>) -> Result<ViewerConfig> {
        let mut viewer = ViewerConfig::with_preset(preset.unwrap_or(self.preset));
        viewer.endpoint = self.endpoint();
        viewer.scroll_wheel_zoom = self.scroll_wheel_zoom;
        viewer
            .validate()
            .map_err(|e| WellMapError::Config(e.to_string()))?;
        Ok(viewer)
    }
}
