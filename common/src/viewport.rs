//! 地図ビューア設定
//!
//! APIエンドポイント・初期表示位置・ズーム・タイルレイヤーをまとめて保持する。
//! CLIとWeb(WASM)で同じ設定形式を使う。

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// デフォルトのAPIエンドポイント
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/wells";

/// 緯度経度（10進度）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// 有限値かつ緯度 [-90, 90]・経度 [-180, 180] の範囲内か
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl From<[f64; 2]> for LatLng {
    fn from([lat, lng]: [f64; 2]) -> Self {
        Self { lat, lng }
    }
}

impl From<LatLng> for [f64; 2] {
    fn from(p: LatLng) -> Self {
        [p.lat, p.lng]
    }
}

/// ベースマップのタイルレイヤー
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TileLayerConfig {
    pub url_template: String,
    pub attribution: String,
    pub max_zoom: u8,
}

impl Default for TileLayerConfig {
    fn default() -> Self {
        Self {
            url_template: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".into(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors".into(),
            max_zoom: 19,
        }
    }
}

/// 初期表示位置のプリセット
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViewportPreset {
    /// 油田地帯（ノースダコタ州西部）
    #[default]
    WellField,
    /// 世界全体
    World,
}

impl ViewportPreset {
    pub fn center(&self) -> LatLng {
        match self {
            ViewportPreset::WellField => LatLng::new(47.8, -103.4),
            ViewportPreset::World => LatLng::new(20.0, 0.0),
        }
    }

    pub fn zoom(&self) -> u8 {
        match self {
            ViewportPreset::WellField => 8,
            ViewportPreset::World => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewportPreset::WellField => "well-field",
            ViewportPreset::World => "world",
        }
    }
}

impl std::str::FromStr for ViewportPreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "well-field" => Ok(ViewportPreset::WellField),
            "world" => Ok(ViewportPreset::World),
            other => Err(Error::Config(format!("不明なプリセット: {}", other))),
        }
    }
}

/// ビューア設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerConfig {
    pub endpoint: String,
    pub center: LatLng,
    pub zoom: u8,
    /// スクロールでのズーム（ページスクロール中の誤操作防止のため既定は無効）
    pub scroll_wheel_zoom: bool,
    pub tiles: TileLayerConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self::with_preset(ViewportPreset::WellField)
    }
}

impl ViewerConfig {
    pub fn with_preset(preset: ViewportPreset) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            center: preset.center(),
            zoom: preset.zoom(),
            scroll_wheel_zoom: false,
            tiles: TileLayerConfig::default(),
        }
    }

    pub fn world() -> Self {
        Self::with_preset(ViewportPreset::World)
    }

    /// JSON文字列から読み込む（欠けているキーはデフォルト値）
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ViewerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::Config("エンドポイントが空です".into()));
        }
        if !self.center.is_valid() {
            return Err(Error::Config(format!(
                "中心座標が不正です: ({}, {})",
                self.center.lat, self.center.lng
            )));
        }
        if self.zoom > self.tiles.max_zoom {
            return Err(Error::Config(format!(
                "ズーム {} がタイルの最大ズーム {} を超えています",
                self.zoom, self.tiles.max_zoom
            )));
        }
        Ok(())
    }
}
