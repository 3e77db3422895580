//! JavaScript Bridge バインディング
//!
//! Rust WASM から Leaflet を操作するためのバインディング定義。
//! 地図インスタンスはJS側で保持し、Rust側は数値IDだけを持つ。

use serde::Serialize;
use wasm_bindgen::prelude::*;
use well_map_common::{popup_html, Marker};

// ============================================
// データ型定義
// ============================================

/// JavaScript側に渡すマーカー
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsMarker {
    pub index: usize,
    pub lat: f64,
    pub lng: f64,
    pub popup_html: String,
}

impl From<&Marker> for JsMarker {
    fn from(marker: &Marker) -> Self {
        Self {
            index: marker.index,
            lat: marker.position.lat,
            lng: marker.position.lng,
            popup_html: popup_html(marker),
        }
    }
}

// ============================================
// JavaScript関数のextern宣言
// ============================================

#[wasm_bindgen(module = "/js/leaflet-bridge.js")]
extern "C" {
    /// 地図を生成してIDを返す
    ///
    /// # Arguments
    /// * `container_id` - 地図を描画する要素のID
    /// * `options_json` - ViewerConfigのJSON文字列
    #[wasm_bindgen(js_name = "createMap", catch)]
    pub fn create_map_js(container_id: &str, options_json: &str) -> Result<u32, JsValue>;

    /// マーカーを全件置き換え、置いた件数を返す
    #[wasm_bindgen(js_name = "replaceMarkers", catch)]
    pub fn replace_markers_js(map_id: u32, markers_json: &str) -> Result<u32, JsValue>;

    /// 地図を破棄
    #[wasm_bindgen(js_name = "destroyMap")]
    pub fn destroy_map_js(map_id: u32);
}
