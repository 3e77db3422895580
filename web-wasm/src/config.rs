//! ビューア設定の読み込み
//!
//! index.html に埋め込んだ `<script id="well-map-config" type="application/json">`
//! から読む。無い・壊れている場合はデフォルト設定を使う。

use well_map_common::ViewerConfig;

const CONFIG_ELEMENT_ID: &str = "well-map-config";

pub fn load_viewer_config() -> ViewerConfig {
    let text = gloo::utils::document()
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content());
    parse_embedded_config(text.as_deref())
}

pub fn parse_embedded_config(text: Option<&str>) -> ViewerConfig {
    let Some(json) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return ViewerConfig::default();
    };

    ViewerConfig::from_json(json).unwrap_or_else(|e| {
        log::warn!("設定の読み込みに失敗したためデフォルトを使用: {}", e);
        ViewerConfig::default()
    })
}
