//! Leaflet 地図操作

pub mod js_bindings;

use js_bindings::{create_map_js, destroy_map_js, replace_markers_js, JsMarker};
use well_map_common::{MarkerLayer, ViewerConfig};

/// 地図を生成する
pub fn create_map(container_id: &str, config: &ViewerConfig) -> Result<u32, String> {
    let options_json = serde_json::to_string(config)
        .map_err(|e| format!("Options serialization failed: {}", e))?;

    create_map_js(container_id, &options_json)
        .map_err(|e| format!("Map creation failed: {:?}", e))
}

/// マーカーを全件置き換える
pub fn replace_markers(map_id: u32, layer: &MarkerLayer) -> Result<u32, String> {
    let markers: Vec<JsMarker> = layer.markers.iter().map(JsMarker::from).collect();

    let markers_json = serde_json::to_string(&markers)
        .map_err(|e| format!("JSON serialization failed: {}", e))?;

    replace_markers_js(map_id, &markers_json)
        .map_err(|e| format!("Marker update failed: {:?}", e))
}

pub fn destroy_map(map_id: u32) {
    destroy_map_js(map_id);
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use serde_json::json;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_test::*;
    use well_map_common::{derive_markers, WellRecord, WellSet};

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen(module = "/js/leaflet-stub.js")]
    extern "C" {
        #[wasm_bindgen(js_name = "installLeafletStub")]
        fn install_leaflet_stub();
    }

    fn mount_container(id: &str) {
        let document = gloo::utils::document();
        let div = document.create_element("div").expect("div作成失敗");
        div.set_id(id);
        gloo::utils::body().append_child(&div).expect("追加失敗");
    }

    fn wells(count: usize) -> WellSet {
        (0..count)
            .map(|i| WellRecord {
                latitude: Some(json!(48.0 + i as f64 * 0.01)),
                longitude: Some(json!(-103.0)),
                name: Some(json!(format!("Well {}", i))),
                ..Default::default()
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[wasm_bindgen_test]
    fn wasm_replace_markers_does_not_accumulate() {
        install_leaflet_stub();
        mount_container("wasm-test-map");

        let map_id = create_map("wasm-test-map", &ViewerConfig::default()).expect("地図生成失敗");

        let first = replace_markers(map_id, &derive_markers(&wells(3))).expect("描画失敗");
        assert_eq!(first, 3);

        // 2回目は前回分を消してから置く
        let second = replace_markers(map_id, &derive_markers(&wells(1))).expect("描画失敗");
        assert_eq!(second, 1);

        let cleared = replace_markers(map_id, &derive_markers(&WellSet::default())).expect("描画失敗");
        assert_eq!(cleared, 0);

        destroy_map(map_id);
        assert!(replace_markers(map_id, &derive_markers(&wells(1))).is_err());
    }
}
