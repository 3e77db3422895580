//! 地図ビューコンポーネント
//!
//! マウント後に Leaflet の地図を1回だけ生成し、
//! WellSet の参照が変わるたびにマーカーを全件作り直す。

use std::sync::{Arc, Mutex};

use leptos::html::Div;
use leptos::prelude::*;
use well_map_common::{MarkerSync, ViewerConfig};

use crate::app::WellState;
use crate::map;

const MAP_CONTAINER_ID: &str = "well-map";

#[component]
pub fn MapView(config: ViewerConfig) -> impl IntoView {
    let state = expect_context::<WellState>();
    let container = NodeRef::<Div>::new();
    let map_id = RwSignal::new(None::<u32>);
    let sync = Arc::new(Mutex::new(MarkerSync::new()));

    // 地図の生成
    Effect::new(move |_| {
        if container.get().is_none() || map_id.get_untracked().is_some() {
            return;
        }
        match map::create_map(MAP_CONTAINER_ID, &config) {
            Ok(id) => map_id.set(Some(id)),
            Err(e) => log::error!("地図の生成に失敗: {}", e),
        }
    });

    // マーカーの再描画
    Effect::new({
        let sync = Arc::clone(&sync);
        move |_| {
            let wells = state.wells.get();
            let Some(id) = map_id.get() else {
                return;
            };

            let Some(layer) = sync.lock().ok().and_then(|mut s| s.next_layer(id, &wells)) else {
                return;
            };
            match map::replace_markers(id, &layer) {
                Ok(placed) => log::debug!("マーカー {}件を描画（スキップ {}件）", placed, layer.skipped.len()),
                Err(e) => log::error!("マーカーの描画に失敗: {}", e),
            }
        }
    });

    on_cleanup(move || {
        if let Some(id) = map_id.get_untracked() {
            map::destroy_map(id);
        }
        if let Ok(mut sync) = sync.lock() {
            sync.reset();
        }
    });

    view! {
        <div id=MAP_CONTAINER_ID node_ref=container class="map-container"></div>
    }
}
