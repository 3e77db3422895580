//! メインアプリケーションコンポーネント

use leptos::prelude::*;
use well_map_common::{
    apply, load_into, LoadOutcome, LoadScope, LoadStatus, LogDiagnostics, WellAction, WellSet,
};

use crate::api::FetchSource;
use crate::components::{header::Header, map_view::MapView, status_bar::StatusBar};
use crate::config::load_viewer_config;

/// アプリケーションの状態
///
/// App が所有し、context で子コンポーネントへ渡す。
#[derive(Clone, Copy)]
pub struct WellState {
    pub wells: RwSignal<WellSet>,
    pub status: RwSignal<LoadStatus>,
}

impl WellState {
    pub fn new() -> Self {
        Self {
            wells: RwSignal::new(WellSet::default()),
            status: RwSignal::new(LoadStatus::Idle),
        }
    }

    /// 遷移を適用する。参照が変わらなければ通知しない
    pub fn dispatch(&self, action: WellAction) -> bool {
        let Some(next) = apply(&self.wells.get_untracked(), action) else {
            return false;
        };
        self.wells.set(next);
        true
    }
}

impl Default for WellState {
    fn default() -> Self {
        Self::new()
    }
}

/// メインアプリケーションコンポーネント
#[component]
pub fn App() -> impl IntoView {
    let config = load_viewer_config();
    let state = WellState::new();
    provide_context(state);

    // 破棄後に届いた結果は捨てる
    let scope = LoadScope::new();
    on_cleanup({
        let scope = scope.clone();
        move || scope.cancel()
    });

    start_load(state, FetchSource::new(config.endpoint.clone()), scope);

    view! {
        <div class="app">
            <Header />
            <StatusBar status=state.status />
            <MapView config=config />
        </div>
    }
}

/// マウント時に1回だけ読み込む
fn start_load(state: WellState, source: FetchSource, scope: LoadScope) {
    state.status.set(LoadStatus::Loading);

    wasm_bindgen_futures::spawn_local(async move {
        let started = js_sys::Date::now();
        let outcome = load_into(&source, &scope, &LogDiagnostics, |action| {
            state.dispatch(action);
        })
        .await;

        if let LoadOutcome::Applied { received, .. } = outcome {
            log::info!(
                "井戸データ {}件を取得 ({:.0}ms)",
                received,
                js_sys::Date::now() - started
            );
        }
        if let Some(status) = outcome.status() {
            state.status.set(status);
        }
    });
}
