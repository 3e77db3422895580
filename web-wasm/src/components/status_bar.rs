//! 読み込み状態の表示

use leptos::prelude::*;
use well_map_common::LoadStatus;

#[component]
pub fn StatusBar(status: RwSignal<LoadStatus>) -> impl IntoView {
    view! {
        <div class=move || format!("status-bar {}", status.get().as_str())>
            {move || status_text(&status.get())}
        </div>
    }
}

pub fn status_text(status: &LoadStatus) -> String {
    match status {
        LoadStatus::Idle => String::new(),
        LoadStatus::Loading => "Loading wells...".to_string(),
        LoadStatus::Loaded { received, placed } if placed == received => {
            format!("{} wells", received)
        }
        LoadStatus::Loaded { received, placed } => format!(
            "{} of {} wells shown ({} with invalid coordinates)",
            placed,
            received,
            received - placed
        ),
        LoadStatus::Failed(message) => format!("Could not load wells: {}", message),
    }
}
