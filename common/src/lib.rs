//! Well Map Common Library
//!
//! CLIとWeb(WASM)で共有される型・ビューモデル・データローダー

pub mod error;
pub mod types;
pub mod viewport;
pub mod view_model;
pub mod marker;
pub mod loader;

pub use error::{Error, Result};
pub use types::{coordinate, display_value, WellRecord};
pub use viewport::{LatLng, TileLayerConfig, ViewerConfig, ViewportPreset, DEFAULT_ENDPOINT};
pub use view_model::{apply, reduce, LoadStatus, WellAction, WellSet, WellStore};
pub use marker::{
    count_unplaceable, derive_markers, popup_html, popup_lines, Marker, MarkerLayer, MarkerSync,
    PopupField, PopupLine, FALLBACK_LABEL,
};
pub use loader::{
    fetch_wells, load_into, parse_wells, DiagnosticEvent, Diagnostics, HttpReply, LoadOutcome,
    LoadScope, LogDiagnostics, RecordingDiagnostics, WellSource,
};
