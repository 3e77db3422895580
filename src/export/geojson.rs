//! GeoJSON出力
//!
//! マーカー1件を Point フィーチャー1件にする。
//! 座標は GeoJSON の規約どおり `[経度, 緯度]` の順。

use serde_json::{json, Map, Value};
use std::path::Path;
use well_map_common::{Marker, MarkerLayer};

use crate::error::Result;

pub fn to_geojson(layer: &MarkerLayer) -> Value {
    let features: Vec<Value> = layer.markers.iter().map(feature).collect();
    json!({
        "type": "FeatureCollection",
        "features": features,
    })
}

fn feature(marker: &Marker) -> Value {
    let mut properties = Map::new();
    properties.insert("index".into(), json!(marker.index));
    for line in &marker.popup {
        properties.insert(line.field.key().into(), Value::String(line.value.clone()));
    }

    json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": [marker.position.lng, marker.position.lat],
        },
        "properties": properties,
    })
}

pub fn write_geojson(layer: &MarkerLayer, output_path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(&to_geojson(layer))?;
    std::fs::write(output_path, content)?;
    Ok(())
}
