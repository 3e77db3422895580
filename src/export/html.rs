//! 単体HTML出力
//!
//! ブラウザ版と同じ Leaflet 設定で、導出済みマーカーを埋め込んだ1ファイルのページを作る。

use serde::Serialize;
use std::path::Path;
use well_map_common::{popup_html, MarkerLayer, ViewerConfig};

use crate::error::Result;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageMarker {
    lat: f64,
    lng: f64,
    popup_html: String,
}

/// `<script>` 内に埋め込めるよう `</` をエスケープ
fn script_safe(json: String) -> String {
    json.replace("</", "<\\/")
}

fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

pub fn render_html(layer: &MarkerLayer, viewer: &ViewerConfig, title: &str) -> Result<String> {
    let markers: Vec<PageMarker> = layer
        .markers
        .iter()
        .map(|m| PageMarker {
            lat: m.position.lat,
            lng: m.position.lng,
            popup_html: popup_html(m),
        })
        .collect();

    let markers_json = script_safe(serde_json::to_string(&markers)?);
    let options_json = script_safe(serde_json::to_string(viewer)?);

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <title>{title}</title>
  <link rel="stylesheet" href="https://unpkg.com/leaflet@1.9.4/dist/leaflet.css" crossorigin="" />
  <script src="https://unpkg.com/leaflet@1.9.4/dist/leaflet.js" crossorigin=""></script>
  <style>html, body, #well-map {{ margin: 0; height: 100%; }}</style>
</head>
<body>
  <div id="well-map"></div>
  <script>
    const options = {options_json};
    const markers = {markers_json};
    const map = L.map("well-map", {{ scrollWheelZoom: options.scrollWheelZoom }})
      .setView(options.center, options.zoom);
    L.tileLayer(options.tiles.urlTemplate, {{
      attribution: options.tiles.attribution,
      maxZoom: options.tiles.maxZoom,
    }}).addTo(map);
    for (const m of markers) {{
      L.marker([m.lat, m.lng]).bindPopup(m.popupHtml).addTo(map);
    }}
  </script>
</body>
</html>
"#,
        title = escape_text(title),
        options_json = options_json,
        markers_json = markers_json,
    ))
}

pub fn write_html(layer: &MarkerLayer, viewer: &ViewerConfig, title: &str, output_path: &Path) -> Result<()> {
    let content = render_html(layer, viewer, title)?;
    std::fs::write(output_path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use well_map_common::{derive_markers, WellRecord, WellSet};

    #[test]
    fn test_render_html_embeds_markers_and_viewport() {
        let wells = WellSet::new(vec![WellRecord {
            latitude: Some(json!("48.21")),
            longitude: Some(json!("-103.6")),
            name: Some(json!("Well A")),
            ..Default::default()
        }]);
        let html = render_html(&derive_markers(&wells), &ViewerConfig::default(), "Bakken").expect("HTML生成失敗");

        assert!(html.contains("<title>Bakken</title>"));
        assert!(html.contains(r#""lat":48.21,"lng":-103.6"#));
        assert!(html.contains(r#""scrollWheelZoom":false"#));
        assert!(html.contains(r#""center":[47.8,-103.4]"#));
        // ポップアップHTML内の閉じタグは </ がエスケープされている
        assert!(html.contains(r#"<b>Well Name:<\/b> Well A"#));
        assert!(!html.contains("Name:</b>"));
    }

    #[test]
    fn test_script_safe() {
        assert_eq!(script_safe(r#"{"a":"</script>"}"#.to_string()), r#"{"a":"<\/script>"}"#);
    }

    #[test]
    fn test_title_is_escaped() {
        let html = render_html(&MarkerLayer::default(), &ViewerConfig::world(), "<Wells & Co>").expect("HTML生成失敗");
        assert!(html.contains("<title>&lt;Wells &amp; Co&gt;</title>"));
    }
}
