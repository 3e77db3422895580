//! マーカー導出
//!
//! WellSet から地図に置くマーカー一覧を毎回まるごと作り直す。
//! 座標が不正なレコードはマーカーにせず、インデックスを `skipped` に残す。

use serde_json::Value;

use crate::types::{display_value, WellRecord};
use crate::view_model::WellSet;
use crate::viewport::LatLng;

/// 値がないときの表示
pub const FALLBACK_LABEL: &str = "Unknown";

/// ポップアップに出す項目（表示順）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupField {
    Name,
    Status,
    Type,
    ApiNumber,
    Operator,
    ClosestCity,
    OilProduced,
    GasProduced,
}

impl PopupField {
    pub const ALL: [PopupField; 8] = [
        PopupField::Name,
        PopupField::Status,
        PopupField::Type,
        PopupField::ApiNumber,
        PopupField::Operator,
        PopupField::ClosestCity,
        PopupField::OilProduced,
        PopupField::GasProduced,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PopupField::Name => "Well Name",
            PopupField::Status => "Status",
            PopupField::Type => "Type",
            PopupField::ApiNumber => "API Number",
            PopupField::Operator => "Operator",
            PopupField::ClosestCity => "Closest City",
            PopupField::OilProduced => "Oil Produced",
            PopupField::GasProduced => "Gas Produced",
        }
    }

    /// GeoJSONプロパティなどで使うキー
    pub fn key(&self) -> &'static str {
        match self {
            PopupField::Name => "name",
            PopupField::Status => "status",
            PopupField::Type => "type",
            PopupField::ApiNumber => "apiNumber",
            PopupField::Operator => "operator",
            PopupField::ClosestCity => "closestCity",
            PopupField::OilProduced => "oilProduced",
            PopupField::GasProduced => "gasProduced",
        }
    }

    fn value<'a>(&self, record: &'a WellRecord) -> Option<&'a Value> {
        match self {
            PopupField::Name => record.name.as_ref(),
            PopupField::Status => record.status.as_ref(),
            PopupField::Type => record.well_type.as_ref(),
            PopupField::ApiNumber => record.api_number.as_ref(),
            PopupField::Operator => record.operator.as_ref(),
            PopupField::ClosestCity => record.closest_city.as_ref(),
            PopupField::OilProduced => record.oil_produced.as_ref(),
            PopupField::GasProduced => record.gas_produced.as_ref(),
        }
    }
}

/// ポップアップの1行
#[derive(Debug, Clone, PartialEq)]
pub struct PopupLine {
    pub field: PopupField,
    pub value: String,
}

impl PopupLine {
    pub fn label(&self) -> &'static str {
        self.field.label()
    }

    pub fn is_fallback(&self) -> bool {
        self.value == FALLBACK_LABEL
    }
}

impl std::fmt::Display for PopupLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.label(), self.value)
    }
}

/// レコード1件分のポップアップ行を作る
pub fn popup_lines(record: &WellRecord) -> Vec<PopupLine> {
    PopupField::ALL
        .iter()
        .map(|field| PopupLine {
            field: *field,
            value: display_value(field.value(record)).unwrap_or_else(|| FALLBACK_LABEL.to_string()),
        })
        .collect()
}

/// 地図上のマーカー
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// WellSet 内の位置
    pub index: usize,
    pub position: LatLng,
    pub popup: Vec<PopupLine>,
}

impl Marker {
    pub fn popup_line(&self, field: PopupField) -> Option<&PopupLine> {
        self.popup.iter().find(|line| line.field == field)
    }
}

/// WellSet から導出したマーカー一覧
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkerLayer {
    pub markers: Vec<Marker>,
    /// 座標が不正で置けなかったレコードのインデックス
    pub skipped: Vec<usize>,
}

impl MarkerLayer {
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// マーカー一覧をまるごと作り直す（レスポンス順を保持）
pub fn derive_markers(wells: &WellSet) -> MarkerLayer {
    let mut layer = MarkerLayer::default();

    for (index, record) in wells.iter().enumerate() {
        match record.position() {
            Some(position) => layer.markers.push(Marker {
                index,
                position,
                popup: popup_lines(record),
            }),
            None => layer.skipped.push(index),
        }
    }

    layer
}

/// 座標が不正なレコード数
pub fn count_unplaceable(records: &[WellRecord]) -> usize {
    records.iter().filter(|r| r.position().is_none()).count()
}

/// 地図ごとに描画済みの WellSet を覚えておく
///
/// 参照が変わったとき（または描画先の地図が変わったとき）だけ
/// 新しいレイヤーを返す。返したレイヤーで地図上のマーカーを全件置き換える。
#[derive(Debug, Default)]
pub struct MarkerSync {
    rendered: Option<(u32, WellSet)>,
}

impl MarkerSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_layer(&mut self, map_id: u32, wells: &WellSet) -> Option<MarkerLayer> {
        if let Some((rendered_id, rendered)) = &self.rendered {
            if *rendered_id == map_id && rendered.ptr_eq(wells) {
                return None;
            }
        }
        self.rendered = Some((map_id, wells.clone()));
        Some(derive_markers(wells))
    }

    /// 地図の破棄時
    pub fn reset(&mut self) {
        self.rendered = None;
    }
}

/// 地図ウィジェット用のポップアップHTML
pub fn popup_html(marker: &Marker) -> String {
    marker
        .popup
        .iter()
        .map(|line| format!("<b>{}:</b> {}", line.label(), escape_html(&line.value)))
        .collect::<Vec<_>>()
        .join("<br/>")
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_model::{WellAction, WellStore};
    use serde_json::json;

    fn well(lat: Value, lng: Value, name: &str) -> WellRecord {
        WellRecord {
            latitude: Some(lat),
            longitude: Some(lng),
            name: Some(json!(name)),
            ..Default::default()
        }
    }

    #[test]
    fn test_one_marker_per_record_in_order() {
        let wells = WellSet::new(vec![
            well(json!("48.21"), json!("-103.6"), "Well A"),
            well(json!(47.9), json!(-102.8), "Well B"),
            well(json!("48.0"), json!("-103.0"), "Well C"),
        ]);

        let layer = derive_markers(&wells);
        assert_eq!(layer.len(), 3);
        assert!(layer.skipped.is_empty());

        let indices: Vec<_> = layer.markers.iter().map(|m| m.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
        assert_eq!(layer.markers[0].position, LatLng::new(48.21, -103.6));
        assert_eq!(layer.markers[1].position, LatLng::new(47.9, -102.8));
    }

    #[test]
    fn test_empty_set_has_no_markers() {
        let layer = derive_markers(&WellSet::default());
        assert!(layer.is_empty());
        assert!(layer.skipped.is_empty());
    }

    #[test]
    fn test_invalid_coordinates_are_skipped() {
        let wells = WellSet::new(vec![
            well(json!("not-a-number"), json!("-103.6"), "Bad"),
            well(json!("48.21"), json!("-103.6"), "Good"),
            WellRecord::default(),
        ]);

        let layer = derive_markers(&wells);
        assert_eq!(layer.len(), 1);
        assert_eq!(layer.markers[0].index, 1);
        assert_eq!(layer.skipped, vec![0, 2]);
        assert_eq!(count_unplaceable(wells.records()), 2);
    }

    #[test]
    fn test_rederive_is_idempotent() {
        let records = vec![well(json!("48.21"), json!("-103.6"), "Well A")];
        let first = derive_markers(&WellSet::new(records.clone()));
        let second = derive_markers(&WellSet::new(records));
        assert_eq!(first, second);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn test_popup_order_and_labels() {
        let lines = popup_lines(&WellRecord::default());
        let labels: Vec<_> = lines.iter().map(|l| l.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Well Name",
                "Status",
                "Type",
                "API Number",
                "Operator",
                "Closest City",
                "Oil Produced",
                "Gas Produced",
            ]
        );
    }

    #[test]
    fn test_popup_fallback() {
        let record = well(json!("48.21"), json!("-103.6"), "Well A");
        let lines = popup_lines(&record);

        assert_eq!(lines[0].to_string(), "Well Name: Well A");
        assert_eq!(lines[1].to_string(), "Status: Unknown");
        assert!(lines[1..].iter().all(|l| l.value == FALLBACK_LABEL));
        assert!(!lines[0].is_fallback());
    }

    #[test]
    fn test_popup_full_record() {
        let record = WellRecord {
            latitude: Some(json!("48.1")),
            longitude: Some(json!("-103.2")),
            name: Some(json!("Atlanta 1-6H")),
            status: Some(json!("Active")),
            well_type: Some(json!("Oil & Gas")),
            api_number: Some(json!("33-105-02719")),
            operator: Some(json!("Continental Resources")),
            closest_city: Some(json!("Williston")),
            oil_produced: Some(json!("1,204 Bbls")),
            gas_produced: Some(json!(null)),
        };
        let lines = popup_lines(&record);
        assert_eq!(lines[5].to_string(), "Closest City: Williston");
        assert_eq!(lines[6].to_string(), "Oil Produced: 1,204 Bbls");
        assert_eq!(lines[7].to_string(), "Gas Produced: Unknown");
    }

    #[test]
    fn test_popup_line_lookup() {
        let layer = derive_markers(&WellSet::new(vec![well(json!(48.0), json!(-103.0), "Well A")]));
        let marker = &layer.markers[0];
        assert_eq!(marker.popup_line(PopupField::Name).map(|l| l.value.as_str()), Some("Well A"));
        assert!(marker.popup_line(PopupField::Operator).unwrap().is_fallback());
    }

    #[test]
    fn test_popup_html_escapes_values() {
        let layer = derive_markers(&WellSet::new(vec![well(
            json!(48.0),
            json!(-103.0),
            "<script>alert('x')</script> & co",
        )]));
        let html = popup_html(&layer.markers[0]);

        assert!(html.starts_with("<b>Well Name:</b> &lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co"));
        assert!(html.contains("<br/><b>Status:</b> Unknown"));
        assert_eq!(html.matches("<br/>").count(), 7);
    }

    #[test]
    fn test_marker_sync_renders_on_reference_change_only() {
        let mut store = WellStore::new();
        let mut sync = MarkerSync::new();

        // 初期状態（空）も1回は描画する
        let layer = sync.next_layer(1, store.wells()).expect("初回は描画");
        assert!(layer.is_empty());

        store.dispatch(WellAction::ReplaceWellSet(vec![well(json!("48.0"), json!("-103.0"), "A")]));
        assert_eq!(sync.next_layer(1, store.wells()).map(|l| l.len()), Some(1));

        // Unknown は参照を変えないので再描画しない
        store.dispatch(WellAction::Unknown);
        assert!(sync.next_layer(1, store.wells()).is_none());

        // 同じ内容でも置換されれば再描画
        store.dispatch(WellAction::ReplaceWellSet(vec![well(json!("48.0"), json!("-103.0"), "A")]));
        assert!(sync.next_layer(1, store.wells()).is_some());
    }

    #[test]
    fn test_marker_sync_new_map_redraws() {
        let wells = WellSet::new(vec![well(json!(48.0), json!(-103.0), "A")]);
        let mut sync = MarkerSync::new();

        assert!(sync.next_layer(1, &wells).is_some());
        assert!(sync.next_layer(2, &wells).is_some());

        sync.reset();
        assert!(sync.next_layer(2, &wells).is_some());
    }
}
