//! 井戸データの型定義
//!
//! APIが返す1行分の井戸データ（WellRecord）。
//! 値は受信したJSONのまま保持し、型の検証は表示時に行う。

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::viewport::LatLng;

/// 井戸データ1件
///
/// 観測されたAPIは大文字キー（`LATITUDE`, `WELL_NAME` など）を返すが、
/// camelCase のキー（`latitude`, `name` など）も受け付ける。
/// 両方ある場合は大文字キーを優先し、null は未設定として扱う。
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WellRecord {
    #[serde(rename = "LATITUDE", skip_serializing_if = "Option::is_none")]
    pub latitude: Option<Value>,

    #[serde(rename = "LONGITUDE", skip_serializing_if = "Option::is_none")]
    pub longitude: Option<Value>,

    #[serde(rename = "WELL_NAME", skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,

    #[serde(rename = "WELL_STATUS", skip_serializing_if = "Option::is_none")]
    pub status: Option<Value>,

    #[serde(rename = "WELL_TYPE", skip_serializing_if = "Option::is_none")]
    pub well_type: Option<Value>,

    #[serde(rename = "API_NO", skip_serializing_if = "Option::is_none")]
    pub api_number: Option<Value>,

    #[serde(rename = "OPERATOR", skip_serializing_if = "Option::is_none")]
    pub operator: Option<Value>,

    #[serde(rename = "CLOSEST_CITY", skip_serializing_if = "Option::is_none")]
    pub closest_city: Option<Value>,

    #[serde(rename = "OIL_PRODUCED", skip_serializing_if = "Option::is_none")]
    pub oil_produced: Option<Value>,

    #[serde(rename = "GAS_PRODUCED", skip_serializing_if = "Option::is_none")]
    pub gas_produced: Option<Value>,
}

impl From<Map<String, Value>> for WellRecord {
    fn from(mut object: Map<String, Value>) -> Self {
        let mut take = |keys: [&str; 2]| {
            keys.iter()
                .filter_map(|key| object.remove(*key))
                .find(|value| !value.is_null())
        };

        Self {
            latitude: take(["LATITUDE", "latitude"]),
            longitude: take(["LONGITUDE", "longitude"]),
            name: take(["WELL_NAME", "name"]),
            status: take(["WELL_STATUS", "status"]),
            well_type: take(["WELL_TYPE", "type"]),
            api_number: take(["API_NO", "apiNumber"]),
            operator: take(["OPERATOR", "operator"]),
            closest_city: take(["CLOSEST_CITY", "closestCity"]),
            oil_produced: take(["OIL_PRODUCED", "oilProduced"]),
            gas_produced: take(["GAS_PRODUCED", "gasProduced"]),
        }
    }
}

impl<'de> Deserialize<'de> for WellRecord {
    /// オブジェクト以外は空のレコードになる
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Self::from_value(Value::deserialize(deserializer)?))
    }
}

impl WellRecord {
    /// JSON値から作る。オブジェクトでなければ None
    pub fn from_object(value: Value) -> Option<Self> {
        match value {
            Value::Object(object) => Some(object.into()),
            _ => None,
        }
    }

    pub fn from_value(value: Value) -> Self {
        Self::from_object(value).unwrap_or_default()
    }

    /// 数値変換後の緯度（変換できなければ NaN）
    pub fn lat(&self) -> f64 {
        coordinate(self.latitude.as_ref())
    }

    /// 数値変換後の経度（変換できなければ NaN）
    pub fn lng(&self) -> f64 {
        coordinate(self.longitude.as_ref())
    }

    /// マーカーを置ける位置。座標が不正なら None
    pub fn position(&self) -> Option<LatLng> {
        let position = LatLng::new(self.lat(), self.lng());
        position.is_valid().then_some(position)
    }
}

/// 座標値を数値に変換する
///
/// - 数値: そのまま
/// - 文字列: 前後の空白を除いて10進数としてパース
/// - それ以外（null・未設定・空文字・真偽値・配列・オブジェクト）: NaN
pub fn coordinate(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// 表示用の文字列に変換する。null・未設定・空文字は None
pub fn display_value(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
