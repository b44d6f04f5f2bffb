use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Aggregate statistics the backend computes for one uploaded CSV.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentSummary {
    pub total_count: u64,
    #[serde(default)]
    pub avg_flowrate: f64,
    #[serde(default)]
    pub avg_pressure: f64,
    #[serde(default)]
    pub avg_temperature: f64,
    #[serde(default)]
    pub type_distribution: TypeDistribution,
    #[serde(default)]
    pub equipment_data: Vec<EquipmentRow>,
}

/// Equipment type label -> count, in the order the backend sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeDistribution(Vec<(String, u64)>);

impl TypeDistribution {
    /// Later duplicates of a label overwrite the earlier count, as a JSON object would.
    fn insert(&mut self, label: String, count: u64) {
        match self.0.iter_mut().find(|(l, _)| *l == label) {
            Some(existing) => existing.1 = count,
            None => self.0.push((label, count)),
        }
    }
}

impl Serialize for TypeDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, count) in &self.0 {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TypeDistribution {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DistributionVisitor;

        impl<'de> Visitor<'de> for DistributionVisitor {
            type Value = TypeDistribution;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of equipment type to count")
            }

            fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
                let mut dist = TypeDistribution::default();
                while let Some((label, count)) = access.next_entry::<String, u64>()? {
                    dist.insert(label, count);
                }
                Ok(dist)
            }
        }

        deserializer.deserialize_map(DistributionVisitor)
    }
}

/// One CSV row as echoed back by the backend.
///
/// Numeric cells the backend could not parse arrive as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentRow {
    #[serde(rename = "Equipment Name", default, deserialize_with = "text_cell")]
    pub name: String,
    #[serde(rename = "Type", default, deserialize_with = "text_cell")]
    pub equipment_type: String,
    #[serde(rename = "Flowrate", default)]
    pub flowrate: Option<f64>,
    #[serde(rename = "Pressure", default)]
    pub pressure: Option<f64>,
    #[serde(rename = "Temperature", default)]
    pub temperature: Option<f64>,
}

/// Accept strings, numbers, booleans or null for a text column.
fn text_cell<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        other => Err(de::Error::custom(format!(
            "expected a text cell, got {}",
            other
        ))),
    }
}

/// One past upload, as listed by `GET /history/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub uploaded_at: DateTime<Utc>,
    pub summary: EquipmentSummary,
    #[serde(default)]
    pub file_path: Option<String>,
}

/// Response of `POST /upload/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub dataset_id: Option<i64>,
    pub summary: EquipmentSummary,
}

/// Response of `GET /summary/`: the most recent upload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummarySnapshot {
    pub summary: EquipmentSummary,
    #[serde(default)]
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// Body of `POST /register/`. The confirmation always equals the password.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    password: String,
    password_confirm: String,
}

impl RegisterRequest {
    pub fn new(username: &str, email: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            password_confirm: password.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_summary_json() -> serde_json::Value {
        json!({
            "total_count": 3,
            "avg_flowrate": 120.5,
            "avg_pressure": 6.25,
            "avg_temperature": 110.0,
            "type_distribution": {"Pump": 2, "Valve": 1},
            "equipment_data": [
                {"Equipment Name": "Pump-1", "Type": "Pump", "Flowrate": 120, "Pressure": 5.2, "Temperature": 110},
                {"Equipment Name": "Pump-2", "Type": "Pump", "Flowrate": 121.0, "Pressure": null, "Temperature": 108.5},
                {"Equipment Name": 301, "Type": "Valve", "Flowrate": 60, "Pressure": 4.1, "Temperature": 95}
            ]
        })
    }

    #[test]
    fn test_summary_deserializes_backend_shape() {
        let summary: EquipmentSummary = serde_json::from_value(sample_summary_json()).unwrap();
        assert_eq!(summary.total_count, 3);
        assert_eq!(summary.type_distribution.0[0], ("Pump".to_string(), 2));
        assert_eq!(summary.equipment_data.len(), 3);
        assert_eq!(summary.equipment_data[0].name, "Pump-1");
        assert_eq!(summary.equipment_data[1].pressure, None);
        assert_eq!(summary.equipment_data[2].name, "301");
    }

    #[test]
    fn test_type_distribution_keeps_backend_order() {
        let summary: EquipmentSummary = serde_json::from_value(json!({
            "total_count": 6,
            "type_distribution": {"Reactor": 3, "Condenser": 2, "Agitator": 1}
        }))
        .unwrap();

        let labels: Vec<&str> = summary.type_distribution.0.iter().map(|(l, _)| l.as_str()).collect();
        assert_eq!(labels, vec!["Reactor", "Condenser", "Agitator"]);

        let back = serde_json::to_string(&summary.type_distribution).unwrap();
        assert_eq!(back, r#"{"Reactor":3,"Condenser":2,"Agitator":1}"#);
    }

    #[test]
    fn test_empty_summary_defaults() {
        let summary: EquipmentSummary = serde_json::from_value(json!({"total_count": 0})).unwrap();
        assert_eq!(summary.avg_flowrate, 0.0);
        assert_eq!(summary.type_distribution, TypeDistribution::default());
        assert!(summary.equipment_data.is_empty());
    }

    #[test]
    fn test_history_entry_parses_django_timestamp() {
        let entry: HistoryEntry = serde_json::from_value(json!({
            "id": 12,
            "file_path": "/media/csv_files/plant_a.csv",
            "summary": sample_summary_json(),
            "uploaded_at": "2025-02-03T14:05:09.481223Z"
        }))
        .unwrap();
        assert_eq!(entry.id, 12);
        assert_eq!(entry.uploaded_at.to_rfc3339().get(..19), Some("2025-02-03T14:05:09"));
    }

    #[test]
    fn test_register_request_confirms_password() {
        let body = serde_json::to_value(RegisterRequest::new("op", "op@plant.io", "longenough")).unwrap();
        assert_eq!(body["password_confirm"], body["password"]);
        assert_eq!(body["email"], "op@plant.io");
    }
}
