use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::MetricType;
use super::Draft;

/// A logged health reading, as returned by the backend.
///
/// `value` stays a string on the wire: "120/80" is a valid blood-pressure
/// reading and "98.6" a valid temperature — the backend does not force a
/// numeric shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthMetric {
    pub id: String,
    pub metric_type: MetricType,
    pub value: String,
    pub unit: String,
    pub notes: Option<String>,
    pub recorded_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Create-form draft for a health reading. When `recorded_at` is omitted
/// the server stamps the reading at insert time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHealthMetric {
    pub metric_type: MetricType,
    pub value: String,
    pub unit: String,
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<DateTime<Utc>>,
}

impl Default for NewHealthMetric {
    /// Mirrors the log form's initial state: blood pressure, empty reading.
    fn default() -> Self {
        Self {
            metric_type: MetricType::BloodPressure,
            value: String::new(),
            unit: String::new(),
            notes: None,
            recorded_at: None,
        }
    }
}

impl Draft for NewHealthMetric {
    fn validate(&self) -> Result<(), String> {
        if self.value.trim().is_empty() {
            return Err("Value is required".to_string());
        }
        if self.unit.trim().is_empty() {
            return Err("Unit is required".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_requires_value_and_unit() {
        let mut draft = NewHealthMetric::default();
        assert!(draft.validate().unwrap_err().contains("Value"));

        draft.value = "120/80".into();
        assert!(draft.validate().unwrap_err().contains("Unit"));

        draft.unit = "mmHg".into();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn draft_omits_unset_recorded_at() {
        let draft = NewHealthMetric {
            value: "72".into(),
            unit: "bpm".into(),
            metric_type: MetricType::HeartRate,
            ..NewHealthMetric::default()
        };
        let json = serde_json::to_string(&draft).unwrap();
        assert!(!json.contains("recorded_at"));
        assert!(json.contains("\"heart_rate\""));
    }

    #[test]
    fn blood_pressure_value_stays_a_string() {
        let json = r#"{
            "id": "hm-1",
            "metric_type": "blood_pressure",
            "value": "120/80",
            "unit": "mmHg",
            "notes": null,
            "recorded_at": "2026-08-24T07:45:00Z",
            "created_at": "2026-08-24T07:45:02Z"
        }"#;
        let metric: HealthMetric = serde_json::from_str(json).unwrap();
        assert_eq!(metric.value, "120/80");
        assert_eq!(metric.metric_type, MetricType::BloodPressure);
    }
}
