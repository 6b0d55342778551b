use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{Frequency, TimeOfDay};
use super::Draft;

/// A tracked medication, as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    pub id: String,
    pub name: String,
    pub dosage: String,
    pub frequency: Frequency,
    #[serde(default)]
    pub time_of_day: Vec<TimeOfDay>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

/// Create-form draft for a medication. The server assigns id/created_at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMedication {
    pub name: String,
    pub dosage: String,
    pub frequency: Frequency,
    pub time_of_day: Vec<TimeOfDay>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub active: bool,
}

impl Default for NewMedication {
    /// Mirrors the create form's initial state: daily, morning, starting today.
    fn default() -> Self {
        Self {
            name: String::new(),
            dosage: String::new(),
            frequency: Frequency::Daily,
            time_of_day: vec![TimeOfDay::Morning],
            start_date: Utc::now().date_naive(),
            end_date: None,
            notes: None,
            active: true,
        }
    }
}

impl Draft for NewMedication {
    fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Medication name is required".to_string());
        }
        if self.dosage.trim().is_empty() {
            return Err("Dosage is required".to_string());
        }
        Ok(())
    }
}

/// Partial update for PATCH — only set fields are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MedicationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_of_day: Option<Vec<TimeOfDay>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
}
