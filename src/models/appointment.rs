use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::AppointmentStatus;
use super::Draft;

/// A scheduled appointment, as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub doctor_name: String,
    pub specialty: String,
    pub date_time: DateTime<Utc>,
    pub location: String,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
    pub created_at: DateTime<Utc>,
}

/// Create-form draft for an appointment. Status starts server-side as
/// `scheduled`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAppointment {
    pub doctor_name: String,
    pub specialty: String,
    pub date_time: DateTime<Utc>,
    pub location: String,
    pub notes: Option<String>,
}

impl Default for NewAppointment {
    fn default() -> Self {
        Self {
            doctor_name: String::new(),
            specialty: String::new(),
            date_time: Utc::now(),
            location: String::new(),
            notes: None,
        }
    }
}

impl Draft for NewAppointment {
    fn validate(&self) -> Result<(), String> {
        if self.doctor_name.trim().is_empty() {
            return Err("Doctor name is required".to_string());
        }
        if self.specialty.trim().is_empty() {
            return Err("Specialty is required".to_string());
        }
        if self.location.trim().is_empty() {
            return Err("Location is required".to_string());
        }
        Ok(())
    }
}

/// Partial update for PATCH — only set fields are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppointmentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doctor_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_requires_doctor_specialty_location() {
        let mut draft = NewAppointment::default();
        assert!(draft.validate().unwrap_err().contains("Doctor"));

        draft.doctor_name = "Dr. Chen".into();
        assert!(draft.validate().unwrap_err().contains("Specialty"));

        draft.specialty = "Cardiology".into();
        assert!(draft.validate().unwrap_err().contains("Location"));

        draft.location = "City Hospital".into();
        assert!(draft.validate().is_ok());
    }

    #[test]
    fn record_deserializes_from_backend_json() {
        let json = r#"{
            "id": "appt-1",
            "doctor_name": "Dr. Chen",
            "specialty": "Cardiology",
            "date_time": "2026-09-12T14:30:00Z",
            "location": "City Hospital, Room 204",
            "notes": null,
            "status": "scheduled",
            "created_at": "2026-08-20T10:00:00Z"
        }"#;
        let appt: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appt.status, AppointmentStatus::Scheduled);
        assert_eq!(appt.doctor_name, "Dr. Chen");
    }

    #[test]
    fn status_patch_serializes_wire_form() {
        let patch = AppointmentPatch {
            status: Some(AppointmentStatus::Cancelled),
            ..AppointmentPatch::default()
        };
        assert_eq!(
            serde_json::to_string(&patch).unwrap(),
            r#"{"status":"cancelled"}"#
        );
    }
}
