//! Wire schemas shared with the backend.
//!
//! Records arrive from the server with server-assigned string ids; drafts
//! (`New*` types) are what the create forms submit; patches carry
//! all-optional fields for PATCH calls. The backend is authoritative —
//! nothing here persists locally.

pub mod appointment;
pub mod enums;
pub mod filters;
pub mod health_metric;
pub mod medication;
pub mod message;

pub use appointment::{Appointment, AppointmentPatch, NewAppointment};
pub use enums::{AppointmentStatus, Frequency, MessageRole, MetricType, TimeOfDay};
pub use filters::{AppointmentFilter, HealthMetricFilter, MedicationFilter, QueryFilter};
pub use health_metric::{HealthMetric, NewHealthMetric};
pub use medication::{Medication, MedicationPatch, NewMedication};
pub use message::ChatMessage;

/// Form drafts that can be submitted through a create form.
///
/// `validate` checks the required fields are non-empty before any request
/// is issued; the returned string is the user-facing validation message.
pub trait Draft {
    fn validate(&self) -> Result<(), String>;
}
