use serde::{Deserialize, Serialize};

/// How often a medication is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    Daily,
    TwiceDaily,
    ThreeTimesDaily,
    Weekly,
    AsNeeded,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::TwiceDaily => "twice_daily",
            Self::ThreeTimesDaily => "three_times_daily",
            Self::Weekly => "weekly",
            Self::AsNeeded => "as_needed",
        }
    }
}

/// Time-of-day tag on a medication schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Noon,
    Evening,
    Bedtime,
}

impl TimeOfDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Noon => "noon",
            Self::Evening => "evening",
            Self::Bedtime => "bedtime",
        }
    }
}

/// Appointment lifecycle state, server-managed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Kind of health metric being logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    BloodPressure,
    BloodSugar,
    Weight,
    Temperature,
    HeartRate,
    OxygenSaturation,
}

impl MetricType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BloodPressure => "blood_pressure",
            Self::BloodSugar => "blood_sugar",
            Self::Weight => "weight",
            Self::Temperature => "temperature",
            Self::HeartRate => "heart_rate",
            Self::OxygenSaturation => "oxygen_saturation",
        }
    }
}

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&Frequency::TwiceDaily).unwrap(),
            "\"twice_daily\""
        );
        assert_eq!(
            serde_json::from_str::<Frequency>("\"as_needed\"").unwrap(),
            Frequency::AsNeeded
        );
    }

    #[test]
    fn as_str_matches_wire_form() {
        for (variant, s) in [
            (MetricType::BloodPressure, "blood_pressure"),
            (MetricType::BloodSugar, "blood_sugar"),
            (MetricType::Weight, "weight"),
            (MetricType::Temperature, "temperature"),
            (MetricType::HeartRate, "heart_rate"),
            (MetricType::OxygenSaturation, "oxygen_saturation"),
        ] {
            assert_eq!(variant.as_str(), s);
            assert_eq!(
                serde_json::to_string(&variant).unwrap(),
                format!("\"{s}\"")
            );
        }
    }

    #[test]
    fn appointment_status_round_trip() {
        for (variant, s) in [
            (AppointmentStatus::Scheduled, "scheduled"),
            (AppointmentStatus::Completed, "completed"),
            (AppointmentStatus::Cancelled, "cancelled"),
        ] {
            assert_eq!(variant.as_str(), s);
            let json = format!("\"{s}\"");
            assert_eq!(
                serde_json::from_str::<AppointmentStatus>(&json).unwrap(),
                variant
            );
        }
    }

    #[test]
    fn message_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&MessageRole::User).unwrap(), "\"user\"");
        assert_eq!(
            serde_json::to_string(&MessageRole::Assistant).unwrap(),
            "\"assistant\""
        );
    }
}
