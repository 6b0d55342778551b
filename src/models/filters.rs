use super::enums::MetricType;

/// List filters that turn into URL query parameters.
pub trait QueryFilter {
    /// Key/value pairs appended to the collection GET.
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

/// Filter for the medications list. The dashboard shows active
/// prescriptions by default.
#[derive(Debug, Clone)]
pub struct MedicationFilter {
    pub active_only: bool,
}

impl Default for MedicationFilter {
    fn default() -> Self {
        Self { active_only: true }
    }
}

impl QueryFilter for MedicationFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![("active_only", self.active_only.to_string())]
    }
}

/// Filter for the appointments list — the backend takes no parameters.
#[derive(Debug, Clone, Default)]
pub struct AppointmentFilter;

impl QueryFilter for AppointmentFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

/// Filter for the health-metrics list, optionally narrowed to one metric.
#[derive(Debug, Clone, Default)]
pub struct HealthMetricFilter {
    pub metric_type: Option<MetricType>,
}

impl QueryFilter for HealthMetricFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        match self.metric_type {
            Some(t) => vec![("metric_type", t.as_str().to_string())],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn medication_filter_defaults_to_active_only() {
        let filter = MedicationFilter::default();
        assert_eq!(
            filter.query_pairs(),
            vec![("active_only", "true".to_string())]
        );
    }

    #[test]
    fn medication_filter_can_include_inactive() {
        let filter = MedicationFilter { active_only: false };
        assert_eq!(
            filter.query_pairs(),
            vec![("active_only", "false".to_string())]
        );
    }

    #[test]
    fn appointment_filter_has_no_params() {
        assert!(AppointmentFilter.query_pairs().is_empty());
    }

    #[test]
    fn metric_filter_narrows_by_type() {
        let all = HealthMetricFilter::default();
        assert!(all.query_pairs().is_empty());

        let bp = HealthMetricFilter {
            metric_type: Some(MetricType::BloodPressure),
        };
        assert_eq!(
            bp.query_pairs(),
            vec![("metric_type", "blood_pressure".to_string())]
        );
    }
}
