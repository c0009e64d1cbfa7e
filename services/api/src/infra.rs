use bolivia_stats::config::DashboardConfig;
use bolivia_stats::sections::Department;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// The dashboard configuration handlers read; kept as its own extension so
/// request handlers can be exercised without a metrics recorder.
pub(crate) type DashboardHandle = Arc<DashboardConfig>;

/// Parse a comma-separated department list. Labels are matched
/// case-insensitively; unrecognized names are dropped, mirroring a
/// multi-select that can only offer known departments.
pub(crate) fn parse_departments(raw: &str) -> Vec<Department> {
    raw.split(',')
        .filter_map(Department::from_label)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_departments_and_drops_noise() {
        let parsed = parse_departments("Santa Cruz, beni ,Narnia,");
        assert_eq!(parsed, vec![Department::SantaCruz, Department::Beni]);
    }

    #[test]
    fn empty_input_parses_to_no_departments() {
        assert!(parse_departments("").is_empty());
    }
}
