use chrono::{DateTime, NaiveDate, Utc};
use fleet_ops::error::AppError;
use fleet_ops::fleet::import::{FleetCsvImporter, FleetSnapshot};
use fleet_ops::fleet::utilization::{parse_instant, FleetRepository, RepositoryError, Window};
use fleet_ops::fleet::{CompanyId, Load, Truck};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::PathBuf;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Fleet store backed by an imported snapshot. Applies the same tenant and overlap filter
/// the relational store does.
#[derive(Default, Clone)]
pub(crate) struct InMemoryFleetRepository {
    snapshot: Arc<FleetSnapshot>,
}

impl InMemoryFleetRepository {
    pub(crate) fn from_snapshot(snapshot: FleetSnapshot) -> Self {
        Self {
            snapshot: Arc::new(snapshot),
        }
    }

    pub(crate) fn knows_company(&self, company: &CompanyId) -> bool {
        self.snapshot.companies().contains(company)
    }
}

impl FleetRepository for InMemoryFleetRepository {
    fn trucks(&self, company: &CompanyId) -> Result<Vec<Truck>, RepositoryError> {
        Ok(self
            .snapshot
            .trucks
            .iter()
            .filter(|truck| &truck.company_id == company)
            .cloned()
            .collect())
    }

    fn loads_overlapping(
        &self,
        company: &CompanyId,
        window: &Window,
    ) -> Result<Vec<Load>, RepositoryError> {
        Ok(self
            .snapshot
            .loads
            .iter()
            .filter(|load| &load.company_id == company)
            .filter(|load| load.is_countable() && load.overlaps(window))
            .cloned()
            .collect())
    }
}

/// Reads whichever exports were supplied; a missing file leaves that half of the store empty.
pub(crate) fn load_snapshot(
    trucks_csv: Option<PathBuf>,
    loads_csv: Option<PathBuf>,
) -> Result<FleetSnapshot, AppError> {
    let trucks = match trucks_csv {
        Some(path) => FleetCsvImporter::trucks_from_reader(std::fs::File::open(&path)?)?,
        None => {
            warn!("no trucks export configured; fleet store has no trucks");
            Vec::new()
        }
    };
    let loads = match loads_csv {
        Some(path) => FleetCsvImporter::loads_from_reader(std::fs::File::open(&path)?)?,
        None => {
            warn!("no loads export configured; fleet store has no loads");
            Vec::new()
        }
    };

    info!(
        trucks = trucks.len(),
        loads = loads.len(),
        "fleet store seeded"
    );
    Ok(FleetSnapshot { trucks, loads })
}

pub(crate) fn parse_as_of(raw: &str) -> Result<DateTime<Utc>, String> {
    parse_instant(raw).ok_or_else(|| {
        format!("failed to parse '{raw}' as an RFC 3339 timestamp or YYYY-MM-DD date")
    })
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use fleet_ops::fleet::TruckId;

    fn snapshot() -> FleetSnapshot {
        FleetCsvImporter::from_readers(
            "company_id,id,unit_number,status\nacme,t1,101,active\nglobex,g1,7,active\n"
                .as_bytes(),
            "company_id,id,truck_id,pickup_date,delivery_date,deleted\n\
acme,l1,t1,2025-03-02,2025-03-04,\n\
acme,l2,t1,2025-03-05,2025-03-06,true\n\
globex,l3,g1,2025-03-02,2025-03-04,\n"
                .as_bytes(),
        )
        .expect("snapshot parses")
    }

    #[test]
    fn repository_scopes_rows_to_the_tenant() {
        let repository = InMemoryFleetRepository::from_snapshot(snapshot());
        let acme = CompanyId("acme".to_string());
        let march = Window::calendar_month(2025, 3).expect("march");

        let trucks = repository.trucks(&acme).expect("trucks");
        assert_eq!(trucks.len(), 1);
        assert_eq!(trucks[0].id, TruckId("t1".to_string()));

        let loads = repository.loads_overlapping(&acme, &march).expect("loads");
        assert_eq!(loads.len(), 1);
        assert_eq!(loads[0].id.0, "l1");

        let april = Window::calendar_month(2025, 4).expect("april");
        assert!(repository
            .loads_overlapping(&acme, &april)
            .expect("loads")
            .is_empty());
    }

    #[test]
    fn repository_reports_known_companies() {
        let repository = InMemoryFleetRepository::from_snapshot(snapshot());
        assert!(repository.knows_company(&CompanyId("globex".to_string())));
        assert!(!repository.knows_company(&CompanyId("initech".to_string())));
    }

    #[test]
    fn missing_exports_seed_an_empty_store() {
        let snapshot = load_snapshot(None, None).expect("empty snapshot");
        assert!(snapshot.trucks.is_empty());
        assert!(snapshot.loads.is_empty());
    }

    #[test]
    fn unreadable_exports_fail_to_load() {
        let error = load_snapshot(Some(PathBuf::from("./no-such-trucks.csv")), None)
            .expect_err("missing file");
        assert!(matches!(error, AppError::Io(_)));
    }

    #[test]
    fn as_of_accepts_dates_and_timestamps() {
        assert_eq!(
            parse_as_of("2025-03-14").expect("date"),
            Utc.with_ymd_and_hms(2025, 3, 14, 0, 0, 0)
                .single()
                .expect("valid")
        );
        assert!(parse_as_of("2025-03-14T08:00:00-05:00").is_ok());
        assert!(parse_as_of("March 14").is_err());
    }
}
