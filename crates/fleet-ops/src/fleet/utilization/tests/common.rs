use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

use crate::fleet::domain::{CompanyId, Load, LoadId, Truck, TruckId};
use crate::fleet::utilization::metrics::FleetMetrics;
use crate::fleet::utilization::repository::{FleetRepository, RepositoryError};
use crate::fleet::utilization::scoring::{PillarPoints, PillarScorer};
use crate::fleet::utilization::window::Window;
use crate::fleet::utilization::{fleet_router, FleetUtilizationService};

pub(super) const ACME: &str = "acme";

pub(super) fn acme() -> CompanyId {
    CompanyId(ACME.to_string())
}

/// Fixed clock: mid-afternoon on 2025-03-14 UTC.
pub(super) fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 16, 45, 0)
        .single()
        .expect("valid now")
}

pub(super) fn day(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 9, 0, 0)
        .single()
        .expect("valid date")
}

pub(super) fn truck(company: &str, id: &str) -> Truck {
    Truck {
        id: TruckId(id.to_string()),
        company_id: CompanyId(company.to_string()),
        unit_number: format!("Unit {id}"),
        status: "ACTIVE".to_string(),
    }
}

pub(super) fn load(
    company: &str,
    id: &str,
    truck: Option<&str>,
    pickup: Option<DateTime<Utc>>,
    delivery: Option<DateTime<Utc>>,
) -> Load {
    Load {
        id: LoadId(id.to_string()),
        company_id: CompanyId(company.to_string()),
        truck_id: truck.map(|truck| TruckId(truck.to_string())),
        pickup_date: pickup,
        delivery_date: delivery,
        deleted: false,
    }
}

/// Three trucks in March 2025 with 20, 10, and 0 revenue days.
pub(super) fn scenario_a_repository() -> MemoryRepository {
    MemoryRepository::new(
        vec![truck(ACME, "a"), truck(ACME, "b"), truck(ACME, "c")],
        vec![
            load(
                ACME,
                "l-a",
                Some("a"),
                Some(day(2025, 3, 1)),
                Some(day(2025, 3, 20)),
            ),
            load(
                ACME,
                "l-b",
                Some("b"),
                Some(day(2025, 3, 1)),
                Some(day(2025, 3, 10)),
            ),
        ],
    )
}

pub(super) fn build_service(
    repository: MemoryRepository,
) -> (FleetUtilizationService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(repository);
    let service = FleetUtilizationService::new(repository.clone());
    (service, repository)
}

/// Applies the same tenant and overlap filter a real fleet store would.
#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    trucks: Vec<Truck>,
    loads: Vec<Load>,
    pub(super) truck_queries: Arc<Mutex<usize>>,
    pub(super) load_windows: Arc<Mutex<Vec<Window>>>,
}

impl MemoryRepository {
    pub(super) fn new(trucks: Vec<Truck>, loads: Vec<Load>) -> Self {
        Self {
            trucks,
            loads,
            ..Self::default()
        }
    }

    pub(super) fn load_windows(&self) -> Vec<Window> {
        self.load_windows
            .lock()
            .expect("repository mutex poisoned")
            .clone()
    }

    pub(super) fn truck_queries(&self) -> usize {
        *self.truck_queries.lock().expect("repository mutex poisoned")
    }
}

impl FleetRepository for MemoryRepository {
    fn trucks(&self, company: &CompanyId) -> Result<Vec<Truck>, RepositoryError> {
        *self.truck_queries.lock().expect("repository mutex poisoned") += 1;
        Ok(self
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
        self.load_windows
            .lock()
            .expect("repository mutex poisoned")
            .push(*window);
        Ok(self
            .loads
            .iter()
            .filter(|load| &load.company_id == company)
            .filter(|load| load.is_countable() && load.overlaps(window))
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableRepository;

impl FleetRepository for UnavailableRepository {
    fn trucks(&self, _company: &CompanyId) -> Result<Vec<Truck>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn loads_overlapping(
        &self,
        _company: &CompanyId,
        _window: &Window,
    ) -> Result<Vec<Load>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Trucks resolve but every load query fails.
pub(super) struct BrokenLoadsRepository;

impl FleetRepository for BrokenLoadsRepository {
    fn trucks(&self, company: &CompanyId) -> Result<Vec<Truck>, RepositoryError> {
        Ok(vec![truck(&company.0, "a")])
    }

    fn loads_overlapping(
        &self,
        _company: &CompanyId,
        _window: &Window,
    ) -> Result<Vec<Load>, RepositoryError> {
        Err(RepositoryError::Query("loads index missing".to_string()))
    }
}

/// Pillar scorer returning fixed points regardless of metrics.
pub(super) struct FixedPillars(pub(super) i32);

impl PillarScorer for FixedPillars {
    fn score(&self, _metrics: &FleetMetrics) -> PillarPoints {
        PillarPoints {
            overall_utilization: self.0,
            revenue_days_per_truck: self.0,
            low_utilization: self.0,
        }
    }
}

pub(super) fn router_with_repository<R>(repository: R) -> axum::Router
where
    R: FleetRepository + 'static,
{
    fleet_router(Arc::new(FleetUtilizationService::new(Arc::new(repository))))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn approx(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}
