use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::{error, warn};

use super::repository::FleetRepository;
use super::service::FleetUtilizationService;
use super::window::{parse_instant, RangeKeyword, RangeSelection};
use crate::fleet::domain::CompanyId;

/// Header carrying the already-authenticated tenant identifier.
pub const COMPANY_HEADER: &str = "x-company-id";

#[derive(Debug, Default, Deserialize)]
pub struct UtilizationQuery {
    #[serde(default)]
    pub range: Option<String>,
    #[serde(default)]
    pub as_of: Option<String>,
}

/// Router builder exposing the fleet utilization endpoint.
pub fn fleet_router<R>(service: Arc<FleetUtilizationService<R>>) -> Router
where
    R: FleetRepository + 'static,
{
    Router::new()
        .route("/api/v1/fleet/utilization", get(utilization_handler::<R>))
        .with_state(service)
}

pub(crate) fn company_from_headers(headers: &HeaderMap) -> Option<CompanyId> {
    headers
        .get(COMPANY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| CompanyId(value.to_string()))
}

pub(crate) async fn utilization_handler<R>(
    State(service): State<Arc<FleetUtilizationService<R>>>,
    headers: HeaderMap,
    Query(query): Query<UtilizationQuery>,
) -> Response
where
    R: FleetRepository + 'static,
{
    let Some(company) = company_from_headers(&headers) else {
        let payload = json!({
            "error": format!("missing {COMPANY_HEADER} header"),
        });
        return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
    };

    let now = match query.as_of.as_deref() {
        None => Utc::now(),
        Some(raw) => match parse_instant(raw) {
            Some(instant) => instant,
            None => {
                warn!(company = %company, as_of = raw, "rejected unparseable as_of");
                let payload = json!({
                    "error": "as_of must be an RFC 3339 timestamp or YYYY-MM-DD date",
                });
                return (StatusCode::BAD_REQUEST, axum::Json(payload)).into_response();
            }
        },
    };

    let range = RangeSelection::Preset(RangeKeyword::parse(query.range.as_deref()));
    match service.utilization(&company, range, now) {
        Ok(utilization) => (StatusCode::OK, axum::Json(utilization.summary())).into_response(),
        Err(err) => {
            error!(company = %company, error = %err, "fleet utilization failed");
            let payload = json!({
                "error": "internal server error",
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}
