use super::window::Window;
use crate::fleet::domain::{CompanyId, Load, Truck};

/// Read-only access to a tenant's fleet so the service can be exercised in isolation.
pub trait FleetRepository: Send + Sync {
    /// Every truck the tenant owns, in display order.
    fn trucks(&self, company: &CompanyId) -> Result<Vec<Truck>, RepositoryError>;

    /// Non-deleted, truck-assigned loads for the tenant that overlap `window`
    /// (see [`Load::overlaps`]).
    fn loads_overlapping(
        &self,
        company: &CompanyId,
        window: &Window,
    ) -> Result<Vec<Load>, RepositoryError>;
}

/// Error enumeration for fleet store failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("fleet store unavailable: {0}")]
    Unavailable(String),
    #[error("fleet query failed: {0}")]
    Query(String),
}
