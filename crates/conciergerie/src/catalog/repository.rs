use super::domain::{Agency, AgencyId};
use super::snapshot::CatalogSnapshot;

/// Storage abstraction over the managed backend so the service can be exercised in isolation.
///
/// Reads hand out a consistent snapshot; the only writes are the administrative ones.
pub trait CatalogRepository: Send + Sync {
    fn snapshot(&self) -> Result<CatalogSnapshot, RepositoryError>;
    fn set_manual_score(
        &self,
        agency_id: &AgencyId,
        score: Option<f64>,
    ) -> Result<Agency, RepositoryError>;
    fn set_validation(&self, agency_id: &AgencyId, validated: bool)
        -> Result<Agency, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("agency not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
