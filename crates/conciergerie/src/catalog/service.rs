use std::sync::Arc;

use tracing::info;

use super::domain::{Agency, AgencyId};
use super::engine::RankingFilterEngine;
use super::filter::FilterCriteria;
use super::repository::{CatalogRepository, RepositoryError};
use super::snapshot::CatalogScope;
use super::view::CatalogView;

/// Service composing the catalog repository with the ranking engine.
pub struct CatalogService<R> {
    repository: Arc<R>,
    engine: RankingFilterEngine,
}

impl<R> CatalogService<R>
where
    R: CatalogRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            engine: RankingFilterEngine::new(),
        }
    }

    /// Rank and filter the offerings of a listing page.
    pub fn search(
        &self,
        scope: &CatalogScope,
        criteria: &FilterCriteria,
    ) -> Result<CatalogView, CatalogServiceError> {
        let snapshot = self.repository.snapshot()?;
        Ok(self.engine.view_in(&snapshot, scope, criteria))
    }

    /// Set or clear an agency's manual score. Scores must be finite and non-negative.
    pub fn set_manual_score(
        &self,
        agency_id: &AgencyId,
        score: Option<f64>,
    ) -> Result<Agency, CatalogServiceError> {
        if let Some(value) = score {
            if !value.is_finite() || value < 0.0 {
                return Err(CatalogServiceError::InvalidScore(value));
            }
        }

        let agency = self.repository.set_manual_score(agency_id, score)?;
        info!(agency = %agency_id, ?score, "manual score updated");
        Ok(agency)
    }

    pub fn set_validation(
        &self,
        agency_id: &AgencyId,
        validated: bool,
    ) -> Result<Agency, CatalogServiceError> {
        let agency = self.repository.set_validation(agency_id, validated)?;
        info!(agency = %agency_id, validated, "agency validation updated");
        Ok(agency)
    }
}

/// Error raised by the catalog service.
#[derive(Debug, thiserror::Error)]
pub enum CatalogServiceError {
    #[error("manual score must be a finite, non-negative number (got {0})")]
    InvalidScore(f64),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
