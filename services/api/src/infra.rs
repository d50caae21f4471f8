use conciergerie::catalog::{
    Agency, AgencyId, CatalogImporter, CatalogRepository, CatalogSnapshot, PropertyType,
    RepositoryError,
};
use conciergerie::config::CatalogConfig;
use conciergerie::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Snapshot-backed stand-in for the managed backend.
#[derive(Default)]
pub(crate) struct InMemoryCatalogRepository {
    snapshot: RwLock<CatalogSnapshot>,
}

impl InMemoryCatalogRepository {
    pub(crate) fn new(snapshot: CatalogSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
        }
    }

    fn update_agency<F>(&self, agency_id: &AgencyId, apply: F) -> Result<Agency, RepositoryError>
    where
        F: FnOnce(&mut Agency),
    {
        let mut guard = self.snapshot.write().expect("catalog lock poisoned");
        let agency = guard
            .agency_mut(agency_id)
            .ok_or(RepositoryError::NotFound)?;
        apply(agency);
        Ok(agency.clone())
    }
}

impl CatalogRepository for InMemoryCatalogRepository {
    fn snapshot(&self) -> Result<CatalogSnapshot, RepositoryError> {
        let guard = self.snapshot.read().expect("catalog lock poisoned");
        Ok(guard.clone())
    }

    fn set_manual_score(
        &self,
        agency_id: &AgencyId,
        score: Option<f64>,
    ) -> Result<Agency, RepositoryError> {
        self.update_agency(agency_id, |agency| agency.manual_score = score)
    }

    fn set_validation(
        &self,
        agency_id: &AgencyId,
        validated: bool,
    ) -> Result<Agency, RepositoryError> {
        self.update_agency(agency_id, |agency| agency.validated = validated)
    }
}

/// Build the serving snapshot from the configured exports.
pub(crate) fn load_catalog(config: &CatalogConfig) -> Result<CatalogSnapshot, AppError> {
    let mut snapshot = match &config.snapshot_path {
        Some(path) => CatalogImporter::snapshot_from_path(path)?,
        None => {
            warn!("CATALOG_SNAPSHOT_PATH not set, serving an empty catalog");
            CatalogSnapshot::default()
        }
    };

    if let Some(path) = &config.reviews_path {
        let ratings = CatalogImporter::ratings_from_path(path)?;
        info!(rated_agencies = ratings.len(), "review ratings loaded");
        snapshot.set_ratings(ratings);
    }

    Ok(snapshot)
}

pub(crate) fn parse_property_type(raw: &str) -> Result<PropertyType, String> {
    PropertyType::parse(raw)
        .ok_or_else(|| format!("unknown property type '{raw}' (expected standard, luxe or all)"))
}
