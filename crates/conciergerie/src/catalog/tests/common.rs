use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::catalog::domain::{
    Agency, AgencyId, Offering, OfferingId, PaymentStatus, PropertyType, Subscription,
    SubscriptionOptions,
};
use crate::catalog::repository::{CatalogRepository, RepositoryError};
use crate::catalog::snapshot::CatalogSnapshot;
use crate::catalog::{catalog_router, CatalogService};

pub(super) fn agency(id: &str, year: i32, manual_score: Option<f64>, cities: &[&str]) -> Agency {
    Agency {
        id: AgencyId(id.to_string()),
        name: format!("Conciergerie {id}"),
        created_at: Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0).unwrap(),
        manual_score,
        validated: true,
        cities: cities.iter().map(|city| city.to_string()).collect(),
    }
}

pub(super) fn offering(id: &str, agency_id: &str, property_type: PropertyType) -> Offering {
    Offering {
        id: OfferingId(id.to_string()),
        agency_id: AgencyId(agency_id.to_string()),
        name: format!("Formule {id}"),
        commission_percent: 20.0,
        min_duration_months: 12,
        services: BTreeSet::new(),
        property_type,
        min_area_sqm: 0.0,
        min_bedrooms: 0,
        accepts_partial_management: false,
        accepts_primary_residence: false,
    }
}

pub(super) fn active_subscription(agency_id: &str, monthly_amount: u32) -> Subscription {
    Subscription {
        agency_id: AgencyId(agency_id.to_string()),
        options: SubscriptionOptions::default(),
        monthly_amount,
        payment_status: PaymentStatus::Active,
    }
}

/// Two agencies in Nice, one in Lyon; "azur" subscribes, "alpes" relies on a manual score.
pub(super) fn sample_snapshot() -> CatalogSnapshot {
    CatalogSnapshot::new(
        vec![
            agency("azur", 2023, Some(999.0), &["Nice"]),
            agency("riviera", 2021, Some(5.0), &["Nice"]),
            agency("alpes", 2020, Some(30.0), &["Lyon"]),
        ],
        vec![
            offering("azur-luxe", "azur", PropertyType::Luxe),
            offering("riviera-std", "riviera", PropertyType::Standard),
            offering("alpes-all", "alpes", PropertyType::All),
        ],
        vec![active_subscription("azur", 20)],
    )
}

#[derive(Default)]
pub(super) struct MemoryCatalog {
    snapshot: Mutex<CatalogSnapshot>,
}

impl MemoryCatalog {
    pub(super) fn with_snapshot(snapshot: CatalogSnapshot) -> Self {
        Self {
            snapshot: Mutex::new(snapshot),
        }
    }
}

impl CatalogRepository for MemoryCatalog {
    fn snapshot(&self) -> Result<CatalogSnapshot, RepositoryError> {
        Ok(self.snapshot.lock().expect("catalog mutex poisoned").clone())
    }

    fn set_manual_score(
        &self,
        agency_id: &AgencyId,
        score: Option<f64>,
    ) -> Result<Agency, RepositoryError> {
        let mut guard = self.snapshot.lock().expect("catalog mutex poisoned");
        let agency = guard.agency_mut(agency_id).ok_or(RepositoryError::NotFound)?;
        agency.manual_score = score;
        Ok(agency.clone())
    }

    fn set_validation(
        &self,
        agency_id: &AgencyId,
        validated: bool,
    ) -> Result<Agency, RepositoryError> {
        let mut guard = self.snapshot.lock().expect("catalog mutex poisoned");
        let agency = guard.agency_mut(agency_id).ok_or(RepositoryError::NotFound)?;
        agency.validated = validated;
        Ok(agency.clone())
    }
}

pub(super) struct UnavailableCatalog;

impl CatalogRepository for UnavailableCatalog {
    fn snapshot(&self) -> Result<CatalogSnapshot, RepositoryError> {
        Err(RepositoryError::Unavailable("backend offline".to_string()))
    }

    fn set_manual_score(
        &self,
        _agency_id: &AgencyId,
        _score: Option<f64>,
    ) -> Result<Agency, RepositoryError> {
        Err(RepositoryError::Unavailable("backend offline".to_string()))
    }

    fn set_validation(
        &self,
        _agency_id: &AgencyId,
        _validated: bool,
    ) -> Result<Agency, RepositoryError> {
        Err(RepositoryError::Unavailable("backend offline".to_string()))
    }
}

pub(super) fn build_service() -> (CatalogService<MemoryCatalog>, Arc<MemoryCatalog>) {
    let repository = Arc::new(MemoryCatalog::with_snapshot(sample_snapshot()));
    (CatalogService::new(repository.clone()), repository)
}

pub(super) fn router_with_service(service: CatalogService<MemoryCatalog>) -> axum::Router {
    catalog_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
