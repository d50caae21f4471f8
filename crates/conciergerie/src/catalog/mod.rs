//! Conciergerie catalog: ranking, filtering, and the services around them.

pub mod domain;
mod engine;
pub mod filter;
pub mod ingest;
pub mod ranking;
pub mod ratings;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;
mod snapshot;
pub mod view;

#[cfg(test)]
mod tests;

pub use domain::{
    Agency, AgencyId, Offering, OfferingId, PaymentStatus, PropertyType, Subscription,
    SubscriptionOptions,
};
pub use engine::RankingFilterEngine;
pub use filter::FilterCriteria;
pub use ingest::{CatalogImportError, CatalogImporter, SnapshotDocument};
pub use ratings::{AgencyRatings, RatingSummary, Review};
pub use repository::{CatalogRepository, RepositoryError};
pub use router::{catalog_router, ManualScoreRequest, SearchRequest, ValidationRequest};
pub use scoring::{
    counts_monetary_points, effective_score, EffectiveScore, ScoreSource, SubscriptionQuote,
};
pub use service::{CatalogService, CatalogServiceError};
pub use snapshot::{CatalogScope, CatalogSnapshot};
pub use view::{CatalogView, EmptyState, RankedOffering};
