//! Data-access boundary: loosely shaped backend exports become validated catalog types here.

mod normalize;
mod reviews;

pub use normalize::{
    normalize_agency, normalize_offering, normalize_subscription, RawAgencyRecord,
    RawOfferingRecord, RawSubscriptionRecord,
};

use crate::catalog::ratings::{AgencyRatings, Review};
use crate::catalog::snapshot::CatalogSnapshot;
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::info;

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read catalog export: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid reviews CSV data: {}", err),
            CatalogImportError::Json(err) => write!(f, "invalid catalog snapshot JSON: {}", err),
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<serde_json::Error> for CatalogImportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// Raw export of the three catalog tables.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SnapshotDocument {
    pub agencies: Vec<RawAgencyRecord>,
    pub offerings: Vec<RawOfferingRecord>,
    pub subscriptions: Vec<RawSubscriptionRecord>,
}

impl SnapshotDocument {
    pub fn into_snapshot(self) -> CatalogSnapshot {
        let agencies: Vec<_> = self
            .agencies
            .into_iter()
            .filter_map(normalize_agency)
            .collect();
        let offerings: Vec<_> = self
            .offerings
            .into_iter()
            .filter_map(normalize_offering)
            .collect();
        let subscriptions: Vec<_> = self
            .subscriptions
            .into_iter()
            .filter_map(normalize_subscription)
            .collect();

        info!(
            agencies = agencies.len(),
            offerings = offerings.len(),
            subscriptions = subscriptions.len(),
            "catalog snapshot normalized"
        );

        CatalogSnapshot::new(agencies, offerings, subscriptions)
    }
}

pub struct CatalogImporter;

impl CatalogImporter {
    pub fn snapshot_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<CatalogSnapshot, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::snapshot_from_reader(file)
    }

    pub fn snapshot_from_reader<R: Read>(reader: R) -> Result<CatalogSnapshot, CatalogImportError> {
        let document: SnapshotDocument = serde_json::from_reader(reader)?;
        Ok(document.into_snapshot())
    }

    pub fn reviews_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Review>, CatalogImportError> {
        let file = std::fs::File::open(path)?;
        Self::reviews_from_reader(file)
    }

    pub fn reviews_from_reader<R: Read>(reader: R) -> Result<Vec<Review>, CatalogImportError> {
        Ok(reviews::parse_reviews(reader)?)
    }

    pub fn ratings_from_reader<R: Read>(reader: R) -> Result<AgencyRatings, CatalogImportError> {
        Ok(AgencyRatings::from_reviews(Self::reviews_from_reader(reader)?))
    }

    pub fn ratings_from_path<P: AsRef<Path>>(path: P) -> Result<AgencyRatings, CatalogImportError> {
        Ok(AgencyRatings::from_reviews(Self::reviews_from_path(path)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::domain::AgencyId;
    use chrono::NaiveDate;
    use std::io::Cursor;

    #[test]
    fn snapshot_json_is_normalized() {
        let json = r#"{
            "agencies": [
                {"id": "azur", "name": "Azur", "created_at": "2022-01-01", "is_validated": true},
                {"name": "ghost"}
            ],
            "offerings": [
                {"id": "o1", "agency_id": "azur", "commission_percent": 18, "property_type": "luxe"}
            ],
            "subscriptions": [
                {"agency_id": "azur", "monthly_amount": 20, "payment_status": "active"}
            ]
        }"#;

        let snapshot =
            CatalogImporter::snapshot_from_reader(Cursor::new(json)).expect("snapshot parses");

        assert_eq!(snapshot.agencies().count(), 1);
        assert_eq!(snapshot.offerings().len(), 1);
        let azur = AgencyId("azur".to_string());
        assert_eq!(
            snapshot.subscription(&azur).map(|sub| sub.total_points()),
            Some(20)
        );
    }

    #[test]
    fn malformed_snapshot_reports_json_error() {
        let err = CatalogImporter::snapshot_from_reader(Cursor::new("{ not json"))
            .expect_err("invalid json");
        assert!(matches!(err, CatalogImportError::Json(_)));
        assert!(err.to_string().contains("invalid catalog snapshot JSON"));
    }

    #[test]
    fn reviews_csv_feeds_ratings() {
        let csv = "agency_id,rating,approved,created_at\n\
                   azur,5,true,2024-05-01T09:00:00Z\n\
                   azur,3,yes,2024-05-02\n\
                   azur,1,false,\n\
                   ,4,true,\n";

        let reviews =
            CatalogImporter::reviews_from_reader(Cursor::new(csv)).expect("reviews parse");
        assert_eq!(reviews.len(), 3);
        assert_eq!(
            reviews[0].created_on,
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );

        let ratings = AgencyRatings::from_reviews(reviews);
        assert_eq!(ratings.average(&AgencyId("azur".to_string())), Some(4.0));
    }

    #[test]
    fn non_numeric_rating_is_a_csv_error() {
        let csv = "agency_id,rating,approved,created_at\nazur,great,true,\n";
        let err = CatalogImporter::reviews_from_reader(Cursor::new(csv)).expect_err("bad rating");
        assert!(matches!(err, CatalogImportError::Csv(_)));
    }
}
