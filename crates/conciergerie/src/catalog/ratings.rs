use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::AgencyId;

pub const MIN_REVIEW_RATING: u8 = 1;
pub const MAX_REVIEW_RATING: u8 = 5;

/// A visitor review left on an agency's page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub agency_id: AgencyId,
    pub rating: u8,
    /// Only moderated reviews are published and counted.
    pub approved: bool,
    #[serde(default)]
    pub created_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub average: f64,
    pub review_count: u32,
}

/// Per-agency average ratings supplied alongside a catalog snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgencyRatings {
    by_agency: HashMap<AgencyId, RatingSummary>,
}

impl AgencyRatings {
    /// Aggregate approved, in-range reviews into per-agency averages.
    pub fn from_reviews<I>(reviews: I) -> Self
    where
        I: IntoIterator<Item = Review>,
    {
        let mut totals: HashMap<AgencyId, (u32, u32)> = HashMap::new();
        for review in reviews {
            if !review.approved
                || !(MIN_REVIEW_RATING..=MAX_REVIEW_RATING).contains(&review.rating)
            {
                continue;
            }
            let entry = totals.entry(review.agency_id).or_insert((0, 0));
            entry.0 += u32::from(review.rating);
            entry.1 += 1;
        }

        let by_agency = totals
            .into_iter()
            .map(|(agency_id, (sum, count))| {
                let summary = RatingSummary {
                    average: f64::from(sum) / f64::from(count),
                    review_count: count,
                };
                (agency_id, summary)
            })
            .collect();

        Self { by_agency }
    }

    pub fn insert(&mut self, agency_id: AgencyId, summary: RatingSummary) {
        self.by_agency.insert(agency_id, summary);
    }

    pub fn summary(&self, agency_id: &AgencyId) -> Option<RatingSummary> {
        self.by_agency.get(agency_id).copied()
    }

    pub fn average(&self, agency_id: &AgencyId) -> Option<f64> {
        self.summary(agency_id).map(|summary| summary.average)
    }

    pub fn len(&self) -> usize {
        self.by_agency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_agency.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(agency: &str, rating: u8, approved: bool) -> Review {
        Review {
            agency_id: AgencyId(agency.to_string()),
            rating,
            approved,
            created_on: None,
        }
    }

    #[test]
    fn averages_only_approved_reviews() {
        let ratings = AgencyRatings::from_reviews(vec![
            review("azur", 5, true),
            review("azur", 4, true),
            review("azur", 1, false),
            review("alpes", 3, true),
        ]);

        let azur = ratings
            .summary(&AgencyId("azur".to_string()))
            .expect("azur rated");
        assert_eq!(azur.review_count, 2);
        assert!((azur.average - 4.5).abs() < f64::EPSILON);
        assert_eq!(ratings.average(&AgencyId("alpes".to_string())), Some(3.0));
        assert_eq!(ratings.len(), 2);
    }

    #[test]
    fn out_of_range_ratings_are_ignored() {
        let ratings =
            AgencyRatings::from_reviews(vec![review("azur", 0, true), review("azur", 9, true)]);
        assert!(ratings.is_empty());
        assert_eq!(ratings.average(&AgencyId("azur".to_string())), None);
    }
}
