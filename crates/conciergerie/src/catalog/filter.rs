use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::domain::{Offering, PropertyType};

/// Visitor-selected constraints. Every present criterion must hold; absent ones impose nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub property_type: Option<PropertyType>,
    /// Floor area of the visitor's property, in square metres.
    pub min_area_sqm: Option<f64>,
    /// Bedroom count of the visitor's property.
    pub min_bedrooms: Option<u32>,
    pub max_commission_percent: Option<f64>,
    /// Longest engagement the visitor is willing to sign, in months.
    pub max_duration_months: Option<u32>,
    pub required_services: BTreeSet<String>,
    /// When set, only packages that accept primary residences pass.
    pub accepts_primary_residence: bool,
    /// When set, only packages that accept partial management pass.
    pub accepts_partial_management: bool,
    pub min_rating: Option<f64>,
}

impl FilterCriteria {
    /// Restore the all-absent state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_unfiltered(&self) -> bool {
        self.active_count() == 0
    }

    /// Number of criteria currently constraining the list.
    pub fn active_count(&self) -> usize {
        [
            self.property_type.is_some(),
            finite(self.min_area_sqm).is_some(),
            self.min_bedrooms.is_some(),
            finite(self.max_commission_percent).is_some(),
            self.max_duration_months.is_some(),
            !self.required_services.is_empty(),
            self.accepts_primary_residence,
            self.accepts_partial_management,
            finite(self.min_rating).is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Whether `offering` passes every active criterion.
    ///
    /// `agency_rating` is the average review score of the owning agency, if any reviews exist.
    /// Non-finite thresholds impose nothing.
    pub fn matches(&self, offering: &Offering, agency_rating: Option<f64>) -> bool {
        self.property_type
            .map_or(true, |requested| offering.property_type.accepts(requested))
            && finite(self.min_area_sqm)
                .map_or(true, |area| within_minimum(offering.min_area_sqm, area))
            && self.min_bedrooms.map_or(true, |bedrooms| {
                within_minimum(f64::from(offering.min_bedrooms), f64::from(bedrooms))
            })
            && finite(self.max_commission_percent)
                .map_or(true, |ceiling| offering.commission_percent <= ceiling)
            && self
                .max_duration_months
                .map_or(true, |ceiling| offering.min_duration_months <= ceiling)
            && self
                .required_services
                .iter()
                .all(|service| offering.includes_service(service))
            && (!self.accepts_primary_residence || offering.accepts_primary_residence)
            && (!self.accepts_partial_management || offering.accepts_partial_management)
            && finite(self.min_rating)
                .map_or(true, |threshold| meets_rating(agency_rating, threshold))
    }
}

fn finite(threshold: Option<f64>) -> Option<f64> {
    threshold.filter(|value| value.is_finite())
}

/// An offering minimum of zero is unbounded; otherwise it must not exceed the property's value.
fn within_minimum(offering_minimum: f64, property_value: f64) -> bool {
    offering_minimum <= 0.0 || offering_minimum <= property_value
}

/// Agencies without rating data are never excluded.
fn meets_rating(rating: Option<f64>, threshold: f64) -> bool {
    rating.map_or(true, |average| average >= threshold)
}
