use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use tracing::warn;

use crate::catalog::domain::{
    Agency, AgencyId, Offering, OfferingId, PaymentStatus, PropertyType, Subscription,
    SubscriptionOptions,
};

/// Agency row as returned by the backend, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAgencyRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub created_at: Option<String>,
    pub manual_score: Option<f64>,
    pub is_validated: Option<bool>,
    pub cities: Option<Vec<String>>,
}

/// Package row as returned by the backend, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawOfferingRecord {
    pub id: Option<String>,
    pub agency_id: Option<String>,
    pub name: Option<String>,
    pub commission_percent: Option<f64>,
    pub min_duration_months: Option<i64>,
    pub services: Option<Vec<String>>,
    pub property_type: Option<String>,
    pub min_area_sqm: Option<f64>,
    pub min_bedrooms: Option<i64>,
    pub accepts_partial_management: Option<bool>,
    pub accepts_primary_residence: Option<bool>,
}

/// Subscription row as returned by the backend, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawSubscriptionRecord {
    pub agency_id: Option<String>,
    pub featured_badge: Option<bool>,
    pub homepage_highlight: Option<bool>,
    pub priority_placement: Option<bool>,
    pub reviews_widget: Option<bool>,
    pub monthly_amount: Option<f64>,
    pub payment_status: Option<String>,
}

/// Missing creation dates sort after every dated agency on score ties.
pub fn normalize_agency(raw: RawAgencyRecord) -> Option<Agency> {
    let Some(id) = non_blank(raw.id) else {
        warn!(name = ?raw.name, "dropping agency record without an id");
        return None;
    };

    let created_at = raw
        .created_at
        .as_deref()
        .and_then(parse_timestamp)
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    Some(Agency {
        name: non_blank(raw.name).unwrap_or_else(|| id.clone()),
        id: AgencyId(id),
        created_at,
        manual_score: raw.manual_score.filter(|score| score.is_finite()),
        validated: raw.is_validated.unwrap_or(false),
        cities: raw
            .cities
            .unwrap_or_default()
            .into_iter()
            .filter_map(|city| non_blank(Some(city)))
            .collect(),
    })
}

pub fn normalize_offering(raw: RawOfferingRecord) -> Option<Offering> {
    let (Some(id), Some(agency_id)) = (non_blank(raw.id), non_blank(raw.agency_id)) else {
        warn!(name = ?raw.name, "dropping offering record without id or agency");
        return None;
    };

    let property_type = match raw.property_type.as_deref() {
        None => PropertyType::All,
        Some(value) => PropertyType::parse(value).unwrap_or_else(|| {
            warn!(offering = %id, value, "unknown property type, accepting all");
            PropertyType::All
        }),
    };

    Some(Offering {
        name: non_blank(raw.name).unwrap_or_else(|| id.clone()),
        id: OfferingId(id),
        agency_id: AgencyId(agency_id),
        commission_percent: finite_or_zero(raw.commission_percent).clamp(0.0, 100.0),
        min_duration_months: non_negative(raw.min_duration_months),
        services: raw
            .services
            .unwrap_or_default()
            .into_iter()
            .filter_map(|service| non_blank(Some(service)))
            .collect(),
        property_type,
        min_area_sqm: finite_or_zero(raw.min_area_sqm).max(0.0),
        min_bedrooms: non_negative(raw.min_bedrooms),
        accepts_partial_management: raw.accepts_partial_management.unwrap_or(false),
        accepts_primary_residence: raw.accepts_primary_residence.unwrap_or(false),
    })
}

pub fn normalize_subscription(raw: RawSubscriptionRecord) -> Option<Subscription> {
    let Some(agency_id) = non_blank(raw.agency_id) else {
        warn!("dropping subscription record without agency");
        return None;
    };

    let payment_status = match raw.payment_status.as_deref() {
        None => PaymentStatus::Pending,
        Some(value) => PaymentStatus::parse(value).unwrap_or_else(|| {
            warn!(agency = %agency_id, value, "unknown payment status, treating as pending");
            PaymentStatus::Pending
        }),
    };

    Some(Subscription {
        agency_id: AgencyId(agency_id),
        options: SubscriptionOptions {
            featured_badge: raw.featured_badge.unwrap_or(false),
            homepage_highlight: raw.homepage_highlight.unwrap_or(false),
            priority_placement: raw.priority_placement.unwrap_or(false),
            reviews_widget: raw.reviews_widget.unwrap_or(false),
        },
        monthly_amount: finite_or_zero(raw.monthly_amount).max(0.0).floor() as u32,
        payment_status,
    })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    value.filter(|value| value.is_finite()).unwrap_or(0.0)
}

fn non_negative(value: Option<i64>) -> u32 {
    value
        .map(|value| u32::try_from(value.max(0)).unwrap_or(u32::MAX))
        .unwrap_or(0)
}

pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
