use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for conciergerie agencies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AgencyId(pub String);

impl fmt::Display for AgencyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for packages offered by an agency.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OfferingId(pub String);

impl fmt::Display for OfferingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Kind of rental property a package agrees to manage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Standard,
    Luxe,
    All,
}

impl PropertyType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Luxe => "Luxe",
            Self::All => "All properties",
        }
    }

    /// Lenient parse used at the ingestion boundary. Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "standard" => Some(Self::Standard),
            "luxe" | "luxury" => Some(Self::Luxe),
            "all" | "tous" => Some(Self::All),
            _ => None,
        }
    }

    /// Whether a package declaring `self` can take on a property of `requested` type.
    pub fn accepts(self, requested: PropertyType) -> bool {
        self == Self::All || requested == Self::All || self == requested
    }
}

/// The conciergerie business listed in the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agency {
    pub id: AgencyId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    /// Administrative stopgap score, only used while no subscription is recognized.
    #[serde(default)]
    pub manual_score: Option<f64>,
    #[serde(default)]
    pub validated: bool,
    #[serde(default)]
    pub cities: Vec<String>,
}

impl Agency {
    pub fn serves_city(&self, city: &str) -> bool {
        let city = city.trim();
        self.cities
            .iter()
            .any(|served| served.trim().eq_ignore_ascii_case(city))
    }
}

/// One package ("formule") sold by one agency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offering {
    pub id: OfferingId,
    pub agency_id: AgencyId,
    pub name: String,
    pub commission_percent: f64,
    pub min_duration_months: u32,
    #[serde(default)]
    pub services: BTreeSet<String>,
    pub property_type: PropertyType,
    /// Smallest floor area accepted, in square metres. Zero means no minimum.
    #[serde(default)]
    pub min_area_sqm: f64,
    /// Smallest bedroom count accepted. Zero means no minimum.
    #[serde(default)]
    pub min_bedrooms: u32,
    #[serde(default)]
    pub accepts_partial_management: bool,
    #[serde(default)]
    pub accepts_primary_residence: bool,
}

impl Offering {
    pub fn includes_service(&self, service: &str) -> bool {
        self.services.contains(service)
    }
}

/// Payment lifecycle reported by the checkout provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Active,
    Completed,
    Pending,
    Failed,
    Cancelled,
}

impl PaymentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Completed => "Completed",
            Self::Pending => "Pending",
            Self::Failed => "Failed",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "completed" | "complete" | "paid" | "succeeded" => Some(Self::Completed),
            "pending" | "processing" => Some(Self::Pending),
            "failed" => Some(Self::Failed),
            "cancelled" | "canceled" | "expired" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

/// Add-on choices an agency selects when subscribing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubscriptionOptions {
    pub featured_badge: bool,
    pub homepage_highlight: bool,
    pub priority_placement: bool,
    pub reviews_widget: bool,
}

/// Paid-visibility record attached to an agency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub agency_id: AgencyId,
    #[serde(default)]
    pub options: SubscriptionOptions,
    /// Monthly amount paid, in whole euros.
    #[serde(default)]
    pub monthly_amount: u32,
    pub payment_status: PaymentStatus,
}
