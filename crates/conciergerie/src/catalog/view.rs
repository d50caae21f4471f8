use serde::{Deserialize, Serialize};

use super::domain::{AgencyId, Offering};
use super::scoring::ScoreSource;

/// Why a listing page has nothing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    /// No offering exists in this scope at all.
    NothingRegistered,
    /// Offerings exist, but none satisfy the active filters.
    NoMatch,
}

impl EmptyState {
    pub fn classify(total: usize, filtered: usize) -> Option<Self> {
        match (total, filtered) {
            (0, _) => Some(Self::NothingRegistered),
            (_, 0) => Some(Self::NoMatch),
            _ => None,
        }
    }

    /// Whether the page should offer a "reset filters" action.
    pub const fn offers_reset(self) -> bool {
        matches!(self, Self::NoMatch)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NothingRegistered => "No conciergerie is registered here yet",
            Self::NoMatch => "No conciergerie matches these filters",
        }
    }
}

/// One row of a ranked listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedOffering {
    pub position: usize,
    pub agency_id: AgencyId,
    pub agency_name: String,
    pub score: f64,
    pub score_source: ScoreSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub offering: Offering,
}

/// Ordered, filtered listing plus the counts the page needs for its messaging.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogView {
    pub total: usize,
    pub matched: usize,
    pub offerings: Vec<RankedOffering>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_state: Option<EmptyState>,
    pub show_reset: bool,
}

impl CatalogView {
    pub fn new(total: usize, offerings: Vec<RankedOffering>) -> Self {
        let matched = offerings.len();
        let empty_state = EmptyState::classify(total, matched);
        Self {
            total,
            matched,
            offerings,
            empty_state,
            show_reset: empty_state.map_or(false, EmptyState::offers_reset),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.offerings.is_empty()
    }
}
