//! Per-visitor browsing state: active filters, favorite agencies, and cookie consent.
//!
//! The container is hydrated from whatever the client persisted and handed to the
//! presentation layer explicitly; nothing here lives in a global.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::{AgencyId, FilterCriteria};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CookieConsent {
    #[default]
    Undecided,
    AcceptedAll,
    EssentialOnly,
}

impl CookieConsent {
    pub const fn allows_analytics(self) -> bool {
        matches!(self, Self::AcceptedAll)
    }

    /// The consent banner stays visible until the visitor picks an option.
    pub const fn needs_banner(self) -> bool {
        matches!(self, Self::Undecided)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowsingSession {
    criteria: FilterCriteria,
    favorites: BTreeSet<AgencyId>,
    consent: CookieConsent,
}

impl BrowsingSession {
    /// Restore a session from client storage. Missing or unreadable data yields a fresh session.
    pub fn hydrate(persisted: Option<&str>) -> Self {
        let Some(raw) = persisted.filter(|raw| !raw.trim().is_empty()) else {
            return Self::default();
        };

        serde_json::from_str(raw).unwrap_or_else(|err| {
            warn!(error = %err, "discarding unreadable browsing session");
            Self::default()
        })
    }

    pub fn persist(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn update_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    pub fn reset_filters(&mut self) {
        self.criteria.reset();
    }

    /// Returns whether the agency is a favorite after the toggle.
    pub fn toggle_favorite(&mut self, agency_id: AgencyId) -> bool {
        if self.favorites.remove(&agency_id) {
            false
        } else {
            self.favorites.insert(agency_id);
            true
        }
    }

    pub fn is_favorite(&self, agency_id: &AgencyId) -> bool {
        self.favorites.contains(agency_id)
    }

    pub fn favorites(&self) -> impl Iterator<Item = &AgencyId> {
        self.favorites.iter()
    }

    pub fn consent(&self) -> CookieConsent {
        self.consent
    }

    pub fn set_consent(&mut self, consent: CookieConsent) {
        self.consent = consent;
    }

    /// Tear down everything, e.g. on sign-out.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
