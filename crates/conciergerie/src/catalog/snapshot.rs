use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use super::domain::{Agency, AgencyId, Offering, Subscription};
use super::ratings::AgencyRatings;
use super::scoring::effective_score;

/// Geographic scope of a listing page. No city means the whole directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogScope {
    #[serde(default)]
    pub city: Option<String>,
}

impl CatalogScope {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn city(city: impl Into<String>) -> Self {
        Self {
            city: Some(city.into()),
        }
    }

    pub fn includes(&self, agency: &Agency) -> bool {
        match self.city.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(city) => agency.serves_city(city),
        }
    }
}

/// Consistent, already-normalized view of the catalog handed to the ranking engine.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    agencies: BTreeMap<AgencyId, Agency>,
    offerings: Vec<Offering>,
    subscriptions: HashMap<AgencyId, Subscription>,
    ratings: AgencyRatings,
}

impl CatalogSnapshot {
    /// When several subscriptions name the same agency, a recognized one is preferred, then
    /// the one worth the most points.
    pub fn new(
        agencies: impl IntoIterator<Item = Agency>,
        offerings: Vec<Offering>,
        subscriptions: impl IntoIterator<Item = Subscription>,
    ) -> Self {
        let agencies = agencies
            .into_iter()
            .map(|agency| (agency.id.clone(), agency))
            .collect();

        let mut by_agency: HashMap<AgencyId, Subscription> = HashMap::new();
        for subscription in subscriptions {
            match by_agency.get(&subscription.agency_id) {
                Some(existing) if !outranks(&subscription, existing) => {}
                _ => {
                    by_agency.insert(subscription.agency_id.clone(), subscription);
                }
            }
        }

        Self {
            agencies,
            offerings,
            subscriptions: by_agency,
            ratings: AgencyRatings::default(),
        }
    }

    pub fn with_ratings(mut self, ratings: AgencyRatings) -> Self {
        self.ratings = ratings;
        self
    }

    pub fn set_ratings(&mut self, ratings: AgencyRatings) {
        self.ratings = ratings;
    }

    pub fn agency(&self, id: &AgencyId) -> Option<&Agency> {
        self.agencies.get(id)
    }

    pub fn agency_mut(&mut self, id: &AgencyId) -> Option<&mut Agency> {
        self.agencies.get_mut(id)
    }

    pub fn agencies(&self) -> impl Iterator<Item = &Agency> {
        self.agencies.values()
    }

    pub fn offerings(&self) -> &[Offering] {
        &self.offerings
    }

    pub fn subscription(&self, agency_id: &AgencyId) -> Option<&Subscription> {
        self.subscriptions.get(agency_id)
    }

    pub fn ratings(&self) -> &AgencyRatings {
        &self.ratings
    }

    /// The agency behind `offering`, if it exists and may be shown publicly.
    pub fn displayable_agency(&self, offering: &Offering) -> Option<&Agency> {
        self.agency(&offering.agency_id)
            .filter(|agency| agency.validated)
    }

    /// Effective score of every agency, highest first. Used by admin tooling.
    pub fn agency_scores(&self) -> Vec<(AgencyId, f64)> {
        let mut scores: Vec<(AgencyId, f64)> = self
            .agencies
            .values()
            .map(|agency| {
                let score = effective_score(agency, self.subscription(&agency.id));
                (agency.id.clone(), score.value)
            })
            .collect();
        scores.sort_by(|left, right| right.1.total_cmp(&left.1));
        scores
    }
}

fn outranks(candidate: &Subscription, existing: &Subscription) -> bool {
    match (candidate.is_recognized(), existing.is_recognized()) {
        (true, false) => true,
        (false, true) => false,
        _ => candidate.total_points() > existing.total_points(),
    }
}
