use tracing::debug;

use super::filter::FilterCriteria;
use super::ranking::{rank, RankCandidate};
use super::scoring::effective_score;
use super::snapshot::{CatalogScope, CatalogSnapshot};
use super::view::{CatalogView, RankedOffering};

/// Stateless engine turning a catalog snapshot and visitor criteria into a listing.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankingFilterEngine;

impl RankingFilterEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn view(&self, snapshot: &CatalogSnapshot, criteria: &FilterCriteria) -> CatalogView {
        self.view_in(snapshot, &CatalogScope::all(), criteria)
    }

    /// Offerings whose agency is missing or unvalidated never count toward the scope total.
    pub fn view_in(
        &self,
        snapshot: &CatalogSnapshot,
        scope: &CatalogScope,
        criteria: &FilterCriteria,
    ) -> CatalogView {
        let in_scope: Vec<RankCandidate<'_>> = snapshot
            .offerings()
            .iter()
            .filter_map(|offering| {
                let agency = snapshot.displayable_agency(offering)?;
                scope.includes(agency).then(|| RankCandidate {
                    offering,
                    agency,
                    score: effective_score(agency, snapshot.subscription(&agency.id)),
                })
            })
            .collect();

        let matching: Vec<RankCandidate<'_>> = in_scope
            .iter()
            .copied()
            .filter(|candidate| {
                criteria.matches(
                    candidate.offering,
                    snapshot.ratings().average(&candidate.agency.id),
                )
            })
            .collect();

        let offerings: Vec<RankedOffering> = rank(&matching)
            .into_iter()
            .enumerate()
            .map(|(index, candidate)| RankedOffering {
                position: index + 1,
                agency_id: candidate.agency.id.clone(),
                agency_name: candidate.agency.name.clone(),
                score: candidate.score.value,
                score_source: candidate.score.source,
                rating: snapshot.ratings().average(&candidate.agency.id),
                offering: candidate.offering.clone(),
            })
            .collect();

        let view = CatalogView::new(in_scope.len(), offerings);
        debug!(
            city = scope.city.as_deref().unwrap_or("*"),
            active_filters = criteria.active_count(),
            total = view.total,
            matched = view.matched,
            "catalog view computed"
        );
        view
    }
}
