use std::cmp::Ordering;

use super::domain::{Agency, Offering};
use super::scoring::EffectiveScore;

/// An offering paired with its resolved agency and score, ready for ordering.
#[derive(Debug, Clone, Copy)]
pub struct RankCandidate<'a> {
    pub offering: &'a Offering,
    pub agency: &'a Agency,
    pub score: EffectiveScore,
}

/// Higher effective score first; among equal scores the earlier-registered agency first.
pub fn compare(left: &RankCandidate<'_>, right: &RankCandidate<'_>) -> Ordering {
    right
        .score
        .value
        .total_cmp(&left.score.value)
        .then_with(|| left.agency.created_at.cmp(&right.agency.created_at))
}

/// Order candidates for display. The sort is stable, so full ties keep their input order.
pub fn rank<'a>(candidates: &[RankCandidate<'a>]) -> Vec<RankCandidate<'a>> {
    let mut ordered = candidates.to_vec();
    ordered.sort_by(compare);
    ordered
}
