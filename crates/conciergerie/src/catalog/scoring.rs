//! Subscription points, plan pricing, and the effective score used for ranking.

use serde::{Deserialize, Serialize};

use super::domain::{Agency, PaymentStatus, Subscription, SubscriptionOptions};

/// Monthly price of the base listing plan, in euros.
pub const BASE_MONTHLY_PRICE: u32 = 29;

/// Points awarded per whole euro of paid monthly amount.
pub const POINTS_PER_EURO: u32 = 1;

const FEATURED_BADGE: AddOn = AddOn {
    points: 5,
    monthly_price: 19,
};
const HOMEPAGE_HIGHLIGHT: AddOn = AddOn {
    points: 10,
    monthly_price: 39,
};
const PRIORITY_PLACEMENT: AddOn = AddOn {
    points: 15,
    monthly_price: 59,
};
const REVIEWS_WIDGET: AddOn = AddOn {
    points: 3,
    monthly_price: 9,
};

struct AddOn {
    points: u32,
    monthly_price: u32,
}

impl SubscriptionOptions {
    fn selected(&self) -> impl Iterator<Item = &'static AddOn> {
        [
            (self.featured_badge, &FEATURED_BADGE),
            (self.homepage_highlight, &HOMEPAGE_HIGHLIGHT),
            (self.priority_placement, &PRIORITY_PLACEMENT),
            (self.reviews_widget, &REVIEWS_WIDGET),
        ]
        .into_iter()
        .filter_map(|(chosen, add_on)| chosen.then_some(add_on))
    }

    pub fn points(&self) -> u32 {
        self.selected().map(|add_on| add_on.points).sum()
    }

    pub fn monthly_price(&self) -> u32 {
        BASE_MONTHLY_PRICE + self.selected().map(|add_on| add_on.monthly_price).sum::<u32>()
    }

    pub fn quote(&self) -> SubscriptionQuote {
        let monthly_price = self.monthly_price();
        let option_points = self.points();
        let amount_points = monthly_price.saturating_mul(POINTS_PER_EURO);
        SubscriptionQuote {
            options: *self,
            monthly_price,
            option_points,
            amount_points,
            total_points: option_points.saturating_add(amount_points),
        }
    }
}

/// Price and ranking points an agency would get for a plan once paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionQuote {
    pub options: SubscriptionOptions,
    pub monthly_price: u32,
    pub option_points: u32,
    pub amount_points: u32,
    pub total_points: u32,
}

/// Whether the paid monthly amount of a subscription currently contributes points.
pub fn counts_monetary_points(status: PaymentStatus) -> bool {
    matches!(status, PaymentStatus::Active | PaymentStatus::Completed)
}

/// Whether a subscription record takes precedence over the agency's manual score.
///
/// Failed and cancelled checkouts are treated as if no subscription existed.
pub fn is_recognized(status: PaymentStatus) -> bool {
    matches!(
        status,
        PaymentStatus::Active | PaymentStatus::Completed | PaymentStatus::Pending
    )
}

impl Subscription {
    pub fn option_points(&self) -> u32 {
        self.options.points()
    }

    pub fn amount_points(&self) -> u32 {
        if counts_monetary_points(self.payment_status) {
            self.monthly_amount.saturating_mul(POINTS_PER_EURO)
        } else {
            0
        }
    }

    /// Saturates at `u32::MAX` so oversized exported amounts still rank first.
    pub fn total_points(&self) -> u32 {
        self.option_points().saturating_add(self.amount_points())
    }

    pub fn is_recognized(&self) -> bool {
        is_recognized(self.payment_status)
    }
}

/// Where an effective score came from, for transparent listings and audits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSource {
    Subscription,
    Manual,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveScore {
    pub value: f64,
    pub source: ScoreSource,
}

/// Resolve the single score used to rank `agency`.
///
/// A recognized subscription wins outright; the manual score is neither used nor added.
pub fn effective_score(agency: &Agency, subscription: Option<&Subscription>) -> EffectiveScore {
    if let Some(subscription) = subscription.filter(|subscription| subscription.is_recognized()) {
        return EffectiveScore {
            value: f64::from(subscription.total_points()),
            source: ScoreSource::Subscription,
        };
    }

    match agency.manual_score.filter(|score| score.is_finite()) {
        Some(score) => EffectiveScore {
            value: score,
            source: ScoreSource::Manual,
        },
        None => EffectiveScore {
            value: 0.0,
            source: ScoreSource::Default,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::domain::AgencyId;
    use chrono::{TimeZone, Utc};

    fn agency(manual_score: Option<f64>) -> Agency {
        Agency {
            id: AgencyId("agency-c".to_string()),
            name: "Conciergerie C".to_string(),
            created_at: Utc.with_ymd_and_hms(2023, 3, 1, 0, 0, 0).unwrap(),
            manual_score,
            validated: true,
            cities: Vec::new(),
        }
    }

    fn subscription(monthly_amount: u32, payment_status: PaymentStatus) -> Subscription {
        Subscription {
            agency_id: AgencyId("agency-c".to_string()),
            options: SubscriptionOptions::default(),
            monthly_amount,
            payment_status,
        }
    }

    #[test]
    fn subscription_points_replace_manual_score() {
        let agency = agency(Some(999.0));
        let subscription = subscription(15, PaymentStatus::Active);

        let score = effective_score(&agency, Some(&subscription));

        assert_eq!(score.value, 15.0);
        assert_eq!(score.source, ScoreSource::Subscription);
    }

    #[test]
    fn manual_score_applies_without_subscription() {
        assert_eq!(effective_score(&agency(Some(42.0)), None).value, 42.0);

        let fallback = effective_score(&agency(None), None);
        assert_eq!(fallback.value, 0.0);
        assert_eq!(fallback.source, ScoreSource::Default);
    }

    #[test]
    fn cancelled_subscription_falls_back_to_manual_score() {
        let agency = agency(Some(12.0));
        let subscription = subscription(80, PaymentStatus::Cancelled);

        let score = effective_score(&agency, Some(&subscription));

        assert_eq!(score.value, 12.0);
        assert_eq!(score.source, ScoreSource::Manual);
    }

    #[test]
    fn pending_payment_keeps_option_points_only() {
        let mut pending = subscription(80, PaymentStatus::Pending);
        pending.options.priority_placement = true;

        assert_eq!(pending.amount_points(), 0);
        assert_eq!(pending.total_points(), 15);
        assert_eq!(effective_score(&agency(Some(500.0)), Some(&pending)).value, 15.0);
    }

    #[test]
    fn oversized_amount_saturates_instead_of_overflowing() {
        let mut subscription = subscription(u32::MAX, PaymentStatus::Active);
        subscription.options.featured_badge = true;

        assert_eq!(subscription.total_points(), u32::MAX);
        assert_eq!(
            effective_score(&agency(None), Some(&subscription)).value,
            f64::from(u32::MAX)
        );
    }

    #[test]
    fn non_finite_manual_score_is_ignored() {
        assert_eq!(effective_score(&agency(Some(f64::NAN)), None).value, 0.0);
    }

    #[test]
    fn quote_adds_selected_options() {
        let options = SubscriptionOptions {
            featured_badge: true,
            homepage_highlight: false,
            priority_placement: true,
            reviews_widget: false,
        };

        let quote = options.quote();

        assert_eq!(quote.monthly_price, 29 + 19 + 59);
        assert_eq!(quote.option_points, 20);
        assert_eq!(quote.amount_points, 107);
        assert_eq!(quote.total_points, 127);
    }

    #[test]
    fn base_plan_has_no_option_points() {
        let quote = SubscriptionOptions::default().quote();
        assert_eq!(quote.option_points, 0);
        assert_eq!(quote.monthly_price, BASE_MONTHLY_PRICE);
    }
}
