use crate::infra::parse_property_type;
use clap::Args;
use conciergerie::catalog::{
    CatalogImporter, CatalogScope, CatalogSnapshot, CatalogView, FilterCriteria, PropertyType,
    RankingFilterEngine, SubscriptionOptions,
};
use conciergerie::error::AppError;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Catalog snapshot JSON export (agencies, offerings, subscriptions)
    #[arg(long)]
    snapshot: PathBuf,
    /// Optional reviews CSV export used for ratings
    #[arg(long)]
    reviews: Option<PathBuf>,
    /// Restrict the listing to agencies serving this city
    #[arg(long)]
    city: Option<String>,
    /// Property type of the owner's rental (standard, luxe, all)
    #[arg(long, value_parser = parse_property_type)]
    property_type: Option<PropertyType>,
    /// Floor area of the property, in square metres
    #[arg(long)]
    area: Option<f64>,
    /// Bedroom count of the property
    #[arg(long)]
    bedrooms: Option<u32>,
    /// Highest acceptable commission, in percent
    #[arg(long)]
    max_commission: Option<f64>,
    /// Longest acceptable engagement, in months
    #[arg(long)]
    max_duration: Option<u32>,
    /// Required service tag (repeatable)
    #[arg(long = "service")]
    services: Vec<String>,
    /// Only keep packages accepting primary residences
    #[arg(long)]
    primary_residence: bool,
    /// Only keep packages accepting partial management
    #[arg(long)]
    partial_management: bool,
    /// Minimum average review rating
    #[arg(long)]
    min_rating: Option<f64>,
    /// Also print the effective score of every agency
    #[arg(long)]
    scores: bool,
}

impl RankArgs {
    fn criteria(&self) -> FilterCriteria {
        FilterCriteria {
            property_type: self.property_type,
            min_area_sqm: self.area,
            min_bedrooms: self.bedrooms,
            max_commission_percent: self.max_commission,
            max_duration_months: self.max_duration,
            required_services: self.services.iter().cloned().collect(),
            accepts_primary_residence: self.primary_residence,
            accepts_partial_management: self.partial_management,
            min_rating: self.min_rating,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct QuoteArgs {
    /// Add the featured badge
    #[arg(long)]
    featured_badge: bool,
    /// Add the homepage highlight
    #[arg(long)]
    homepage_highlight: bool,
    /// Add priority placement
    #[arg(long)]
    priority_placement: bool,
    /// Add the reviews widget
    #[arg(long)]
    reviews_widget: bool,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let mut snapshot = CatalogImporter::snapshot_from_path(&args.snapshot)?;
    if let Some(path) = &args.reviews {
        snapshot.set_ratings(CatalogImporter::ratings_from_path(path)?);
    }

    let scope = CatalogScope {
        city: args.city.clone(),
    };
    let criteria = args.criteria();
    let view = RankingFilterEngine::new().view_in(&snapshot, &scope, &criteria);

    print!("{}", render_view(&view, &scope, &criteria));
    if args.scores {
        print!("{}", render_scores(&snapshot));
    }

    Ok(())
}

pub(crate) fn run_quote(args: QuoteArgs) {
    let quote = SubscriptionOptions {
        featured_badge: args.featured_badge,
        homepage_highlight: args.homepage_highlight,
        priority_placement: args.priority_placement,
        reviews_widget: args.reviews_widget,
    }
    .quote();

    println!("Subscription quote");
    println!("- Monthly price: {} EUR", quote.monthly_price);
    println!("- Option points: {}", quote.option_points);
    println!("- Amount points (once paid): {}", quote.amount_points);
    println!("- Ranking score: {}", quote.total_points);
}

fn render_view(view: &CatalogView, scope: &CatalogScope, criteria: &FilterCriteria) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Conciergerie listing ({})\n",
        scope.city.as_deref().unwrap_or("all cities")
    ));
    out.push_str(&format!(
        "{} of {} offerings match ({} active filters)\n",
        view.matched,
        view.total,
        criteria.active_count()
    ));

    if let Some(state) = view.empty_state {
        out.push_str(&format!("\n{}\n", state.label()));
        if view.show_reset {
            out.push_str("Hint: drop some filters to see every offering.\n");
        }
        return out;
    }

    out.push('\n');
    for row in &view.offerings {
        let rating = match row.rating {
            Some(average) => format!("{average:.1}/5"),
            None => "no reviews".to_string(),
        };
        out.push_str(&format!(
            "{:>2}. {} | {} ({}) | score {} ({:?}) | {:.1}% commission | {}\n",
            row.position,
            row.agency_name,
            row.offering.name,
            row.offering.property_type.label(),
            row.score,
            row.score_source,
            row.offering.commission_percent,
            rating
        ));
    }
    out
}

fn render_scores(snapshot: &CatalogSnapshot) -> String {
    let mut out = String::from("\nAgency scores\n");
    for (agency_id, score) in snapshot.agency_scores() {
        match snapshot.subscription(&agency_id) {
            Some(subscription) => out.push_str(&format!(
                "- {agency_id}: {score} (subscription {})\n",
                subscription.payment_status.label()
            )),
            None => out.push_str(&format!("- {agency_id}: {score}\n")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> RankArgs {
        RankArgs {
            snapshot: PathBuf::from(env!("CARGO_MANIFEST_DIR"))
                .join("../../crates/conciergerie/tests/fixtures/catalog_snapshot.json"),
            reviews: None,
            city: None,
            property_type: None,
            area: None,
            bedrooms: None,
            max_commission: None,
            max_duration: None,
            services: vec!["menage".to_string(), "linge".to_string()],
            primary_residence: false,
            partial_management: true,
            min_rating: None,
            scores: false,
        }
    }

    #[test]
    fn criteria_mirror_command_line_flags() {
        let criteria = args().criteria();
        assert_eq!(criteria.required_services.len(), 2);
        assert!(criteria.accepts_partial_management);
        assert_eq!(criteria.active_count(), 2);
    }

    #[test]
    fn nan_flags_do_not_empty_the_listing() {
        let args = RankArgs {
            area: Some(f64::NAN),
            min_rating: Some(f64::NAN),
            services: Vec::new(),
            partial_management: false,
            ..args()
        };
        let snapshot = CatalogImporter::snapshot_from_path(&args.snapshot).expect("snapshot");

        let view = RankingFilterEngine::new().view(&snapshot, &args.criteria());

        assert_eq!(args.criteria().active_count(), 0);
        assert_eq!(view.matched, 4);
    }

    #[test]
    fn render_lists_ranked_rows() {
        let args = args();
        let snapshot = CatalogImporter::snapshot_from_path(&args.snapshot).expect("snapshot");
        let scope = CatalogScope::all();
        let view = RankingFilterEngine::new().view_in(&snapshot, &scope, &args.criteria());

        let rendered = render_view(&view, &scope, &args.criteria());

        assert!(rendered.contains("1 of 4 offerings match"));
        assert!(rendered.contains("Riviera Hosting | Confort (Standard)"));
    }

    #[test]
    fn scores_show_subscription_payment_status() {
        let snapshot = CatalogImporter::snapshot_from_path(&args().snapshot).expect("snapshot");

        let rendered = render_scores(&snapshot);

        assert!(rendered.contains("- azur-keys: 20 (subscription Active)"));
        assert!(rendered.contains("- riviera-hosting: 20 (subscription Cancelled)"));
        assert!(rendered.contains("- lac-conciergerie: 0\n"));
    }

    #[test]
    fn render_explains_empty_results() {
        let scope = CatalogScope::city("Brest");
        let criteria = FilterCriteria::default();
        let view =
            RankingFilterEngine::new().view_in(&CatalogSnapshot::default(), &scope, &criteria);

        let rendered = render_view(&view, &scope, &criteria);

        assert!(rendered.contains("No conciergerie is registered here yet"));
        assert!(!rendered.contains("Hint"));
    }
}
