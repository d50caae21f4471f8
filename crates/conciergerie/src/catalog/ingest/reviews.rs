use std::io::Read;

use serde::{Deserialize, Deserializer};
use tracing::warn;

use super::normalize::parse_timestamp;
use crate::catalog::domain::AgencyId;
use crate::catalog::ratings::Review;

pub(crate) fn parse_reviews<R: Read>(reader: R) -> Result<Vec<Review>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut reviews = Vec::new();

    for (line, record) in csv_reader.deserialize::<ReviewRow>().enumerate() {
        let row = record?;
        let Some(agency_id) = row.agency_id else {
            warn!(line = line + 2, "skipping review without agency id");
            continue;
        };

        reviews.push(Review {
            agency_id: AgencyId(agency_id),
            rating: row.rating,
            approved: row.approved.as_deref().map_or(false, parse_flag),
            created_on: row
                .created_at
                .as_deref()
                .and_then(parse_timestamp)
                .map(|dt| dt.date_naive()),
        });
    }

    Ok(reviews)
}

#[derive(Debug, Deserialize)]
struct ReviewRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    agency_id: Option<String>,
    rating: u8,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    approved: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    created_at: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "t" | "1" | "yes" | "approved"
    )
}
