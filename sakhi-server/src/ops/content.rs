//! Remedy and scheme listings.
//!
//! The lists are small reference data: fetch everything, then apply the
//! search box and category tab in memory, mirroring how the views filter.

use sakhi_core::models::{GovernmentScheme, HomeRemedy};
use sqlx::PgPool;

pub async fn fetch_remedies(pool: &PgPool) -> Result<Vec<HomeRemedy>, sqlx::Error> {
    sqlx::query_as::<_, HomeRemedy>(
        "SELECT * FROM home_remedies ORDER BY category, condition_name",
    )
    .fetch_all(pool)
    .await
}

pub async fn fetch_active_schemes(pool: &PgPool) -> Result<Vec<GovernmentScheme>, sqlx::Error> {
    sqlx::query_as::<_, GovernmentScheme>(
        "SELECT * FROM government_schemes WHERE active = TRUE ORDER BY category, scheme_name",
    )
    .fetch_all(pool)
    .await
}

pub fn filter_remedies(
    remedies: Vec<HomeRemedy>,
    query: Option<&str>,
    category: Option<&str>,
) -> Vec<HomeRemedy> {
    remedies
        .into_iter()
        .filter(|r| matches_query(query, |q| r.matches(q)) && matches_category(&r.category, category))
        .collect()
}

pub fn filter_schemes(
    schemes: Vec<GovernmentScheme>,
    query: Option<&str>,
    category: Option<&str>,
) -> Vec<GovernmentScheme> {
    schemes
        .into_iter()
        .filter(|s| matches_query(query, |q| s.matches(q)) && matches_category(&s.category, category))
        .collect()
}

fn matches_query(query: Option<&str>, matcher: impl Fn(&str) -> bool) -> bool {
    match query {
        Some(q) if !q.trim().is_empty() => matcher(q.trim()),
        _ => true,
    }
}

// "all" is the default category tab and selects everything
fn matches_category(actual: &str, selected: Option<&str>) -> bool {
    match selected {
        None => true,
        Some("all") => true,
        Some(c) => actual == c,
    }
}
