// src/handlers/impacts.rs
use chrono::{DateTime, Utc};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use warp::reply::Json;
use warp::Rejection;

use crate::models::{DisplayUnit, ReformOption, ScoringType, Totals, ViewWindow, YearlyImpact};
use crate::services::allocation::AllocationRule;
use crate::services::calculations::{window_series, TEN_YEAR_WINDOW};
use crate::services::format::{format_headline, format_signed_currency};
use crate::services::store::DatasetStore;
use super::error::ApiError;
use super::parse_scoring;

#[derive(Debug, Default, Deserialize)]
pub struct ImpactQuery {
    #[serde(default)]
    pub window: ViewWindow,
    #[serde(default)]
    pub unit: DisplayUnit,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Headline {
    unit: DisplayUnit,
    ten_year: String,
    total: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ComparisonRow {
    source: String,
    scoring_type: String,
    ten_year_impact: f64,
    budget_window: String,
    display: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImpactResponse<'a> {
    reform: &'a ReformOption,
    allocation_rule: AllocationRule,
    scoring_type: ScoringType,
    scoring_label: &'static str,
    window: ViewWindow,
    window_label: String,
    yearly: &'a [YearlyImpact],
    totals: Totals,
    headline: Headline,
    comparison: Vec<ComparisonRow>,
    loaded_at: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReformTotals<'a> {
    reform_id: &'a str,
    name: Option<&'a str>,
    totals: Totals,
}

fn comparison_rows(
    store: &DatasetStore,
    reform_id: &str,
    scoring_type: ScoringType,
    ten_year: f64,
) -> Vec<ComparisonRow> {
    let estimates = store.catalog().estimates_for(reform_id);
    if estimates.is_empty() {
        return Vec::new();
    }

    let own = ComparisonRow {
        source: "PolicyEngine".to_string(),
        scoring_type: match scoring_type {
            ScoringType::Static => "Static".to_string(),
            ScoringType::Dynamic => "Conventional".to_string(),
        },
        ten_year_impact: ten_year,
        budget_window: format!("{}-{}", TEN_YEAR_WINDOW.0, TEN_YEAR_WINDOW.1),
        display: format_signed_currency(ten_year),
    };

    std::iter::once(own)
        .chain(estimates.iter().map(|est| ComparisonRow {
            source: est.source.clone(),
            scoring_type: est.scoring_type.clone(),
            ten_year_impact: est.ten_year_impact,
            budget_window: est.budget_window.clone(),
            display: format_signed_currency(est.ten_year_impact),
        }))
        .collect()
}

pub async fn get_impacts(
    scoring: String,
    reform_id: String,
    query: ImpactQuery,
    store: Arc<DatasetStore>,
) -> Result<Json, Rejection> {
    info!("Handling request for {} impacts of {} ({:?})", scoring, reform_id, query);
    let scoring_type = parse_scoring(&scoring)?;

    let reform = store.catalog().find(&reform_id).ok_or_else(|| {
        warp::reject::custom(ApiError::not_found(format!("Unknown reform '{}'", reform_id)))
    })?;

    let dataset = store.get(scoring_type).await.map_err(|e| {
        error!("Failed to load {} data: {}", scoring_type, e);
        warp::reject::custom(ApiError::from(e))
    })?;

    let series = dataset.series(&reform_id).ok_or_else(|| {
        warp::reject::custom(ApiError::not_found(format!(
            "No {} results for reform '{}'",
            scoring_type, reform_id
        )))
    })?;

    let totals = dataset.totals(&reform_id).unwrap_or_default();
    let (ten_year, total) = totals.headline(query.unit);

    let response = ImpactResponse {
        reform,
        allocation_rule: AllocationRule::for_reform(&reform_id),
        scoring_type,
        scoring_label: scoring_type.label(),
        window: query.window,
        window_label: query.window.label(),
        yearly: window_series(series, query.window),
        totals,
        headline: Headline {
            unit: query.unit,
            ten_year: format_headline(ten_year, query.unit),
            total: format_headline(total, query.unit),
        },
        comparison: comparison_rows(&store, &reform_id, scoring_type, totals.ten_year),
        loaded_at: dataset.loaded_at,
    };

    Ok(warp::reply::json(&response))
}

pub async fn get_totals(scoring: String, store: Arc<DatasetStore>) -> Result<Json, Rejection> {
    info!("Handling request for {} totals of all reforms", scoring);
    let scoring_type = parse_scoring(&scoring)?;

    let dataset = store.get(scoring_type).await.map_err(|e| {
        error!("Failed to load {} data: {}", scoring_type, e);
        warp::reject::custom(ApiError::from(e))
    })?;

    let catalog = store.catalog();
    let rows: Vec<ReformTotals> = dataset
        .reform_ids()
        .map(|reform_id| ReformTotals {
            reform_id,
            name: catalog.find(reform_id).map(|r| r.name.as_str()),
            totals: dataset.totals(reform_id).unwrap_or_default(),
        })
        .collect();

    Ok(warp::reply::json(&rows))
}
