// src/services/loader.rs
use chrono::{DateTime, Duration, Utc};
use log::info;

use crate::models::{ScoringType, Totals, YearlyImpact};

use super::calculations::calculate_totals;
use super::error::LoadError;
use super::numeric::ParsePolicy;
use super::projections::{load_economic_projections, ProjectionTable};
use super::results::{parse_results, ResultsTable};
use super::source::DataSource;

/// Everything parsed from one scoring type's tables.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub scoring_type: ScoringType,
    pub reforms: ResultsTable,
    pub projections: ProjectionTable,
    pub loaded_at: DateTime<Utc>,
}

impl Dataset {
    pub fn series(&self, reform_id: &str) -> Option<&[YearlyImpact]> {
        self.reforms.get(reform_id).map(Vec::as_slice)
    }

    pub fn totals(&self, reform_id: &str) -> Option<Totals> {
        self.series(reform_id).map(calculate_totals)
    }

    pub fn reform_ids(&self) -> impl Iterator<Item = &str> {
        self.reforms.keys().map(String::as_str)
    }

    pub fn is_stale(&self, ttl: Duration) -> bool {
        self.loaded_at < Utc::now() - ttl
    }
}

/// Fetch the projections, then the results table, and parse both.
pub async fn load_data(
    source: &DataSource,
    scoring_type: ScoringType,
    policy: ParsePolicy,
) -> Result<Dataset, LoadError> {
    let projections = load_economic_projections(source, policy).await?;

    let results_file = scoring_type.results_file();
    let csv_text = source.fetch_text(results_file).await?;
    let reforms = parse_results(&csv_text, &projections, results_file, policy)?;

    info!(
        "Loaded {} scoring dataset: {} reforms, {} projection years",
        scoring_type,
        reforms.len(),
        projections.len()
    );

    Ok(Dataset {
        scoring_type,
        reforms,
        projections,
        loaded_at: Utc::now(),
    })
}
