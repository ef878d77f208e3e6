// src/services/catalog.rs
use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::models::{ExternalEstimate, ReformOption};

/// Reform options and third-party estimates. Loaded once at startup and
/// shared read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub reforms: Vec<ReformOption>,
    #[serde(default)]
    pub external_estimates: BTreeMap<String, Vec<ExternalEstimate>>,
}

fn reform(id: &str, name: &str, short_name: &str, description: &str) -> ReformOption {
    ReformOption {
        id: id.to_string(),
        name: name.to_string(),
        short_name: short_name.to_string(),
        description: description.to_string(),
    }
}

fn estimate(
    source: &str,
    ten_year_impact: f64,
    budget_window: &str,
    citation: &str,
) -> ExternalEstimate {
    ExternalEstimate {
        source: source.to_string(),
        scoring_type: "Conventional".to_string(),
        ten_year_impact,
        budget_window: budget_window.to_string(),
        citation: citation.to_string(),
    }
}

impl Catalog {
    pub fn builtin() -> Self {
        let reforms = vec![
            reform(
                "option1",
                "Full Repeal of Social Security Benefit Taxation",
                "Full Repeal",
                "Complete elimination of Social Security benefit income taxation starting 2026",
            ),
            reform(
                "option2",
                "Tax 85% of Benefits Uniformly",
                "85% Taxation",
                "85% of all Social Security benefits taxable regardless of income level",
            ),
            reform(
                "option3",
                "Tax 85% with Bonus Senior Deduction",
                "85% + Senior Deduction",
                "85% taxation with permanent extension of the $6,000 bonus senior deduction",
            ),
            reform(
                "option4",
                "Social Security Tax Credit System ($500)",
                "$500 Tax Credit",
                "Replace bonus senior deduction with $500 nonrefundable tax credit",
            ),
            reform(
                "option5",
                "Roth-Style Swap (Immediate)",
                "Roth Swap",
                "Tax employer payroll contributions instead of benefits starting 2026",
            ),
            reform(
                "option6",
                "Phased Roth-Style Swap",
                "Phased Roth",
                "Gradual transition from taxing benefits to taxing employer contributions",
            ),
            reform(
                "option7",
                "Eliminate Bonus Senior Deduction",
                "No Senior Deduction",
                "Eliminate the $6,000 bonus senior deduction from 2026-2028",
            ),
            reform(
                "option8",
                "Tax 100% of Benefits",
                "100% Taxation",
                "100% of all Social Security benefits taxable regardless of income",
            ),
        ];

        let mut external_estimates = BTreeMap::new();
        external_estimates.insert(
            "option1".to_string(),
            vec![
                estimate("CBO", -1600.0, "2025-2034", "cbo2024options"),
                estimate("Social Security Trustees", -1800.0, "2025-2034", "ssa2024trustees"),
                estimate("Tax Foundation", -1400.0, "2025-2034", "taxfoundation2024trump"),
                estimate("Tax Foundation", -1300.0, "2025-2034", "taxfoundation2024trump"),
            ],
        );
        external_estimates.insert(
            "option7".to_string(),
            vec![estimate("JCT", 66.3, "FY 2025-2034", "jct2025bonus")],
        );

        Catalog { reforms, external_estimates }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        let catalog: Catalog = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse catalog {}", path.display()))?;
        info!("Loaded {} reforms from catalog {}", catalog.reforms.len(), path.display());
        Ok(catalog)
    }

    pub fn find(&self, id: &str) -> Option<&ReformOption> {
        self.reforms.iter().find(|r| r.id == id)
    }

    pub fn estimates_for(&self, id: &str) -> &[ExternalEstimate] {
        self.external_estimates
            .get(id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Ids present in a results table that no catalog entry describes.
    pub fn unmatched_ids<'a, I>(&self, ids: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let unmatched: Vec<&'a str> = ids
            .into_iter()
            .filter(|id| self.find(id).is_none())
            .collect();
        for id in &unmatched {
            warn!("Reform '{}' has results but no catalog entry", id);
        }
        unmatched
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_all_eight_options() {
        let catalog = Catalog::builtin();
        let ids: Vec<&str> = catalog.reforms.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["option1", "option2", "option3", "option4", "option5", "option6", "option7", "option8"]
        );
        assert_eq!(catalog.find("option4").map(|r| r.short_name.as_str()), Some("$500 Tax Credit"));
    }

    #[test]
    fn estimates_are_optional_per_reform() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.estimates_for("option1").len(), 4);
        assert_eq!(catalog.estimates_for("option7")[0].ten_year_impact, 66.3);
        assert!(catalog.estimates_for("option2").is_empty());
    }

    #[test]
    fn unmatched_ids_are_reported() {
        let catalog = Catalog::builtin();
        let unmatched = catalog.unmatched_ids(["option1", "option13", "option8"]);
        assert_eq!(unmatched, vec!["option13"]);
    }

    #[test]
    fn catalog_round_trips_through_json_file() {
        let path = std::env::temp_dir().join(format!("tob-catalog-{}.json", std::process::id()));
        let json = r#"{
            "reforms": [
                { "id": "option9", "name": "Custom", "shortName": "C", "description": "d" }
            ]
        }"#;
        std::fs::write(&path, json).unwrap();

        let catalog = Catalog::from_file(&path).unwrap();
        assert_eq!(catalog.reforms.len(), 1);
        assert!(catalog.external_estimates.is_empty());
        assert!(Catalog::from_file(path.with_extension("missing")).is_err());

        std::fs::remove_file(&path).ok();
    }
}
