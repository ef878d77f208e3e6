// src/services/policy_impacts.rs
use csv::{ReaderBuilder, Trim};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::LoadError;
use super::source::DataSource;

pub const POLICY_IMPACTS_FILE: &str = "policy_impacts.csv";

/// Years are reported relative to this one (2025 is year 1).
pub const BASE_YEAR: i32 = 2024;

pub const VARIABLE_CREDIT_POLICY: u32 = 4;
pub const CREDIT_VALUES: [u32; 5] = [300, 600, 900, 1200, 1500];

#[derive(Debug, Deserialize)]
struct PolicyCsvRow {
    policy_id: Option<String>,
    policy_name: Option<String>,
    credit_value: Option<String>,
    year: Option<String>,
    impact_billions: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyOption {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub has_multiple_credit_values: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_values: Option<Vec<u32>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolicyImpact {
    pub year: i32,
    pub impact: f64,
}

/// Ten-year policy comparison table: one impact series per policy, or per
/// (policy, credit value) for the variable credit option.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyImpactData {
    pub policies: Vec<PolicyOption>,
    pub impact_data: BTreeMap<String, Vec<PolicyImpact>>,
    /// Source lines of rows that were present but could not be parsed.
    #[serde(skip)]
    pub skipped_lines: Vec<u64>,
}

impl PolicyImpactData {
    pub fn ten_year_total(&self, key: &str) -> Option<f64> {
        self.impact_data
            .get(key)
            .map(|impacts| impacts.iter().map(|i| i.impact).sum())
    }
}

pub fn impact_key(policy_id: u32, credit_value: Option<u32>) -> String {
    match credit_value {
        Some(credit) => format!("{}_{}", policy_id, credit),
        None => policy_id.to_string(),
    }
}

fn policy_description(id: u32) -> &'static str {
    match id {
        1 => "Expand earned income tax credit for low and middle-income families",
        2 => "Increase federal spending on infrastructure modernization projects",
        3 => "Implement comprehensive healthcare system reforms and subsidies",
        4 => "Variable child tax credit with multiple value options",
        5 => "Increase federal education grants and student loan forgiveness",
        6 => "Tax incentives for renewable energy and climate initiatives",
        _ => "Policy reform option",
    }
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Rows without a policy id, year or impact are skipped, as are rows whose
/// id, year or impact is not a number.
pub fn process_policy_csv(csv_text: &str, resource: &str) -> Result<PolicyImpactData, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let headers = rdr
        .headers()
        .map_err(|source| LoadError::Csv { resource: resource.to_string(), source })?
        .clone();

    let mut policies: BTreeMap<u32, PolicyOption> = BTreeMap::new();
    let mut impact_data: BTreeMap<String, Vec<PolicyImpact>> = BTreeMap::new();
    let mut skipped_lines = Vec::new();

    for record in rdr.records() {
        let record =
            record.map_err(|source| LoadError::Csv { resource: resource.to_string(), source })?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let row: PolicyCsvRow = record
            .deserialize(Some(&headers))
            .map_err(|source| LoadError::Csv { resource: resource.to_string(), source })?;

        let fields = (
            non_empty(&row.policy_id),
            non_empty(&row.year),
            non_empty(&row.impact_billions),
        );
        let (id, year, impact) = match fields {
            (Some(id), Some(year), Some(impact)) => (id, year, impact),
            _ => continue,
        };
        let parsed = (id.parse::<u32>(), year.parse::<i32>(), impact.parse::<f64>());
        let (id, year, impact) = match parsed {
            (Ok(id), Ok(year), Ok(impact)) => (id, year, impact),
            _ => {
                warn!("{} line {}: unparseable policy row, skipping", resource, line);
                skipped_lines.push(line);
                continue;
            }
        };
        let credit_value = non_empty(&row.credit_value)
            .and_then(|c| c.parse::<u32>().ok())
            .filter(|&c| c > 0);

        policies.entry(id).or_insert_with(|| {
            let variable = id == VARIABLE_CREDIT_POLICY;
            PolicyOption {
                id,
                name: row.policy_name.clone().unwrap_or_default(),
                description: policy_description(id).to_string(),
                has_multiple_credit_values: variable,
                credit_values: variable.then(|| CREDIT_VALUES.to_vec()),
            }
        });

        impact_data
            .entry(impact_key(id, credit_value))
            .or_default()
            .push(PolicyImpact { year: year - BASE_YEAR, impact });
    }

    for impacts in impact_data.values_mut() {
        impacts.sort_by_key(|i| i.year);
    }

    info!(
        "Parsed {} policies ({} series) from {}",
        policies.len(),
        impact_data.len(),
        resource
    );
    Ok(PolicyImpactData {
        policies: policies.into_values().collect(),
        impact_data,
        skipped_lines,
    })
}

pub async fn load_policy_impacts(source: &DataSource) -> Result<PolicyImpactData, LoadError> {
    let csv_text = source.fetch_text(POLICY_IMPACTS_FILE).await?;
    process_policy_csv(&csv_text, POLICY_IMPACTS_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "policy_id,policy_name,credit_value,year,impact_billions
2,Flat Social Security Tax,,2026,12.5
1,Repeal Social Security Benefits Tax,,2026,-150
1,Repeal Social Security Benefits Tax,,2025,-140
4,Social Security Credit,600,2025,-20
4,Social Security Credit,300,2025,-10
4,Social Security Credit,300,2026,-11
,Missing id,,2025,1
3,No impact,,2025,
";

    #[test]
    fn groups_policies_and_credit_variants() {
        let data = process_policy_csv(CSV, POLICY_IMPACTS_FILE).unwrap();

        let ids: Vec<u32> = data.policies.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
        assert_eq!(data.policies[2].credit_values.as_deref(), Some(&CREDIT_VALUES[..]));
        assert!(!data.policies[0].has_multiple_credit_values);

        let keys: Vec<&str> = data.impact_data.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["1", "2", "4_300", "4_600"]);
    }

    #[test]
    fn years_are_relative_and_sorted() {
        let data = process_policy_csv(CSV, POLICY_IMPACTS_FILE).unwrap();

        assert_eq!(
            data.impact_data["1"],
            vec![
                PolicyImpact { year: 1, impact: -140.0 },
                PolicyImpact { year: 2, impact: -150.0 },
            ]
        );
        assert_eq!(data.ten_year_total("4_300"), Some(-21.0));
        assert_eq!(data.ten_year_total("9"), None);
    }

    #[test]
    fn unparseable_rows_are_skipped() {
        let csv = "policy_id,policy_name,credit_value,year,impact_billions\n\
                   x,Bad,,2025,1\n\
                   5,Roth,0,2025,3.5\n";
        let data = process_policy_csv(csv, POLICY_IMPACTS_FILE).unwrap();

        assert_eq!(data.policies.len(), 1);
        assert_eq!(
            data.policies[0].description,
            "Increase federal education grants and student loan forgiveness"
        );
        assert_eq!(data.skipped_lines, vec![2]);
        assert_eq!(impact_key(5, None), "5");
        assert!(data.impact_data.contains_key("5"));
    }

    #[test]
    fn skipped_rows_report_their_source_line() {
        let csv = "policy_id,policy_name,credit_value,year,impact_billions\n\
                   1,\"Repeal Social Security\nBenefits Tax\",,2025,-140\n\
                   \n\
                   1,Repeal,,twenty,-150\n";
        let data = process_policy_csv(csv, POLICY_IMPACTS_FILE).unwrap();

        assert_eq!(data.policies[0].name, "Repeal Social Security\nBenefits Tax");
        assert_eq!(data.skipped_lines, vec![5]);
    }
}
