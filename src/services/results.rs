// src/services/results.rs
use csv::{ReaderBuilder, StringRecord, Trim};
use log::{info, warn};
use std::collections::{BTreeMap, HashMap};

use crate::models::YearlyImpact;

use super::allocation::AllocationRule;
use super::error::LoadError;
use super::metrics::derive_yearly_impact;
use super::numeric::{parse_number, parse_year, FieldContext, ParsePolicy};
use super::projections::ProjectionTable;

pub const REFORM_NAME: &str = "reform_name";
pub const YEAR: &str = "year";
pub const BASELINE_REVENUE: &str = "baseline_revenue";
pub const REFORM_REVENUE: &str = "reform_revenue";

/// Reform id to its yearly series, each strictly ascending by year.
pub type ResultsTable = BTreeMap<String, Vec<YearlyImpact>>;

struct Row<'a> {
    record: &'a StringRecord,
    columns: &'a HashMap<String, usize>,
}

impl<'a> Row<'a> {
    fn get(&self, column: &str) -> Option<&'a str> {
        self.columns.get(column).and_then(|&idx| self.record.get(idx))
    }
}

/// Single pass over the results table. Each row is allocated according to
/// its reform's rule and placed in context with the projection for its year.
pub fn parse_results(
    csv_text: &str,
    projections: &ProjectionTable,
    resource: &str,
    policy: ParsePolicy,
) -> Result<ResultsTable, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let columns: HashMap<String, usize> = rdr
        .headers()
        .map_err(|source| LoadError::Csv { resource: resource.to_string(), source })?
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.to_string(), idx))
        .collect();
    let reform_idx = columns.get(REFORM_NAME).copied().unwrap_or(0);

    let mut by_reform: BTreeMap<String, BTreeMap<i32, YearlyImpact>> = BTreeMap::new();

    for record in rdr.records() {
        let record = record.map_err(|source| LoadError::Csv {
            resource: resource.to_string(),
            source,
        })?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let ctx = FieldContext { resource, line };
        let row = Row { record: &record, columns: &columns };

        let reform_id = record.get(reform_idx).unwrap_or("");
        if reform_id.is_empty() {
            match policy {
                ParsePolicy::Strict => {
                    return Err(LoadError::InvalidField {
                        resource: resource.to_string(),
                        line,
                        column: REFORM_NAME.to_string(),
                        value: String::new(),
                    })
                }
                ParsePolicy::Lenient => {
                    warn!("{} line {}: row without a reform id, skipping", resource, line);
                    continue;
                }
            }
        }

        let year = match parse_year(row.get(YEAR), YEAR, ctx, policy)? {
            Some(year) => year,
            None => continue,
        };
        let baseline_revenue =
            parse_number(row.get(BASELINE_REVENUE), BASELINE_REVENUE, ctx, policy)?;
        let reform_revenue = parse_number(row.get(REFORM_REVENUE), REFORM_REVENUE, ctx, policy)?;

        let allocation = AllocationRule::for_reform(reform_id)
            .allocate(|column| parse_number(row.get(column), column, ctx, policy))?;

        let impact = derive_yearly_impact(
            year,
            allocation,
            baseline_revenue,
            reform_revenue,
            projections.get(&year),
        );

        let series = by_reform.entry(reform_id.to_string()).or_default();
        if series.insert(year, impact).is_some() {
            match policy {
                ParsePolicy::Strict => {
                    return Err(LoadError::DuplicateYear {
                        resource: resource.to_string(),
                        line,
                        reform: reform_id.to_string(),
                        year,
                    })
                }
                ParsePolicy::Lenient => warn!(
                    "{} line {}: duplicate year {} for '{}', keeping the later row",
                    resource, line, year, reform_id
                ),
            }
        }
    }

    let table: ResultsTable = by_reform
        .into_iter()
        .map(|(reform, series)| (reform, series.into_values().collect()))
        .collect();

    info!(
        "Parsed {} reforms ({} rows) from {}",
        table.len(),
        table.values().map(Vec::len).sum::<usize>(),
        resource
    );
    Ok(table)
}
