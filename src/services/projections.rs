// src/services/projections.rs
use csv::{ReaderBuilder, Trim};
use log::info;
use std::collections::HashMap;

use crate::models::EconomicProjection;

use super::error::LoadError;
use super::numeric::{parse_number, parse_year, FieldContext, ParsePolicy};
use super::source::DataSource;

/// SSA Trustees Report Table VI.G6 extract: `year, oasdi_taxable_payroll, gdp`.
pub const PROJECTIONS_FILE: &str = "ssa_economic_projections.csv";

pub type ProjectionTable = HashMap<i32, EconomicProjection>;

/// Columns are read by position; header names are only presentation.
pub fn parse_economic_projections(
    csv_text: &str,
    resource: &str,
    policy: ParsePolicy,
) -> Result<ProjectionTable, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(csv_text.as_bytes());

    let mut projections = ProjectionTable::new();
    for record in rdr.records() {
        let row = record.map_err(|source| LoadError::Csv {
            resource: resource.to_string(),
            source,
        })?;
        let ctx = FieldContext {
            resource,
            line: row.position().map(|p| p.line()).unwrap_or_default(),
        };

        let year = match parse_year(row.get(0), "year", ctx, policy)? {
            Some(year) => year,
            None => continue,
        };
        let oasdi_taxable_payroll = parse_number(row.get(1), "oasdi_taxable_payroll", ctx, policy)?;
        let gdp = parse_number(row.get(2), "gdp", ctx, policy)?;

        projections.insert(year, EconomicProjection { year, oasdi_taxable_payroll, gdp });
    }

    info!("Parsed {} economic projection years from {}", projections.len(), resource);
    Ok(projections)
}

pub async fn load_economic_projections(
    source: &DataSource,
    policy: ParsePolicy,
) -> Result<ProjectionTable, LoadError> {
    let csv_text = source.fetch_text(PROJECTIONS_FILE).await?;
    parse_economic_projections(&csv_text, PROJECTIONS_FILE, policy)
}
