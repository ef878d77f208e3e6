// src/services/export.rs
use csv::Writer;

use crate::models::YearlyImpact;

pub const EXPORT_HEADERS: [&str; 10] = [
    "Reform",
    "Year",
    "Revenue Impact ($B)",
    "OASDI Impact ($B)",
    "Medicare HI Impact ($B)",
    "Total TOB Impact ($B)",
    "Baseline Revenue ($B)",
    "Reform Revenue ($B)",
    "% of OASDI Payroll",
    "% of GDP",
];

pub fn export_file_name(reform_id: &str) -> String {
    format!("{}_impact_data.csv", reform_id)
}

/// Downloadable table of one reform's series: dollar columns at two
/// decimals, percentages at three, rows in series order.
pub fn export_to_csv(data: &[YearlyImpact], reform_name: &str) -> Result<String, csv::Error> {
    let mut wtr = Writer::from_writer(Vec::new());
    wtr.write_record(EXPORT_HEADERS)?;

    for d in data {
        wtr.write_record([
            reform_name.to_string(),
            d.year.to_string(),
            format!("{:.2}", d.revenue_impact),
            format!("{:.2}", d.tob_oasdi_impact),
            format!("{:.2}", d.tob_medicare_hi_impact),
            format!("{:.2}", d.tob_total_impact),
            format!("{:.2}", d.baseline_revenue),
            format!("{:.2}", d.reform_revenue),
            format!("{:.3}", d.pct_of_oasdi_payroll),
            format!("{:.3}", d.pct_of_gdp),
        ])?;
    }

    let bytes = wtr.into_inner().map_err(|e| csv::Error::from(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
