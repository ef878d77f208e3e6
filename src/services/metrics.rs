// src/services/metrics.rs
use crate::models::{EconomicProjection, YearlyImpact};

use super::allocation::Allocation;

/// `value` as a percentage of `denominator`, or zero when there is no
/// positive denominator to divide by.
pub fn percent_of(value: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        (value / denominator) * 100.0
    } else {
        0.0
    }
}

pub fn derive_yearly_impact(
    year: i32,
    allocation: Allocation,
    baseline_revenue: f64,
    reform_revenue: f64,
    projection: Option<&EconomicProjection>,
) -> YearlyImpact {
    let (oasdi_taxable_payroll, gdp) = projection
        .map(|p| (p.oasdi_taxable_payroll, p.gdp))
        .unwrap_or((0.0, 0.0));

    let Allocation {
        revenue_impact,
        tob_oasdi_impact,
        tob_medicare_hi_impact,
    } = allocation;

    YearlyImpact {
        year,
        revenue_impact,
        tob_oasdi_impact,
        tob_medicare_hi_impact,
        tob_total_impact: allocation.tob_total_impact(),
        baseline_revenue,
        reform_revenue,
        oasdi_taxable_payroll,
        gdp,
        pct_of_oasdi_payroll: percent_of(revenue_impact, oasdi_taxable_payroll),
        pct_of_gdp: percent_of(revenue_impact, gdp),
        oasdi_pct_of_payroll: percent_of(tob_oasdi_impact, oasdi_taxable_payroll),
        hi_pct_of_payroll: percent_of(tob_medicare_hi_impact, oasdi_taxable_payroll),
        oasdi_pct_of_gdp: percent_of(tob_oasdi_impact, gdp),
        hi_pct_of_gdp: percent_of(tob_medicare_hi_impact, gdp),
    }
}
