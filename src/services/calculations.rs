// src/services/calculations.rs
use crate::models::{DisplayUnit, Totals, ViewWindow, YearlyImpact};

use super::metrics::percent_of;

/// Budget window used for the ten-year totals.
pub const TEN_YEAR_WINDOW: (i32, i32) = (2026, 2035);

fn sum_of(data: &[&YearlyImpact], metric_extractor: fn(&YearlyImpact) -> f64) -> f64 {
    data.iter().map(|r| metric_extractor(r)).sum()
}

pub fn calculate_totals(data: &[YearlyImpact]) -> Totals {
    calculate_totals_for_window(data, TEN_YEAR_WINDOW.0, TEN_YEAR_WINDOW.1)
}

/// Sums over the inclusive `first..=last` window and over the whole series.
/// Percentages are ratios of sums, not sums of yearly percentages.
pub fn calculate_totals_for_window(data: &[YearlyImpact], first: i32, last: i32) -> Totals {
    let all: Vec<&YearlyImpact> = data.iter().collect();
    let windowed: Vec<&YearlyImpact> = data
        .iter()
        .filter(|r| r.year >= first && r.year <= last)
        .collect();

    let ten_year = sum_of(&windowed, |r| r.revenue_impact);
    let total = sum_of(&all, |r| r.revenue_impact);

    let ten_year_payroll = sum_of(&windowed, |r| r.oasdi_taxable_payroll);
    let ten_year_gdp = sum_of(&windowed, |r| r.gdp);
    let total_payroll = sum_of(&all, |r| r.oasdi_taxable_payroll);
    let total_gdp = sum_of(&all, |r| r.gdp);

    Totals {
        ten_year,
        total,
        ten_year_pct_payroll: percent_of(ten_year, ten_year_payroll),
        ten_year_pct_gdp: percent_of(ten_year, ten_year_gdp),
        total_pct_payroll: percent_of(total, total_payroll),
        total_pct_gdp: percent_of(total, total_gdp),
    }
}

impl Totals {
    /// (ten-year, full horizon) figures in the requested unit.
    pub fn headline(&self, unit: DisplayUnit) -> (f64, f64) {
        match unit {
            DisplayUnit::Billions => (self.ten_year, self.total),
            DisplayUnit::PctPayroll => (self.ten_year_pct_payroll, self.total_pct_payroll),
            DisplayUnit::PctGdp => (self.ten_year_pct_gdp, self.total_pct_gdp),
        }
    }
}

/// The part of a year-sorted series that falls inside a view window.
pub fn window_series(data: &[YearlyImpact], window: ViewWindow) -> &[YearlyImpact] {
    let years = window.years();
    let start = data.partition_point(|r| r.year < *years.start());
    let end = data.partition_point(|r| r.year <= *years.end());
    &data[start..end.max(start)]
}
