// src/models.rs
use serde::{Serialize, Deserialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

/// SSA Trustees Report projection for one year (Table VI.G6), in billions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicProjection {
    pub year: i32,
    pub oasdi_taxable_payroll: f64,
    pub gdp: f64,
}

/// One year of a reform's fiscal effect, with its economic context.
///
/// Dollar figures are billions; `pct_*` fields are percentages of the
/// matching payroll or GDP figure for the same year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyImpact {
    pub year: i32,
    pub revenue_impact: f64,
    pub tob_oasdi_impact: f64,
    pub tob_medicare_hi_impact: f64,
    pub tob_total_impact: f64,
    pub baseline_revenue: f64,
    pub reform_revenue: f64,
    pub oasdi_taxable_payroll: f64,
    pub gdp: f64,
    pub pct_of_oasdi_payroll: f64,
    pub pct_of_gdp: f64,
    pub oasdi_pct_of_payroll: f64,
    pub hi_pct_of_payroll: f64,
    pub oasdi_pct_of_gdp: f64,
    pub hi_pct_of_gdp: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub ten_year: f64,
    pub total: f64,
    pub ten_year_pct_payroll: f64,
    pub ten_year_pct_gdp: f64,
    pub total_pct_payroll: f64,
    pub total_pct_gdp: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReformOption {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub description: String,
}

/// Third-party score of a reform, shown next to ours for comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalEstimate {
    pub source: String,
    pub scoring_type: String,
    pub ten_year_impact: f64,
    pub budget_window: String,
    pub citation: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringType {
    Static,
    Dynamic,
}

impl ScoringType {
    pub const ALL: [ScoringType; 2] = [ScoringType::Static, ScoringType::Dynamic];

    /// Results table loaded for this scoring type.
    pub fn results_file(&self) -> &'static str {
        match self {
            ScoringType::Static => "all_static_results.csv",
            ScoringType::Dynamic => "all_dynamic_results.csv",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoringType::Static => "Static Scoring",
            ScoringType::Dynamic => "Conventional Scoring",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoringType::Static => "static",
            ScoringType::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for ScoringType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ScoringType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(ScoringType::Static),
            "dynamic" | "conventional" => Ok(ScoringType::Dynamic),
            other => Err(format!("Unknown scoring type '{}'", other)),
        }
    }
}

/// The two year ranges a dashboard can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewWindow {
    #[default]
    #[serde(rename = "10year")]
    TenYear,
    #[serde(rename = "75year")]
    SeventyFiveYear,
}

impl ViewWindow {
    pub fn years(&self) -> RangeInclusive<i32> {
        match self {
            ViewWindow::TenYear => 2026..=2035,
            ViewWindow::SeventyFiveYear => 2026..=2100,
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        self.years().contains(&year)
    }

    pub fn label(&self) -> String {
        let years = self.years();
        match self {
            ViewWindow::TenYear => format!("10-Year ({}-{})", years.start(), years.end()),
            ViewWindow::SeventyFiveYear => format!("75-Year ({}-{})", years.start(), years.end()),
        }
    }
}

impl FromStr for ViewWindow {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "10year" => Ok(ViewWindow::TenYear),
            "75year" => Ok(ViewWindow::SeventyFiveYear),
            other => Err(format!("Unknown view window '{}'", other)),
        }
    }
}

/// Unit used for headline figures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayUnit {
    #[default]
    Billions,
    PctPayroll,
    PctGdp,
}
