// src/services/allocation.rs
use serde::Serialize;

pub const TOB_OASDI_IMPACT: &str = "tob_oasdi_impact";
pub const TOB_MEDICARE_HI_IMPACT: &str = "tob_medicare_hi_impact";
pub const REVENUE_IMPACT: &str = "revenue_impact";
pub const BASELINE_TOB_OASDI: &str = "baseline_tob_oasdi";
pub const BASELINE_TOB_MEDICARE_HI: &str = "baseline_tob_medicare_hi";
pub const OASDI_NET_IMPACT: &str = "oasdi_net_impact";
pub const HI_NET_IMPACT: &str = "hi_net_impact";

/// How a reform's revenue is attributed to the OASDI and HI trust funds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationRule {
    /// Read both trust-fund impacts; revenue impact is their sum.
    TrustFundSplit,
    /// Proceeds go to general revenues; neither trust fund is credited.
    GeneralRevenue,
    /// Split the revenue impact by each fund's share of baseline TOB revenue.
    ProportionalToBaseline,
    /// Tax-base swap: read the net (payroll plus benefit tax) impacts.
    NetImpact,
}

/// Reforms that do not follow the default trust-fund split.
pub const RULE_TABLE: &[(&str, AllocationRule)] = &[
    ("option4", AllocationRule::ProportionalToBaseline),
    ("option5", AllocationRule::NetImpact),
    ("option6", AllocationRule::NetImpact),
    ("option7", AllocationRule::GeneralRevenue),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Allocation {
    pub revenue_impact: f64,
    pub tob_oasdi_impact: f64,
    pub tob_medicare_hi_impact: f64,
}

impl Allocation {
    pub fn tob_total_impact(&self) -> f64 {
        self.tob_oasdi_impact + self.tob_medicare_hi_impact
    }
}

impl AllocationRule {
    pub fn for_reform(reform_id: &str) -> Self {
        RULE_TABLE
            .iter()
            .find(|(id, _)| *id == reform_id)
            .map(|(_, rule)| *rule)
            .unwrap_or(AllocationRule::TrustFundSplit)
    }

    pub fn required_columns(&self) -> &'static [&'static str] {
        match self {
            AllocationRule::TrustFundSplit => &[TOB_OASDI_IMPACT, TOB_MEDICARE_HI_IMPACT],
            AllocationRule::GeneralRevenue => &[REVENUE_IMPACT],
            AllocationRule::ProportionalToBaseline => {
                &[REVENUE_IMPACT, BASELINE_TOB_OASDI, BASELINE_TOB_MEDICARE_HI]
            }
            AllocationRule::NetImpact => &[OASDI_NET_IMPACT, HI_NET_IMPACT],
        }
    }

    /// Apply the rule to one row. `read` returns the numeric value of a
    /// named column of that row.
    pub fn allocate<F, E>(&self, mut read: F) -> Result<Allocation, E>
    where
        F: FnMut(&'static str) -> Result<f64, E>,
    {
        let allocation = match self {
            AllocationRule::TrustFundSplit => {
                let tob_oasdi_impact = read(TOB_OASDI_IMPACT)?;
                let tob_medicare_hi_impact = read(TOB_MEDICARE_HI_IMPACT)?;
                Allocation {
                    revenue_impact: tob_oasdi_impact + tob_medicare_hi_impact,
                    tob_oasdi_impact,
                    tob_medicare_hi_impact,
                }
            }
            AllocationRule::GeneralRevenue => Allocation {
                revenue_impact: read(REVENUE_IMPACT)?,
                tob_oasdi_impact: 0.0,
                tob_medicare_hi_impact: 0.0,
            },
            AllocationRule::ProportionalToBaseline => {
                let revenue_impact = read(REVENUE_IMPACT)?;
                let baseline_oasdi = read(BASELINE_TOB_OASDI)?;
                let baseline_hi = read(BASELINE_TOB_MEDICARE_HI)?;
                let baseline_total = baseline_oasdi + baseline_hi;

                // Also false for NaN, which leaves both funds at zero.
                if baseline_total > 0.0 {
                    Allocation {
                        revenue_impact,
                        tob_oasdi_impact: revenue_impact * (baseline_oasdi / baseline_total),
                        tob_medicare_hi_impact: revenue_impact * (baseline_hi / baseline_total),
                    }
                } else {
                    Allocation {
                        revenue_impact,
                        tob_oasdi_impact: 0.0,
                        tob_medicare_hi_impact: 0.0,
                    }
                }
            }
            AllocationRule::NetImpact => {
                let tob_oasdi_impact = read(OASDI_NET_IMPACT)?;
                let tob_medicare_hi_impact = read(HI_NET_IMPACT)?;
                Allocation {
                    revenue_impact: tob_oasdi_impact + tob_medicare_hi_impact,
                    tob_oasdi_impact,
                    tob_medicare_hi_impact,
                }
            }
        };
        Ok(allocation)
    }
}
