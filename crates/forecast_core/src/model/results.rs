//! Projection results
//!
//! One `AnnualProjection` per simulated year plus the run summary. All amounts
//! are unrounded; rounding is a presentation concern.

use serde::{Deserialize, Serialize};

use super::accounts::ByAccountType;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeBreakdown {
    pub employment: f64,
    pub social_security: f64,
    pub lump_sum: f64,
    pub mandatory_withdrawal: f64,
    pub total: f64,
}

impl IncomeBreakdown {
    pub fn new(employment: f64, social_security: f64, lump_sum: f64, mandatory: f64) -> Self {
        Self {
            employment,
            social_security,
            lump_sum,
            mandatory_withdrawal: mandatory,
            total: employment + social_security + lump_sum + mandatory,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendingBreakdown {
    pub living: f64,
    pub travel: f64,
    pub healthcare: f64,
    pub lump_sum: f64,
    pub mortgage: f64,
    pub total: f64,
}

impl SpendingBreakdown {
    pub fn new(living: f64, travel: f64, healthcare: f64, lump_sum: f64, mortgage: f64) -> Self {
        Self {
            living,
            travel,
            healthcare,
            lump_sum,
            mortgage,
            total: living + travel + healthcare + lump_sum + mortgage,
        }
    }
}

/// Mortgage cash flow for one year, summed over all of a scenario's loans
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageBreakdown {
    pub principal: f64,
    pub interest: f64,
    pub escrow: f64,
    pub additional_principal: f64,
    pub total: f64,
}

/// One simulated calendar year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualProjection {
    pub year: i16,
    pub age: u8,
    pub income: IncomeBreakdown,
    pub spending: SpendingBreakdown,
    pub mortgage: MortgageBreakdown,
    pub contributions: ByAccountType<f64>,
    pub total_contributions: f64,
    /// Investment return credited this year
    pub growth: ByAccountType<f64>,
    /// Amounts drawn by the shortfall waterfall
    pub withdrawals: ByAccountType<f64>,
    /// Part of a shortfall no account could cover; carried as a negative checking balance
    pub unfunded_shortfall: f64,
    /// Income (including any mandatory withdrawal) minus spending and contributions
    pub net_income: f64,
    pub balances: ByAccountType<f64>,
    pub total_balance: f64,
}

/// A simulated year whose age falls outside every bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoApplicableBucket {
    pub year: i16,
    pub age: i32,
}

/// Headline statistics over a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub start_year: i16,
    pub end_year: i16,
    pub total_income: f64,
    pub total_spending: f64,
    pub total_contributions: f64,
    pub total_mandatory_withdrawals: f64,
    pub final_net_worth: f64,
    pub peak_net_worth: f64,
    pub peak_net_worth_year: Option<i16>,
    pub years_in_deficit: u32,
    pub first_deficit_year: Option<i16>,
}

/// Complete output of a projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioProjection {
    pub scenario_id: String,
    pub scenario_name: String,
    pub start_year: i16,
    pub end_year: i16,
    /// Ascending by year
    pub years: Vec<AnnualProjection>,
    /// Years dropped because no bucket covered the subject's age
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_years: Vec<NoApplicableBucket>,
    pub summary: ProjectionSummary,
}

impl ScenarioProjection {
    pub fn year(&self, year: i16) -> Option<&AnnualProjection> {
        self.years.iter().find(|p| p.year == year)
    }

    pub fn first_year(&self) -> Option<&AnnualProjection> {
        self.years.first()
    }

    pub fn last_year(&self) -> Option<&AnnualProjection> {
        self.years.last()
    }
}
