//! Scenario definitions
//!
//! A scenario is the user's plan: age-bucketed assumptions, one-off lump-sum
//! events, mortgages and a handful of scenario-wide rates. Monetary fields in
//! assumptions are in today's dollars and are inflated by the engine at use
//! time. Rates are percentages (`7.0` is 7 %).

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::accounts::{AccountType, ByAccountType};
use super::mortgage::Mortgage;

/// Sparse set of financial assumptions for one age range
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assumptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_income: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_spending: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_travel_budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_healthcare_costs: Option<f64>,
    /// Yearly contribution per account type
    #[serde(default)]
    pub contributions: ByAccountType<Option<f64>>,
    /// Overrides the scenario inflation rate while this bucket is active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inflation_rate: Option<f64>,
    /// Overrides the scenario investment return rate while this bucket is active
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investment_return_rate: Option<f64>,
}

impl Assumptions {
    pub fn contribution(&self, account_type: AccountType) -> f64 {
        self.contributions[account_type].unwrap_or(0.0)
    }
}

/// Assumptions valid while the subject's age is in `[start_age, end_age]`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssumptionBucket {
    pub order: u32,
    pub start_age: u8,
    pub end_age: u8,
    #[serde(default)]
    pub assumptions: Assumptions,
}

impl AssumptionBucket {
    pub fn contains_age(&self, age: u8) -> bool {
        self.start_age <= age && age <= self.end_age
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LumpSumKind {
    Income,
    Expense,
}

/// One-time cash flow in the year the subject is `age`. Never inflated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LumpSumEvent {
    #[serde(rename = "type")]
    pub kind: LumpSumKind,
    pub age: u8,
    pub amount: f64,
    pub description: String,
}

/// A user's plan
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub buckets: Vec<AssumptionBucket>,
    #[serde(default)]
    pub lump_sum_events: Vec<LumpSumEvent>,
    #[serde(default)]
    pub mortgages: Vec<Mortgage>,
    pub investment_return_rate: f64,
    pub inflation_rate: f64,
    /// Informational only, the engine does not switch behaviour on it
    #[serde(default)]
    pub retirement_age: u8,
    pub social_security_age: u8,
    #[serde(default)]
    pub social_security_income: f64,
}

/// The person being projected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub date_of_birth: Date,
}

impl UserProfile {
    pub fn born(date_of_birth: Date) -> Self {
        Self {
            name: None,
            date_of_birth,
        }
    }
}
