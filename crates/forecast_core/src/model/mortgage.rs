//! Mortgage terms and derived payment rows

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Fixed-rate, fixed-term amortizing loan, possibly starting in the future
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mortgage {
    pub name: String,
    pub start_date: Date,
    pub loan_amount: f64,
    pub term_years: u8,
    /// Annual rate in percent
    pub interest_rate: f64,
    #[serde(default)]
    pub monthly_escrow: f64,
    #[serde(default)]
    pub additional_monthly_payment: f64,
}

impl Mortgage {
    pub fn payment_count(&self) -> u32 {
        u32::from(self.term_years) * 12
    }

    pub fn monthly_rate(&self) -> f64 {
        self.interest_rate / 100.0 / 12.0
    }

    pub fn start_year(&self) -> i16 {
        self.start_date.year()
    }

    /// First calendar year after the nominal term
    pub fn end_year(&self) -> i16 {
        self.start_year() + i16::from(self.term_years)
    }
}

/// One row of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPayment {
    /// 1-based
    pub payment_number: u32,
    pub date: Date,
    pub year: i16,
    pub month: i8,
    pub starting_balance: f64,
    pub principal: f64,
    pub interest: f64,
    pub escrow: f64,
    pub additional_principal: f64,
    pub total_payment: f64,
    pub remaining_balance: f64,
}

/// All schedule rows of one calendar year, summed
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualMortgagePayment {
    pub year: i16,
    pub payment_count: u32,
    pub principal: f64,
    pub interest: f64,
    pub escrow: f64,
    pub additional_principal: f64,
    pub total_payment: f64,
    pub starting_balance: f64,
    pub ending_balance: f64,
}

/// Headline numbers for a loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageSummary {
    /// Scheduled principal and interest, excluding escrow and extra principal
    pub monthly_payment: f64,
    pub payment_count: u32,
    pub total_interest: f64,
    pub total_paid: f64,
    pub payoff_date: Option<Date>,
}
