//! Deterministic scenario projection engine for personal financial planning
//!
//! Given a user's date of birth, current account balances and a scenario of
//! age-bucketed assumptions, this crate produces a year-by-year forecast of
//! income, spending, contributions, investment growth, mandatory withdrawals
//! and account balances. It covers:
//! - Age-bucket validation and lookup
//! - Mortgage amortization rolled up by calendar year
//! - Inflation and income-growth compounding
//! - Required Minimum Distribution (RMD) withdrawals from tax-deferred accounts
//! - A fixed withdrawal waterfall for cash shortfalls
//! - Run summaries (totals, final net worth, deficit years)
//!
//! Everything is pure computation: no I/O, no global state. Independent
//! projections can run concurrently, see [`projection::project_scenarios`].
//!
//! ```ignore
//! use forecast_core::{calculate_scenario_projection, model::*};
//!
//! let projection = calculate_scenario_projection(&scenario, &profile, &accounts, 2025, 2060)?;
//! println!("final net worth: {:.0}", projection.summary.final_net_worth);
//! ```

#![warn(clippy::all)]

// ============================================================================
// Core modules
// ============================================================================

pub mod amortization;
pub mod buckets;
pub mod date_math;
pub mod error;
pub mod projection;
pub mod projection_state;
pub mod summary;
pub mod validation;
pub mod withdrawal;

// ============================================================================
// Type definition modules
// ============================================================================

pub mod model;

// ============================================================================
// Test modules
// ============================================================================

#[cfg(test)]
mod tests;

// ============================================================================
// Public re-exports for convenience
// ============================================================================

pub use amortization::{
    aggregate_to_annual_payments, generate_amortization_schedule, get_mortgage_payment_for_year,
    is_mortgage_active, mortgage_summary,
};
pub use buckets::{get_bucket_for_age, validate_buckets};
pub use error::{ProjectionError, ValidationError};
pub use projection::{
    MissingBucketPolicy, ProjectionOptions, ProjectionRequest, calculate_scenario_projection,
    calculate_scenario_projection_with, project_scenarios,
};
pub use summary::calculate_projection_summary;
pub use validation::{validate_lump_sum_events, validate_mortgages, validate_scenario};
