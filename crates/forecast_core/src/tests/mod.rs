//! Scenario-level tests for the projection engine
//!
//! Tests are organized by topic:
//! - `buckets` - Bucket partition rules and validation messages
//! - `amortization` - Schedules, annual roll-ups and point queries
//! - `projection` - End-to-end runs, preconditions and missing-bucket handling
//! - `rmd` - Mandatory withdrawals from tax-deferred accounts
//! - `waterfall` - Shortfall resolution order
//! - `summary` - Run statistics

mod projection;

use jiff::civil::{Date, date};

use crate::model::{AssumptionBucket, Assumptions, Scenario, UserProfile};
use crate::projection::{MissingBucketPolicy, ProjectionOptions};

/// Fixed "today" so ages do not drift with the wall clock
pub(crate) const AS_OF: Date = date(2024, 6, 1);

pub(crate) fn options() -> ProjectionOptions {
    ProjectionOptions {
        as_of: Some(AS_OF),
        missing_bucket: MissingBucketPolicy::Skip,
    }
}

/// Profile of someone who is `age` on [`AS_OF`]
pub(crate) fn profile_aged(age: i16) -> UserProfile {
    UserProfile::born(date(2024 - age, 1, 1))
}

pub(crate) fn bucket(order: u32, start_age: u8, end_age: u8, assumptions: Assumptions) -> AssumptionBucket {
    AssumptionBucket {
        order,
        start_age,
        end_age,
        assumptions,
    }
}

/// Scenario with one bucket and no growth or inflation
pub(crate) fn flat_scenario(start_age: u8, end_age: u8, assumptions: Assumptions) -> Scenario {
    Scenario {
        id: "test".to_string(),
        name: "Test".to_string(),
        buckets: vec![bucket(0, start_age, end_age, assumptions)],
        investment_return_rate: 0.0,
        inflation_rate: 0.0,
        retirement_age: 65,
        social_security_age: 67,
        ..Default::default()
    }
}

pub(crate) fn assert_close(actual: f64, expected: f64, what: &str) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "{what}: expected {expected}, got {actual}"
    );
}
