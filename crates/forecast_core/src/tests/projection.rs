//! End-to-end projection runs
//!
//! These tests verify:
//! - Year-one figures for a simple accumulation scenario
//! - Preconditions reject bad input before any year is simulated
//! - Missing-bucket years are skipped or fail depending on policy
//! - Lump sums are nominal while recurring amounts are inflated
//! - Mortgages, Social Security and bucket overrides feed the yearly figures
//! - Batch runs match individual runs

use jiff::civil::date;

use super::{AS_OF, assert_close, bucket, flat_scenario, options, profile_aged};
use crate::amortization::get_mortgage_payment_for_year;
use crate::error::ProjectionError;
use crate::model::{
    AccountSnapshot, AccountStatus, AccountType, Assumptions, LumpSumEvent, LumpSumKind, Mortgage,
    NoApplicableBucket, UserProfile,
};
use crate::projection::{
    MAX_PROJECTION_SPAN, MissingBucketPolicy, ProjectionOptions, ProjectionRequest,
    calculate_scenario_projection_with, project_scenarios,
};

fn working_assumptions() -> Assumptions {
    Assumptions {
        annual_income: Some(100_000.0),
        annual_spending: Some(60_000.0),
        ..Default::default()
    }
}

#[test]
fn test_simple_accumulation_year_one() {
    let mut scenario = flat_scenario(30, 100, working_assumptions());
    scenario.investment_return_rate = 7.0;
    scenario.inflation_rate = 2.5;
    let profile = UserProfile::born(date(1980, 1, 1));
    let accounts = vec![AccountSnapshot::active(AccountType::Plan401k, 100_000.0)];

    let projection =
        calculate_scenario_projection_with(&scenario, &profile, &accounts, 2024, 2026, options())
            .unwrap();

    assert_eq!(projection.years.len(), 3);
    assert!(projection.skipped_years.is_empty());

    let first = projection.first_year().unwrap();
    assert_eq!(first.year, 2024);
    assert_eq!(first.age, 44);
    assert_close(first.income.employment, 102_000.0, "employment");
    assert_close(first.spending.living, 61_500.0, "living");
    assert_close(first.growth.plan_401k, 7_000.0, "growth");
    assert_close(first.balances.plan_401k, 107_000.0, "401k");
    assert_close(first.net_income, 40_500.0, "net income");
    assert_close(first.balances.checking, 40_500.0, "checking");
    assert_close(first.total_balance, 147_500.0, "total");

    let second = projection.year(2025).unwrap();
    assert_close(second.income.employment, 100_000.0 * 1.02 * 1.02, "employment");
    assert_close(second.spending.living, 60_000.0 * 1.025 * 1.025, "living");
    assert_close(second.balances.plan_401k, 107_000.0 * 1.07, "401k");
    assert_close(
        second.balances.checking,
        40_500.0 + second.net_income,
        "checking carries forward",
    );
    // Cash accounts earn nothing
    assert_eq!(second.growth.checking, 0.0);

    assert_eq!(projection.summary.years_in_deficit, 0);
    assert_close(
        projection.summary.final_net_worth,
        projection.last_year().unwrap().total_balance,
        "final net worth",
    );
}

#[test]
fn test_contributions_inflate_and_reduce_net_income() {
    let mut assumptions = working_assumptions();
    assumptions.contributions.roth_ira = Some(7_000.0);
    let mut scenario = flat_scenario(30, 100, assumptions);
    scenario.inflation_rate = 10.0;

    let projection =
        calculate_scenario_projection_with(&scenario, &profile_aged(40), &[], 2024, 2024, options())
            .unwrap();
    let year = &projection.years[0];
    assert_close(year.contributions.roth_ira, 7_700.0, "roth contribution");
    assert_close(year.total_contributions, 7_700.0, "total contributions");
    assert_close(year.balances.roth_ira, 7_700.0, "roth balance");
    assert_close(year.net_income, 102_000.0 - 66_000.0 - 7_700.0, "net income");
}

#[test]
fn test_rejects_empty_buckets() {
    let mut scenario = flat_scenario(30, 100, working_assumptions());
    scenario.buckets.clear();
    let err = calculate_scenario_projection_with(&scenario, &profile_aged(40), &[], 2024, 2030, options())
        .unwrap_err();
    assert!(matches!(err, ProjectionError::NoBuckets), "{err}");
}

#[test]
fn test_rejects_reversed_years() {
    let scenario = flat_scenario(30, 100, working_assumptions());
    let err = calculate_scenario_projection_with(&scenario, &profile_aged(40), &[], 2030, 2024, options())
        .unwrap_err();
    assert!(
        matches!(
            err,
            ProjectionError::InvalidYearRange {
                start_year: 2030,
                end_year: 2024
            }
        ),
        "{err}"
    );
}

#[test]
fn test_span_limit_is_inclusive() {
    let scenario = flat_scenario(0, 120, Assumptions::default());
    let profile = profile_aged(10);
    let max = MAX_PROJECTION_SPAN as i16;

    assert!(calculate_scenario_projection_with(&scenario, &profile, &[], 2024, 2024 + max, options()).is_ok());

    let err = calculate_scenario_projection_with(&scenario, &profile, &[], 2024, 2025 + max, options())
        .unwrap_err();
    assert!(matches!(err, ProjectionError::SpanTooLong { span: 101, .. }), "{err}");
}

#[test]
fn test_single_year_window() {
    let scenario = flat_scenario(30, 100, working_assumptions());
    let projection =
        calculate_scenario_projection_with(&scenario, &profile_aged(40), &[], 2027, 2027, options())
            .unwrap();
    assert_eq!(projection.years.len(), 1);
    assert_eq!(projection.years[0].age, 43);
}

#[test]
fn test_rejects_invalid_scenario() {
    let mut scenario = flat_scenario(30, 100, working_assumptions());
    scenario.buckets.push(bucket(1, 100, 110, Assumptions::default()));
    let err = calculate_scenario_projection_with(&scenario, &profile_aged(40), &[], 2024, 2030, options())
        .unwrap_err();
    assert!(matches!(err, ProjectionError::InvalidScenario(_)), "{err}");
    assert!(err.to_string().contains("Overlap between buckets 1 and 2"), "{err}");
}

#[test]
fn test_rejects_birth_after_as_of() {
    let scenario = flat_scenario(0, 100, working_assumptions());
    let profile = UserProfile::born(date(2025, 1, 1));
    let err = calculate_scenario_projection_with(&scenario, &profile, &[], 2024, 2030, options())
        .unwrap_err();
    assert!(
        matches!(err, ProjectionError::BirthDateAfterAsOf { as_of, .. } if as_of == AS_OF),
        "{err}"
    );
}

#[test]
fn test_missing_bucket_years_are_skipped() {
    let mut scenario = flat_scenario(50, 60, working_assumptions());
    scenario.inflation_rate = 3.0;

    let projection =
        calculate_scenario_projection_with(&scenario, &profile_aged(48), &[], 2024, 2027, options())
            .unwrap();

    assert_eq!(
        projection.skipped_years,
        vec![
            NoApplicableBucket {
                year: 2024,
                age: 48
            },
            NoApplicableBucket {
                year: 2025,
                age: 49
            },
        ]
    );
    assert_eq!(projection.years.len(), 2);
    let first = projection.first_year().unwrap();
    assert_eq!((first.year, first.age), (2026, 50));
    // Skipped years do not compound the multipliers
    assert_close(first.spending.living, 60_000.0 * 1.03, "living");
    assert_close(first.income.employment, 100_000.0 * 1.02, "employment");
    assert_eq!(projection.summary.start_year, 2024);
}

#[test]
fn test_missing_bucket_fails_in_strict_mode() {
    let scenario = flat_scenario(50, 60, working_assumptions());
    let strict = ProjectionOptions {
        missing_bucket: MissingBucketPolicy::Fail,
        ..options()
    };
    let err = calculate_scenario_projection_with(&scenario, &profile_aged(48), &[], 2024, 2027, strict)
        .unwrap_err();
    assert!(
        matches!(
            err,
            ProjectionError::NoApplicableBucket(NoApplicableBucket {
                year: 2024,
                age: 48
            })
        ),
        "{err}"
    );
}

#[test]
fn test_lump_sums_are_not_inflated() {
    let mut scenario = flat_scenario(30, 100, working_assumptions());
    scenario.inflation_rate = 3.0;
    scenario.lump_sum_events = vec![
        LumpSumEvent {
            kind: LumpSumKind::Expense,
            age: 42,
            amount: 10_000.0,
            description: "Car".to_string(),
        },
        LumpSumEvent {
            kind: LumpSumKind::Income,
            age: 42,
            amount: 25_000.0,
            description: "Inheritance".to_string(),
        },
    ];

    let projection =
        calculate_scenario_projection_with(&scenario, &profile_aged(40), &[], 2024, 2027, options())
            .unwrap();
    let year = projection.year(2026).unwrap();
    assert_eq!(year.age, 42);
    assert_eq!(year.spending.lump_sum, 10_000.0);
    assert_eq!(year.income.lump_sum, 25_000.0);
    assert_close(year.spending.living, 60_000.0 * 1.03f64.powi(3), "living");

    for other in projection.years.iter().filter(|y| y.year != 2026) {
        assert_eq!(other.spending.lump_sum, 0.0);
        assert_eq!(other.income.lump_sum, 0.0);
    }
}

#[test]
fn test_mortgage_payments_in_spending() {
    let mut scenario = flat_scenario(30, 100, working_assumptions());
    let mortgage = Mortgage {
        name: "Home".to_string(),
        start_date: date(2024, 1, 1),
        loan_amount: 300_000.0,
        term_years: 2,
        interest_rate: 6.0,
        monthly_escrow: 300.0,
        additional_monthly_payment: 0.0,
    };
    scenario.mortgages = vec![mortgage.clone()];

    let projection =
        calculate_scenario_projection_with(&scenario, &profile_aged(40), &[], 2024, 2026, options())
            .unwrap();

    let expected = get_mortgage_payment_for_year(&mortgage, 2024).unwrap();
    let first = &projection.years[0];
    assert_close(first.mortgage.total, expected.total_payment, "mortgage total");
    assert_close(first.mortgage.interest, expected.interest, "mortgage interest");
    assert_close(first.mortgage.escrow, 3_600.0, "escrow");
    assert_close(first.spending.mortgage, expected.total_payment, "spending.mortgage");

    // Paid off after two years
    let third = projection.year(2026).unwrap();
    assert_eq!(third.mortgage.total, 0.0);
    assert_eq!(third.spending.mortgage, 0.0);
}

#[test]
fn test_social_security_starts_at_claiming_age() {
    let mut scenario = flat_scenario(30, 100, Assumptions::default());
    scenario.social_security_age = 67;
    scenario.social_security_income = 24_000.0;
    scenario.inflation_rate = 2.0;

    let projection =
        calculate_scenario_projection_with(&scenario, &profile_aged(66), &[], 2024, 2026, options())
            .unwrap();

    assert_eq!(projection.years[0].income.social_security, 0.0);
    assert_close(
        projection.years[1].income.social_security,
        24_000.0 * 1.02 * 1.02,
        "social security",
    );
    assert!(projection.years[2].income.social_security > projection.years[1].income.social_security);
}

#[test]
fn test_bucket_rate_overrides() {
    let mut scenario = flat_scenario(
        30,
        100,
        Assumptions {
            annual_spending: Some(10_000.0),
            inflation_rate: Some(5.0),
            investment_return_rate: Some(10.0),
            ..Default::default()
        },
    );
    scenario.inflation_rate = 2.0;
    scenario.investment_return_rate = 4.0;
    let accounts = vec![AccountSnapshot::active(AccountType::Brokerage, 50_000.0)];

    let projection =
        calculate_scenario_projection_with(&scenario, &profile_aged(40), &accounts, 2024, 2024, options())
            .unwrap();
    let year = &projection.years[0];
    assert_close(year.spending.living, 10_500.0, "living");
    assert_close(year.growth.brokerage, 5_000.0, "growth");
}

#[test]
fn test_deficit_drains_accounts_in_order() {
    let scenario = flat_scenario(
        30,
        100,
        Assumptions {
            annual_spending: Some(30_000.0),
            ..Default::default()
        },
    );
    let accounts = vec![
        AccountSnapshot::active(AccountType::Checking, 10_000.0),
        AccountSnapshot::active(AccountType::Savings, 15_000.0),
        AccountSnapshot::active(AccountType::Brokerage, 100_000.0),
    ];

    let projection =
        calculate_scenario_projection_with(&scenario, &profile_aged(60), &accounts, 2024, 2024, options())
            .unwrap();
    let year = &projection.years[0];
    assert_eq!(year.withdrawals.checking, 10_000.0);
    assert_eq!(year.withdrawals.savings, 15_000.0);
    assert_eq!(year.withdrawals.brokerage, 5_000.0);
    assert_eq!(year.balances.brokerage, 95_000.0);
    assert_eq!(year.unfunded_shortfall, 0.0);
    assert_eq!(projection.summary.years_in_deficit, 1);
    assert_eq!(projection.summary.first_deficit_year, Some(2024));
}

#[test]
fn test_closed_accounts_are_ignored() {
    let scenario = flat_scenario(30, 100, Assumptions::default());
    let mut closed = AccountSnapshot::active(AccountType::Savings, 50_000.0);
    closed.status = AccountStatus::Closed;
    let accounts = vec![closed, AccountSnapshot::active(AccountType::Checking, 1_000.0)];

    let projection =
        calculate_scenario_projection_with(&scenario, &profile_aged(40), &accounts, 2024, 2025, options())
            .unwrap();
    assert_eq!(projection.years[0].balances.savings, 0.0);
    assert_eq!(projection.summary.final_net_worth, 1_000.0);
}

#[test]
fn test_batch_matches_individual_runs() {
    let base = flat_scenario(30, 100, working_assumptions());
    let mut frugal = base.clone();
    frugal.id = "frugal".to_string();
    frugal.buckets[0].assumptions.annual_spending = Some(40_000.0);
    let mut broken = base.clone();
    broken.buckets.clear();

    let profile = profile_aged(40);
    let accounts = vec![AccountSnapshot::active(AccountType::Brokerage, 250_000.0)];
    let request = |scenario| ProjectionRequest {
        scenario,
        profile: &profile,
        accounts: &accounts,
        start_year: 2024,
        end_year: 2050,
        options: options(),
    };
    let requests = vec![request(&base), request(&frugal), request(&broken)];

    let results = project_scenarios(&requests);
    assert_eq!(results.len(), 3);
    for (request, result) in requests.iter().zip(&results) {
        match (request.run(), result) {
            (Ok(expected), Ok(actual)) => assert_eq!(&expected, actual),
            (Err(_), Err(_)) => {}
            (expected, actual) => panic!("mismatch: {expected:?} vs {actual:?}"),
        }
    }
    assert_eq!(results[1].as_ref().unwrap().scenario_id, "frugal");
    assert!(matches!(results[2], Err(ProjectionError::NoBuckets)));
}
