//! Scenario validation
//!
//! Each validator returns `Ok(())` for valid input and otherwise the first
//! rule that is broken. Validation never mutates its input, so re-validating a
//! valid scenario is always `Ok`.

use jiff::ToSpan;

use crate::buckets::validate_buckets;
use crate::error::ValidationError;
use crate::model::{LumpSumEvent, Mortgage, Scenario};

pub const MAX_AGE: u8 = 120;
pub const MAX_BUCKET_ORDER: u32 = 999;
pub const MIN_RATE: f64 = -100.0;
pub const MAX_RATE: f64 = 100.0;
pub const MIN_TERM_YEARS: u8 = 1;
pub const MAX_TERM_YEARS: u8 = 50;
pub const MAX_MORTGAGE_RATE: f64 = 30.0;

pub(crate) fn check_non_negative(
    subject: &str,
    field: &'static str,
    value: f64,
) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::field(subject, field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(ValidationError::field(
            subject,
            field,
            format!("must not be negative (got {value})"),
        ));
    }
    Ok(())
}

pub(crate) fn check_range(
    subject: &str,
    field: &'static str,
    value: f64,
    min: f64,
    max: f64,
) -> Result<(), ValidationError> {
    if !value.is_finite() || value < min || value > max {
        return Err(ValidationError::field(
            subject,
            field,
            format!("must be between {min} and {max} (got {value})"),
        ));
    }
    Ok(())
}

pub(crate) fn check_age(subject: &str, field: &'static str, age: u8) -> Result<(), ValidationError> {
    if age > MAX_AGE {
        return Err(ValidationError::field(
            subject,
            field,
            format!("must be between 0 and {MAX_AGE} (got {age})"),
        ));
    }
    Ok(())
}

/// Validate one-off income and expense events
pub fn validate_lump_sum_events(events: &[LumpSumEvent]) -> Result<(), ValidationError> {
    for (i, event) in events.iter().enumerate() {
        let subject = format!("lump-sum event {}", i + 1);
        check_age(&subject, "age", event.age)?;
        check_non_negative(&subject, "amount", event.amount)?;
        if event.description.trim().is_empty() {
            return Err(ValidationError::field(
                &subject,
                "description",
                "must not be empty",
            ));
        }
    }
    Ok(())
}

fn validate_mortgage(subject: &str, mortgage: &Mortgage) -> Result<(), ValidationError> {
    if mortgage.name.trim().is_empty() {
        return Err(ValidationError::field(subject, "name", "must not be empty"));
    }
    if !mortgage.loan_amount.is_finite() || mortgage.loan_amount <= 0.0 {
        return Err(ValidationError::field(
            subject,
            "loanAmount",
            format!("must be greater than 0 (got {})", mortgage.loan_amount),
        ));
    }
    if !(MIN_TERM_YEARS..=MAX_TERM_YEARS).contains(&mortgage.term_years) {
        return Err(ValidationError::field(
            subject,
            "termYears",
            format!(
                "must be between {MIN_TERM_YEARS} and {MAX_TERM_YEARS} (got {})",
                mortgage.term_years
            ),
        ));
    }
    if mortgage
        .start_date
        .checked_add(i64::from(mortgage.term_years).years())
        .is_err()
    {
        return Err(ValidationError::field(
            subject,
            "startDate",
            format!(
                "leaves the {}-year term ending after 9999-12-31 (starts {})",
                mortgage.term_years, mortgage.start_date
            ),
        ));
    }
    check_range(
        subject,
        "interestRate",
        mortgage.interest_rate,
        0.0,
        MAX_MORTGAGE_RATE,
    )?;
    check_non_negative(subject, "monthlyEscrow", mortgage.monthly_escrow)?;
    check_non_negative(
        subject,
        "additionalMonthlyPayment",
        mortgage.additional_monthly_payment,
    )?;
    Ok(())
}

/// Validate loan terms
pub fn validate_mortgages(mortgages: &[Mortgage]) -> Result<(), ValidationError> {
    for (i, mortgage) in mortgages.iter().enumerate() {
        let subject = if mortgage.name.trim().is_empty() {
            format!("mortgage {}", i + 1)
        } else {
            format!("mortgage '{}'", mortgage.name)
        };
        validate_mortgage(&subject, mortgage)?;
    }
    Ok(())
}

/// Validate scenario-wide rates, then buckets, lump sums and mortgages
pub fn validate_scenario(scenario: &Scenario) -> Result<(), ValidationError> {
    let subject = "scenario";
    check_range(
        subject,
        "investmentReturnRate",
        scenario.investment_return_rate,
        MIN_RATE,
        MAX_RATE,
    )?;
    check_range(
        subject,
        "inflationRate",
        scenario.inflation_rate,
        MIN_RATE,
        MAX_RATE,
    )?;
    check_age(subject, "retirementAge", scenario.retirement_age)?;
    check_age(subject, "socialSecurityAge", scenario.social_security_age)?;
    check_non_negative(
        subject,
        "socialSecurityIncome",
        scenario.social_security_income,
    )?;

    validate_buckets(&scenario.buckets)?;
    validate_lump_sum_events(&scenario.lump_sum_events)?;
    validate_mortgages(&scenario.mortgages)?;
    Ok(())
}
