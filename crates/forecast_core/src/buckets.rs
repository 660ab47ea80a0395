//! Age-bucket validation and lookup
//!
//! A scenario's buckets must partition an age range: orders `0..n-1`, and in
//! age order each bucket starts the year after the previous one ends.

use crate::error::ValidationError;
use crate::model::{AccountType, AssumptionBucket};
use crate::validation::{
    MAX_BUCKET_ORDER, MAX_RATE, MIN_RATE, check_age, check_non_negative, check_range,
};

/// Field path of one account type's contribution, as written in plan files
fn contribution_field(account_type: AccountType) -> &'static str {
    match account_type {
        AccountType::Plan401k => "contributions.401k",
        AccountType::TraditionalIra => "contributions.traditional-ira",
        AccountType::RothIra => "contributions.roth-ira",
        AccountType::Brokerage => "contributions.brokerage",
        AccountType::Savings => "contributions.savings",
        AccountType::Checking => "contributions.checking",
    }
}

fn validate_bucket_fields(subject: &str, bucket: &AssumptionBucket) -> Result<(), ValidationError> {
    if bucket.order > MAX_BUCKET_ORDER {
        return Err(ValidationError::field(
            subject,
            "order",
            format!("must be between 0 and {MAX_BUCKET_ORDER} (got {})", bucket.order),
        ));
    }
    check_age(subject, "startAge", bucket.start_age)?;
    check_age(subject, "endAge", bucket.end_age)?;
    if bucket.start_age > bucket.end_age {
        return Err(ValidationError::field(
            subject,
            "startAge",
            format!(
                "must not be after endAge ({} > {})",
                bucket.start_age, bucket.end_age
            ),
        ));
    }

    let a = &bucket.assumptions;
    let monetary = [
        ("annualIncome", a.annual_income),
        ("annualSpending", a.annual_spending),
        ("annualTravelBudget", a.annual_travel_budget),
        ("annualHealthcareCosts", a.annual_healthcare_costs),
    ];
    for (field, value) in monetary {
        if let Some(v) = value {
            check_non_negative(subject, field, v)?;
        }
    }
    for (account_type, contribution) in a.contributions.iter() {
        if let Some(v) = *contribution {
            check_non_negative(subject, contribution_field(account_type), v)?;
        }
    }
    if let Some(rate) = a.inflation_rate {
        check_range(subject, "inflationRate", rate, MIN_RATE, MAX_RATE)?;
    }
    if let Some(rate) = a.investment_return_rate {
        check_range(subject, "investmentReturnRate", rate, MIN_RATE, MAX_RATE)?;
    }
    Ok(())
}

/// Check that `buckets` is a contiguous, gap-free, ordered partition of ages
pub fn validate_buckets(buckets: &[AssumptionBucket]) -> Result<(), ValidationError> {
    if buckets.is_empty() {
        return Err(ValidationError::NoBuckets);
    }

    for (i, bucket) in buckets.iter().enumerate() {
        validate_bucket_fields(&format!("bucket {}", i + 1), bucket)?;
    }

    let mut orders: Vec<u32> = buckets.iter().map(|b| b.order).collect();
    orders.sort_unstable();
    if let Some(pair) = orders.windows(2).find(|pair| pair[0] == pair[1]) {
        return Err(ValidationError::DuplicateBucketOrder(pair[0]));
    }
    for (expected, &found) in (0u32..).zip(&orders) {
        if found != expected {
            return Err(ValidationError::BucketOrderGap { expected, found });
        }
    }

    let mut by_age: Vec<&AssumptionBucket> = buckets.iter().collect();
    by_age.sort_by_key(|b| (b.start_age, b.end_age));
    for (i, pair) in by_age.windows(2).enumerate() {
        let (prev, next) = (pair[0], pair[1]);
        let (first, second) = (i + 1, i + 2);
        if prev.end_age >= next.start_age {
            return Err(ValidationError::BucketOverlap {
                first,
                second,
                first_end_age: prev.end_age,
                second_start_age: next.start_age,
            });
        }
        if u16::from(prev.end_age) + 1 != u16::from(next.start_age) {
            return Err(ValidationError::BucketGap {
                first,
                second,
                first_end_age: prev.end_age,
                second_start_age: next.start_age,
            });
        }
    }

    Ok(())
}

/// First bucket, in `order` order, whose age range contains `age`.
///
/// Buckets per scenario are few, so this is a plain scan.
pub fn get_bucket_for_age(buckets: &[AssumptionBucket], age: u8) -> Option<&AssumptionBucket> {
    let mut sorted: Vec<&AssumptionBucket> = buckets.iter().collect();
    sorted.sort_by_key(|b| b.order);
    sorted.into_iter().find(|b| b.contains_age(age))
}
