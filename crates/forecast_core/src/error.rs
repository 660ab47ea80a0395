use std::fmt;

use jiff::civil::Date;

use crate::model::NoApplicableBucket;

/// A scenario input that breaks one of its rules.
///
/// Messages name the offending item and field so a form can point at it.
/// Bucket numbers are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    NoBuckets,
    DuplicateBucketOrder(u32),
    /// Orders must run `0..n-1`; `expected` is the first missing value
    BucketOrderGap { expected: u32, found: u32 },
    /// Adjacent buckets (in age order) share ages
    BucketOverlap {
        first: usize,
        second: usize,
        first_end_age: u8,
        second_start_age: u8,
    },
    /// Adjacent buckets (in age order) leave ages uncovered
    BucketGap {
        first: usize,
        second: usize,
        first_end_age: u8,
        second_start_age: u8,
    },
    InvalidField {
        subject: String,
        field: &'static str,
        reason: String,
    },
}

impl ValidationError {
    pub(crate) fn field(
        subject: impl Into<String>,
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        ValidationError::InvalidField {
            subject: subject.into(),
            field,
            reason: reason.into(),
        }
    }

    /// Name of the offending field, for field-level errors
    pub fn field_name(&self) -> Option<&'static str> {
        match self {
            ValidationError::InvalidField { field, .. } => Some(field),
            _ => None,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NoBuckets => write!(f, "Scenario must have at least one bucket"),
            ValidationError::DuplicateBucketOrder(order) => {
                write!(f, "Duplicate bucket order {order}")
            }
            ValidationError::BucketOrderGap { expected, found } => write!(
                f,
                "Bucket order must be sequential from 0: expected {expected}, found {found}"
            ),
            ValidationError::BucketOverlap {
                first,
                second,
                first_end_age,
                second_start_age,
            } => write!(
                f,
                "Overlap between buckets {first} and {second}: bucket {first} ends at age {first_end_age} but bucket {second} starts at age {second_start_age}"
            ),
            ValidationError::BucketGap {
                first,
                second,
                first_end_age,
                second_start_age,
            } => write!(
                f,
                "Gap between buckets {first} and {second}: bucket {first} ends at age {first_end_age} but bucket {second} starts at age {second_start_age}"
            ),
            ValidationError::InvalidField {
                subject,
                field,
                reason,
            } => write!(f, "{subject}: {field} {reason}"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Reasons a projection refuses to run.
///
/// All of these are raised before any year is produced.
#[derive(Debug, Clone, PartialEq)]
pub enum ProjectionError {
    NoBuckets,
    InvalidYearRange { start_year: i16, end_year: i16 },
    SpanTooLong { span: i32, max: i32 },
    BirthDateAfterAsOf { date_of_birth: Date, as_of: Date },
    InvalidScenario(ValidationError),
    /// Only raised under `MissingBucketPolicy::Fail`
    NoApplicableBucket(NoApplicableBucket),
}

impl fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectionError::NoBuckets => {
                write!(f, "scenario has no buckets; at least one is required")
            }
            ProjectionError::InvalidYearRange {
                start_year,
                end_year,
            } => write!(
                f,
                "start year {start_year} must not be after end year {end_year}"
            ),
            ProjectionError::SpanTooLong { span, max } => write!(
                f,
                "projection spans {span} years; at most {max} are allowed"
            ),
            ProjectionError::BirthDateAfterAsOf {
                date_of_birth,
                as_of,
            } => write!(
                f,
                "date of birth {date_of_birth} is after the projection date {as_of}"
            ),
            ProjectionError::InvalidScenario(e) => write!(f, "invalid scenario: {e}"),
            ProjectionError::NoApplicableBucket(gap) => write!(
                f,
                "no bucket covers age {} (year {})",
                gap.age, gap.year
            ),
        }
    }
}

impl std::error::Error for ProjectionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProjectionError::InvalidScenario(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ValidationError> for ProjectionError {
    fn from(err: ValidationError) -> Self {
        ProjectionError::InvalidScenario(err)
    }
}
