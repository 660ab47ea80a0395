//! Calendar arithmetic on civil dates.
//!
//! Everything here works on `jiff::civil::Date`, which carries no time zone,
//! so a payment dated January 1st can never slide into the previous year the
//! way a UTC timestamp rendered in a western zone would. Month offsets are
//! computed directly instead of through `Span` normalisation.

use jiff::civil::Date;

/// Fast leap year check.
#[inline]
pub fn is_leap_year(year: i16) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Days in a month without creating a `jiff::civil::Date`.
#[inline]
pub fn days_in_month(year: i16, month: i8) -> i8 {
    const DAYS: [i8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS[(month - 1) as usize]
    }
}

/// Move `d` forward by `months` calendar months.
///
/// The day is clamped to the end of the target month (Jan 31 + 1 month is
/// Feb 28/29), matching jiff's behaviour for `date + n.months()`. Returns
/// `None` past the last representable date (9999-12-31).
#[inline]
pub fn add_months(d: Date, months: u32) -> Option<Date> {
    let zero_based = i64::from(d.month()) - 1 + i64::from(months);
    let year = i16::try_from(i64::from(d.year()) + zero_based / 12).ok()?;
    let month = (zero_based % 12 + 1) as i8;
    let day = d.day().min(days_in_month(year, month));
    Date::new(year, month, day).ok()
}

/// Whole years between `birth` and `on`.
///
/// A birthday on February 29th is reached on March 1st in non-leap years.
#[inline]
pub fn age_on(birth: Date, on: Date) -> i32 {
    let mut years = i32::from(on.year()) - i32::from(birth.year());
    if (on.month(), on.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years
}
