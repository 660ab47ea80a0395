//! Fixed-rate mortgage amortization
//!
//! Builds the month-by-month schedule of a loan and rolls it up by calendar
//! year. A loan counts as active for the calendar years
//! `[start_year, start_year + term_years)`; annual queries outside that window
//! return `None` without building a schedule.

use crate::date_math::add_months;
use crate::model::{AnnualMortgagePayment, MonthlyPayment, Mortgage, MortgageSummary};

/// Balance at or below which a loan is considered repaid
pub const BALANCE_EPSILON: f64 = 0.01;

/// Scheduled principal + interest per month.
///
/// Standard annuity formula `P·r(1+r)^n / ((1+r)^n − 1)`, which is undefined
/// at `r = 0`; an interest-free loan simply repays `P / n` each month.
pub fn monthly_payment(mortgage: &Mortgage) -> f64 {
    let n = mortgage.payment_count();
    if n == 0 {
        return 0.0;
    }
    if mortgage.interest_rate == 0.0 {
        return mortgage.loan_amount / f64::from(n);
    }
    let r = mortgage.monthly_rate();
    let factor = (1.0 + r).powi(n as i32);
    mortgage.loan_amount * r * factor / (factor - 1.0)
}

/// Month-by-month schedule. The first payment falls in the start month.
///
/// Extra principal shortens the schedule; the final payment is capped at the
/// remaining balance. A schedule that would run past 9999-12-31 stops at the
/// last representable month; `validate_mortgages` rejects such loans.
pub fn generate_amortization_schedule(mortgage: &Mortgage) -> Vec<MonthlyPayment> {
    let n = mortgage.payment_count();
    let r = mortgage.monthly_rate();
    let payment = monthly_payment(mortgage);
    let escrow = mortgage.monthly_escrow;

    let mut schedule = Vec::with_capacity(n as usize);
    let mut balance = mortgage.loan_amount;

    for payment_number in 1..=n {
        if balance <= BALANCE_EPSILON {
            break;
        }

        let interest = balance * r;
        let mut principal = payment - interest;
        let mut additional = mortgage.additional_monthly_payment;
        if principal + additional > balance {
            principal = balance;
            additional = 0.0;
        }

        let Some(date) = add_months(mortgage.start_date, payment_number - 1) else {
            tracing::warn!(
                mortgage = %mortgage.name,
                payment_number,
                "payment date past the last representable date; schedule truncated"
            );
            break;
        };

        let starting_balance = balance;
        balance -= principal + additional;

        schedule.push(MonthlyPayment {
            payment_number,
            date,
            year: date.year(),
            month: date.month(),
            starting_balance,
            principal,
            interest,
            escrow,
            additional_principal: additional,
            total_payment: principal + interest + escrow + additional,
            remaining_balance: balance,
        });
    }

    schedule
}

/// Sum schedule rows per calendar year, ascending.
///
/// Each year's ending balance is the next year's starting balance.
pub fn aggregate_to_annual_payments(schedule: &[MonthlyPayment]) -> Vec<AnnualMortgagePayment> {
    let mut annual: Vec<AnnualMortgagePayment> = Vec::new();

    for row in schedule {
        match annual.last_mut() {
            Some(current) if current.year == row.year => {
                current.payment_count += 1;
                current.principal += row.principal;
                current.interest += row.interest;
                current.escrow += row.escrow;
                current.additional_principal += row.additional_principal;
                current.total_payment += row.total_payment;
                current.ending_balance = row.remaining_balance;
            }
            _ => annual.push(AnnualMortgagePayment {
                year: row.year,
                payment_count: 1,
                principal: row.principal,
                interest: row.interest,
                escrow: row.escrow,
                additional_principal: row.additional_principal,
                total_payment: row.total_payment,
                starting_balance: row.starting_balance,
                ending_balance: row.remaining_balance,
            }),
        }
    }

    annual
}

pub fn is_mortgage_active(mortgage: &Mortgage, year: i16) -> bool {
    mortgage.start_year() <= year && year < mortgage.end_year()
}

/// Annual payments restricted to the years the loan is active
pub fn active_annual_payments(mortgage: &Mortgage) -> Vec<AnnualMortgagePayment> {
    let mut annual = aggregate_to_annual_payments(&generate_amortization_schedule(mortgage));
    annual.retain(|p| is_mortgage_active(mortgage, p.year));
    annual
}

/// What the loan costs in `year`, or `None` if it is not active or already repaid
pub fn get_mortgage_payment_for_year(
    mortgage: &Mortgage,
    year: i16,
) -> Option<AnnualMortgagePayment> {
    if !is_mortgage_active(mortgage, year) {
        return None;
    }
    aggregate_to_annual_payments(&generate_amortization_schedule(mortgage))
        .into_iter()
        .find(|p| p.year == year)
}

pub fn mortgage_summary(mortgage: &Mortgage) -> MortgageSummary {
    let schedule = generate_amortization_schedule(mortgage);
    MortgageSummary {
        monthly_payment: monthly_payment(mortgage),
        payment_count: schedule.len() as u32,
        total_interest: schedule.iter().map(|p| p.interest).sum(),
        total_paid: schedule.iter().map(|p| p.total_payment).sum(),
        payoff_date: schedule.last().map(|p| p.date),
    }
}
