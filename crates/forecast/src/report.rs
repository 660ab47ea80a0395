//! Rendering results for the terminal
//!
//! The engine works in unrounded floats; amounts are rounded to cents here
//! and nowhere else.

use forecast_core::model::{AnnualMortgagePayment, MonthlyPayment, MortgageSummary, ScenarioProjection};
use serde::Serialize;
use serde_json::Value;

pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Thousands-separated whole dollars, e.g. `-1,234,568`
pub fn format_dollars(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0.0 {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn round_floats(value: &mut Value) {
    match value {
        Value::Number(n) if n.is_f64() => {
            if let Some(rounded) = n
                .as_f64()
                .map(round_cents)
                .and_then(serde_json::Number::from_f64)
            {
                *n = rounded;
            }
        }
        Value::Array(items) => items.iter_mut().for_each(round_floats),
        Value::Object(fields) => fields.values_mut().for_each(round_floats),
        _ => {}
    }
}

/// Pretty JSON with every float rounded to cents
pub fn to_rounded_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    let mut json = serde_json::to_value(value)?;
    round_floats(&mut json);
    serde_json::to_string_pretty(&json)
}

/// Join rendered lines, each terminated by a newline
fn lines_to_string(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

pub fn projection_table(projection: &ScenarioProjection) -> String {
    let mut lines = vec![
        format!(
            "{} ({}), {}-{}",
            projection.scenario_name, projection.scenario_id, projection.start_year, projection.end_year
        ),
        format!(
            "{:>4} {:>3} {:>12} {:>12} {:>10} {:>10} {:>12} {:>14}",
            "Year", "Age", "Income", "Spending", "Contrib", "RMD", "Net", "Net worth"
        ),
    ];

    lines.extend(projection.years.iter().map(|year| {
        format!(
            "{:>4} {:>3} {:>12} {:>12} {:>10} {:>10} {:>12} {:>14}",
            year.year,
            year.age,
            format_dollars(year.income.total),
            format_dollars(year.spending.total),
            format_dollars(year.total_contributions),
            format_dollars(year.income.mandatory_withdrawal),
            format_dollars(year.net_income),
            format_dollars(year.total_balance),
        )
    }));

    if !projection.skipped_years.is_empty() {
        let skipped: Vec<String> = projection
            .skipped_years
            .iter()
            .map(|s| format!("{} (age {})", s.year, s.age))
            .collect();
        lines.push(String::new());
        lines.push(format!("No bucket covers: {}", skipped.join(", ")));
    }

    let summary = &projection.summary;
    lines.push(String::new());
    lines.push(format!("Total income:         {}", format_dollars(summary.total_income)));
    lines.push(format!("Total spending:       {}", format_dollars(summary.total_spending)));
    lines.push(format!(
        "Total contributions:  {}",
        format_dollars(summary.total_contributions)
    ));
    lines.push(format!(
        "Mandatory withdrawals: {}",
        format_dollars(summary.total_mandatory_withdrawals)
    ));
    lines.push(format!("Final net worth:      {}", format_dollars(summary.final_net_worth)));
    if let Some(year) = summary.peak_net_worth_year {
        lines.push(format!(
            "Peak net worth:       {} in {}",
            format_dollars(summary.peak_net_worth),
            year
        ));
    }
    lines.push(match summary.first_deficit_year {
        Some(first) => format!(
            "Deficit years:        {} (first in {})",
            summary.years_in_deficit, first
        ),
        None => "Deficit years:        0".to_string(),
    });
    lines_to_string(lines)
}

pub fn annual_schedule_table(
    name: &str,
    summary: &MortgageSummary,
    rows: &[AnnualMortgagePayment],
) -> String {
    let mut lines = mortgage_header(name, summary);
    lines.push(format!(
        "{:>4} {:>3} {:>12} {:>12} {:>10} {:>10} {:>12} {:>12}",
        "Year", "Pmt", "Principal", "Interest", "Escrow", "Extra", "Total", "Balance"
    ));
    lines.extend(rows.iter().map(|row| {
        format!(
            "{:>4} {:>3} {:>12} {:>12} {:>10} {:>10} {:>12} {:>12}",
            row.year,
            row.payment_count,
            format_dollars(row.principal),
            format_dollars(row.interest),
            format_dollars(row.escrow),
            format_dollars(row.additional_principal),
            format_dollars(row.total_payment),
            format_dollars(row.ending_balance),
        )
    }));
    lines_to_string(lines)
}

pub fn monthly_schedule_table(
    name: &str,
    summary: &MortgageSummary,
    rows: &[MonthlyPayment],
) -> String {
    let mut lines = mortgage_header(name, summary);
    lines.push(format!(
        "{:>4} {:>10} {:>10} {:>10} {:>8} {:>8} {:>10} {:>12}",
        "#", "Date", "Principal", "Interest", "Escrow", "Extra", "Total", "Balance"
    ));
    lines.extend(rows.iter().map(|row| {
        format!(
            "{:>4} {:>10} {:>10.2} {:>10.2} {:>8.2} {:>8.2} {:>10.2} {:>12.2}",
            row.payment_number,
            row.date.to_string(),
            row.principal,
            row.interest,
            row.escrow,
            row.additional_principal,
            row.total_payment,
            row.remaining_balance,
        )
    }));
    lines_to_string(lines)
}

fn mortgage_header(name: &str, summary: &MortgageSummary) -> Vec<String> {
    vec![
        format!(
            "{name}: {:.2}/month over {} payments",
            summary.monthly_payment, summary.payment_count
        ),
        format!(
            "Total interest {}, total paid {}{}",
            format_dollars(summary.total_interest),
            format_dollars(summary.total_paid),
            summary
                .payoff_date
                .map(|d| format!(", paid off {d}"))
                .unwrap_or_default()
        ),
    ]
}
