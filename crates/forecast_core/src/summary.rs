//! Headline statistics over a projection

use crate::model::{AnnualProjection, ProjectionSummary};

/// Reduce projected years to totals, final/peak net worth and deficit years.
///
/// A deficit year is one whose net income (mandatory withdrawals included) is
/// negative. An empty slice yields all-zero totals.
pub fn calculate_projection_summary(
    years: &[AnnualProjection],
    start_year: i16,
    end_year: i16,
) -> ProjectionSummary {
    let mut summary = ProjectionSummary {
        start_year,
        end_year,
        ..Default::default()
    };

    for year in years {
        summary.total_income += year.income.total;
        summary.total_spending += year.spending.total;
        summary.total_contributions += year.total_contributions;
        summary.total_mandatory_withdrawals += year.income.mandatory_withdrawal;

        if year.net_income < 0.0 {
            summary.years_in_deficit += 1;
            summary.first_deficit_year.get_or_insert(year.year);
        }

        if summary.peak_net_worth_year.is_none() || year.total_balance > summary.peak_net_worth {
            summary.peak_net_worth = year.total_balance;
            summary.peak_net_worth_year = Some(year.year);
        }
    }

    summary.final_net_worth = years.last().map_or(0.0, |y| y.total_balance);
    summary
}
