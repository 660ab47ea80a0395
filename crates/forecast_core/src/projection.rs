//! Year-by-year scenario projection
//!
//! For every calendar year in the window the engine resolves the bucket
//! covering the subject's age, compounds inflation and income growth, books
//! income, spending and contributions, grows investment balances, takes any
//! mandatory withdrawal and finally settles the year's net cash flow against
//! checking (surplus) or the withdrawal waterfall (deficit).

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::buckets::get_bucket_for_age;
use crate::error::ProjectionError;
use crate::model::{
    AccountSnapshot, AccountType, AnnualProjection, ByAccountType, IncomeBreakdown,
    NoApplicableBucket, Scenario, ScenarioProjection, SpendingBreakdown, UserProfile,
};
use crate::projection_state::ProjectionState;
use crate::summary::calculate_projection_summary;
use crate::validation::validate_scenario;
use crate::withdrawal::{ShortfallResolution, apply_mandatory_withdrawal, cover_shortfall};

/// Longest allowed `end_year - start_year`
pub const MAX_PROJECTION_SPAN: i32 = 100;

/// What to do with a year whose age no bucket covers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingBucketPolicy {
    /// Drop the year from the output and keep going. Multipliers are not
    /// compounded for a dropped year.
    #[default]
    Skip,
    /// Abort the run with `ProjectionError::NoApplicableBucket`
    Fail,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectionOptions {
    /// Date ages are measured from; today when `None`
    pub as_of: Option<Date>,
    pub missing_bucket: MissingBucketPolicy,
}

/// Project `scenario` over `[start_year, end_year]` measured from today
pub fn calculate_scenario_projection(
    scenario: &Scenario,
    profile: &UserProfile,
    accounts: &[AccountSnapshot],
    start_year: i16,
    end_year: i16,
) -> Result<ScenarioProjection, ProjectionError> {
    calculate_scenario_projection_with(
        scenario,
        profile,
        accounts,
        start_year,
        end_year,
        ProjectionOptions::default(),
    )
}

fn check_preconditions(
    scenario: &Scenario,
    start_year: i16,
    end_year: i16,
) -> Result<(), ProjectionError> {
    if scenario.buckets.is_empty() {
        return Err(ProjectionError::NoBuckets);
    }
    if start_year > end_year {
        return Err(ProjectionError::InvalidYearRange {
            start_year,
            end_year,
        });
    }
    let span = i32::from(end_year) - i32::from(start_year);
    if span > MAX_PROJECTION_SPAN {
        return Err(ProjectionError::SpanTooLong {
            span,
            max: MAX_PROJECTION_SPAN,
        });
    }
    validate_scenario(scenario)?;
    Ok(())
}

pub fn calculate_scenario_projection_with(
    scenario: &Scenario,
    profile: &UserProfile,
    accounts: &[AccountSnapshot],
    start_year: i16,
    end_year: i16,
    options: ProjectionOptions,
) -> Result<ScenarioProjection, ProjectionError> {
    check_preconditions(scenario, start_year, end_year)?;

    let as_of = options.as_of.unwrap_or_else(|| jiff::Zoned::now().date());
    if profile.date_of_birth > as_of {
        return Err(ProjectionError::BirthDateAfterAsOf {
            date_of_birth: profile.date_of_birth,
            as_of,
        });
    }

    let mut state = ProjectionState::new(scenario, profile, accounts, as_of);
    tracing::debug!(
        scenario = %scenario.id,
        start_year,
        end_year,
        current_age = state.timeline.current_age,
        "starting projection"
    );

    let mut years = Vec::with_capacity((end_year - start_year) as usize + 1);
    let mut skipped_years = Vec::new();

    for year in start_year..=end_year {
        match project_year(scenario, &mut state, year) {
            Ok(projection) => years.push(projection),
            Err(gap) => match options.missing_bucket {
                MissingBucketPolicy::Skip => {
                    tracing::warn!(
                        scenario = %scenario.id,
                        year = gap.year,
                        age = gap.age,
                        "no bucket covers this age; year skipped"
                    );
                    skipped_years.push(gap);
                }
                MissingBucketPolicy::Fail => return Err(ProjectionError::NoApplicableBucket(gap)),
            },
        }
    }

    let summary = calculate_projection_summary(&years, start_year, end_year);
    Ok(ScenarioProjection {
        scenario_id: scenario.id.clone(),
        scenario_name: scenario.name.clone(),
        start_year,
        end_year,
        years,
        skipped_years,
        summary,
    })
}

/// Simulate one calendar year, mutating the running balances and multipliers.
///
/// Returns `Err(NoApplicableBucket)` without touching state when no bucket
/// covers the subject's age that year.
pub fn project_year(
    scenario: &Scenario,
    state: &mut ProjectionState,
    year: i16,
) -> Result<AnnualProjection, NoApplicableBucket> {
    let raw_age = state.timeline.age_in(year);
    let (age, bucket) = u8::try_from(raw_age)
        .ok()
        .and_then(|age| get_bucket_for_age(&scenario.buckets, age).map(|b| (age, b)))
        .ok_or(NoApplicableBucket { year, age: raw_age })?;
    let assumptions = &bucket.assumptions;

    state.multipliers.compound(
        assumptions
            .inflation_rate
            .unwrap_or(scenario.inflation_rate),
    );
    let inflation = state.multipliers.inflation;

    let employment = assumptions.annual_income.unwrap_or(0.0) * state.multipliers.income;
    let social_security = if age >= scenario.social_security_age {
        scenario.social_security_income * inflation
    } else {
        0.0
    };
    let lump_sums = state.cash_flows.lump_sums_at(age);

    let mortgage = state.cash_flows.mortgage_in(year);
    let spending = SpendingBreakdown::new(
        assumptions.annual_spending.unwrap_or(0.0) * inflation,
        assumptions.annual_travel_budget.unwrap_or(0.0) * inflation,
        assumptions.annual_healthcare_costs.unwrap_or(0.0) * inflation,
        lump_sums.expense,
        mortgage.total,
    );

    let contributions = ByAccountType::from_fn(|t| assumptions.contribution(t) * inflation);
    let total_contributions = contributions.total();

    let return_rate = assumptions
        .investment_return_rate
        .unwrap_or(scenario.investment_return_rate)
        / 100.0;
    let growth = ByAccountType::from_fn(|t| {
        if t.is_investment() {
            state.balances[t] * return_rate
        } else {
            0.0
        }
    });
    for t in AccountType::ALL {
        state.balances[t] += contributions[t] + growth[t];
    }

    let mandatory = apply_mandatory_withdrawal(&mut state.balances, age, &state.rmd_table)
        .map_or(0.0, |w| w.total);

    let income = IncomeBreakdown::new(employment, social_security, lump_sums.income, mandatory);
    let net_income = income.total - spending.total - total_contributions;

    let resolution = if net_income < 0.0 {
        cover_shortfall(&mut state.balances, -net_income)
    } else {
        state.balances.checking += net_income;
        ShortfallResolution::default()
    };

    let total_balance = state.balances.total();
    tracing::trace!(year, age, net_income, total_balance, "projected year");

    Ok(AnnualProjection {
        year,
        age,
        income,
        spending,
        mortgage,
        contributions,
        total_contributions,
        growth,
        withdrawals: resolution.withdrawals,
        unfunded_shortfall: resolution.unfunded,
        net_income,
        balances: state.balances,
        total_balance,
    })
}

/// Inputs for one run of [`project_scenarios`]
#[derive(Debug, Clone, Copy)]
pub struct ProjectionRequest<'a> {
    pub scenario: &'a Scenario,
    pub profile: &'a UserProfile,
    pub accounts: &'a [AccountSnapshot],
    pub start_year: i16,
    pub end_year: i16,
    pub options: ProjectionOptions,
}

impl ProjectionRequest<'_> {
    pub fn run(&self) -> Result<ScenarioProjection, ProjectionError> {
        calculate_scenario_projection_with(
            self.scenario,
            self.profile,
            self.accounts,
            self.start_year,
            self.end_year,
            self.options,
        )
    }
}

/// Run independent projections, in parallel when the `parallel` feature is on.
///
/// Results are returned in request order.
pub fn project_scenarios(
    requests: &[ProjectionRequest<'_>],
) -> Vec<Result<ScenarioProjection, ProjectionError>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
        requests.par_iter().map(|r| r.run()).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        requests.iter().map(|r| r.run()).collect()
    }
}
