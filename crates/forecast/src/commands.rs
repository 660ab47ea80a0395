//! Subcommand implementations
//!
//! Each command loads its plan, runs the engine and returns the rendered
//! report; printing is left to `main`.

use std::path::Path;

use color_eyre::eyre::{WrapErr, eyre};
use forecast_core::{
    MissingBucketPolicy, ProjectionOptions, aggregate_to_annual_payments,
    calculate_scenario_projection_with, generate_amortization_schedule, mortgage_summary,
    validate_mortgages, validate_scenario,
};
use jiff::civil::Date;

use crate::config::{CliConfig, OutputFormat};
use crate::input::{PlanFile, ProjectionWindow};
use crate::report;

/// Flags of `forecast project`; `None` defers to the plan and config
#[derive(Debug, Clone, Default)]
pub struct ProjectOptions {
    pub window: ProjectionWindow,
    pub as_of: Option<Date>,
    pub strict_buckets: bool,
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Default)]
pub struct AmortizeOptions {
    pub mortgage: String,
    pub monthly: bool,
    pub format: Option<OutputFormat>,
}

pub fn project(plan_path: &Path, opts: &ProjectOptions, config: &CliConfig) -> color_eyre::Result<String> {
    let plan = PlanFile::load(plan_path)?;

    let as_of = opts.as_of.unwrap_or_else(|| jiff::Zoned::now().date());
    let (start_year, end_year) = plan.resolve_window(opts.window, as_of, config.horizon_age);
    let missing_bucket = if opts.strict_buckets || config.strict_buckets {
        MissingBucketPolicy::Fail
    } else {
        MissingBucketPolicy::Skip
    };

    tracing::info!(
        scenario = %plan.scenario.id,
        start_year,
        end_year,
        ?missing_bucket,
        "running projection"
    );

    let projection = calculate_scenario_projection_with(
        &plan.scenario,
        &plan.profile,
        &plan.accounts,
        start_year,
        end_year,
        ProjectionOptions {
            as_of: Some(as_of),
            missing_bucket,
        },
    )
    .wrap_err_with(|| format!("projection of {} failed", plan_path.display()))?;

    if !projection.skipped_years.is_empty() {
        tracing::warn!(
            skipped = projection.skipped_years.len(),
            "some years had no applicable bucket"
        );
    }
    tracing::info!(
        years = projection.years.len(),
        final_net_worth = projection.summary.final_net_worth,
        "projection complete"
    );

    match opts.format.unwrap_or(config.format) {
        OutputFormat::Table => Ok(report::projection_table(&projection)),
        OutputFormat::Json => {
            report::to_rounded_json(&projection).wrap_err("failed to serialize projection")
        }
    }
}

pub fn validate(plan_path: &Path) -> color_eyre::Result<String> {
    let plan = PlanFile::load(plan_path)?;
    validate_scenario(&plan.scenario)
        .wrap_err_with(|| format!("{} is not a valid plan", plan_path.display()))?;
    tracing::info!(scenario = %plan.scenario.id, "plan is valid");
    Ok("valid".to_string())
}

pub fn amortize(
    plan_path: &Path,
    opts: &AmortizeOptions,
    config: &CliConfig,
) -> color_eyre::Result<String> {
    let plan = PlanFile::load(plan_path)?;
    let mortgage = plan.find_mortgage(&opts.mortgage).ok_or_else(|| {
        let known: Vec<&str> = plan.scenario.mortgages.iter().map(|m| m.name.as_str()).collect();
        eyre!(
            "no mortgage named '{}' (plan has: {})",
            opts.mortgage,
            if known.is_empty() {
                "none".to_string()
            } else {
                known.join(", ")
            }
        )
    })?;

    validate_mortgages(std::slice::from_ref(mortgage))
        .wrap_err_with(|| format!("mortgage '{}' is invalid", mortgage.name))?;

    let schedule = generate_amortization_schedule(mortgage);
    let summary = mortgage_summary(mortgage);
    let format = opts.format.unwrap_or(config.format);

    if opts.monthly {
        return match format {
            OutputFormat::Table => Ok(report::monthly_schedule_table(&mortgage.name, &summary, &schedule)),
            OutputFormat::Json => {
                report::to_rounded_json(&schedule).wrap_err("failed to serialize schedule")
            }
        };
    }

    let annual = aggregate_to_annual_payments(&schedule);
    match format {
        OutputFormat::Table => Ok(report::annual_schedule_table(&mortgage.name, &summary, &annual)),
        OutputFormat::Json => report::to_rounded_json(&annual).wrap_err("failed to serialize schedule"),
    }
}
