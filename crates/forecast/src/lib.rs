//! Command-line front end for the forecast projection engine
//!
//! Reads a YAML plan (profile, accounts, scenario and an optional window),
//! runs [`forecast_core`] and renders the result as a table or JSON. Logs go
//! to `{data_dir}/forecast.log`.

pub mod commands;
pub mod config;
pub mod input;
pub mod logging;
pub mod report;

#[cfg(test)]
mod tests;

pub use config::{CliConfig, OutputFormat, default_data_dir};
pub use input::{LoadError, PlanFile, ProjectionWindow};
pub use logging::init_logging;
