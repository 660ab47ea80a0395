//! Plan files
//!
//! A plan bundles everything one projection needs:
//!
//! ```yaml
//! profile:
//!   dateOfBirth: "1980-01-01"
//! accounts:
//!   - type: 401k
//!     balance: 100000
//! scenario:
//!   id: base
//!   name: Base case
//!   investmentReturnRate: 7
//!   inflationRate: 2.5
//!   retirementAge: 65
//!   socialSecurityAge: 67
//!   socialSecurityIncome: 30000
//!   buckets:
//!     - order: 0
//!       startAge: 30
//!       endAge: 100
//!       assumptions:
//!         annualIncome: 100000
//!         annualSpending: 60000
//! window:
//!   startYear: 2025
//!   endYear: 2060
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use forecast_core::model::{AccountSnapshot, Mortgage, Scenario, UserProfile};
use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Error reading a plan or config file
#[derive(Debug)]
pub enum LoadError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, message: String },
}

impl std::fmt::Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            LoadError::Parse { path, message } => {
                write!(f, "failed to parse {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Parse { .. } => None,
        }
    }
}

/// Inclusive calendar-year range; either end may be left to the defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionWindow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_year: Option<i16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i16>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanFile {
    pub profile: UserProfile,
    #[serde(default)]
    pub accounts: Vec<AccountSnapshot>,
    pub scenario: Scenario,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window: Option<ProjectionWindow>,
}

impl PlanFile {
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_saphyr::Error> {
        serde_saphyr::from_str(yaml)
    }

    pub fn to_yaml(&self) -> Result<String, serde_saphyr::ser::Error> {
        serde_saphyr::to_string(self)
    }

    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let plan = Self::from_yaml(&content).map_err(|e| LoadError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        tracing::debug!(
            path = %path.display(),
            scenario = %plan.scenario.id,
            buckets = plan.scenario.buckets.len(),
            accounts = plan.accounts.len(),
            "loaded plan"
        );
        Ok(plan)
    }

    /// Resolve the years to project.
    ///
    /// Precedence per end: `overrides`, then the plan's `window`, then the
    /// defaults (the as-of year through the year the subject turns
    /// `horizon_age`).
    pub fn resolve_window(
        &self,
        overrides: ProjectionWindow,
        as_of: Date,
        horizon_age: u8,
    ) -> (i16, i16) {
        let window = self.window.unwrap_or_default();
        let start = overrides
            .start_year
            .or(window.start_year)
            .unwrap_or_else(|| as_of.year());
        let end = overrides
            .end_year
            .or(window.end_year)
            .unwrap_or_else(|| self.profile.date_of_birth.year() + i16::from(horizon_age));
        (start, end)
    }

    /// Mortgage by name, ignoring case and surrounding whitespace
    pub fn find_mortgage(&self, name: &str) -> Option<&Mortgage> {
        let name = name.trim();
        self.scenario
            .mortgages
            .iter()
            .find(|m| m.name.trim().eq_ignore_ascii_case(name))
    }
}
