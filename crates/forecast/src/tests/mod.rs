//! Tests for plan loading and the subcommands
//!
//! Tests are organized by topic:
//! - `plan` - Plan file parsing, loading errors and window resolution
//! - `commands` - Project, validate and amortize end to end on temp files


use std::path::PathBuf;

use tempfile::TempDir;

/// A plan with a mortgage, a lump sum and a single bucket from 30 to 100
pub(crate) const SAMPLE_PLAN: &str = r#"
profile:
  name: Sam
  dateOfBirth: "1980-01-01"
accounts:
  - name: Work 401k
    type: "401k"
    balance: 100000
  - name: Old brokerage
    type: brokerage
    balance: 5000
    status: closed
scenario:
  id: base
  name: Base case
  investmentReturnRate: 7
  inflationRate: 2.5
  retirementAge: 65
  socialSecurityAge: 67
  socialSecurityIncome: 30000
  buckets:
    - order: 0
      startAge: 30
      endAge: 100
      assumptions:
        annualIncome: 100000
        annualSpending: 60000
  lumpSumEvents:
    - type: expense
      age: 50
      amount: 20000
      description: Kitchen
  mortgages:
    - name: Home
      startDate: "2024-01-01"
      loanAmount: 300000
      termYears: 30
      interestRate: 6
      monthlyEscrow: 400
window:
  startYear: 2024
  endYear: 2026
"#;

/// Write `contents` to `plan.yaml` in a fresh temp dir
pub(crate) fn write_plan(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plan.yaml");
    std::fs::write(&path, contents).unwrap();
    (dir, path)
}
