mod accounts;
mod mortgage;
mod results;
mod rmd;
mod scenario;

pub use accounts::{AccountSnapshot, AccountStatus, AccountType, ByAccountType};
pub use mortgage::{AnnualMortgagePayment, MonthlyPayment, Mortgage, MortgageSummary};
pub use results::{
    AnnualProjection, IncomeBreakdown, MortgageBreakdown, NoApplicableBucket, ProjectionSummary,
    ScenarioProjection, SpendingBreakdown,
};
pub use rmd::{RmdTable, RmdTableEntry};
pub use scenario::{
    AssumptionBucket, Assumptions, LumpSumEvent, LumpSumKind, Scenario, UserProfile,
};
