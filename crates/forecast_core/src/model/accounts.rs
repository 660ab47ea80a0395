//! Account types and per-type balance records
//!
//! The engine tracks exactly one running balance per account type. Individual
//! accounts only matter at the boundary, where active snapshots are summed
//! into their type's bucket.

use std::fmt;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// Kind of account a balance is held in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AccountType {
    /// Employer plan, tax-deferred
    #[serde(rename = "401k")]
    Plan401k,
    #[serde(rename = "traditional-ira")]
    TraditionalIra,
    /// Tax-free growth, exempt from mandatory withdrawals
    #[serde(rename = "roth-ira")]
    RothIra,
    #[serde(rename = "brokerage")]
    Brokerage,
    #[serde(rename = "savings")]
    Savings,
    #[serde(rename = "checking")]
    Checking,
}

impl AccountType {
    pub const ALL: [AccountType; 6] = [
        AccountType::Plan401k,
        AccountType::TraditionalIra,
        AccountType::RothIra,
        AccountType::Brokerage,
        AccountType::Savings,
        AccountType::Checking,
    ];

    /// Wire name, as used in plan files and reports
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            AccountType::Plan401k => "401k",
            AccountType::TraditionalIra => "traditional-ira",
            AccountType::RothIra => "roth-ira",
            AccountType::Brokerage => "brokerage",
            AccountType::Savings => "savings",
            AccountType::Checking => "checking",
        }
    }

    /// Investment-bearing accounts earn the scenario's return rate
    #[must_use]
    pub fn is_investment(self) -> bool {
        matches!(
            self,
            AccountType::Plan401k
                | AccountType::TraditionalIra
                | AccountType::RothIra
                | AccountType::Brokerage
        )
    }

    #[must_use]
    pub fn is_cash(self) -> bool {
        !self.is_investment()
    }

    /// Tax-deferred accounts that are drawn down once the subject reaches RMD age
    #[must_use]
    pub fn requires_mandatory_withdrawal(self) -> bool {
        matches!(self, AccountType::Plan401k | AccountType::TraditionalIra)
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an account still participates in projections
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    #[default]
    Active,
    Closed,
}

/// Current balance of one real account, supplied by the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub balance: f64,
    #[serde(default)]
    pub status: AccountStatus,
}

impl AccountSnapshot {
    pub fn active(account_type: AccountType, balance: f64) -> Self {
        Self {
            name: account_type.as_str().to_string(),
            account_type,
            balance,
            status: AccountStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == AccountStatus::Active
    }
}

/// One value per account type.
///
/// Used for running balances, contributions, growth and withdrawals. Field
/// names serialize to the account type's wire name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ByAccountType<T> {
    #[serde(rename = "401k", default)]
    pub plan_401k: T,
    #[serde(rename = "traditional-ira", default)]
    pub traditional_ira: T,
    #[serde(rename = "roth-ira", default)]
    pub roth_ira: T,
    #[serde(default)]
    pub brokerage: T,
    #[serde(default)]
    pub savings: T,
    #[serde(default)]
    pub checking: T,
}

impl<T> ByAccountType<T> {
    pub fn from_fn(mut f: impl FnMut(AccountType) -> T) -> Self {
        Self {
            plan_401k: f(AccountType::Plan401k),
            traditional_ira: f(AccountType::TraditionalIra),
            roth_ira: f(AccountType::RothIra),
            brokerage: f(AccountType::Brokerage),
            savings: f(AccountType::Savings),
            checking: f(AccountType::Checking),
        }
    }

    pub fn get(&self, account_type: AccountType) -> &T {
        match account_type {
            AccountType::Plan401k => &self.plan_401k,
            AccountType::TraditionalIra => &self.traditional_ira,
            AccountType::RothIra => &self.roth_ira,
            AccountType::Brokerage => &self.brokerage,
            AccountType::Savings => &self.savings,
            AccountType::Checking => &self.checking,
        }
    }

    pub fn get_mut(&mut self, account_type: AccountType) -> &mut T {
        match account_type {
            AccountType::Plan401k => &mut self.plan_401k,
            AccountType::TraditionalIra => &mut self.traditional_ira,
            AccountType::RothIra => &mut self.roth_ira,
            AccountType::Brokerage => &mut self.brokerage,
            AccountType::Savings => &mut self.savings,
            AccountType::Checking => &mut self.checking,
        }
    }

    /// Iterate in canonical account-type order
    pub fn iter(&self) -> impl Iterator<Item = (AccountType, &T)> {
        AccountType::ALL.into_iter().map(move |t| (t, self.get(t)))
    }
}

impl ByAccountType<f64> {
    pub fn total(&self) -> f64 {
        self.iter().map(|(_, v)| *v).sum()
    }
}

impl<T> Index<AccountType> for ByAccountType<T> {
    type Output = T;

    fn index(&self, account_type: AccountType) -> &T {
        self.get(account_type)
    }
}

impl<T> IndexMut<AccountType> for ByAccountType<T> {
    fn index_mut(&mut self, account_type: AccountType) -> &mut T {
        self.get_mut(account_type)
    }
}
