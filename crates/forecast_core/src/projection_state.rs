use rustc_hash::FxHashMap;

use crate::amortization::active_annual_payments;
use crate::date_math::age_on;
use crate::model::{
    AccountSnapshot, ByAccountType, LumpSumEvent, LumpSumKind, Mortgage, MortgageBreakdown,
    RmdTable, Scenario, UserProfile,
};

/// Employment income grows at this fixed rate, independent of inflation
pub const INCOME_GROWTH_RATE: f64 = 0.02;

/// Working state of a single projection run.
///
/// Owned by one call and dropped when it returns; nothing here is shared
/// between runs.
#[derive(Debug, Clone)]
pub struct ProjectionState {
    pub timeline: ProjectionTimeline,
    pub balances: ByAccountType<f64>,
    pub multipliers: Multipliers,
    pub cash_flows: ScheduledCashFlows,
    pub rmd_table: RmdTable,
}

#[derive(Debug, Clone, Copy)]
pub struct ProjectionTimeline {
    /// Whole years old on the as-of date
    pub current_age: i32,
    /// Calendar year of the as-of date
    pub current_year: i16,
}

impl ProjectionTimeline {
    pub fn age_in(&self, year: i16) -> i32 {
        self.current_age + (i32::from(year) - i32::from(self.current_year))
    }
}

/// Cumulative compounding factors applied to today's-dollar figures
#[derive(Debug, Clone, Copy)]
pub struct Multipliers {
    pub inflation: f64,
    pub income: f64,
}

impl Default for Multipliers {
    fn default() -> Self {
        Self {
            inflation: 1.0,
            income: 1.0,
        }
    }
}

impl Multipliers {
    /// Fold one year of inflation (percent) and income growth in
    pub fn compound(&mut self, inflation_rate: f64) {
        self.inflation *= 1.0 + inflation_rate / 100.0;
        self.income *= 1.0 + INCOME_GROWTH_RATE;
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LumpSumTotals {
    pub income: f64,
    pub expense: f64,
}

/// Cash flows that are fixed up front: lump sums by age, mortgages by year
#[derive(Debug, Clone, Default)]
pub struct ScheduledCashFlows {
    lump_sums: FxHashMap<u8, LumpSumTotals>,
    mortgages: FxHashMap<i16, MortgageBreakdown>,
}

impl ScheduledCashFlows {
    pub fn new(events: &[LumpSumEvent], mortgages: &[Mortgage]) -> Self {
        let mut lump_sums: FxHashMap<u8, LumpSumTotals> = FxHashMap::default();
        for event in events {
            let totals = lump_sums.entry(event.age).or_default();
            match event.kind {
                LumpSumKind::Income => totals.income += event.amount,
                LumpSumKind::Expense => totals.expense += event.amount,
            }
        }

        let mut by_year: FxHashMap<i16, MortgageBreakdown> = FxHashMap::default();
        for mortgage in mortgages {
            for payment in active_annual_payments(mortgage) {
                let year = by_year.entry(payment.year).or_default();
                year.principal += payment.principal;
                year.interest += payment.interest;
                year.escrow += payment.escrow;
                year.additional_principal += payment.additional_principal;
                year.total += payment.total_payment;
            }
        }

        Self {
            lump_sums,
            mortgages: by_year,
        }
    }

    pub fn lump_sums_at(&self, age: u8) -> LumpSumTotals {
        self.lump_sums.get(&age).copied().unwrap_or_default()
    }

    pub fn mortgage_in(&self, year: i16) -> MortgageBreakdown {
        self.mortgages.get(&year).copied().unwrap_or_default()
    }
}

/// Sum active snapshot balances per account type; closed accounts are ignored
pub fn seed_balances(accounts: &[AccountSnapshot]) -> ByAccountType<f64> {
    let mut balances = ByAccountType::<f64>::default();
    for account in accounts.iter().filter(|a| a.is_active()) {
        balances[account.account_type] += account.balance;
    }
    balances
}

impl ProjectionState {
    pub fn new(
        scenario: &Scenario,
        profile: &UserProfile,
        accounts: &[AccountSnapshot],
        as_of: jiff::civil::Date,
    ) -> Self {
        Self {
            timeline: ProjectionTimeline {
                current_age: age_on(profile.date_of_birth, as_of),
                current_year: as_of.year(),
            },
            balances: seed_balances(accounts),
            multipliers: Multipliers::default(),
            cash_flows: ScheduledCashFlows::new(&scenario.lump_sum_events, &scenario.mortgages),
            rmd_table: RmdTable::abbreviated_uniform_lifetime(),
        }
    }
}
