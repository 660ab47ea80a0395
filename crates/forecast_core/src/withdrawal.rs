//! Cash-shortfall waterfall and mandatory withdrawals
//!
//! A yearly deficit is covered by draining account types in a fixed priority
//! order, each tier fully before the next. Whatever no tier can cover is
//! pushed into checking as an overdraft.

use crate::model::{AccountType, ByAccountType, RmdTable};

/// Order in which account types are drained to cover a shortfall
pub const WITHDRAWAL_ORDER: [AccountType; 6] = [
    AccountType::Checking,
    AccountType::Savings,
    AccountType::Brokerage,
    AccountType::TraditionalIra,
    AccountType::Plan401k,
    AccountType::RothIra,
];

/// Outcome of covering one year's deficit
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShortfallResolution {
    pub withdrawals: ByAccountType<f64>,
    /// Amount left uncovered and charged to checking
    pub unfunded: f64,
}

impl ShortfallResolution {
    pub fn total_withdrawn(&self) -> f64 {
        self.withdrawals.total()
    }
}

/// Draw up to `amount` from one account without taking it below zero.
///
/// Returns the amount actually drawn.
pub fn withdraw_up_to(balances: &mut ByAccountType<f64>, account: AccountType, amount: f64) -> f64 {
    let available = balances[account].max(0.0);
    let drawn = amount.max(0.0).min(available);
    balances[account] -= drawn;
    drawn
}

/// Cover `deficit` using [`WITHDRAWAL_ORDER`]
pub fn cover_shortfall(balances: &mut ByAccountType<f64>, deficit: f64) -> ShortfallResolution {
    cover_shortfall_in_order(balances, deficit, &WITHDRAWAL_ORDER)
}

/// Cover `deficit` draining accounts in `order`; any remainder overdraws checking
pub fn cover_shortfall_in_order(
    balances: &mut ByAccountType<f64>,
    deficit: f64,
    order: &[AccountType],
) -> ShortfallResolution {
    let mut resolution = ShortfallResolution::default();
    let mut remaining = deficit.max(0.0);

    for &account in order {
        if remaining <= 0.0 {
            break;
        }
        let drawn = withdraw_up_to(balances, account, remaining);
        resolution.withdrawals[account] += drawn;
        remaining -= drawn;
    }

    if remaining > 0.0 {
        balances.checking -= remaining;
        resolution.unfunded = remaining;
    }

    resolution
}

/// A mandatory withdrawal split across the tax-deferred accounts
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MandatoryWithdrawal {
    pub divisor: f64,
    pub traditional_ira: f64,
    pub plan_401k: f64,
    pub total: f64,
}

/// Take this year's mandatory withdrawal from traditional IRA and 401k.
///
/// Sized as combined balance / divisor and split by each account's share of
/// the combined balance. Roth balances are never touched. Returns `None` below
/// the starting age or when there is nothing to withdraw.
pub fn apply_mandatory_withdrawal(
    balances: &mut ByAccountType<f64>,
    age: u8,
    table: &RmdTable,
) -> Option<MandatoryWithdrawal> {
    if age < RmdTable::STARTING_AGE {
        return None;
    }

    let ira = balances.traditional_ira.max(0.0);
    let plan = balances.plan_401k.max(0.0);
    let combined = ira + plan;
    if combined <= 0.0 {
        return None;
    }

    let divisor = table.divisor_for_age(age);
    let total = combined / divisor;
    let from_ira = total * (ira / combined);
    let from_plan = total * (plan / combined);

    balances.traditional_ira -= from_ira;
    balances.plan_401k -= from_plan;

    Some(MandatoryWithdrawal {
        divisor,
        traditional_ira: from_ira,
        plan_401k: from_plan,
        total,
    })
}
