//! Balance projection inputs and outputs
//!
//! A projection starts from the summed account balances and walks forward
//! day by day, applying scheduled transactions, spending planned by NEED
//! goals, and what-if simulations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use super::month::MonthKey;

/// An account and its current balance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    pub name: String,
    pub balance: Money,
}

/// The next occurrence of a scheduled transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledTransaction {
    pub date: NaiveDate,
    pub amount: Money,
    /// Category name; NEED goals of the same name count it as already planned
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// A hypothetical balance change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Simulation {
    pub date: NaiveDate,
    pub amount: Money,
    #[serde(default = "default_simulation_reason")]
    pub reason: String,
    #[serde(default = "default_simulation_category")]
    pub category: String,
}

fn default_simulation_reason() -> String {
    "Simulation".into()
}

fn default_simulation_category() -> String {
    "Miscellaneous".into()
}

impl Simulation {
    pub fn new(date: NaiveDate, amount: Money) -> Self {
        Self {
            date,
            amount,
            reason: default_simulation_reason(),
            category: default_simulation_category(),
        }
    }
}

/// Goal kinds; only NEED goals plan spending
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    #[serde(alias = "NEED")]
    Need,
    #[serde(other)]
    Other,
}

/// How often a recurring goal comes due
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cadence {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

impl Cadence {
    /// Length of one period in months
    pub fn months(&self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::Quarterly => 3,
            Self::Yearly => 12,
        }
    }
}

impl fmt::Display for Cadence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "Monthly"),
            Self::Quarterly => write!(f, "Quarterly"),
            Self::Yearly => write!(f, "Yearly"),
        }
    }
}

/// A category's funding goal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTarget {
    pub goal_type: GoalType,

    /// Amount due per period
    #[serde(default)]
    pub amount: Money,

    /// Still to fund for the goal as a whole
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_left: Option<Money>,

    /// Month the goal first comes due
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_month: Option<MonthKey>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<Cadence>,

    /// Periods between due months (2 with a quarterly cadence is every 6 months)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence_frequency: Option<u32>,

    /// Day of month the spending lands on; the last day when absent or invalid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
}

impl CategoryTarget {
    /// A NEED goal of `amount` per month with no target month
    pub fn need(amount: Money) -> Self {
        Self {
            goal_type: GoalType::Need,
            amount,
            overall_left: None,
            target_month: None,
            cadence: None,
            cadence_frequency: None,
            day: None,
        }
    }

    /// Months between recurring due dates, when the goal recurs
    pub fn cadence_interval(&self) -> Option<u32> {
        self.cadence_frequency
            .filter(|frequency| *frequency > 0)
            .map(|frequency| self.cadence.unwrap_or_default().months() * frequency)
    }
}

/// A category as the projection sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectedCategory {
    pub name: String,

    /// Available balance this month
    #[serde(default)]
    pub balance: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<CategoryTarget>,
}

/// Everything a balance projection reads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionInput {
    #[serde(default)]
    pub accounts: Vec<AccountBalance>,
    #[serde(default)]
    pub scheduled: Vec<ScheduledTransaction>,
    #[serde(default)]
    pub categories: Vec<ProjectedCategory>,
    #[serde(default)]
    pub simulations: Vec<Simulation>,
}

impl ProjectionInput {
    /// Sum of all account balances
    pub fn initial_balance(&self) -> Money {
        self.accounts.iter().map(|a| a.balance).sum()
    }
}

/// Where a balance change came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    InitialBalance,
    Scheduled,
    PlannedSpending,
    Simulation,
}

/// One reason the balance moves on a day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceChange {
    pub kind: ChangeKind,
    pub reason: String,
    /// Signed change (negative means spending)
    pub amount: Money,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl BalanceChange {
    pub fn new(
        kind: ChangeKind,
        reason: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            reason: reason.into(),
            amount,
            category: category.into(),
            account: None,
            payee: None,
            memo: None,
        }
    }

    pub fn is_simulation(&self) -> bool {
        self.kind == ChangeKind::Simulation
    }
}

impl From<&ScheduledTransaction> for BalanceChange {
    fn from(txn: &ScheduledTransaction) -> Self {
        Self {
            kind: ChangeKind::Scheduled,
            reason: "Scheduled Transaction".into(),
            amount: txn.amount,
            category: txn.category.clone(),
            account: txn.account.clone(),
            payee: txn.payee.clone(),
            memo: txn.memo.clone(),
        }
    }
}

impl From<&Simulation> for BalanceChange {
    fn from(sim: &Simulation) -> Self {
        Self::new(ChangeKind::Simulation, sim.reason.clone(), sim.amount, sim.category.clone())
    }
}

/// A projected day with at least one change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBalance {
    pub date: NaiveDate,
    pub changes: Vec<BalanceChange>,
    /// Sum of the day's changes
    pub balance_diff: Money,
    /// Running balance at the end of the day
    pub balance: Money,
}
