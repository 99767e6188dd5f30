//! Daily balance projection
//!
//! Walks forward from today: the summed account balance lands on today,
//! then scheduled transactions, spending planned by NEED goals and
//! simulations land on their days. Only days with changes are kept.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use tracing::{debug, info};

use crate::models::{
    BalanceChange, Cadence, CategoryTarget, ChangeKind, DayBalance, GoalType, Money, MonthKey,
    ProjectedCategory, ProjectionInput, ScheduledTransaction, Simulation,
};

/// Projects the running balance over a window of days starting today
#[derive(Debug, Clone, Copy)]
pub struct BalanceProjector {
    today: NaiveDate,
    days_ahead: u32,
}

impl BalanceProjector {
    pub fn new(today: NaiveDate, days_ahead: u32) -> Self {
        Self { today, days_ahead }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn days_ahead(&self) -> u32 {
        self.days_ahead
    }

    /// Last day of the window, inclusive
    pub fn end(&self) -> NaiveDate {
        self.today
            .checked_add_days(Days::new(u64::from(self.days_ahead)))
            .unwrap_or(NaiveDate::MAX)
    }

    fn in_window(&self, date: NaiveDate) -> bool {
        date >= self.today && date <= self.end()
    }

    /// Project every source in `input`
    pub fn project_input(&self, input: &ProjectionInput) -> BTreeMap<NaiveDate, DayBalance> {
        self.project(
            input.initial_balance(),
            &input.scheduled,
            &input.categories,
            &input.simulations,
        )
    }

    /// Project balances, ordered by date
    ///
    /// Today always carries the initial balance. Entries dated outside the
    /// window are ignored.
    pub fn project(
        &self,
        initial: Money,
        scheduled: &[ScheduledTransaction],
        categories: &[ProjectedCategory],
        simulations: &[Simulation],
    ) -> BTreeMap<NaiveDate, DayBalance> {
        let mut changes: BTreeMap<NaiveDate, Vec<BalanceChange>> = BTreeMap::new();
        changes.entry(self.today).or_default().push(BalanceChange::new(
            ChangeKind::InitialBalance,
            "Initial Balance",
            initial,
            "Starting Balance",
        ));

        for txn in scheduled.iter().filter(|t| self.in_window(t.date)) {
            changes.entry(txn.date).or_default().push(txn.into());
        }

        for category in categories {
            if let Some(target) = category
                .target
                .as_ref()
                .filter(|t| t.goal_type == GoalType::Need)
            {
                self.plan_need_spending(&mut changes, category, target);
            }
        }

        for sim in simulations {
            if self.in_window(sim.date) {
                changes.entry(sim.date).or_default().push(sim.into());
            } else {
                debug!(date = %sim.date, reason = %sim.reason, "simulation outside projection window");
            }
        }

        let mut running = Money::zero();
        let days: BTreeMap<NaiveDate, DayBalance> = changes
            .into_iter()
            .map(|(date, changes)| {
                let balance_diff: Money = changes.iter().map(|c| c.amount).sum();
                running += balance_diff;
                let day = DayBalance {
                    date,
                    changes,
                    balance_diff,
                    balance: running,
                };
                (date, day)
            })
            .collect();

        info!(
            today = %self.today,
            days_ahead = self.days_ahead,
            days_with_changes = days.len(),
            "projected balances"
        );
        days
    }

    /// Add the spending a NEED goal plans for each month the window reaches
    ///
    /// The current month spends the category's positive balance. Later
    /// months spend what the goal asks for, less what scheduled transactions
    /// of the same category already cover in that month.
    fn plan_need_spending(
        &self,
        changes: &mut BTreeMap<NaiveDate, Vec<BalanceChange>>,
        category: &ProjectedCategory,
        target: &CategoryTarget,
    ) {
        let current = MonthKey::from_date(self.today);
        let overall_left = target.overall_left.unwrap_or_default();
        let interval = target.cadence_interval();

        for offset in 0..=(self.days_ahead / 30) {
            let Some(month) = current.add_months(offset) else {
                break;
            };
            let date = month.day_or_last(target.day);
            let covered = scheduled_in_month(changes, month, &category.name);
            let remaining = |amount: Money| (amount - covered).max(Money::zero());

            let planned = if target.cadence == Some(Cadence::Yearly) {
                match target.target_month {
                    Some(due) if month >= due && month.month() == due.month() => {
                        let amount = if overall_left.is_positive() {
                            overall_left
                        } else {
                            target.amount
                        };
                        Some((remaining(amount), "Yearly Payment".to_string()))
                    }
                    _ => None,
                }
            } else if month == current {
                category
                    .balance
                    .is_positive()
                    .then(|| (category.balance, "Current Month Balance".to_string()))
            } else {
                match target.target_month {
                    Some(due) if month == due => overall_left.is_positive().then(|| {
                        (
                            remaining(overall_left),
                            "Remaining Spending (Goal Target)".to_string(),
                        )
                    }),
                    Some(due) if month > due => interval
                        .filter(|i| month.months_since(due) % i64::from(*i) == 0)
                        .map(|_| {
                            (
                                remaining(target.amount),
                                format!(
                                    "Recurring Spending ({} every {})",
                                    target.cadence.unwrap_or_default(),
                                    target.cadence_frequency.unwrap_or(1)
                                ),
                            )
                        }),
                    Some(_) => None,
                    None => Some((remaining(target.amount), "Future Month Target".to_string())),
                }
            };

            if let Some((amount, reason)) = planned {
                if amount.is_positive() && self.in_window(date) {
                    changes.entry(date).or_default().push(BalanceChange::new(
                        ChangeKind::PlannedSpending,
                        reason,
                        -amount,
                        category.name.clone(),
                    ));
                }
            }
        }
    }
}

/// Magnitude of the scheduled transactions of `category` within `month`
fn scheduled_in_month(
    changes: &BTreeMap<NaiveDate, Vec<BalanceChange>>,
    month: MonthKey,
    category: &str,
) -> Money {
    changes
        .range(month.first_day()..=month.last_day())
        .flat_map(|(_, day)| day.iter())
        .filter(|c| c.kind == ChangeKind::Scheduled && c.category == category)
        .map(|c| c.amount.abs())
        .sum()
}
