//! Month forecasting
//!
//! Projects where a month's budget ends up from its totals and calendar
//! position. Amounts follow the crate's sign convention: activity is
//! negative for spending and the remaining budget is `budgeted + activity`.

use tracing::trace;

use crate::models::{CategoryBudget, MonthCalendar, MonthProgress, MonthTotal, MonthlyForecast};

/// Pure forecast calculations
pub struct ForecastEngine;

impl ForecastEngine {
    /// Forecast one month from its totals
    ///
    /// `day_of_month` is clamped to the month length. A month that is not
    /// the current one has no remaining days. A calendar with no days
    /// yields [`MonthlyForecast::neutral`].
    pub fn forecast(total: &MonthTotal, calendar: &MonthCalendar) -> MonthlyForecast {
        if calendar.days_in_month == 0 {
            return MonthlyForecast::neutral();
        }

        let days_in_month = calendar.days_in_month;
        let day_of_month = calendar.day_of_month.min(days_in_month);
        let remaining_days = if calendar.is_current_month {
            days_in_month - day_of_month
        } else {
            0
        };

        let budgeted = total.total_budgeted.as_f64();
        let activity = total.total_activity.as_f64();
        let remaining_budget = total.remaining_budget().as_f64();

        let actual_remaining_per_day = if day_of_month > 0 {
            activity / f64::from(day_of_month)
        } else {
            0.0
        };

        let predicted_remaining_per_day = if remaining_days > 0 {
            remaining_budget / f64::from(remaining_days)
        } else {
            0.0
        };

        let predicted_remaining_amount =
            remaining_budget + actual_remaining_per_day * f64::from(remaining_days);

        let projected_month_spend = -(actual_remaining_per_day * f64::from(days_in_month));
        let extra_amount_needed = (projected_month_spend - budgeted).max(0.0);

        trace!(
            day_of_month,
            remaining_days,
            actual_remaining_per_day,
            predicted_remaining_per_day,
            "computed forecast"
        );

        MonthlyForecast {
            predicted_remaining_amount,
            predicted_remaining_per_day,
            actual_remaining_per_day,
            extra_amount_needed,
        }
    }

    /// Share of the month elapsed and of the budget spent
    pub fn progress(total: &MonthTotal, calendar: &MonthCalendar) -> MonthProgress {
        let month_percentage = if calendar.days_in_month > 0 {
            let day = calendar.day_of_month.min(calendar.days_in_month);
            f64::from(day) / f64::from(calendar.days_in_month) * 100.0
        } else {
            0.0
        };

        let budgeted = total.total_budgeted.as_f64();
        let budget_percentage = if budgeted > 0.0 {
            -total.total_activity.as_f64() / budgeted * 100.0
        } else {
            0.0
        };

        MonthProgress {
            month_percentage,
            budget_percentage,
        }
    }

    /// Forecast a single category
    ///
    /// The category's balance is its remaining budget.
    pub fn forecast_category(category: &CategoryBudget, calendar: &MonthCalendar) -> MonthlyForecast {
        let total = MonthTotal {
            total_activity: category.activity,
            total_balance: category.balance,
            total_budgeted: category.budgeted,
        };
        Self::forecast(&total, calendar)
    }
}
