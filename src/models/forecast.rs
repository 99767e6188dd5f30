//! Forecast outputs
//!
//! Per-day rates are fractional, so every forecast figure is an `f64` in
//! minor units. Use [`Money::from_minor_f64`] to display one.

use serde::{Deserialize, Serialize};

use super::money::Money;

/// Forward-looking figures for one month
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyForecast {
    /// Budget left at month end if spending continues at the observed pace
    pub predicted_remaining_amount: f64,

    /// What can still be spent per remaining day without exceeding the budget
    pub predicted_remaining_per_day: f64,

    /// Signed activity per elapsed day so far
    pub actual_remaining_per_day: f64,

    /// Budget top-up needed if the current pace continues to month end
    pub extra_amount_needed: f64,
}

impl MonthlyForecast {
    /// All-zero forecast for degenerate calendars
    pub fn neutral() -> Self {
        Self::default()
    }

    pub fn predicted_remaining_amount_money(&self) -> Money {
        Money::from_minor_f64(self.predicted_remaining_amount)
    }

    pub fn predicted_remaining_per_day_money(&self) -> Money {
        Money::from_minor_f64(self.predicted_remaining_per_day)
    }

    pub fn actual_remaining_per_day_money(&self) -> Money {
        Money::from_minor_f64(self.actual_remaining_per_day)
    }

    pub fn extra_amount_needed_money(&self) -> Money {
        Money::from_minor_f64(self.extra_amount_needed)
    }

    /// Whether the current pace runs past the budget
    pub fn is_over_pace(&self) -> bool {
        self.extra_amount_needed > 0.0
    }
}

/// How far through the month and the budget we are, as percentages
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthProgress {
    /// Share of the month elapsed (0-100)
    pub month_percentage: f64,

    /// Share of the budget spent; may exceed 100 when overspent
    pub budget_percentage: f64,
}

impl MonthProgress {
    /// Spending is ahead of the calendar
    pub fn is_ahead_of_month(&self) -> bool {
        self.budget_percentage > self.month_percentage
    }
}
