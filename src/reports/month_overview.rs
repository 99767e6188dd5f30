//! Month Overview Report
//!
//! Everything known about one month: budget totals, progress through the
//! month and the budget, the forecast, per-category usage with category
//! forecasts, and the daily spending series.

use serde::Serialize;
use std::io::Write;
use tabled::{settings::Style, Table, Tabled};

use crate::display::{double_separator, format_bar, format_money, format_percentage, format_rate, separator, truncate};
use crate::error::{ForecastError, ForecastResult};
use crate::models::{
    CategoryBudget, CategoryKey, Money, MonthCalendar, MonthKey, MonthProgress, MonthSummaries,
    MonthTotal, MonthlyForecast, MonthlySpendingDatum, SeriesDensity,
};
use crate::services::{DailySpendingProjector, ForecastEngine};

const BAR_WIDTH: usize = 30;

/// Category column value of the month-level CSV row
pub const TOTAL_ROW_KEY: &str = "__total__";

/// One category's line in the overview
#[derive(Debug, Clone, Serialize)]
pub struct CategoryOverviewRow {
    pub category: CategoryKey,
    pub name: String,
    pub activity: Money,
    pub transaction_count: usize,
    /// Budget figures, when the budget source knows the category
    pub budgeted: Option<Money>,
    pub balance: Option<Money>,
    pub forecast: Option<MonthlyForecast>,
}

/// Month Overview Report
#[derive(Debug, Clone, Serialize)]
pub struct MonthOverviewReport {
    pub month: MonthKey,
    pub calendar: MonthCalendar,
    pub totals: MonthTotal,
    pub progress: MonthProgress,
    pub forecast: MonthlyForecast,
    pub transaction_count: usize,
    pub categories: Vec<CategoryOverviewRow>,
    pub daily_spending: Vec<MonthlySpendingDatum>,
}

#[derive(Tabled)]
struct CategoryTableRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Txns")]
    transactions: usize,
    #[tabled(rename = "Activity")]
    activity: String,
    #[tabled(rename = "Budgeted")]
    budgeted: String,
    #[tabled(rename = "Balance")]
    balance: String,
    #[tabled(rename = "Left/day")]
    per_day: String,
}

#[derive(Serialize)]
struct CategoryCsvRow<'a> {
    month: MonthKey,
    category: &'a str,
    name: &'a str,
    activity: Money,
    transaction_count: usize,
    budgeted: Option<Money>,
    balance: Option<Money>,
    month_percentage: Option<f64>,
    budget_percentage: Option<f64>,
    predicted_remaining_amount: Option<f64>,
    predicted_remaining_per_day: Option<f64>,
    actual_remaining_per_day: Option<f64>,
    extra_amount_needed: Option<f64>,
}

impl MonthOverviewReport {
    /// Build the overview of `month`
    ///
    /// `totals` come from the budget source; `categories` may be empty when
    /// only month totals are known. A month without transactions still gets
    /// a forecast from its totals.
    pub fn generate(
        month: MonthKey,
        summaries: &MonthSummaries,
        totals: MonthTotal,
        categories: &[CategoryBudget],
        calendar: MonthCalendar,
        density: SeriesDensity,
    ) -> Self {
        let summary = summaries.get(&month);

        let mut rows: Vec<CategoryOverviewRow> = summary
            .map(|s| s.category_usages.as_slice())
            .unwrap_or_default()
            .iter()
            .map(|usage| {
                let budget = usage
                    .category
                    .category_id()
                    .and_then(|id| categories.iter().find(|c| &c.category_id == id));
                CategoryOverviewRow {
                    category: usage.category.clone(),
                    name: budget
                        .map(|b| b.display_name().to_string())
                        .unwrap_or_else(|| usage.category.to_string()),
                    activity: usage.total_activity,
                    transaction_count: usage.transaction_count,
                    budgeted: budget.map(|b| b.budgeted),
                    balance: budget.map(|b| b.balance),
                    forecast: budget.map(|b| ForecastEngine::forecast_category(b, &calendar)),
                }
            })
            .collect();

        // budgeted categories with no transactions this month
        for budget in categories {
            let key = CategoryKey::Category(budget.category_id.clone());
            if rows.iter().all(|row| row.category != key) {
                rows.push(CategoryOverviewRow {
                    category: key,
                    name: budget.display_name().to_string(),
                    activity: budget.activity,
                    transaction_count: 0,
                    budgeted: Some(budget.budgeted),
                    balance: Some(budget.balance),
                    forecast: Some(ForecastEngine::forecast_category(budget, &calendar)),
                });
            }
        }

        let daily_spending = summary
            .map(|s| DailySpendingProjector::new(density).project(&s.overall_transactions))
            .unwrap_or_default();

        Self {
            month,
            calendar,
            totals,
            progress: ForecastEngine::progress(&totals, &calendar),
            forecast: ForecastEngine::forecast(&totals, &calendar),
            transaction_count: summary.map(|s| s.transaction_count()).unwrap_or(0),
            categories: rows,
            daily_spending,
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();
        let money = |amount: Money| format_money(amount, symbol);
        let rate = |value: f64| format_rate(value, symbol);

        // Header
        output.push_str(&format!("Month Overview: {}\n", self.month));
        output.push_str(&double_separator(72));
        output.push('\n');
        output.push_str(&format!(
            "Day {} of {}{}\n\n",
            self.calendar.day_of_month.min(self.calendar.days_in_month),
            self.calendar.days_in_month,
            if self.calendar.is_current_month { "" } else { " (closed)" }
        ));

        output.push_str(&format!("{:<28} {:>16}\n", "Budgeted:", money(self.totals.total_budgeted)));
        output.push_str(&format!("{:<28} {:>16}\n", "Activity:", money(self.totals.total_activity)));
        output.push_str(&format!("{:<28} {:>16}\n", "Remaining:", money(self.totals.remaining_budget())));
        output.push_str(&format!("{:<28} {:>16}\n\n", "Transactions:", self.transaction_count));

        output.push_str(&format!(
            "{:<28} {:>16}\n",
            "Month elapsed:",
            format_percentage(self.progress.month_percentage)
        ));
        output.push_str(&format!(
            "{:<28} {:>16}\n\n",
            "Budget spent:",
            format_percentage(self.progress.budget_percentage)
        ));

        // Forecast
        output.push_str("Forecast\n");
        output.push_str(&separator(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<28} {:>16}\n",
            "Spending per day so far:",
            rate(self.forecast.actual_remaining_per_day)
        ));
        output.push_str(&format!(
            "{:<28} {:>16}\n",
            "Available per day left:",
            rate(self.forecast.predicted_remaining_per_day)
        ));
        output.push_str(&format!(
            "{:<28} {:>16}\n",
            "Left at month end:",
            rate(self.forecast.predicted_remaining_amount)
        ));
        if self.forecast.is_over_pace() {
            output.push_str(&format!(
                "{:<28} {:>16}\n",
                "Extra budget needed:",
                rate(self.forecast.extra_amount_needed)
            ));
        }

        // Categories
        if !self.categories.is_empty() {
            output.push_str("\nCategories\n");
            let rows = self.categories.iter().map(|row| CategoryTableRow {
                name: truncate(&row.name, 28),
                transactions: row.transaction_count,
                activity: money(row.activity),
                budgeted: row.budgeted.map(money).unwrap_or_default(),
                balance: row.balance.map(money).unwrap_or_default(),
                per_day: row
                    .forecast
                    .map(|f| rate(f.predicted_remaining_per_day))
                    .unwrap_or_default(),
            });
            output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
            output.push('\n');
        }

        // Daily spending chart
        if !self.daily_spending.is_empty() {
            output.push_str("\nDaily spending\n");
            output.push_str(&separator(72));
            output.push('\n');

            let max_spent = self
                .daily_spending
                .iter()
                .map(|d| (-d.spent).as_f64())
                .fold(0.0, f64::max);

            for datum in &self.daily_spending {
                output.push_str(&format!(
                    "{:>2} {} {:>14}\n",
                    datum.day_of_month,
                    format_bar((-datum.spent).as_f64(), max_spent, BAR_WIDTH),
                    money(datum.spent)
                ));
            }
        }

        output
    }

    /// Export as CSV, amounts in minor units
    ///
    /// The first row is the month itself (category `__total__`) with the
    /// totals, progress and forecast; the category rows follow.
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> ForecastResult<()> {
        let mut csv_writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);

        let total = CategoryCsvRow {
            month: self.month,
            category: TOTAL_ROW_KEY,
            name: "Total",
            activity: self.totals.total_activity,
            transaction_count: self.transaction_count,
            budgeted: Some(self.totals.total_budgeted),
            balance: Some(self.totals.total_balance),
            month_percentage: Some(self.progress.month_percentage),
            budget_percentage: Some(self.progress.budget_percentage),
            predicted_remaining_amount: Some(self.forecast.predicted_remaining_amount),
            predicted_remaining_per_day: Some(self.forecast.predicted_remaining_per_day),
            actual_remaining_per_day: Some(self.forecast.actual_remaining_per_day),
            extra_amount_needed: Some(self.forecast.extra_amount_needed),
        };

        let categories = self.categories.iter().map(|row| CategoryCsvRow {
            month: self.month,
            category: row.category.as_str(),
            name: &row.name,
            activity: row.activity,
            transaction_count: row.transaction_count,
            budgeted: row.budgeted,
            balance: row.balance,
            month_percentage: None,
            budget_percentage: None,
            predicted_remaining_amount: row.forecast.map(|f| f.predicted_remaining_amount),
            predicted_remaining_per_day: row.forecast.map(|f| f.predicted_remaining_per_day),
            actual_remaining_per_day: row.forecast.map(|f| f.actual_remaining_per_day),
            extra_amount_needed: row.forecast.map(|f| f.extra_amount_needed),
        });

        for row in std::iter::once(total).chain(categories) {
            csv_writer
                .serialize(row)
                .map_err(|e| ForecastError::Export(e.to_string()))?;
        }

        csv_writer
            .flush()
            .map_err(|e| ForecastError::Export(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, Transaction};
    use crate::services::MonthSummaryAggregator;
    use chrono::NaiveDate;

    fn march() -> MonthKey {
        MonthKey::new(2024, 3).unwrap()
    }

    fn txn(day: u32, amount: i64, category: Option<&str>) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            Money::from_cents(amount),
            category.map(|c| CategoryId::new(c).unwrap()),
        )
    }

    fn summaries() -> MonthSummaries {
        MonthSummaryAggregator::new(march()).aggregate(&[
            txn(1, -2000, Some("groceries")),
            txn(15, -1000, Some("groceries")),
            txn(20, -500, None),
        ])
    }

    fn budgets() -> Vec<CategoryBudget> {
        vec![
            CategoryBudget::new(
                CategoryId::new("groceries").unwrap(),
                Money::from_cents(6000),
                Money::from_cents(-3000),
            ),
            CategoryBudget::new(
                CategoryId::new("rent").unwrap(),
                Money::from_cents(4000),
                Money::zero(),
            ),
        ]
    }

    fn report() -> MonthOverviewReport {
        let summaries = summaries();
        let activity = summaries.get(&march()).unwrap().total_activity();
        MonthOverviewReport::generate(
            march(),
            &summaries,
            MonthTotal::new(Money::from_cents(10000), activity),
            &budgets(),
            MonthCalendar::new(31, 20, true),
            SeriesDensity::Dense,
        )
    }

    #[test]
    fn test_generate() {
        let report = report();

        assert_eq!(report.transaction_count, 3);
        assert_eq!(report.totals.total_activity.cents(), -3500);
        assert!((report.forecast.actual_remaining_per_day + 175.0).abs() < 1e-9);
        assert!((report.progress.budget_percentage - 35.0).abs() < 1e-9);
        assert_eq!(report.daily_spending.len(), 31);

        assert_eq!(report.categories.len(), 3);
        assert_eq!(report.categories[0].budgeted, Some(Money::from_cents(6000)));
        assert!(report.categories[0].forecast.is_some());
        assert_eq!(report.categories[1].category, CategoryKey::Uncategorized);
        assert!(report.categories[1].forecast.is_none());
        assert_eq!(report.categories[2].name, "rent");
        assert_eq!(report.categories[2].transaction_count, 0);
    }

    #[test]
    fn test_month_without_transactions() {
        let report = MonthOverviewReport::generate(
            MonthKey::new(2024, 4).unwrap(),
            &summaries(),
            MonthTotal::new(Money::from_cents(10000), Money::zero()),
            &[],
            MonthCalendar::new(30, 0, false),
            SeriesDensity::Dense,
        );

        assert_eq!(report.transaction_count, 0);
        assert!(report.categories.is_empty());
        assert!(report.daily_spending.is_empty());
        assert_eq!(report.forecast, MonthlyForecast::neutral());
    }

    #[test]
    fn test_format_terminal() {
        let output = report().format_terminal("$");
        assert!(output.contains("Month Overview: 2024-03"));
        assert!(output.contains("Day 20 of 31"));
        assert!(output.contains("-$1.75"));
        assert!(output.contains("$5.91"));
        assert!(output.contains("35%"));
        assert!(output.contains("groceries"));
        assert!(output.contains('█'));
        assert!(!output.contains("Extra budget needed"));
    }

    #[test]
    fn test_export_csv() {
        let mut output = Vec::new();
        report().export_csv(&mut output).unwrap();

        let csv = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("month,category,name,activity"));
        assert!(lines[1].starts_with("2024-03,__total__,Total,-3500,3,10000,6500,"));
        assert!(lines[2].starts_with("2024-03,groceries,groceries,-3000,2,6000,3000,,,"));
        assert!(lines[3].starts_with("2024-03,__uncategorized__,__uncategorized__,-500,1,,,"));
    }

    #[test]
    fn test_export_csv_keeps_forecast_without_categories() {
        let summaries = summaries();
        let report = MonthOverviewReport::generate(
            march(),
            &summaries,
            MonthTotal::new(Money::from_cents(10000), Money::from_cents(-3500)),
            &[],
            MonthCalendar::new(31, 20, true),
            SeriesDensity::Dense,
        );

        let mut output = Vec::new();
        report.export_csv(&mut output).unwrap();

        let mut reader = csv::Reader::from_reader(output.as_slice());
        let headers = reader.headers().unwrap().clone();
        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);

        let field = |name: &str| {
            let idx = headers.iter().position(|h| h == name).unwrap();
            rows[0][idx].to_string()
        };
        assert_eq!(field("category"), TOTAL_ROW_KEY);
        assert_eq!(field("actual_remaining_per_day").parse::<f64>().unwrap(), -175.0);
        let per_day: f64 = field("predicted_remaining_per_day").parse().unwrap();
        assert!((per_day - 6500.0 / 11.0).abs() < 1e-9);
        let budget_pct: f64 = field("budget_percentage").parse().unwrap();
        assert!((budget_pct - 35.0).abs() < 1e-9);
    }
}
