//! Import boundary
//!
//! Reads transaction and budget files, validates each record, and reports
//! rejected rows. Malformed records never reach the aggregation core.

pub mod csv;
pub mod raw;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::Serialize;
use tracing::{info, warn};

use crate::error::{ForecastError, ForecastResult};
use crate::models::{BudgetMonth, Money, ProjectionInput, Transaction, MAX_AMOUNT};

pub use self::csv::{read_transactions_csv, ColumnMapping};
pub use raw::RawTransaction;

/// A record that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRow {
    /// 1-based record number in the source
    pub row: usize,
    pub reason: String,
}

/// Validated transactions plus whatever was rejected on the way
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportOutcome {
    pub transactions: Vec<Transaction>,
    pub rejected: Vec<RejectedRow>,
}

impl ImportOutcome {
    pub(crate) fn reject(&mut self, rejected: RejectedRow) {
        warn!(row = rejected.row, reason = %rejected.reason, "rejected transaction");
        self.rejected.push(rejected);
    }

    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }

    /// Transactions, or an error for the first rejected row
    pub fn into_strict(self) -> ForecastResult<Vec<Transaction>> {
        match self.rejected.into_iter().next() {
            Some(RejectedRow { row, reason }) => {
                Err(ForecastError::InvalidTransaction { row, reason })
            }
            None => Ok(self.transactions),
        }
    }
}

/// Read and validate transactions from a JSON array
pub fn read_transactions_json<R: Read>(reader: R) -> ForecastResult<ImportOutcome> {
    let records: Vec<serde_json::Value> = serde_json::from_reader(reader)?;
    let mut outcome = ImportOutcome::default();

    for (idx, record) in records.into_iter().enumerate() {
        let row = idx + 1;
        let result = serde_json::from_value::<RawTransaction>(record)
            .map_err(|e| e.to_string())
            .and_then(|raw| raw.validate());

        match result {
            Ok(transaction) => outcome.transactions.push(transaction),
            Err(reason) => outcome.reject(RejectedRow { row, reason }),
        }
    }

    Ok(outcome)
}

/// Read transactions from a `.json` or `.csv` file
pub fn read_transactions_file(path: &Path) -> ForecastResult<ImportOutcome> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase());

    let file = open(path)?;
    let outcome = match extension.as_deref() {
        Some("json") => read_transactions_json(file)?,
        Some("csv") => read_transactions_csv(file)?,
        _ => {
            return Err(ForecastError::Import(format!(
                "Unsupported file type: {} (expected .json or .csv)",
                path.display()
            )))
        }
    };

    info!(
        path = %path.display(),
        imported = outcome.transactions.len(),
        rejected = outcome.rejected.len(),
        "read transactions"
    );
    Ok(outcome)
}

/// Read a JSON array of budget months
pub fn read_budget_file(path: &Path) -> ForecastResult<Vec<BudgetMonth>> {
    let months: Vec<BudgetMonth> = serde_json::from_reader(open(path)?)?;
    months.iter().try_for_each(check_budget_amounts)?;
    info!(path = %path.display(), months = months.len(), "read budget file");
    Ok(months)
}

/// Read a balance projection input (accounts, scheduled transactions,
/// categories with goals, simulations) from JSON
pub fn read_projection_file(path: &Path) -> ForecastResult<ProjectionInput> {
    let input: ProjectionInput = serde_json::from_reader(open(path)?)?;
    check_projection_amounts(&input)?;
    info!(
        path = %path.display(),
        accounts = input.accounts.len(),
        scheduled = input.scheduled.len(),
        categories = input.categories.len(),
        simulations = input.simulations.len(),
        "read projection input"
    );
    Ok(input)
}

fn check_projection_amounts(input: &ProjectionInput) -> ForecastResult<()> {
    let accounts = input
        .accounts
        .iter()
        .map(|a| (format!("account {}", a.name), a.balance));
    let scheduled = input
        .scheduled
        .iter()
        .map(|t| (format!("scheduled transaction on {}", t.date), t.amount));
    let categories = input.categories.iter().flat_map(|c| {
        let target = c.target.as_ref();
        [
            Some(c.balance),
            target.map(|t| t.amount),
            target.and_then(|t| t.overall_left),
        ]
        .into_iter()
        .flatten()
        .map(move |amount| (format!("category {}", c.name), amount))
    });
    let simulations = input
        .simulations
        .iter()
        .map(|s| (format!("simulation on {}", s.date), s.amount));

    match accounts
        .chain(scheduled)
        .chain(categories)
        .chain(simulations)
        .find(|(_, amount)| !amount.is_within_limit())
    {
        Some((context, amount)) => Err(check_limit_error(context, amount)),
        None => Ok(()),
    }
}

fn check_budget_amounts(budget: &BudgetMonth) -> ForecastResult<()> {
    let totals = [budget.total_activity, budget.total_balance, budget.total_budgeted];
    let categories = budget
        .categories
        .iter()
        .flat_map(|c| [c.activity, c.balance, c.budgeted]);

    match totals.into_iter().flatten().chain(categories).find(|m| !m.is_within_limit()) {
        Some(amount) => Err(check_limit_error(budget.month.to_string(), amount)),
        None => Ok(()),
    }
}

/// Validation error for an amount past [`MAX_AMOUNT`]
pub(crate) fn check_limit_error(context: String, amount: Money) -> ForecastError {
    ForecastError::Validation(format!(
        "{}: amount {} exceeds the limit of {} minor units",
        context,
        amount.cents(),
        MAX_AMOUNT
    ))
}

fn open(path: &Path) -> ForecastResult<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|e| ForecastError::Io(format!("Failed to open {}: {}", path.display(), e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MonthKey;
    use tempfile::TempDir;

    const SCENARIO: &str = r#"[
        {"date": "2024-03-01", "amount": -2000, "category_id": "groceries"},
        {"date": "2024-03-15", "amount": -1000, "category_id": "groceries"},
        {"date": "2024-03-20", "amount": -500, "category_id": null}
    ]"#;

    #[test]
    fn test_read_json() {
        let outcome = read_transactions_json(SCENARIO.as_bytes()).unwrap();
        assert!(outcome.is_clean());
        assert_eq!(outcome.transactions.len(), 3);
        assert!(outcome.transactions[2].category_id.is_none());
    }

    #[test]
    fn test_json_rejections_keep_row_numbers() {
        let data = r#"[
            {"date": "2024-03-01", "amount": -2000},
            {"date": "2024-03-01", "amount": 1.5},
            {"amount": -5},
            {"date": "2024-03-02", "amount": -1, "category_id": "__uncategorized__"}
        ]"#;
        let outcome = read_transactions_json(data.as_bytes()).unwrap();

        assert_eq!(outcome.transactions.len(), 1);
        let rows: Vec<usize> = outcome.rejected.iter().map(|r| r.row).collect();
        assert_eq!(rows, vec![2, 3, 4]);
    }

    #[test]
    fn test_amounts_past_limit_never_reach_aggregation() {
        let data = r#"[
            {"date": "2024-03-01", "amount": 9223372036854775807},
            {"date": "2024-03-02", "amount": 1}
        ]"#;
        let outcome = read_transactions_json(data.as_bytes()).unwrap();

        assert_eq!(outcome.transactions.len(), 1);
        assert_eq!(outcome.rejected[0].row, 1);

        let march = MonthKey::new(2024, 3).unwrap();
        let summaries =
            crate::services::MonthSummaryAggregator::new(march).aggregate(&outcome.transactions);
        assert_eq!(summaries.get(&march).unwrap().total_activity().cents(), 1);
    }

    #[test]
    fn test_into_strict() {
        let data = r#"[{"date": "2024-03-01", "amount": -1}, {"date": "bad", "amount": -1}]"#;
        let err = read_transactions_json(data.as_bytes())
            .unwrap()
            .into_strict()
            .unwrap_err();
        assert!(matches!(err, ForecastError::InvalidTransaction { row: 2, .. }));

        let clean = read_transactions_json(SCENARIO.as_bytes()).unwrap();
        assert_eq!(clean.into_strict().unwrap().len(), 3);
    }

    #[test]
    fn test_not_an_array_is_json_error() {
        let err = read_transactions_json(r#"{"date": "2024-03-01"}"#.as_bytes()).unwrap_err();
        assert!(matches!(err, ForecastError::Json(_)));
    }

    #[test]
    fn test_read_file_by_extension() {
        let temp_dir = TempDir::new().unwrap();

        let json_path = temp_dir.path().join("txns.json");
        std::fs::write(&json_path, SCENARIO).unwrap();
        assert_eq!(read_transactions_file(&json_path).unwrap().transactions.len(), 3);

        let csv_path = temp_dir.path().join("txns.CSV");
        std::fs::write(&csv_path, "date,amount\n2024-03-01,-2000\n").unwrap();
        assert_eq!(read_transactions_file(&csv_path).unwrap().transactions.len(), 1);

        let txt_path = temp_dir.path().join("txns.txt");
        std::fs::write(&txt_path, "").unwrap();
        assert!(matches!(
            read_transactions_file(&txt_path),
            Err(ForecastError::Import(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_transactions_file(Path::new("/nonexistent/txns.json")).unwrap_err();
        assert!(matches!(err, ForecastError::Io(_)));
    }

    #[test]
    fn test_read_budget_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget.json");
        std::fs::write(
            &path,
            r#"[
                {"month": "2024-03", "total_budgeted": 10000},
                {"month": "2024-04", "categories": [
                    {"category_id": "groceries", "budgeted": 6000, "activity": -3000, "balance": 3000}
                ]}
            ]"#,
        )
        .unwrap();

        let months = read_budget_file(&path).unwrap();
        assert_eq!(months.len(), 2);
        assert_eq!(months[0].month, MonthKey::new(2024, 3).unwrap());
        assert_eq!(months[0].total().total_budgeted.cents(), 10000);
        assert_eq!(months[1].total().total_balance.cents(), 3000);
    }

    #[test]
    fn test_read_projection_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("projection.json");
        std::fs::write(
            &path,
            r#"{
                "accounts": [{"name": "Checking", "balance": 250000}],
                "scheduled": [{"date": "2024-03-25", "amount": -120000, "category": "Rent"}]
            }"#,
        )
        .unwrap();

        let input = read_projection_file(&path).unwrap();
        assert_eq!(input.initial_balance().cents(), 250000);
        assert_eq!(input.scheduled.len(), 1);
        assert!(input.simulations.is_empty());
    }

    #[test]
    fn test_projection_amount_past_limit() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("projection.json");
        std::fs::write(
            &path,
            r#"{"simulations": [{"date": "2024-04-01", "amount": -9223372036854775808}]}"#,
        )
        .unwrap();

        let err = read_projection_file(&path).unwrap_err();
        assert!(matches!(err, ForecastError::Validation(_)));
        assert!(err.to_string().contains("simulation on 2024-04-01"));
    }

    #[test]
    fn test_budget_amount_past_limit() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("budget.json");
        std::fs::write(
            &path,
            r#"[{"month": "2024-03", "categories": [
                {"category_id": "groceries", "budgeted": 9223372036854775807, "activity": 0, "balance": 0}
            ]}]"#,
        )
        .unwrap();

        let err = read_budget_file(&path).unwrap_err();
        assert!(matches!(err, ForecastError::Validation(_)));
        assert!(err.to_string().contains("2024-03"));
    }
}
