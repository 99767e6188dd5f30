//! CSV transaction reader
//!
//! Columns are found from the header row. A file whose first row already
//! parses as data is read positionally as `date, amount, category`.

use std::io::Read;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use serde_json::Value;

use super::raw::RawTransaction;
use super::{ImportOutcome, RejectedRow};
use crate::error::{ForecastError, ForecastResult};

/// Column positions of a transactions CSV
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMapping {
    pub date_column: usize,
    pub amount_column: usize,
    pub category_column: Option<usize>,
    pub has_header: bool,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            date_column: 0,
            amount_column: 1,
            category_column: Some(2),
            has_header: false,
        }
    }
}

impl ColumnMapping {
    /// Detect the mapping from the first record
    ///
    /// Returns `None` for a header row that names no date or amount column.
    pub fn detect(first: &StringRecord) -> Option<Self> {
        if looks_like_data_row(first) {
            return Some(Self::default());
        }

        let mut date_column = None;
        let mut amount_column = None;
        let mut category_column = None;

        for (idx, header) in first.iter().enumerate() {
            let h = header.trim().to_lowercase();

            if h.contains("date") && date_column.is_none() {
                date_column = Some(idx);
            } else if h.contains("amount") && amount_column.is_none() {
                amount_column = Some(idx);
            } else if h.contains("category") && category_column.is_none() {
                category_column = Some(idx);
            }
        }

        Some(Self {
            date_column: date_column?,
            amount_column: amount_column?,
            category_column,
            has_header: true,
        })
    }

    fn raw_from_record(&self, record: &StringRecord) -> Result<RawTransaction, String> {
        let date = record
            .get(self.date_column)
            .ok_or_else(|| "Missing date column".to_string())?;
        let amount = record
            .get(self.amount_column)
            .ok_or_else(|| "Missing amount column".to_string())?;
        let category = self
            .category_column
            .and_then(|col| record.get(col))
            .map(|s| s.to_string());

        Ok(RawTransaction::new(
            date,
            Value::String(amount.to_string()),
            category,
        ))
    }
}

/// Check if a record looks like data (first column is a date)
fn looks_like_data_row(record: &StringRecord) -> bool {
    record
        .get(0)
        .and_then(|first| first.trim().get(..10))
        .map(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").is_ok())
        .unwrap_or(false)
}

/// Read and validate transactions from CSV
///
/// Row numbers count data rows from 1, not counting the header.
pub fn read_transactions_csv<R: Read>(reader: R) -> ForecastResult<ImportOutcome> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = csv_reader.records();
    let mut outcome = ImportOutcome::default();

    let first = match records.next() {
        Some(record) => record?,
        None => return Ok(outcome),
    };

    let mapping = ColumnMapping::detect(&first).ok_or_else(|| {
        ForecastError::Import("CSV header must name a date and an amount column".into())
    })?;

    let data_rows = (!mapping.has_header)
        .then_some(Ok(first))
        .into_iter()
        .chain(records);

    for (idx, record) in data_rows.enumerate() {
        let row = idx + 1;
        let result = record
            .map_err(|e| format!("Error reading CSV record: {}", e))
            .and_then(|record| mapping.raw_from_record(&record))
            .and_then(|raw| raw.validate());

        match result {
            Ok(transaction) => outcome.transactions.push(transaction),
            Err(reason) => outcome.reject(RejectedRow { row, reason }),
        }
    }

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_columns_in_any_order() {
        let data = "category,amount,date\ngroceries,-2000,2024-03-01\n,-500,2024-03-20\n";
        let outcome = read_transactions_csv(data.as_bytes()).unwrap();

        assert!(outcome.rejected.is_empty());
        assert_eq!(outcome.transactions.len(), 2);
        assert_eq!(outcome.transactions[0].amount.cents(), -2000);
        assert_eq!(
            outcome.transactions[0].category_id.as_ref().unwrap().as_str(),
            "groceries"
        );
        assert!(outcome.transactions[1].category_id.is_none());
    }

    #[test]
    fn test_category_column_optional() {
        let data = "Date,Amount\n2024-03-01,-2000\n";
        let outcome = read_transactions_csv(data.as_bytes()).unwrap();
        assert_eq!(outcome.transactions.len(), 1);
        assert!(outcome.transactions[0].category_id.is_none());
    }

    #[test]
    fn test_headerless_file_read_positionally() {
        let data = "2024-03-01,-2000,groceries\n2024-03-15,-1000,groceries\n";
        let outcome = read_transactions_csv(data.as_bytes()).unwrap();
        assert_eq!(outcome.transactions.len(), 2);
    }

    #[test]
    fn test_bad_rows_rejected_with_row_numbers() {
        let data = "date,amount,category_id\n2024-03-01,-2000,groceries\nnot-a-date,-1,\n2024-03-02,12.50,\n";
        let outcome = read_transactions_csv(data.as_bytes()).unwrap();

        assert_eq!(outcome.transactions.len(), 1);
        let rows: Vec<usize> = outcome.rejected.iter().map(|r| r.row).collect();
        assert_eq!(rows, vec![2, 3]);
    }

    #[test]
    fn test_missing_required_header() {
        let data = "when,how much\n2024-03-01x,-2000\n";
        assert!(read_transactions_csv(data.as_bytes()).is_err());
    }

    #[test]
    fn test_empty_input() {
        let outcome = read_transactions_csv("".as_bytes()).unwrap();
        assert!(outcome.transactions.is_empty());
    }
}
