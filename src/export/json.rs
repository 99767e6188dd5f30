//! JSON export

use serde::Serialize;
use std::io::Write;

use crate::error::{ForecastError, ForecastResult};

/// Write any serializable report as pretty-printed JSON
pub fn write_json<T, W>(value: &T, writer: &mut W) -> ForecastResult<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    serde_json::to_writer_pretty(&mut *writer, value)
        .map_err(|e| ForecastError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| ForecastError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, MonthlySpendingDatum};

    #[test]
    fn test_write_json() {
        let series = vec![MonthlySpendingDatum::new(1, Money::from_cents(-2000))];
        let mut output = Vec::new();
        write_json(&series, &mut output).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value[0]["day_of_month"], 1);
        assert_eq!(value[0]["spent"], -2000);
    }
}
