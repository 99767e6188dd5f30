//! YAML export

use serde::Serialize;
use std::io::Write;

use crate::error::{ForecastError, ForecastResult};

/// Write any serializable report as YAML, preceded by a header comment
pub fn write_yaml<T, W>(value: &T, writer: &mut W) -> ForecastResult<()>
where
    T: Serialize + ?Sized,
    W: Write,
{
    writeln!(
        writer,
        "# budget-forecast {} report",
        env!("CARGO_PKG_VERSION")
    )
    .map_err(|e| ForecastError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, value).map_err(|e| ForecastError::Export(e.to_string()))?;

    Ok(())
}
