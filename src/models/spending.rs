//! Daily spending series

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// Signed amount moved on one day of the month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySpendingDatum {
    /// 1-based day of month
    pub day_of_month: u32,
    /// Sum of that day's amounts (negative for net spending)
    pub spent: Money,
}

impl MonthlySpendingDatum {
    pub fn new(day_of_month: u32, spent: Money) -> Self {
        Self {
            day_of_month,
            spent,
        }
    }
}

/// Whether quiet days appear in the series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesDensity {
    /// Every day of the month, zero on days without transactions
    #[default]
    Dense,
    /// Only days with transactions
    Sparse,
}

impl fmt::Display for SeriesDensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dense => write!(f, "dense"),
            Self::Sparse => write!(f, "sparse"),
        }
    }
}

impl FromStr for SeriesDensity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dense" => Ok(Self::Dense),
            "sparse" => Ok(Self::Sparse),
            other => Err(format!("Unknown series density: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density_parse_and_display() {
        assert_eq!("Sparse".parse::<SeriesDensity>().unwrap(), SeriesDensity::Sparse);
        assert_eq!(SeriesDensity::Dense.to_string(), "dense");
        assert!("weekly".parse::<SeriesDensity>().is_err());
    }

    #[test]
    fn test_density_serialization() {
        let json = serde_json::to_string(&SeriesDensity::Sparse).unwrap();
        assert_eq!(json, "\"sparse\"");
    }
}
