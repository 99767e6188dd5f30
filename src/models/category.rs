//! Category identifiers and per-category budget figures
//!
//! Transactions are classified by an optional [`CategoryId`]. Aggregation
//! keys them by [`CategoryKey`], which adds a reserved bucket for
//! transactions without a category.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Reserved key of the uncategorized bucket
///
/// No real category may use this id; the import boundary rejects it.
pub const UNCATEGORIZED_KEY: &str = "__uncategorized__";

/// Identifier of a user-defined category (e.g. "groceries")
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CategoryId(String);

impl CategoryId {
    /// Create a category id
    ///
    /// The id is trimmed; empty ids and the reserved uncategorized key are
    /// rejected.
    pub fn new(id: impl Into<String>) -> Result<Self, CategoryValidationError> {
        let id = id.into();
        let trimmed = id.trim();

        if trimmed.is_empty() {
            return Err(CategoryValidationError::EmptyId);
        }
        if trimmed == UNCATEGORIZED_KEY {
            return Err(CategoryValidationError::ReservedId(trimmed.to_string()));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for CategoryId {
    type Error = CategoryValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CategoryId> for String {
    fn from(id: CategoryId) -> Self {
        id.0
    }
}

/// Aggregation key: a real category or the uncategorized bucket
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryKey {
    Category(CategoryId),
    Uncategorized,
}

impl CategoryKey {
    pub fn is_uncategorized(&self) -> bool {
        matches!(self, Self::Uncategorized)
    }

    pub fn category_id(&self) -> Option<&CategoryId> {
        match self {
            Self::Category(id) => Some(id),
            Self::Uncategorized => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Category(id) => id.as_str(),
            Self::Uncategorized => UNCATEGORIZED_KEY,
        }
    }
}

impl From<Option<CategoryId>> for CategoryKey {
    fn from(id: Option<CategoryId>) -> Self {
        match id {
            Some(id) => Self::Category(id),
            None => Self::Uncategorized,
        }
    }
}

impl From<CategoryId> for CategoryKey {
    fn from(id: CategoryId) -> Self {
        Self::Category(id)
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for CategoryKey {
    type Error = CategoryValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value == UNCATEGORIZED_KEY {
            Ok(Self::Uncategorized)
        } else {
            CategoryId::new(value).map(Self::Category)
        }
    }
}

impl From<CategoryKey> for String {
    fn from(key: CategoryKey) -> Self {
        key.as_str().to_string()
    }
}

/// Budgeted, activity and balance figures for one category in one month
///
/// Supplied by the budget metadata source, not derived from transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryBudget {
    pub category_id: CategoryId,

    /// Display name, when the source provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Amount assigned to the category this month
    #[serde(default)]
    pub budgeted: Money,

    /// Signed sum of the category's transactions this month
    #[serde(default)]
    pub activity: Money,

    /// Available balance after activity
    #[serde(default)]
    pub balance: Money,
}

impl CategoryBudget {
    pub fn new(category_id: CategoryId, budgeted: Money, activity: Money) -> Self {
        Self {
            category_id,
            name: None,
            budgeted,
            activity,
            balance: budgeted + activity,
        }
    }

    /// Name for display, falling back to the id
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(self.category_id.as_str())
    }

    pub fn is_overspent(&self) -> bool {
        self.balance.is_negative()
    }
}

/// Validation errors for category identifiers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CategoryValidationError {
    #[error("Category id cannot be empty")]
    EmptyId,
    #[error("Category id '{0}' is reserved for uncategorized transactions")]
    ReservedId(String),
}
