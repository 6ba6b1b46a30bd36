//! Generic table-oriented store seam. Rows travel as JSON objects so the same
//! trait serves any table the backend exposes.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::StoreResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    pub column: String,
    pub direction: Direction,
}

impl OrderBy {
    pub fn ascending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Ascending,
        }
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            direction: Direction::Descending,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectQuery {
    pub filters: Vec<Filter>,
    pub order: Option<OrderBy>,
}

impl SelectQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn order_by(mut self, order: OrderBy) -> Self {
        self.order = Some(order);
        self
    }
}

#[async_trait]
pub trait CollectionStore: Send + Sync {
    async fn select(&self, table: &str, query: &SelectQuery) -> StoreResult<Vec<Value>>;

    async fn insert(&self, table: &str, rows: Vec<Value>) -> StoreResult<()>;

    /// Merges `patch` into every row matching `filter`. Matching nothing is an error.
    async fn update(&self, table: &str, filter: &Filter, patch: Value) -> StoreResult<()>;

    /// Removing rows that do not exist is not an error.
    async fn delete(&self, table: &str, filter: &Filter) -> StoreResult<()>;
}
