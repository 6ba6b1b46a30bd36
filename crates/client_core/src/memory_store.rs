//! In-process `CollectionStore`. Assigns `id`, `created_at` and `updated_at`
//! the way the hosted backend's column defaults do.

use std::{cmp::Ordering, collections::HashMap};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::{
    error::{StoreError, StoreResult},
    store::{CollectionStore, Direction, Filter, SelectQuery},
};

type Row = Map<String, Value>;

#[derive(Default)]
pub struct MemoryCollectionStore {
    tables: Mutex<HashMap<String, Vec<Row>>>,
}

impl MemoryCollectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn row_count(&self, table: &str) -> usize {
        let guard = self.tables.lock().await;
        guard.get(table).map(Vec::len).unwrap_or(0)
    }
}

fn now_timestamp() -> Value {
    Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true))
}

fn column_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn row_matches(row: &Row, filters: &[Filter]) -> bool {
    filters.iter().all(|filter| {
        row.get(&filter.column)
            .map(|value| column_text(value) == filter.value)
            .unwrap_or(false)
    })
}

fn compare_column(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(a), Some(b)) => column_text(a).cmp(&column_text(b)),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

#[async_trait]
impl CollectionStore for MemoryCollectionStore {
    async fn select(&self, table: &str, query: &SelectQuery) -> StoreResult<Vec<Value>> {
        let guard = self.tables.lock().await;
        let Some(rows) = guard.get(table) else {
            return Ok(Vec::new());
        };

        let mut selected: Vec<&Row> = rows
            .iter()
            .filter(|row| row_matches(row, &query.filters))
            .collect();

        if let Some(order) = &query.order {
            match order.direction {
                Direction::Ascending => selected.sort_by(|a, b| {
                    compare_column(a.get(&order.column), b.get(&order.column))
                }),
                Direction::Descending => {
                    // Reverse first so equal keys keep newest-inserted first.
                    selected.reverse();
                    selected.sort_by(|a, b| {
                        compare_column(b.get(&order.column), a.get(&order.column))
                    });
                }
            }
        }

        Ok(selected
            .into_iter()
            .map(|row| Value::Object(row.clone()))
            .collect())
    }

    async fn insert(&self, table: &str, rows: Vec<Value>) -> StoreResult<()> {
        let mut prepared = Vec::with_capacity(rows.len());
        for row in rows {
            let Value::Object(mut row) = row else {
                return Err(StoreError::new(format!(
                    "insert into '{table}' expects JSON objects"
                )));
            };
            let stamp = now_timestamp();
            row.entry("id")
                .or_insert_with(|| Value::String(Uuid::new_v4().to_string()));
            row.entry("created_at").or_insert_with(|| stamp.clone());
            row.entry("updated_at").or_insert(stamp);
            prepared.push(row);
        }

        debug!(table, rows = prepared.len(), "memory store insert");
        let mut guard = self.tables.lock().await;
        guard.entry(table.to_string()).or_default().extend(prepared);
        Ok(())
    }

    async fn update(&self, table: &str, filter: &Filter, patch: Value) -> StoreResult<()> {
        let Value::Object(patch) = patch else {
            return Err(StoreError::new(format!(
                "update of '{table}' expects a JSON object patch"
            )));
        };

        let mut guard = self.tables.lock().await;
        let mut matched = 0usize;
        if let Some(rows) = guard.get_mut(table) {
            for row in rows
                .iter_mut()
                .filter(|row| row_matches(row, std::slice::from_ref(filter)))
            {
                for (column, value) in &patch {
                    row.insert(column.clone(), value.clone());
                }
                matched += 1;
            }
        }

        debug!(table, matched, "memory store update");
        if matched == 0 {
            return Err(StoreError::new(format!(
                "update matched no rows in '{table}' where {} = {}",
                filter.column, filter.value
            )));
        }
        Ok(())
    }

    async fn delete(&self, table: &str, filter: &Filter) -> StoreResult<()> {
        let mut guard = self.tables.lock().await;
        if let Some(rows) = guard.get_mut(table) {
            let before = rows.len();
            rows.retain(|row| !row_matches(row, std::slice::from_ref(filter)));
            debug!(table, removed = before - rows.len(), "memory store delete");
        }
        Ok(())
    }
}
