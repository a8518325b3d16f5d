//! The persistence port.
//!
//! A record store keeps rows (JSON objects) in named tables. Every row has an `id` column
//! assigned by the store on insert.

mod memory;
mod rest;

pub use memory::*;
pub use rest::*;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::{fmt::Debug, sync::Arc};

/// One table row, keyed by column name.
pub type Row = Map<String, Value>;

/// Shared handle to a record store.
pub type RecordStore = Arc<dyn RecordStoreTrait>;

#[async_trait]
pub trait RecordStoreTrait: Debug + Send + Sync {
	/// Inserts a row and returns the id the store assigned to it.
	async fn insert(&self, table: &str, row: Row) -> Result<String>;

	/// Overwrites the given columns of the row with this id.
	async fn update(&self, table: &str, id: &str, row: Row) -> Result<()>;

	/// Returns all rows whose columns equal the given values.
	async fn select(&self, table: &str, filters: &[(&str, &str)]) -> Result<Vec<Row>>;

	fn get_name(&self) -> &str;
}

/// Compares a stored value with a filter value given as text.
pub(crate) fn value_equals(value: Option<&Value>, expected: &str) -> bool {
	match value {
		Some(Value::String(s)) => s == expected,
		Some(Value::Number(n)) => n.to_string() == expected,
		Some(Value::Bool(b)) => b.to_string() == expected,
		_ => false,
	}
}
