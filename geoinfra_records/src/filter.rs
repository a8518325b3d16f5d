//! List filters over rows that are already loaded.
//!
//! Text search is a case-insensitive substring match on the name column. All other
//! criteria are exact matches. Empty criteria match everything.

use crate::store::Row;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeSet;

/// Text of a column, as compared by filters. Numbers and booleans are written out.
fn column_text(row: &Row, column: &str) -> Option<String> {
	match row.get(column)? {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(b) => Some(b.to_string()),
		_ => None,
	}
}

fn criterion(value: Option<&String>) -> Option<&str> {
	value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn contains_text(row: &Row, column: &str, needle: Option<&String>) -> bool {
	match criterion(needle) {
		None => true,
		Some(needle) => column_text(row, column).is_some_and(|text| text.to_lowercase().contains(&needle.to_lowercase())),
	}
}

fn equals(row: &Row, column: &str, expected: Option<&String>) -> bool {
	match criterion(expected) {
		None => true,
		Some(expected) => column_text(row, column).as_deref() == Some(expected),
	}
}

/// Filter for the asset list: `q` searches the name.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AssetFilter {
	pub tipo_modal: Option<String>,
	pub q: Option<String>,
	pub modal: Option<String>,
	pub estado: Option<String>,
	pub status: Option<String>,
}

impl AssetFilter {
	pub fn matches(&self, row: &Row) -> bool {
		contains_text(row, "nome_ativo", self.q.as_ref())
			&& equals(row, "tipo_modal", self.modal.as_ref())
			&& equals(row, "estado", self.estado.as_ref())
			&& equals(row, "status", self.status.as_ref())
	}

	pub fn apply(&self, rows: Vec<Row>) -> Vec<Row> {
		rows.into_iter().filter(|row| self.matches(row)).collect()
	}
}

/// Filter for the project list: `q` searches the name.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProjectFilter {
	pub q: Option<String>,
	pub modal: Option<String>,
	pub status: Option<String>,
}

impl ProjectFilter {
	pub fn matches(&self, row: &Row) -> bool {
		contains_text(row, "nome_projeto", self.q.as_ref())
			&& equals(row, "modal_transporte", self.modal.as_ref())
			&& equals(row, "status_projeto", self.status.as_ref())
	}

	pub fn apply(&self, rows: Vec<Row>) -> Vec<Row> {
		rows.into_iter().filter(|row| self.matches(row)).collect()
	}
}

/// Sorted distinct values of a column, for filter drop-downs.
pub fn distinct_values(rows: &[Row], column: &str) -> Vec<String> {
	rows
		.iter()
		.filter_map(|row| column_text(row, column))
		.collect::<BTreeSet<_>>()
		.into_iter()
		.collect()
}
