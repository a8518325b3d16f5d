use super::{RecordStoreTrait, Row, value_equals};
use anyhow::{Result, bail};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// An in-process store. Ids are random UUIDs. Contents are lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
	tables: RwLock<HashMap<String, Vec<Row>>>,
}

impl MemoryStore {
	pub fn new() -> MemoryStore {
		MemoryStore::default()
	}
}

#[async_trait]
impl RecordStoreTrait for MemoryStore {
	async fn insert(&self, table: &str, mut row: Row) -> Result<String> {
		let id = Uuid::new_v4().to_string();
		row.insert("id".to_string(), Value::from(id.clone()));
		self.tables.write().await.entry(table.to_string()).or_default().push(row);
		log::debug!("inserted row {id} into {table}");
		Ok(id)
	}

	async fn update(&self, table: &str, id: &str, row: Row) -> Result<()> {
		let mut tables = self.tables.write().await;
		let Some(existing) = tables
			.get_mut(table)
			.and_then(|rows| rows.iter_mut().find(|r| value_equals(r.get("id"), id)))
		else {
			bail!("no row with id '{id}' in table '{table}'");
		};
		for (column, value) in row {
			if column != "id" {
				existing.insert(column, value);
			}
		}
		log::debug!("updated row {id} in {table}");
		Ok(())
	}

	async fn select(&self, table: &str, filters: &[(&str, &str)]) -> Result<Vec<Row>> {
		let tables = self.tables.read().await;
		let rows = tables.get(table).map(Vec::as_slice).unwrap_or_default();
		Ok(rows
			.iter()
			.filter(|row| filters.iter().all(|(column, value)| value_equals(row.get(*column), value)))
			.cloned()
			.collect())
	}

	fn get_name(&self) -> &str {
		"memory"
	}
}
