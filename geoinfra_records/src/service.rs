//! Create, edit and read operations for assets and projects.
//!
//! Nothing here fails with an error: invalid input and store failures are outcomes
//! the caller turns into responses.

use crate::{
	ASSET_TABLE, AssetFilter, AssetRecord, FieldIssue, PROJECT_TABLE, ProjectFilter, ProjectRecord,
	store::{RecordStore, Row},
};
use anyhow::Result;
use serde_json::{Map, Value};

/// Result of submitting a form.
#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
	/// Stored under this id.
	Saved(String),
	/// Not stored; these fields need fixing.
	Invalid(Vec<FieldIssue>),
	/// Valid, but the store refused it.
	Rejected(String),
}

/// Result of reading rows.
#[derive(Clone, Debug, PartialEq)]
pub enum QueryOutcome {
	Rows(Vec<Row>),
	Failed(String),
}

impl From<Result<Vec<Row>>> for QueryOutcome {
	fn from(result: Result<Vec<Row>>) -> Self {
		match result {
			Ok(rows) => QueryOutcome::Rows(rows),
			Err(err) => {
				log::error!("store query failed: {err:#}");
				QueryOutcome::Failed(format!("{err:#}"))
			}
		}
	}
}

/// Inserts `row`, or updates the row with `id` when one is given.
async fn save(store: &RecordStore, table: &str, id: Option<String>, row: Result<Map<String, Value>>) -> SubmitOutcome {
	let row = match row {
		Ok(row) => row,
		Err(err) => return SubmitOutcome::Rejected(format!("{err:#}")),
	};
	let result = match id {
		Some(id) => store.update(table, &id, row).await.map(|()| id),
		None => store.insert(table, row).await,
	};
	match result {
		Ok(id) => {
			log::info!("saved row {id} in {table}");
			SubmitOutcome::Saved(id)
		}
		Err(err) => {
			log::error!("store rejected row for {table}: {err:#}");
			SubmitOutcome::Rejected(format!("{err:#}"))
		}
	}
}

#[derive(Clone, Debug)]
pub struct AssetService {
	store: RecordStore,
}

impl AssetService {
	pub fn new(store: RecordStore) -> AssetService {
		AssetService { store }
	}

	/// Validates an asset form and stores it. A form with an `id` edits that asset.
	pub async fn submit(&self, input: &Value) -> SubmitOutcome {
		match AssetRecord::from_form(input) {
			Ok(submission) => save(&self.store, ASSET_TABLE, submission.id, submission.record.to_row()).await,
			Err(issues) => {
				log::debug!("asset form has {} issues", issues.len());
				SubmitOutcome::Invalid(issues)
			}
		}
	}

	/// Lists assets. `tipo_modal` is matched by the store, the rest of `filter` in memory.
	pub async fn list(&self, filter: &AssetFilter) -> QueryOutcome {
		let tipo_modal = filter.tipo_modal.as_deref().map(str::trim).filter(|t| !t.is_empty());
		let filters: Vec<(&str, &str)> = tipo_modal.map(|t| ("tipo_modal", t)).into_iter().collect();
		match QueryOutcome::from(self.store.select(ASSET_TABLE, &filters).await) {
			QueryOutcome::Rows(rows) => QueryOutcome::Rows(filter.apply(rows)),
			failed => failed,
		}
	}

	pub async fn get(&self, id: &str) -> QueryOutcome {
		QueryOutcome::from(self.store.select(ASSET_TABLE, &[("id", id)]).await)
	}
}

#[derive(Clone, Debug)]
pub struct ProjectService {
	store: RecordStore,
}

impl ProjectService {
	pub fn new(store: RecordStore) -> ProjectService {
		ProjectService { store }
	}

	/// Validates a project form and stores it. A form with an `id` edits that project.
	pub async fn submit(&self, input: &Value) -> SubmitOutcome {
		match ProjectRecord::from_form(input) {
			Ok(submission) => save(&self.store, PROJECT_TABLE, submission.id, submission.record.to_row()).await,
			Err(issues) => {
				log::debug!("project form has {} issues", issues.len());
				SubmitOutcome::Invalid(issues)
			}
		}
	}

	pub async fn list(&self, filter: &ProjectFilter) -> QueryOutcome {
		match QueryOutcome::from(self.store.select(PROJECT_TABLE, &[]).await) {
			QueryOutcome::Rows(rows) => QueryOutcome::Rows(filter.apply(rows)),
			failed => failed,
		}
	}

	pub async fn get(&self, id: &str) -> QueryOutcome {
		QueryOutcome::from(self.store.select(PROJECT_TABLE, &[("id", id)]).await)
	}
}
