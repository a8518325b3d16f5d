//! Assets: single pieces of infrastructure such as a port terminal or an airport.

use crate::{FieldIssue, form::FormReader};
use anyhow::{Result, bail};
use serde::Serialize;
use serde_json::{Map, Value};

pub const ASSET_TABLE: &str = "findes_ativos";
pub const ASSET_STATUSES: [&str; 2] = ["Ativo", "Inativo"];

/// A validated asset, with exactly the columns of the asset table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AssetRecord {
	pub tipo_modal: String,
	pub nome_ativo: String,
	pub estado: String,
	pub municipio: String,
	pub status: String,
	pub latitude: Option<f64>,
	pub longitude: Option<f64>,
	pub endereco: Option<String>,
	pub operador: Option<String>,
	pub horario: Option<String>,
	pub observacoes: Option<String>,
	pub capacidade_extensao: String,
}

/// An asset form after validation. `id` is set when an existing row is edited.
#[derive(Clone, Debug, PartialEq)]
pub struct AssetSubmission {
	pub id: Option<String>,
	pub record: AssetRecord,
}

impl AssetRecord {
	/// Validates an asset form and returns every problem found.
	pub fn from_form(input: &Value) -> Result<AssetSubmission, Vec<FieldIssue>> {
		let mut form = FormReader::new(input);
		let id = form.optional_id("id");
		let record = AssetRecord {
			tipo_modal: form.required_text("tipo_modal"),
			nome_ativo: form.required_text("nome_ativo"),
			estado: form.required_text("estado"),
			municipio: form.required_text("municipio"),
			status: form.choice("status", &ASSET_STATUSES, Some("Ativo")),
			latitude: form.coordinate("latitude", 90.0),
			longitude: form.coordinate("longitude", 180.0),
			endereco: form.optional_text("endereco"),
			operador: form.optional_text("operador"),
			horario: form.optional_text("horario"),
			observacoes: form.optional_text("observacoes"),
			capacidade_extensao: form.required_text("capacidade_extensao"),
		};
		form.finish(AssetSubmission { id, record })
	}

	/// The record as a table row. Absent optional values become `null`.
	pub fn to_row(&self) -> Result<Map<String, Value>> {
		match serde_json::to_value(self)? {
			Value::Object(row) => Ok(row),
			other => bail!("asset record serialized to {other}, expected an object"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;
	use serde_json::json;

	fn valid_form() -> Value {
		json!({
			"tipo_modal": "Portuário",
			"nome_ativo": "Terminal de Vila Velha",
			"estado": "ES",
			"municipio": "Vila Velha",
			"latitude": -20.33,
			"longitude": "-40,29",
			"operador": "Log-In",
			"endereco": "",
			"capacidade_extensao": "1.200.000 TEU/ano"
		})
	}

	#[test]
	fn valid_form_is_accepted() {
		let submission = AssetRecord::from_form(&valid_form()).unwrap();
		assert_eq!(submission.id, None);
		let record = submission.record;
		assert_eq!(record.status, "Ativo");
		assert_eq!(record.latitude, Some(-20.33));
		assert_eq!(record.longitude, Some(-40.29));
		assert_eq!(record.endereco, None);
		assert_eq!(record.operador.as_deref(), Some("Log-In"));
	}

	#[test]
	fn id_marks_an_edit() {
		let mut form = valid_form();
		form["id"] = json!("8c6f");
		form["status"] = json!("Inativo");
		let submission = AssetRecord::from_form(&form).unwrap();
		assert_eq!(submission.id.as_deref(), Some("8c6f"));
		assert_eq!(submission.record.status, "Inativo");
	}

	#[test]
	fn missing_fields_are_reported() {
		let issues = AssetRecord::from_form(&json!({"status": "Desativado", "latitude": "norte"})).unwrap_err();
		let paths: Vec<_> = issues.iter().map(|i| i.path.as_str()).collect();
		assert_eq!(
			paths,
			[
				"tipo_modal",
				"nome_ativo",
				"estado",
				"municipio",
				"status",
				"latitude",
				"capacidade_extensao"
			]
		);
	}

	#[test]
	fn row_has_all_columns() {
		let row = AssetRecord::from_form(&valid_form()).unwrap().record.to_row().unwrap();
		assert_eq!(row.len(), 12);
		assert_eq!(row["horario"], Value::Null);
		assert_eq!(row["nome_ativo"], json!("Terminal de Vila Velha"));
		assert!(!row.contains_key("id"));
	}
}
