//! Projects: planned or running investments in transport infrastructure.

use crate::{FieldIssue, form::FormReader};
use anyhow::{Result, bail};
use serde::Serialize;
use serde_json::{Map, Value};

pub const PROJECT_TABLE: &str = "findes_projetos";
pub const PROJECT_STATUSES: [&str; 5] = ["Estudo", "Planejamento", "Execução", "Concluído", "Suspenso"];
pub const AGENCY_DECISIONS: [&str; 4] = ["Não Requerida", "Em Análise", "Aprovada", "Negada"];
pub const PERMIT_DECISIONS: [&str; 4] = ["Não Requerido", "Em Análise", "Aprovada", "Negada"];

/// Shares of the funding sources may add up to at most this many percent.
const MAX_FUNDING_SUM: f64 = 100.0001;

/// A validated project, with exactly the columns of the project table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProjectRecord {
	pub nome_projeto: String,
	pub modal_transporte: String,
	pub status_projeto: String,
	pub descricao_projeto: Option<String>,

	pub orgao_responsavel: Option<String>,
	pub gerente_projeto: Option<String>,
	pub empresa_executora: Option<String>,
	pub consultoria: Option<String>,

	pub data_inicio: Option<String>,
	pub data_termino: Option<String>,
	pub duracao_meses: Option<i64>,

	pub investimento_total: Option<f64>,
	pub valor_executado: Option<f64>,
	pub fonte_gov_federal: Option<f64>,
	pub fonte_iniciativa_priv: Option<f64>,
	pub fonte_gov_estadual: Option<f64>,

	pub estados_envolvidos: Option<String>,
	pub municipios_principais: Option<String>,
	pub latitude_central: Option<f64>,
	pub longitude_central: Option<f64>,

	pub licenca_ambiental: String,
	pub autorizacao_agencia: String,
	pub alvara_municipal: String,
	pub outras_licencas: Option<String>,

	pub empregos_gerados: Option<i64>,
	pub aumento_capacidade: Option<f64>,
	pub beneficios_socioambientais: Option<String>,
}

/// A project form after validation. `id` is set when an existing row is edited.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectSubmission {
	pub id: Option<String>,
	pub record: ProjectRecord,
}

impl ProjectRecord {
	/// Validates a project form and returns every problem found.
	pub fn from_form(input: &Value) -> Result<ProjectSubmission, Vec<FieldIssue>> {
		let mut form = FormReader::new(input);
		let id = form.optional_id("id");
		let record = ProjectRecord {
			nome_projeto: form.required_text("nome_projeto"),
			modal_transporte: form.required_text("modal_transporte"),
			status_projeto: form.choice("status_projeto", &PROJECT_STATUSES, None),
			descricao_projeto: form.optional_text("descricao_projeto"),

			orgao_responsavel: form.optional_text("orgao_responsavel"),
			gerente_projeto: form.optional_text("gerente_projeto"),
			empresa_executora: form.optional_text("empresa_executora"),
			consultoria: form.optional_text("consultoria"),

			data_inicio: form.date("data_inicio"),
			data_termino: form.date("data_termino"),
			duracao_meses: form.integer("duracao_meses"),

			investimento_total: form.number("investimento_total"),
			valor_executado: form.number("valor_executado"),
			fonte_gov_federal: form.percent("fonte_gov_federal"),
			fonte_iniciativa_priv: form.percent("fonte_iniciativa_priv"),
			fonte_gov_estadual: form.percent("fonte_gov_estadual"),

			estados_envolvidos: form.optional_text("estados_envolvidos"),
			municipios_principais: form.optional_text("municipios_principais"),
			latitude_central: form.coordinate("latitude_central", 90.0),
			longitude_central: form.coordinate("longitude_central", 180.0),

			licenca_ambiental: form.choice("licenca_ambiental", &AGENCY_DECISIONS, None),
			autorizacao_agencia: form.choice("autorizacao_agencia", &AGENCY_DECISIONS, None),
			alvara_municipal: form.choice("alvara_municipal", &PERMIT_DECISIONS, None),
			outras_licencas: form.optional_text("outras_licencas"),

			empregos_gerados: form.integer("empregos_gerados"),
			aumento_capacidade: form.number("aumento_capacidade"),
			beneficios_socioambientais: form.optional_text("beneficios_socioambientais"),
		};

		if record.funding_sum() > MAX_FUNDING_SUM {
			form.reject("fontes", "funding sources must not add up to more than 100%");
		}

		form.finish(ProjectSubmission { id, record })
	}

	/// Sum of the federal, private and state funding shares, in percent.
	pub fn funding_sum(&self) -> f64 {
		[
			self.fonte_gov_federal,
			self.fonte_iniciativa_priv,
			self.fonte_gov_estadual,
		]
		.iter()
		.flatten()
		.sum()
	}

	/// The record as a table row. Absent optional values become `null`.
	pub fn to_row(&self) -> Result<Map<String, Value>> {
		match serde_json::to_value(self)? {
			Value::Object(row) => Ok(row),
			other => bail!("project record serialized to {other}, expected an object"),
		}
	}
}
