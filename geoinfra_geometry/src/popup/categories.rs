use super::PopupTemplate;

pub fn railway_popup() -> PopupTemplate {
	PopupTemplate::new("Ferrovia")
		.field("CodigoLinh", &["CodigoLinh"])
		.field("CodigoFerr", &["CodigoFerr"])
}

pub fn highway_popup() -> PopupTemplate {
	PopupTemplate::new("Rodovia")
		.field("ID CIDE", &["id_cide"])
		.field("CodigoFerr", &["CodigoFerr"])
}

pub fn port_popup() -> PopupTemplate {
	PopupTemplate::new("Porto")
		.field("Código", &["cdi_tuaria"])
		.field("Nome", &["nome", "Name"])
		.field("Classificação", &["tipo"])
		.link("Website", "modalidade")
		.field("Empresa", &["companhia"])
}

pub fn airport_popup() -> PopupTemplate {
	PopupTemplate::new("Aeroporto").fields("Nome", &[&["nome", "Name"], &["códigooac"]])
}

pub fn pipeline_popup() -> PopupTemplate {
	PopupTemplate::new("Dutovia").field("Nome", &["nome", "Name"])
}

pub fn economic_support_popup() -> PopupTemplate {
	PopupTemplate::new("Apoio Econômico").field("Nome", &["nome", "Name"])
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{GeoProperties, popup::PopupFormatter};
	use pretty_assertions::assert_eq;
	use serde_json::json;

	#[test]
	fn port_popup_with_all_fields() {
		let p = json!({
			"cdi_tuaria": "BRSSZ",
			"Name": "Santos",
			"tipo": "Porto Público",
			"modalidade": "https://www.portodesantos.com.br",
			"companhia": "SPA"
		});
		let html = port_popup().popup(&GeoProperties::new(p.as_object()));
		assert_eq!(
			html,
			"<b>Porto</b><br/><b>Código:</b> BRSSZ<br/><b>Nome:</b> Santos<br/><b>Classificação:</b> Porto Público<br/><b>Website:</b> <a href=\"https://www.portodesantos.com.br/\" target=\"_blank\" rel=\"noopener\">https://www.portodesantos.com.br/</a><br/><b>Empresa:</b> SPA"
		);
	}

	#[test]
	fn missing_values_render_empty() {
		assert_eq!(
			railway_popup().popup(&GeoProperties::default()),
			"<b>Ferrovia</b><br/><b>CodigoLinh:</b> <br/><b>CodigoFerr:</b> "
		);
		let p = json!({"id_cide": 101, "CodigoFerr": null});
		assert_eq!(
			highway_popup().popup(&GeoProperties::new(p.as_object())),
			"<b>Rodovia</b><br/><b>ID CIDE:</b> 101<br/><b>CodigoFerr:</b> "
		);
	}

	#[test]
	fn titles() {
		assert_eq!(airport_popup().title(), "Aeroporto");
		assert_eq!(pipeline_popup().title(), "Dutovia");
		assert_eq!(economic_support_popup().title(), "Apoio Econômico");
	}
}
