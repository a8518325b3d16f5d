use super::{escape_html, safe_url};
use crate::GeoProperties;
use serde_json::Value;
use std::fmt::Debug;

/// Renders the markup shown for a feature.
pub trait PopupFormatter: Debug + Send + Sync {
	/// HTML for the popup of a feature with these properties.
	fn popup(&self, properties: &GeoProperties) -> String;

	/// Plain label shown on hover: `nome`, else `Name`, else empty. HTML-escaped.
	fn tooltip(&self, properties: &GeoProperties) -> String {
		escape_html(&properties.text(&["nome", "Name"]))
	}
}

#[derive(Clone, Debug, PartialEq)]
enum PopupRow {
	/// `label: value1 - value2 …`, each value taken from the first present key of its list.
	Text {
		label: &'static str,
		values: Vec<&'static [&'static str]>,
	},
	/// A link row, left out entirely unless the property is a web address.
	Link { label: &'static str, key: &'static str },
}

/// A popup made of a bold title and labelled rows.
///
/// ```
/// use geoinfra_geometry::{GeoProperties, popup::{PopupFormatter, PopupTemplate}};
///
/// let template = PopupTemplate::new("Ferrovia").field("CodigoFerr", &["CodigoFerr"]);
/// assert_eq!(template.popup(&GeoProperties::default()), "<b>Ferrovia</b><br/><b>CodigoFerr:</b> ");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct PopupTemplate {
	title: &'static str,
	rows: Vec<PopupRow>,
}

impl PopupTemplate {
	pub fn new(title: &'static str) -> PopupTemplate {
		PopupTemplate { title, rows: Vec::new() }
	}

	/// Adds a row whose value is taken from the first present key of `keys`.
	pub fn field(self, label: &'static str, keys: &'static [&'static str]) -> PopupTemplate {
		self.fields(label, &[keys])
	}

	/// Adds a row showing several values joined by `" - "`.
	pub fn fields(mut self, label: &'static str, values: &[&'static [&'static str]]) -> PopupTemplate {
		self.rows.push(PopupRow::Text {
			label,
			values: values.to_vec(),
		});
		self
	}

	/// Adds a link row for the web address in `key`.
	pub fn link(mut self, label: &'static str, key: &'static str) -> PopupTemplate {
		self.rows.push(PopupRow::Link { label, key });
		self
	}

	pub fn title(&self) -> &str {
		self.title
	}
}

impl PopupFormatter for PopupTemplate {
	fn popup(&self, properties: &GeoProperties) -> String {
		let mut html = format!("<b>{}</b>", escape_html(self.title));
		for row in &self.rows {
			match row {
				PopupRow::Text { label, values } => {
					let value = values
						.iter()
						.map(|keys| properties.text(keys))
						.collect::<Vec<_>>()
						.join(" - ");
					html.push_str(&format!("<br/><b>{}:</b> {}", escape_html(label), escape_html(&value)));
				}
				PopupRow::Link { label, key } => {
					if let Some(url) = properties.get(key).and_then(Value::as_str).and_then(safe_url) {
						let url = escape_html(&url);
						html.push_str(&format!(
							"<br/><b>{}:</b> <a href=\"{url}\" target=\"_blank\" rel=\"noopener\">{url}</a>",
							escape_html(label)
						));
					}
				}
			}
		}
		html
	}
}
