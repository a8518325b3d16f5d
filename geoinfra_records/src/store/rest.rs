use super::{RecordStoreTrait, Row};
use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use reqwest::{
	Client, Method, RequestBuilder, Response, Url,
	header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};
use serde_json::Value;
use std::{collections::BTreeMap, time::Duration};

/// A store behind a PostgREST-style API (`<base>/rest/v1/<table>`).
///
/// Inserts ask for the stored representation to learn the new id. Error responses are
/// reported with the `message` of their JSON body when there is one.
#[derive(Debug)]
pub struct RestStore {
	base: String,
	client: Client,
}

impl RestStore {
	/// `headers` are sent with every request, typically `apikey` and `Authorization`.
	pub fn new(base: &str, headers: &BTreeMap<String, String>, timeout: Option<Duration>) -> Result<RestStore> {
		let url = Url::parse(base).with_context(|| format!("parsing store URL '{base}'"))?;
		match url.scheme() {
			"http" | "https" => (),
			other => bail!("unsupported URL scheme '{other}' in store URL '{base}'"),
		}

		let mut default_headers = HeaderMap::new();
		for (name, value) in headers {
			let name = HeaderName::from_bytes(name.as_bytes()).with_context(|| format!("invalid header name '{name}'"))?;
			let value = HeaderValue::from_str(value).with_context(|| format!("invalid value for header '{name}'"))?;
			default_headers.insert(name, value);
		}

		let mut builder = Client::builder().default_headers(default_headers);
		if let Some(timeout) = timeout {
			builder = builder.timeout(timeout);
		}

		Ok(RestStore {
			base: base.trim_end_matches('/').to_string(),
			client: builder.build().context("building HTTP client")?,
		})
	}

	fn table_url(&self, table: &str, query: &[(&str, String)]) -> Result<Url> {
		let mut url = Url::parse(&format!("{}/rest/v1/{table}", self.base))?;
		if !query.is_empty() {
			let mut pairs = url.query_pairs_mut();
			for (key, value) in query {
				pairs.append_pair(key, value);
			}
		}
		Ok(url)
	}

	fn request(&self, method: Method, url: Url) -> RequestBuilder {
		log::debug!("{method} {url}");
		self.client.request(method, url)
	}

	fn json_request(&self, method: Method, url: Url, row: &Row) -> Result<RequestBuilder> {
		Ok(self
			.request(method, url)
			.header(CONTENT_TYPE, "application/json")
			.body(serde_json::to_vec(row)?))
	}
}

/// Returns the body of a successful response, or fails with the store's error message.
async fn read_body(response: Response) -> Result<Value> {
	let status = response.status();
	let bytes = response.bytes().await.context("reading store response")?;

	if !status.is_success() {
		let message = serde_json::from_slice::<Value>(&bytes)
			.ok()
			.and_then(|body| body.get("message").and_then(Value::as_str).map(str::to_owned))
			.unwrap_or_else(|| format!("store responded with HTTP {}", status.as_u16()));
		bail!(message);
	}

	if bytes.is_empty() {
		return Ok(Value::Null);
	}
	serde_json::from_slice(&bytes).context("parsing store response")
}

fn into_rows(body: Value) -> Result<Vec<Row>> {
	match body {
		Value::Array(items) => items
			.into_iter()
			.map(|item| match item {
				Value::Object(row) => Ok(row),
				other => Err(anyhow!("expected a row object, got {other}")),
			})
			.collect(),
		other => bail!("expected an array of rows, got {other}"),
	}
}

#[async_trait]
impl RecordStoreTrait for RestStore {
	async fn insert(&self, table: &str, row: Row) -> Result<String> {
		let url = self.table_url(table, &[])?;
		let response = self
			.json_request(Method::POST, url, &row)?
			.header("Prefer", "return=representation")
			.send()
			.await
			.with_context(|| format!("inserting into '{table}'"))?;

		let rows = into_rows(read_body(response).await?)?;
		match rows.first().and_then(|row| row.get("id")) {
			Some(Value::String(id)) => Ok(id.clone()),
			Some(Value::Number(id)) => Ok(id.to_string()),
			_ => bail!("store did not return an id for the new row"),
		}
	}

	async fn update(&self, table: &str, id: &str, mut row: Row) -> Result<()> {
		row.remove("id");
		let url = self.table_url(table, &[("id", format!("eq.{id}"))])?;
		let response = self
			.json_request(Method::PATCH, url, &row)?
			.header("Prefer", "return=minimal")
			.send()
			.await
			.with_context(|| format!("updating '{table}'"))?;
		read_body(response).await?;
		Ok(())
	}

	async fn select(&self, table: &str, filters: &[(&str, &str)]) -> Result<Vec<Row>> {
		let mut query = vec![("select", "*".to_string())];
		query.extend(filters.iter().map(|(column, value)| (*column, format!("eq.{value}"))));
		let url = self.table_url(table, &query)?;
		let response = self
			.request(Method::GET, url)
			.send()
			.await
			.with_context(|| format!("selecting from '{table}'"))?;
		into_rows(read_body(response).await?)
	}

	fn get_name(&self) -> &str {
		&self.base
	}
}
