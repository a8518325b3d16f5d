//! Router composition: which path goes to which handler.

use super::handlers::{
	AppState, create_asset, create_project, get_asset, get_layers, get_project, list_assets, list_projects,
	serve_static,
};
use axum::{Router, routing::get};

pub fn build_router(state: AppState) -> Router {
	Router::new()
		.route("/status", get(|| async { "ready!" }))
		.route("/api/ativos", get(list_assets).post(create_asset))
		.route("/api/ativos/{id}", get(get_asset))
		.route("/api/projetos", get(list_projects).post(create_project))
		.route("/api/projetos/{id}", get(get_project))
		.route("/api/layers", get(get_layers))
		.fallback(get(serve_static))
		.with_state(state)
}

#[cfg(test)]
mod tests {
	use super::*;
	use axum::{
		body::{Body, to_bytes},
		http::{Method, Request, StatusCode, header},
	};
	use anyhow::Result;
	use async_trait::async_trait;
	use geoinfra_core::{
		Blob,
		io::{BlobDataSource, DataReader, DataReaderTrait, DataSource, DataSourceTrait},
	};
	use geoinfra_layers::{EventBus, LayerCategory, LayerDescriptor, LayerLoader, LayerMap};
	use geoinfra_records::store::MemoryStore;
	use pretty_assertions::assert_eq;
	use serde_json::{Value, json};
	use std::{fs, path::PathBuf, sync::Arc, time::Duration};
	use tower::ServiceExt;

	const PORTS: &str = r#"{"type":"FeatureCollection","features":[
		{"type":"Feature","geometry":{"type":"Point","coordinates":[-40.0,-20.0]},"properties":{"nome":"Tubarão"}},
		{"type":"Feature","geometry":{"type":"Point","coordinates":[-48.0,-26.0]},"properties":{"nome":"Itajaí"}},
		{"type":"Feature","geometry":{"type":"Point","coordinates":[]},"properties":{"nome":"Sem posição"}}
	]}"#;

	/// Answers from its blobs after a delay.
	#[derive(Debug)]
	struct SlowSource {
		blobs: BlobDataSource,
		delay: Duration,
	}

	#[derive(Debug)]
	struct SlowReader {
		inner: DataReader,
		delay: Duration,
	}

	#[async_trait]
	impl DataReaderTrait for SlowReader {
		async fn read_all(&self) -> Result<Blob> {
			tokio::time::sleep(self.delay).await;
			self.inner.read_all().await
		}

		fn get_name(&self) -> &str {
			self.inner.get_name()
		}
	}

	impl DataSourceTrait for SlowSource {
		fn get_reader(&self, path: &str) -> Result<DataReader> {
			Ok(Box::new(SlowReader {
				inner: self.blobs.get_reader(path)?,
				delay: self.delay,
			}))
		}

		fn get_name(&self) -> &str {
			"slow"
		}
	}

	fn ports_source() -> BlobDataSource {
		BlobDataSource::new().with("/dados/Portos/Portos.geojson", PORTS)
	}

	fn app(static_folder: Option<PathBuf>) -> Router {
		let map = layer_map(Arc::new(ports_source()));
		build_router(AppState::new(Arc::new(MemoryStore::new()), map, static_folder))
	}

	fn slow_app(delay: Duration) -> (Router, LayerMap) {
		let map = layer_map(Arc::new(SlowSource {
			blobs: ports_source(),
			delay,
		}));
		let router = build_router(AppState::new(Arc::new(MemoryStore::new()), map.clone(), None));
		(router, map)
	}

	fn layer_map(source: DataSource) -> LayerMap {
		let layers = vec![
			LayerDescriptor::new(
				"portos",
				"Portos",
				"/dados/Portos/Portos.geojson",
				"#2800b8",
				LayerCategory::Port,
			),
			LayerDescriptor::new(
				"aeroportos",
				"Aeroportos",
				"/dados/Aeroportos/Aeroportos.geojson",
				"#505050",
				LayerCategory::Airport,
			),
		];
		LayerMap::new(LayerLoader::new(source, layers, EventBus::new()))
	}

	async fn call(app: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, String) {
		let request = Request::builder()
			.method(method)
			.uri(uri)
			.header(header::CONTENT_TYPE, "application/json")
			.body(Body::from(body.to_string()))
			.unwrap();
		let response = app.clone().oneshot(request).await.unwrap();
		let status = response.status();
		let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
		(status, String::from_utf8(bytes.to_vec()).unwrap())
	}

	async fn call_json(app: &Router, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
		let (status, text) = call(app, method, uri, body).await;
		(status, serde_json::from_str(&text).unwrap())
	}

	fn asset(name: &str, modal: &str) -> String {
		json!({
			"tipo_modal": modal, "nome_ativo": name, "estado": "ES", "municipio": "Serra",
			"capacidade_extensao": "120 km", "latitude": "-20,12", "longitude": "-40,3"
		})
		.to_string()
	}

	#[tokio::test]
	async fn status() {
		assert_eq!(
			call(&app(None), Method::GET, "/status", "").await,
			(StatusCode::OK, "ready!".to_string())
		);
	}

	#[tokio::test]
	async fn asset_create_list_and_get() {
		let app = app(None);

		let (status, body) = call_json(&app, Method::POST, "/api/ativos", &asset("BR-101", "Rodoviário")).await;
		assert_eq!(status, StatusCode::CREATED);
		assert_eq!(body["ok"], json!(true));
		let id = body["id"].as_str().unwrap().to_string();

		call_json(&app, Method::POST, "/api/ativos", &asset("Porto de Vitória", "Portuário")).await;

		let (status, body) = call_json(&app, Method::GET, "/api/ativos", "").await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["data"].as_array().unwrap().len(), 2);

		let (_, body) = call_json(&app, Method::GET, "/api/ativos?modal=Portu%C3%A1rio", "").await;
		assert_eq!(body["data"][0]["nome_ativo"], json!("Porto de Vitória"));

		let (_, body) = call_json(&app, Method::GET, "/api/ativos?q=br-", "").await;
		assert_eq!(body["data"].as_array().unwrap().len(), 1);

		let (status, body) = call_json(&app, Method::GET, &format!("/api/ativos/{id}"), "").await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body["data"][0]["latitude"], json!(-20.12));
		assert_eq!(body["data"][0]["status"], json!("Ativo"));
	}

	#[tokio::test]
	async fn invalid_asset_lists_issues() {
		let (status, body) = call_json(&app(None), Method::POST, "/api/ativos", r#"{"nome_ativo":"X"}"#).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(body["ok"], json!(false));
		let paths: Vec<&str> = body["error"]
			.as_array()
			.unwrap()
			.iter()
			.map(|issue| issue["path"].as_str().unwrap())
			.collect();
		assert_eq!(paths, ["tipo_modal", "estado", "municipio", "capacidade_extensao"]);
	}

	#[tokio::test]
	async fn unreadable_body_is_an_internal_error() {
		let (status, body) = call_json(&app(None), Method::POST, "/api/projetos", "{not json").await;
		assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
		assert_eq!(body, json!({"ok": false, "error": "internal error"}));
	}

	#[tokio::test]
	async fn unknown_query_parameters_are_ignored() {
		let (status, body) = call_json(&app(None), Method::GET, "/api/projetos?_=1718&color=red", "").await;
		assert_eq!(status, StatusCode::OK);
		assert_eq!(body, json!({"ok": true, "data": []}));
	}

	#[tokio::test]
	async fn project_funding_over_limit() {
		let form = json!({
			"nome_projeto": "Contorno de Vitória",
			"modal_transporte": "Rodoviário",
			"status_projeto": "Planejamento",
			"fonte_gov_federal": "60",
			"fonte_iniciativa_priv": "30",
			"fonte_gov_estadual": "20",
			"licenca_ambiental": "Aprovada",
			"autorizacao_agencia": "Não Requerida",
			"alvara_municipal": "Não Requerido"
		});
		let app = app(None);
		let (status, body) = call_json(&app, Method::POST, "/api/projetos", &form.to_string()).await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
		assert_eq!(body["error"][0]["path"], json!("fontes"));

		let (_, body) = call_json(&app, Method::GET, "/api/projetos", "").await;
		assert_eq!(body, json!({"ok": true, "data": []}));
	}

	#[tokio::test]
	async fn layers_report_loaded_and_failed() {
		let (status, body) = call_json(&app(None), Method::GET, "/api/layers", "").await;
		assert_eq!(status, StatusCode::OK);

		let ports = &body["layers"][0];
		assert_eq!(ports["id"], json!("portos"));
		assert_eq!(ports["loaded"], json!(true));
		assert_eq!(ports["count"], json!(2));
		assert_eq!(ports["dropped"], json!(1));
		assert_eq!(ports["tooltips"], json!(["Tubarão", "Itajaí"]));
		assert_eq!(ports["data"]["type"], json!("FeatureCollection"));

		let airports = &body["layers"][1];
		assert_eq!(airports["loaded"], json!(false));
		assert_eq!(airports["data"], Value::Null);

		assert_eq!(body["viewport"]["type"], json!("bounds"));
	}

	#[tokio::test]
	async fn concurrent_layer_requests_both_succeed() {
		let (app, _) = slow_app(Duration::from_millis(100));
		let (first, second) = tokio::join!(call_json(&app, Method::GET, "/api/layers", ""), async {
			tokio::time::sleep(Duration::from_millis(20)).await;
			call_json(&app, Method::GET, "/api/layers", "").await
		});

		assert_eq!(first.0, StatusCode::OK);
		assert_eq!(second.0, StatusCode::OK);
		assert_eq!(first.1["layers"][0]["count"], json!(2));
		assert_eq!(first.1, second.1);
	}

	#[tokio::test]
	async fn layers_during_shutdown() {
		let (app, map) = slow_app(Duration::from_secs(60));
		let request = tokio::spawn(async move { call_json(&app, Method::GET, "/api/layers", "").await });
		while map.snapshot().await.generation == 0 {
			tokio::time::sleep(Duration::from_millis(5)).await;
		}
		map.teardown().await;

		let (status, body) = request.await.unwrap();
		assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
		assert_eq!(body, json!({"ok": false, "error": "load cycle was cancelled"}));
	}

	#[tokio::test]
	async fn static_files() {
		let dir = tempfile::tempdir().unwrap();
		fs::create_dir_all(dir.path().join("dados/Rodoviário")).unwrap();
		fs::write(dir.path().join("index.html"), "<h1>painel</h1>").unwrap();
		fs::write(dir.path().join("dados/Rodoviário/federais.json"), "{}").unwrap();
		let app = app(Some(dir.path().to_path_buf()));

		assert_eq!(
			call(&app, Method::GET, "/", "").await,
			(StatusCode::OK, "<h1>painel</h1>".to_string())
		);

		let request = Request::builder()
			.uri("/dados/Rodovi%C3%A1rio/federais.json")
			.body(Body::empty())
			.unwrap();
		let response = app.clone().oneshot(request).await.unwrap();
		assert_eq!(response.status(), StatusCode::OK);
		assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

		assert_eq!(call(&app, Method::GET, "/dados/", "").await.0, StatusCode::NOT_FOUND);
		assert_eq!(call(&app, Method::GET, "/missing.txt", "").await.0, StatusCode::NOT_FOUND);
	}

	#[tokio::test]
	async fn no_static_folder() {
		assert_eq!(call(&app(None), Method::GET, "/index.html", "").await.0, StatusCode::NOT_FOUND);
	}
}
