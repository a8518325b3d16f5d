//! HTTP handlers and small response helpers.
//!
//! API responses are JSON objects with an `ok` flag and either `id`, `data` or `error`.
//! CORS headers are left to the `CorsLayer`.

use axum::{
	body::{Body, Bytes},
	extract::{Path, Query, State},
	http::{HeaderValue, StatusCode, Uri, header},
	response::Response,
};
use geoinfra_layers::{LayerMap, MapView};
use geoinfra_records::{
	AssetFilter, AssetService, ProjectFilter, ProjectService, QueryOutcome, SubmitOutcome, store::RecordStore,
};
use percent_encoding::percent_decode_str;
use serde::Serialize;
use serde_json::{Value, json};
use std::{
	path::{Path as FsPath, PathBuf},
	sync::Arc,
};

/// Everything the handlers share.
#[derive(Clone, Debug)]
pub struct AppState {
	pub assets: AssetService,
	pub projects: ProjectService,
	pub map: LayerMap,
	pub static_folder: Option<Arc<PathBuf>>,
}

impl AppState {
	pub fn new(store: RecordStore, map: LayerMap, static_folder: Option<PathBuf>) -> AppState {
		AppState {
			assets: AssetService::new(store.clone()),
			projects: ProjectService::new(store),
			map,
			static_folder: static_folder.map(Arc::new),
		}
	}
}

pub async fn create_asset(State(state): State<AppState>, body: Bytes) -> Response<Body> {
	log::debug!("handle asset submission");
	match parse_body(&body) {
		Some(input) => submit_response(state.assets.submit(&input).await),
		None => internal_error(),
	}
}

pub async fn list_assets(State(state): State<AppState>, Query(filter): Query<AssetFilter>) -> Response<Body> {
	log::debug!("handle asset list: {filter:?}");
	list_response(state.assets.list(&filter).await)
}

pub async fn get_asset(State(state): State<AppState>, Path(id): Path<String>) -> Response<Body> {
	log::debug!("handle asset request: {id}");
	get_response(state.assets.get(&id).await)
}

pub async fn create_project(State(state): State<AppState>, body: Bytes) -> Response<Body> {
	log::debug!("handle project submission");
	match parse_body(&body) {
		Some(input) => submit_response(state.projects.submit(&input).await),
		None => internal_error(),
	}
}

pub async fn list_projects(State(state): State<AppState>, Query(filter): Query<ProjectFilter>) -> Response<Body> {
	log::debug!("handle project list: {filter:?}");
	list_response(state.projects.list(&filter).await)
}

pub async fn get_project(State(state): State<AppState>, Path(id): Path<String>) -> Response<Body> {
	log::debug!("handle project request: {id}");
	get_response(state.projects.get(&id).await)
}

/// Runs a fresh load cycle and returns every layer with its popups plus the viewport.
///
/// Concurrent requests share the newest cycle. Only a cycle stopped by shutdown gives 503.
pub async fn get_layers(State(state): State<AppState>) -> Response<Body> {
	log::debug!("handle layers request");
	let cancelled = || {
		log::debug!("send 503 to layers request: load cycle was cancelled");
		json_with(
			StatusCode::SERVICE_UNAVAILABLE,
			&json!({"ok": false, "error": "load cycle was cancelled"}),
		)
	};

	let Some(snapshot) = state.map.reload().await else {
		return cancelled();
	};
	let (Some(layers), Some(viewport)) = (snapshot.layers, snapshot.viewport) else {
		return cancelled();
	};
	json_with(StatusCode::OK, &MapView::new(state.map.descriptors(), &layers, viewport))
}

/// Serves files from the static folder. Directory urls get their `index.html`.
pub async fn serve_static(uri: Uri, State(state): State<AppState>) -> Response<Body> {
	log::debug!("handle static request: {}", uri.path());
	let Some(folder) = state.static_folder.as_deref() else {
		return error_404();
	};
	let Some(path) = resolve_static_path(folder, uri.path()) else {
		log::debug!("send 404 to static request outside the folder: {}", uri.path());
		return error_404();
	};

	match tokio::fs::metadata(&path).await {
		Ok(metadata) if metadata.is_file() => (),
		_ => {
			log::debug!("send 404 to static request: {}", uri.path());
			return error_404();
		}
	}

	match tokio::fs::read(&path).await {
		Ok(content) => {
			let mime = mime_guess::from_path(&path).first_or_octet_stream();
			respond(StatusCode::OK, mime.as_ref(), content)
		}
		Err(err) => {
			let err = anyhow::Error::from(err).context(format!("reading static file {path:?}"));
			log::warn!("send 500 to static request: {}. Error:\n{}", uri.path(), format_error_chain(&err));
			error_500()
		}
	}
}

/// Maps a url path onto a file below `folder`. `None` if it would leave the folder.
fn resolve_static_path(folder: &FsPath, url_path: &str) -> Option<PathBuf> {
	let decoded = percent_decode_str(url_path).decode_utf8().ok()?;
	let mut path = folder.to_path_buf();
	for segment in decoded.split('/').filter(|s| !s.is_empty()) {
		if segment == "." || segment == ".." || segment.contains('\\') {
			return None;
		}
		path.push(segment);
	}
	if decoded.ends_with('/') {
		path.push("index.html");
	}
	Some(path)
}

fn parse_body(body: &[u8]) -> Option<Value> {
	match serde_json::from_slice(body) {
		Ok(value) => Some(value),
		Err(err) => {
			log::warn!("could not read request body: {err}");
			None
		}
	}
}

fn submit_response(outcome: SubmitOutcome) -> Response<Body> {
	match outcome {
		SubmitOutcome::Saved(id) => json_with(StatusCode::CREATED, &json!({"ok": true, "id": id})),
		SubmitOutcome::Invalid(issues) => json_with(StatusCode::BAD_REQUEST, &json!({"ok": false, "error": issues})),
		SubmitOutcome::Rejected(message) => {
			json_with(StatusCode::BAD_REQUEST, &json!({"ok": false, "error": message}))
		}
	}
}

fn list_response(outcome: QueryOutcome) -> Response<Body> {
	rows_response(outcome, StatusCode::BAD_REQUEST)
}

fn get_response(outcome: QueryOutcome) -> Response<Body> {
	rows_response(outcome, StatusCode::INTERNAL_SERVER_ERROR)
}

fn rows_response(outcome: QueryOutcome, failure: StatusCode) -> Response<Body> {
	match outcome {
		QueryOutcome::Rows(rows) => json_with(StatusCode::OK, &json!({"ok": true, "data": rows})),
		QueryOutcome::Failed(message) => json_with(failure, &json!({"ok": false, "error": message})),
	}
}

fn internal_error() -> Response<Body> {
	json_with(
		StatusCode::INTERNAL_SERVER_ERROR,
		&json!({"ok": false, "error": "internal error"}),
	)
}

// --- small helpers -----------------------------------------------------------

pub fn format_error_chain(err: &anyhow::Error) -> String {
	let mut result = err.to_string();
	for (i, cause) in err.chain().skip(1).enumerate() {
		if i == 0 {
			result.push_str("\n  Caused by:");
		}
		result.push_str(&format!("\n    {cause}"));
	}
	result
}

fn respond(status: StatusCode, content_type: &str, body: impl Into<Body>) -> Response<Body> {
	let mut response = Response::new(body.into());
	*response.status_mut() = status;
	if let Ok(value) = HeaderValue::from_str(content_type) {
		response.headers_mut().insert(header::CONTENT_TYPE, value);
	}
	response
}

pub fn json_with<T: Serialize>(status: StatusCode, value: &T) -> Response<Body> {
	match serde_json::to_vec(value) {
		Ok(body) => respond(status, "application/json", body),
		Err(err) => {
			log::error!("could not serialize response: {err}");
			error_500()
		}
	}
}

pub fn error_404() -> Response<Body> {
	respond(StatusCode::NOT_FOUND, "text/plain; charset=utf-8", "Not Found")
}

pub fn error_500() -> Response<Body> {
	respond(
		StatusCode::INTERNAL_SERVER_ERROR,
		"text/plain; charset=utf-8",
		"Internal Server Error",
	)
}
