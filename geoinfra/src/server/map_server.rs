use super::{
	cors::build_cors_layer,
	handlers::{AppState, format_error_chain},
	routes::build_router,
};
use crate::config::{Config, CorsConfig};
use anyhow::{Context, Result};
use axum::Router;
use geoinfra_core::io::get_data_source;
use geoinfra_layers::{EventBus, LayerLoader, LayerMap};
use tokio::sync::oneshot::Sender;

pub struct MapServer {
	address: String,
	state: AppState,
	cors: CorsConfig,
	exit_signal: Option<Sender<()>>,
}

impl MapServer {
	/// Wires the record store, the layer map and the static folder from `config`.
	pub fn from_config(config: &Config) -> Result<MapServer> {
		let timeout = config.data.timeout();
		let store = config.store.open(timeout).context("opening record store")?;

		let base = config
			.data
			.layer_base()
			.context("no data base configured: set data.base or data.folder")?;
		let source = get_data_source(&base, Some(timeout)).with_context(|| format!("opening data base '{base}'"))?;
		log::info!("reading {} layers from {}", config.layers.len(), source.get_name());

		let events = EventBus::new();
		events.subscribe(|event| log::info!("{event}"));
		let map = LayerMap::new(LayerLoader::new(source, config.layers.clone(), events));

		Ok(MapServer {
			address: config.server.address(),
			state: AppState::new(store, map, config.data.folder.clone()),
			cors: config.cors.clone(),
			exit_signal: None,
		})
	}

	pub fn router(&self) -> Result<Router> {
		Ok(build_router(self.state.clone()).layer(build_cors_layer(&self.cors)?))
	}

	pub async fn start(&mut self) -> Result<()> {
		if self.exit_signal.is_some() {
			self.stop().await;
		}

		log::info!("starting server");
		let router = self.router()?;

		let listener = tokio::net::TcpListener::bind(&self.address)
			.await
			.with_context(|| format!("binding to {}", self.address))?;
		eprintln!("server starts listening on {}", self.address);

		let (tx, rx) = tokio::sync::oneshot::channel::<()>();
		tokio::spawn(async move {
			let result = axum::serve(listener, router.into_make_service())
				.with_graceful_shutdown(async {
					rx.await.ok();
				})
				.await;
			if let Err(err) = result {
				log::error!("server stopped:\n{}", format_error_chain(&err.into()));
			}
		});

		self.exit_signal = Some(tx);
		Ok(())
	}

	/// Stops accepting requests and cancels a running load cycle.
	pub async fn stop(&mut self) {
		let Some(exit_signal) = self.exit_signal.take() else {
			return;
		};
		log::info!("stopping server");
		self.state.map.teardown().await;
		let _ = exit_signal.send(());
	}
}
