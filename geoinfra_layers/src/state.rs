//! The load-cycle state machine behind the map.
//!
//! ```text
//! Idle ──reload──▶ Loading ──settled──▶ Aggregating ──▶ Ready
//!                     │
//!                     └──teardown──▶ Cancelled
//! ```
//!
//! Every cycle carries a generation number and runs as its own task, so it settles even when
//! the caller that started it goes away. A cycle only writes its results while its generation
//! is still the current one and its token has not been cancelled. The token is released when
//! the cycle enters `Aggregating`; from then on only a newer cycle can stop it.

use crate::{LayerDescriptor, LayerLoader, LoadOutcome, LoadedLayers, aggregate_viewport};
use geoinfra_core::Viewport;
use std::sync::Arc;
use tokio::sync::{RwLock, watch};
use tokio_util::sync::CancellationToken;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadPhase {
	Idle,
	Loading,
	Aggregating,
	Ready,
	Cancelled,
}

impl LoadPhase {
	fn is_settled(self) -> bool {
		matches!(self, LoadPhase::Ready | LoadPhase::Cancelled)
	}
}

/// A consistent view of the map state.
#[derive(Clone, Debug)]
pub struct MapSnapshot {
	pub phase: LoadPhase,
	pub generation: u64,
	pub layers: Option<Arc<LoadedLayers>>,
	pub viewport: Option<Viewport>,
}

#[derive(Debug)]
struct MapState {
	phase: LoadPhase,
	generation: u64,
	token: Option<CancellationToken>,
	layers: Option<Arc<LoadedLayers>>,
	viewport: Option<Viewport>,
}

impl MapState {
	fn new() -> MapState {
		MapState {
			phase: LoadPhase::Idle,
			generation: 0,
			token: None,
			layers: None,
			viewport: None,
		}
	}

	fn snapshot(&self) -> MapSnapshot {
		MapSnapshot {
			phase: self.phase,
			generation: self.generation,
			layers: self.layers.clone(),
			viewport: self.viewport,
		}
	}

	/// Enters `Loading` with a new generation, cancelling the previous token.
	fn start(&mut self, token: CancellationToken) -> u64 {
		if let Some(previous) = self.token.replace(token) {
			previous.cancel();
		}
		self.generation += 1;
		self.phase = LoadPhase::Loading;
		self.generation
	}

	/// Enters `Aggregating` and releases the token. False if the cycle is stale.
	fn begin_aggregating(&mut self, generation: u64, token: &CancellationToken) -> bool {
		if self.generation != generation || token.is_cancelled() {
			return false;
		}
		self.token = None;
		self.phase = LoadPhase::Aggregating;
		true
	}

	/// Writes the results of `generation`. False if a newer cycle started meanwhile.
	fn finish(&mut self, generation: u64, layers: Arc<LoadedLayers>, viewport: Viewport) -> bool {
		if self.generation != generation {
			return false;
		}
		self.layers = Some(layers);
		self.viewport = Some(viewport);
		self.phase = LoadPhase::Ready;
		true
	}

	/// Cancels a cycle that is still loading. Results already written stay.
	fn cancel(&mut self) -> bool {
		match self.token.take() {
			Some(token) => {
				token.cancel();
				self.phase = LoadPhase::Cancelled;
				true
			}
			None => false,
		}
	}
}

/// Owns the loaded layers and the cycle that produces them. Clones share state.
#[derive(Clone, Debug)]
pub struct LayerMap {
	loader: Arc<LayerLoader>,
	state: Arc<RwLock<MapState>>,
	updates: Arc<watch::Sender<MapSnapshot>>,
}

impl LayerMap {
	pub fn new(loader: LayerLoader) -> LayerMap {
		let state = MapState::new();
		let (updates, _) = watch::channel(state.snapshot());
		LayerMap {
			loader: Arc::new(loader),
			state: Arc::new(RwLock::new(state)),
			updates: Arc::new(updates),
		}
	}

	pub fn descriptors(&self) -> &[LayerDescriptor] {
		self.loader.layers()
	}

	pub async fn snapshot(&self) -> MapSnapshot {
		self.state.read().await.snapshot()
	}

	/// Starts a new load cycle, cancelling the one still loading, and waits until the map
	/// settles.
	///
	/// If an even newer cycle takes over meanwhile, its result is returned instead. Returns
	/// `None` if the cycle was cancelled by [`teardown`](Self::teardown).
	pub async fn reload(&self) -> Option<MapSnapshot> {
		let generation = self.start_cycle().await;
		let mut updates = self.updates.subscribe();
		let settled = updates
			.wait_for(|snapshot| snapshot.generation >= generation && snapshot.phase.is_settled())
			.await
			.ok()?;
		(settled.phase == LoadPhase::Ready).then(|| MapSnapshot::clone(&settled))
	}

	/// Cancels the running cycle, if it is still loading. Results already written stay.
	pub async fn teardown(&self) {
		let mut state = self.state.write().await;
		if state.cancel() {
			log::debug!("load cycle {} cancelled", state.generation);
			self.publish(&state);
		}
	}

	async fn start_cycle(&self) -> u64 {
		let token = CancellationToken::new();
		let generation = {
			let mut state = self.state.write().await;
			let generation = state.start(token.clone());
			self.publish(&state);
			generation
		};
		log::debug!("starting load cycle {generation}");
		tokio::spawn(self.clone().run_cycle(generation, token));
		generation
	}

	async fn run_cycle(self, generation: u64, token: CancellationToken) {
		let layers = match self.loader.load(&token).await {
			LoadOutcome::Completed(layers) => Arc::new(layers),
			LoadOutcome::Cancelled => return,
		};

		{
			let mut state = self.state.write().await;
			if !state.begin_aggregating(generation, &token) {
				log::debug!("load cycle {generation} is stale, results dropped");
				return;
			}
			self.publish(&state);
		}

		let viewport = aggregate_viewport(&layers);

		let mut state = self.state.write().await;
		if state.finish(generation, layers, viewport) {
			log::debug!("load cycle {generation} ready, viewport {viewport:?}");
			self.publish(&state);
		} else {
			log::debug!("load cycle {generation} was superseded while aggregating");
		}
	}

	/// Called with the state lock held, so updates arrive in order.
	fn publish(&self, state: &MapState) {
		self.updates.send_replace(state.snapshot());
	}
}
