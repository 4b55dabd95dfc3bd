// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Café Demo Engine

pub mod types;
pub mod error;
pub mod config;
pub mod adapter;
pub mod accrual;
pub mod ledger;
pub mod swap;
pub mod wallet;
pub mod quest;
pub mod random;
pub mod feed;
pub mod graph;
pub mod view;
pub mod cafe;

pub use types::*;
pub use error::{CafeError, Result};
pub use config::{CafeConfig, QuestSpec};
pub use cafe::{Cafe, Collection};
pub use view::CafeView;

use wasm_bindgen::prelude::*;

use crate::feed::FeedGenerator;
use crate::graph::{GraphScene, SnapshotRenderer, WalletGraph};
use crate::random::SeededRandom;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

fn console(message: &str) {
    #[cfg(target_arch = "wasm32")]
    log(message);
    #[cfg(not(target_arch = "wasm32"))]
    tracing::info!(target: "console", "{message}");
}

fn js_err(e: CafeError) -> JsValue {
    tracing::warn!(error = %e, "operation rejected");
    JsValue::from_str(&e.user_message())
}

fn to_js<T: serde::Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

// ─── WASM Interface ──────────────────────────────────────────────────────────

/// Browser-facing wrapper: the café session plus its decorative feed and graph.
///
/// Timestamps are always supplied by the page (`Date.now()`), so the engine
/// has no clock of its own.
#[wasm_bindgen]
pub struct CafeApp {
    cafe: Cafe,
    feed: FeedGenerator<SeededRandom>,
    scene: GraphScene<SnapshotRenderer>,
    jitter_rng: SeededRandom,
}

impl CafeApp {
    /// Pure-Rust constructor shared by the wasm constructor and native callers.
    pub fn with_config(config: CafeConfig, seed: u64) -> Result<CafeApp> {
        let cafe = Cafe::new(config)?;
        let cfg = cafe.config().clone();

        let feed = FeedGenerator::new(
            SeededRandom::new(seed),
            cfg.feed_capacity,
            cfg.feed_min_delay_ms,
            cfg.feed_max_delay_ms,
        );
        let mut graph_rng = SeededRandom::new(seed.wrapping_add(1));
        let graph = WalletGraph::generate(&mut graph_rng, cfg.graph_nodes, cfg.graph_extra_edges, cfg.graph_radius);
        let scene = GraphScene::new(graph, SnapshotRenderer::default());

        Ok(CafeApp {
            cafe,
            feed,
            scene,
            jitter_rng: SeededRandom::new(seed.wrapping_add(2)),
        })
    }

    pub fn cafe(&self) -> &Cafe {
        &self.cafe
    }

    pub fn cafe_mut(&mut self) -> &mut Cafe {
        &mut self.cafe
    }

    pub fn feed(&self) -> &FeedGenerator<SeededRandom> {
        &self.feed
    }

    pub fn feed_mut(&mut self) -> &mut FeedGenerator<SeededRandom> {
        &mut self.feed
    }

    pub fn scene(&self) -> &GraphScene<SnapshotRenderer> {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut GraphScene<SnapshotRenderer> {
        &mut self.scene
    }
}

#[wasm_bindgen]
impl CafeApp {
    /// `config_json` may be empty to use the built-in demo settings.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>, seed: u32) -> std::result::Result<CafeApp, JsValue> {
        #[cfg(target_arch = "wasm32")]
        std::panic::set_hook(Box::new(console_error_panic_hook::hook));

        let config = match config_json.as_deref().map(str::trim) {
            Some(json) if !json.is_empty() => CafeConfig::from_json(json).map_err(js_err)?,
            _ => CafeConfig::default(),
        };
        CafeApp::with_config(config, seed as u64).map_err(js_err)
    }

    // Wallet

    pub fn toggle_wallet(&mut self) -> bool {
        self.cafe.toggle_wallet()
    }

    // Bar

    pub fn set_swap_input(&mut self, raw: &str) -> std::result::Result<JsValue, JsValue> {
        let quote = self.cafe.set_swap_input(raw).map_err(js_err)?;
        Ok(to_js(&quote))
    }

    pub fn buy_beans(&mut self) -> std::result::Result<JsValue, JsValue> {
        let transfer = self.cafe.buy_from_input().map_err(js_err)?;
        Ok(to_js(&transfer))
    }

    pub fn open_dex(&mut self) {
        self.cafe.open_dex();
    }

    // Brew

    pub fn start_brew(&mut self, now: f64) -> std::result::Result<(), JsValue> {
        self.cafe.start_brew(Timestamp::from_js(now)).map_err(js_err)
    }

    pub fn collect_brew(&mut self, now: f64) -> std::result::Result<JsValue, JsValue> {
        let collection = self.cafe.collect_brew(Timestamp::from_js(now)).map_err(js_err)?;
        Ok(to_js(&collection))
    }

    pub fn stop_brew(&mut self, now: f64) {
        self.cafe.stop_brew(Timestamp::from_js(now));
    }

    pub fn refresh(&mut self, now: f64) -> f64 {
        self.cafe.refresh(Timestamp::from_js(now))
    }

    pub fn brew_timer_active(&self) -> bool {
        self.cafe.brew_timer_active()
    }

    pub fn brew_refresh_interval_ms(&self) -> u32 {
        self.cafe.config().brew_refresh_interval_ms
    }

    // Quests

    pub fn start_quest(&mut self, id: u32) -> std::result::Result<(), JsValue> {
        self.cafe.start_quest(id).map_err(js_err)
    }

    pub fn claim_quest(&mut self, id: u32) -> std::result::Result<f64, JsValue> {
        self.cafe.claim_quest(id).map_err(js_err)
    }

    // Feed

    pub fn next_feed_event(&mut self, now: f64) -> JsValue {
        to_js(self.feed.generate(Timestamp::from_js(now)))
    }

    pub fn next_feed_delay_ms(&mut self) -> u32 {
        self.feed.next_delay_ms()
    }

    pub fn feed_log(&self) -> JsValue {
        to_js(self.feed.log())
    }

    // Graph

    pub fn graph(&self) -> JsValue {
        to_js(self.scene.renderer())
    }

    pub fn frame(&mut self, dt_ms: f32) -> JsValue {
        to_js(&self.scene.frame(dt_ms))
    }

    pub fn jitter(&mut self) {
        let amplitude = self.cafe.config().jitter_amplitude;
        self.scene.jitter(&mut self.jitter_rng, amplitude);
    }

    pub fn jitter_interval_ms(&self) -> u32 {
        self.cafe.config().jitter_interval_ms
    }

    // Presentation

    /// `sections` is an array of `[id, offsetTop]` pairs in page order.
    pub fn active_section(&self, scroll_y: f64, sections: JsValue) -> String {
        let sections: Vec<(String, f64)> = serde_wasm_bindgen::from_value(sections).unwrap_or_default();
        view::active_section(scroll_y, &sections).to_string()
    }

    pub fn view(&self) -> JsValue {
        to_js(&self.cafe.view())
    }

    pub fn drain_effects(&mut self) -> JsValue {
        let effects = self.cafe.drain_effects();
        for effect in &effects {
            if let Effect::Notice { message } = effect {
                console(message);
            }
        }
        to_js(&effects)
    }
}

/// Crate version, for the page footer.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
