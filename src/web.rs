//! Browser host bindings (WASM only)
//!
//! A JS host engine drives the controller through this wrapper. Events
//! cross the boundary as JSON strings; the host deserializes each batch
//! and applies the commands to its scene graph and physics world.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::controller::Controller;
use crate::persistence::LocalStorageStore;
use crate::scene::{SceneAssets, SceneSpec};
use crate::sim::ContactBody;
use crate::WorldGeom;

/// One contact pair as posted by the host physics callback
#[derive(serde::Deserialize)]
struct ContactPair {
    a: ContactBody,
    b: ContactBody,
}

/// Set up panic reporting and console logging. Call once before
/// constructing a controller.
#[wasm_bindgen]
pub fn init() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

#[wasm_bindgen]
pub struct WebController {
    inner: Controller,
}

#[wasm_bindgen]
impl WebController {
    /// Build a controller for a `screen_w` x `screen_h` world, backed
    /// by LocalStorage for the best score.
    #[wasm_bindgen(constructor)]
    pub fn new(
        seed: u64,
        screen_w: f32,
        screen_h: f32,
        pipe_w: f32,
        bird_w: f32,
        bird_h: f32,
    ) -> WebController {
        let geom = WorldGeom::new(
            Vec2::new(screen_w, screen_h),
            pipe_w,
            Vec2::new(bird_w, bird_h),
        );
        WebController {
            inner: Controller::new(seed, geom, Box::new(LocalStorageStore::new())),
        }
    }

    /// Scene composition data for the attach-time build, as JSON
    pub fn scene_spec(
        &self,
        ground_tex_w: f32,
        ground_tex_h: f32,
        cloud_tex_w: f32,
        cloud_tex_h: f32,
    ) -> String {
        let assets = SceneAssets {
            ground_tex: Vec2::new(ground_tex_w, ground_tex_h),
            cloud_tex: Vec2::new(cloud_tex_w, cloud_tex_h),
        };
        let spec = SceneSpec::build(
            &self.inner.state.geom,
            &assets,
            self.inner.score_label(),
            self.inner.best_label(),
        );
        to_json(&spec)
    }

    /// Advance one fixed timestep; returns the event batch as JSON
    pub fn on_tick(&mut self, dt: f32) -> String {
        to_json(&self.inner.on_tick(dt))
    }

    /// Feed a physics contact: `pair_json` is `{"a": body, "b": body}`
    /// with `{"tag", "pos", "vel"}` bodies. Returns the event batch.
    pub fn on_contact(&mut self, pair_json: &str) -> String {
        match serde_json::from_str::<ContactPair>(pair_json) {
            Ok(pair) => to_json(&self.inner.on_contact(&pair.a, &pair.b)),
            Err(err) => {
                log::warn!("bad contact payload: {err}");
                "[]".to_string()
            }
        }
    }

    /// Primary input (tap); returns the event batch
    pub fn on_primary_input(&mut self) -> String {
        to_json(&self.inner.on_primary_input())
    }

    pub fn score_label(&self) -> String {
        self.inner.score_label()
    }

    pub fn best_label(&self) -> String {
        self.inner.best_label()
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        log::error!("event serialization failed: {err}");
        "[]".to_string()
    })
}
