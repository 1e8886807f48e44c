use wasm_bindgen::prelude::*;
use web_sys::{WebGl2RenderingContext, HtmlCanvasElement};

pub mod animation;
pub mod config;
pub mod error;
pub mod formation;
pub mod logging;
pub mod math;
pub mod mesh;
pub mod pool;
pub mod render;
pub mod scene;

pub use config::SceneConfig;
pub use error::{AnimError, Result};
pub use formation::{Formation, Mode};
pub use scene::Scene;

use log::{error, LevelFilter};
use math::Vec3;
use render::RenderPipeline;

/// Install the panic hook and console logger
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    logging::init(LevelFilter::Info);
}

impl From<AnimError> for JsValue {
    fn from(err: AnimError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Main engine state exposed to JavaScript
#[wasm_bindgen]
pub struct ChristmasTree {
    scene: Scene,
    pipeline: RenderPipeline,
    // Camera orbit controls
    camera_distance: f32,
    camera_angle_x: f32,
    camera_angle_y: f32,
    camera_target: Vec3,
}

#[wasm_bindgen]
impl ChristmasTree {
    /// Create the scene with default configuration
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement) -> std::result::Result<ChristmasTree, JsValue> {
        Self::build(canvas, &SceneConfig::default())
    }

    /// Create the scene from a YAML override document
    #[wasm_bindgen]
    pub fn with_config(canvas: HtmlCanvasElement, yaml: &str) -> std::result::Result<ChristmasTree, JsValue> {
        let config = SceneConfig::from_yaml(yaml)?;
        Self::build(canvas, &config)
    }

    fn build(canvas: HtmlCanvasElement, config: &SceneConfig) -> std::result::Result<ChristmasTree, JsValue> {
        let width = canvas.width() as i32;
        let height = canvas.height() as i32;

        let gl = canvas
            .get_context("webgl2")?
            .ok_or("Failed to get WebGL2 context")?
            .dyn_into::<WebGl2RenderingContext>()?;

        let scene = Scene::new(config)?;
        let mut pipeline = RenderPipeline::new(gl, width, height)?;
        for pool in scene.pools() {
            pipeline.add_pool(pool.kind(), pool.len())?;
        }

        Ok(Self {
            scene,
            pipeline,
            camera_distance: 20.0,
            camera_angle_x: 0.2,
            camera_angle_y: 0.0,
            camera_target: Vec3::ZERO,
        })
    }

    /// Switch to `"tree"` or `"galaxy"`. Unknown names are rejected and
    /// the scene is left as it was.
    #[wasm_bindgen]
    pub fn set_mode(&mut self, name: &str) -> std::result::Result<(), JsValue> {
        self.scene.set_mode_named(name)?;
        Ok(())
    }

    /// Current mode name
    #[wasm_bindgen]
    pub fn mode(&self) -> String {
        self.scene.mode().name().to_string()
    }

    /// Flip between tree and galaxy; returns the new mode name
    #[wasm_bindgen]
    pub fn toggle_mode(&mut self) -> String {
        self.scene.toggle_mode().name().to_string()
    }

    #[wasm_bindgen]
    pub fn set_indicator_visible(&mut self, visible: bool) {
        self.scene.set_indicator_visible(visible);
    }

    #[wasm_bindgen]
    pub fn is_indicator_visible(&self) -> bool {
        self.scene.is_indicator_visible()
    }

    /// Update and render a frame
    #[wasm_bindgen]
    pub fn render(&mut self, dt: f32) {
        self.scene.tick(dt);

        // A failed upload keeps the batch dirty; it is retried next frame
        if let Err(e) = self.scene.submit_to(&mut self.pipeline) {
            error!("instance upload failed: {}", e);
        }

        let cos_x = self.camera_angle_x.cos();
        let sin_x = self.camera_angle_x.sin();
        let cos_y = self.camera_angle_y.cos();
        let sin_y = self.camera_angle_y.sin();

        self.pipeline.camera_position = Vec3::new(
            self.camera_target.x + self.camera_distance * cos_x * sin_y,
            self.camera_target.y + self.camera_distance * sin_x,
            self.camera_target.z + self.camera_distance * cos_x * cos_y,
        );
        self.pipeline.camera_target = self.camera_target;

        self.pipeline.render();
    }

    #[wasm_bindgen]
    pub fn resize(&mut self, width: i32, height: i32) -> std::result::Result<(), JsValue> {
        self.pipeline.resize(width, height)?;
        Ok(())
    }

    /// Orbit camera
    #[wasm_bindgen]
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        self.camera_angle_y += delta_x * 0.01;
        self.camera_angle_x = (self.camera_angle_x + delta_y * 0.01)
            .clamp(-std::f32::consts::FRAC_PI_2 + 0.1, std::f32::consts::FRAC_PI_2 - 0.1);
    }

    /// Zoom camera
    #[wasm_bindgen]
    pub fn zoom(&mut self, delta: f32) {
        self.camera_distance = (self.camera_distance + delta * 0.5).clamp(5.0, 50.0);
    }

    /// Total entities across all pools
    #[wasm_bindgen]
    pub fn entity_count(&self) -> usize {
        self.scene.entity_count()
    }
}
