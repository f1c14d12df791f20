//! Browser binding: drives a `<canvas>` 2D context from the frame loop

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::config::DriftConfig;
use crate::drift::DriftEvent;
use crate::error::{DriftError, DriftResult};
use crate::math::{Size, Vec2};
use crate::orbit::Pose;
use crate::render::{DriftSurface, PLACEHOLDER_COLOR, TRAIL_COLOR};
use crate::scene::DriftScene;
use crate::typing;

fn log(msg: &str) {
    web_sys::console::log_1(&msg.into());
}

fn to_js(err: DriftError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();
    log("[drift] module loaded");
}

/// Whether the device has a coarse pointer or touch input
#[wasm_bindgen]
pub fn is_touch_device() -> bool {
    let Some(window) = web_sys::window() else {
        return false;
    };
    let coarse = window
        .match_media("(hover: none), (pointer: coarse)")
        .ok()
        .flatten()
        .is_some_and(|query| query.matches());
    coarse || window.navigator().max_touch_points() > 0
}

// =============================================================================
// Canvas surface
// =============================================================================

fn set_style(ctx: &CanvasRenderingContext2d, property: &str, value: &str) {
    if let Err(err) = js_sys::Reflect::set(
        ctx.as_ref(),
        &JsValue::from_str(property),
        &JsValue::from_str(value),
    ) {
        tracing::warn!(?err, property, "canvas style rejected");
    }
}

struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    sprite: HtmlImageElement,
    sprite_ready: Rc<Cell<bool>>,
    _onload: Closure<dyn FnMut()>,
    _onerror: Closure<dyn FnMut()>,
}

impl CanvasSurface {
    fn new(canvas_id: &str, sprite_url: &str) -> DriftResult<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| DriftError::Dom("no document".into()))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| DriftError::Dom(format!("canvas #{} not found", canvas_id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| DriftError::Dom(format!("#{} is not a canvas", canvas_id)))?;
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .ok_or_else(|| DriftError::Dom("2D context not available".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| DriftError::Dom("unexpected context type".into()))?;

        let sprite =
            HtmlImageElement::new().map_err(|_| DriftError::Dom("cannot create image".into()))?;
        let sprite_ready = Rc::new(Cell::new(false));

        let ready = sprite_ready.clone();
        let onload = Closure::<dyn FnMut()>::new(move || {
            ready.set(true);
            log("[drift] sprite loaded");
        });
        let url = sprite_url.to_string();
        let onerror = Closure::<dyn FnMut()>::new(move || {
            tracing::warn!(%url, "sprite failed to load, keeping placeholder");
        });
        sprite.set_onload(Some(onload.as_ref().unchecked_ref()));
        sprite.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        sprite.set_src(sprite_url);

        Ok(Self {
            canvas,
            ctx,
            sprite,
            sprite_ready,
            _onload: onload,
            _onerror: onerror,
        })
    }

    fn resize(&self, width: f32, height: f32) {
        self.canvas.set_width(width.max(0.0) as u32);
        self.canvas.set_height(height.max(0.0) as u32);
    }
}

impl DriftSurface for CanvasSurface {
    fn clear(&mut self, size: Size) {
        self.ctx
            .clear_rect(0.0, 0.0, size.width as f64, size.height as f64);
    }

    fn stroke_segment(&mut self, from: Vec2, to: Vec2, width: f32, alpha: f32) {
        let (r, g, b) = TRAIL_COLOR;
        set_style(&self.ctx, "strokeStyle", &format!("rgba({r}, {g}, {b}, {alpha})"));
        self.ctx.set_line_width(width as f64);
        self.ctx.set_line_cap("round");
        self.ctx.set_line_join("round");
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn sprite_ready(&self) -> bool {
        self.sprite_ready.get()
    }

    fn draw_sprite(&mut self, pose: &Pose, size: f32) {
        let half = (size * 0.5) as f64;
        self.ctx.save();
        if self.transform_to(pose).is_ok() {
            if let Err(err) = self.ctx.draw_image_with_html_image_element_and_dw_and_dh(
                &self.sprite,
                -half,
                -half,
                size as f64,
                size as f64,
            ) {
                tracing::warn!(?err, "sprite draw failed");
            }
        }
        self.ctx.restore();
    }

    fn fill_placeholder(&mut self, pose: &Pose, size: Size) {
        self.ctx.save();
        if self.transform_to(pose).is_ok() {
            set_style(&self.ctx, "fillStyle", PLACEHOLDER_COLOR);
            let (w, h) = (size.width as f64, size.height as f64);
            self.ctx.fill_rect(-w * 0.5, -h * 0.5, w, h);
        }
        self.ctx.restore();
    }
}

impl CanvasSurface {
    fn transform_to(&self, pose: &Pose) -> Result<(), JsValue> {
        self.ctx
            .translate(pose.position.x as f64, pose.position.y as f64)?;
        self.ctx.rotate(pose.rotation as f64)
    }
}

// =============================================================================
// Exports
// =============================================================================

/// Drift animation bound to a page canvas
#[wasm_bindgen]
pub struct DriftCanvas {
    scene: DriftScene,
    surface: CanvasSurface,
    particles_callback: Option<js_sys::Function>,
}

#[wasm_bindgen]
impl DriftCanvas {
    /// Bind to the canvas with id `canvas_id` and start loading the sprite.
    ///
    /// `config_json` may override any subset of the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        sprite_url: &str,
        config_json: Option<String>,
    ) -> Result<DriftCanvas, JsValue> {
        let config = match config_json {
            Some(json) => DriftConfig::from_json(&json).map_err(to_js)?,
            None => DriftConfig::default(),
        };

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let width = window.inner_width()?.as_f64().unwrap_or(0.0) as f32;
        let height = window.inner_height()?.as_f64().unwrap_or(0.0) as f32;
        let now = window.performance().map_or(0.0, |p| p.now());

        let surface = CanvasSurface::new(canvas_id, sprite_url).map_err(to_js)?;
        surface.resize(width, height);
        let scene = DriftScene::new(config, Size::new(width, height), now).map_err(to_js)?;

        log(&format!("[drift] bound to #{} ({}x{})", canvas_id, width, height));
        Ok(DriftCanvas {
            scene,
            surface,
            particles_callback: None,
        })
    }

    /// Register `fn(interactive: bool)` for the particle field
    #[wasm_bindgen]
    pub fn set_particles_callback(&mut self, callback: js_sys::Function) {
        self.particles_callback = Some(callback);
    }

    #[wasm_bindgen]
    pub fn set_drift_mode(&mut self, enabled: bool) {
        self.scene.controller_mut().set_drift_mode(enabled);
        self.dispatch_events();
    }

    /// Flip the requested state; returns the new request
    #[wasm_bindgen]
    pub fn toggle_drift_mode(&mut self) -> bool {
        let enabled = !self.scene.controller().is_requested();
        self.set_drift_mode(enabled);
        enabled
    }

    #[wasm_bindgen]
    pub fn is_drift_mode(&self) -> bool {
        self.scene.controller().is_requested()
    }

    #[wasm_bindgen]
    pub fn pointer_moved(&mut self, x: f32, y: f32, now_ms: f64) {
        self.scene
            .controller_mut()
            .pointer_moved(Vec2::new(x, y), now_ms);
    }

    #[wasm_bindgen]
    pub fn pointer_down(&mut self, x: f32, y: f32, now_ms: f64) {
        self.scene
            .controller_mut()
            .pointer_down(Vec2::new(x, y), now_ms);
    }

    /// Match the canvas to the viewport
    #[wasm_bindgen]
    pub fn resize(&mut self, width: f32, height: f32) {
        self.surface.resize(width, height);
        self.scene.controller_mut().resize(width, height);
        if !self.scene.controller().is_enabled() {
            self.surface.clear(Size::new(width, height));
        }
    }

    /// Step and draw one frame. Returns whether drift is still running.
    #[wasm_bindgen]
    pub fn tick(&mut self, now_ms: f64) -> bool {
        let report = self.scene.frame(now_ms, &mut self.surface);
        self.notify(&report.events);
        self.scene.controller().is_enabled()
    }

    /// Current phase id, for debugging overlays
    #[wasm_bindgen]
    pub fn phase(&self) -> String {
        self.scene.controller().phase_kind().id().to_string()
    }
}

impl DriftCanvas {
    fn dispatch_events(&mut self) {
        let events = self.scene.controller_mut().drain_events();
        self.notify(&events);
    }

    fn notify(&self, events: &[DriftEvent]) {
        let Some(callback) = &self.particles_callback else {
            return;
        };
        for event in events {
            let interactive = match event {
                DriftEvent::Engaged => false,
                DriftEvent::Finalized => true,
                DriftEvent::PhaseChanged { .. } => continue,
            };
            if let Err(err) = callback.call1(&JsValue::NULL, &JsValue::from_bool(interactive)) {
                tracing::warn!(?err, "particles callback failed");
            }
        }
    }
}

/// Typed-word headline effect
#[wasm_bindgen(js_name = TypingText)]
pub struct TypingTextHandle {
    inner: typing::TypingText,
}

#[wasm_bindgen(js_class = TypingText)]
impl TypingTextHandle {
    #[wasm_bindgen(constructor)]
    pub fn new(now_ms: f64) -> TypingTextHandle {
        TypingTextHandle {
            inner: typing::TypingText::new(now_ms),
        }
    }

    /// Advance to `now_ms`; returns true if the text changed
    #[wasm_bindgen]
    pub fn step(&mut self, now_ms: f64) -> bool {
        self.inner.step(now_ms)
    }

    #[wasm_bindgen]
    pub fn text(&self) -> String {
        self.inner.text().to_string()
    }
}
