#![cfg(target_arch = "wasm32")]
use hero_core::{HeroConfig, HeroError, HeroOptions, QualityTier, Renderer, ViewportClass};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod render;
mod slot;

use frame::Shared;
use render::GpuRenderer;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("hero-web starting");
}

/// Handle returned to the page for one mounted hero canvas.
///
/// Dropping the handle (`free()` on the JS side) tears the instance down.
#[wasm_bindgen]
pub struct HeroHandle {
    shared: Option<Rc<Shared>>,
}

#[wasm_bindgen]
impl HeroHandle {
    /// Cancel the pending frame, remove listeners and release the GPU.
    /// Safe to call more than once; returns whether this call did anything.
    pub fn teardown(&self) -> bool {
        self.shared.as_ref().is_some_and(|s| s.teardown())
    }

    #[wasm_bindgen(getter)]
    pub fn mounted(&self) -> bool {
        self.shared.as_ref().is_some_and(|s| !s.is_torn_down())
    }
}

impl Drop for HeroHandle {
    fn drop(&mut self) {
        if let Some(shared) = &self.shared {
            shared.teardown();
        }
    }
}

/// Mount the hero animation on the canvas with the given element id.
///
/// A missing canvas is not an error for the page: the returned handle is
/// simply inert.
#[wasm_bindgen]
pub fn mount(canvas_id: &str, options: JsValue) -> HeroHandle {
    match dom::canvas_by_id(canvas_id) {
        Some(canvas) => mount_canvas(canvas, options),
        None => {
            log::warn!("[hero] no canvas #{canvas_id}, nothing mounted");
            HeroHandle { shared: None }
        }
    }
}

#[wasm_bindgen(js_name = mountCanvas)]
pub fn mount_canvas(canvas: web::HtmlCanvasElement, options: JsValue) -> HeroHandle {
    let viewport = dom::viewport_of(&canvas);
    let mut config = resolve_options(options, viewport.class());
    // MSAA is fixed at surface creation, so settle the tier here
    let tier = config.starting_tier(viewport.device_pixel_ratio);
    config.quality_hint = Some(tier);
    let antialias = tier == QualityTier::Full;

    let pixel_ratio = viewport
        .device_pixel_ratio
        .min(config.quality.max_pixel_ratio);
    let (w, h) = viewport.physical_size(pixel_ratio);
    dom::set_canvas_backing_size(&canvas, w, h);

    let shared = Shared::new(canvas);
    let weak = Rc::downgrade(&shared);
    let canvas = shared.canvas().clone();
    spawn_local(async move {
        let renderer = match GpuRenderer::new(&canvas, antialias).await {
            Ok(r) => r,
            Err(e) => {
                let err = HeroError::ContextUnavailable(format!("{e:#}"));
                log::warn!("[hero] {err}; leaving the canvas blank");
                if let Some(shared) = weak.upgrade() {
                    shared.teardown();
                }
                return;
            }
        };
        let Some(shared) = weak.upgrade().filter(|s| !s.is_torn_down()) else {
            renderer.release();
            return;
        };
        match web::window() {
            Some(window) => frame::start(&shared, window, config, renderer),
            None => {
                renderer.release();
                shared.teardown();
            }
        }
    });

    HeroHandle {
        shared: Some(shared),
    }
}

fn resolve_options(options: JsValue, detected: ViewportClass) -> HeroConfig {
    let options = if options.is_undefined() || options.is_null() {
        HeroOptions::default()
    } else {
        serde_wasm_bindgen::from_value::<HeroOptions>(options).unwrap_or_else(|e| {
            log::warn!("[hero] ignoring invalid options: {e}");
            HeroOptions::default()
        })
    };
    options.resolve(detected)
}
