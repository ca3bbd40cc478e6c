use hero_core::{SurfaceRect, Viewport};
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn canvas_by_id(id: &str) -> Option<web::HtmlCanvasElement> {
    window_document()?
        .get_element_by_id(id)?
        .dyn_into::<web::HtmlCanvasElement>()
        .ok()
}

#[inline]
pub fn device_pixel_ratio() -> f32 {
    web::window()
        .map(|w| w.device_pixel_ratio() as f32)
        .filter(|dpr| dpr.is_finite() && *dpr > 0.0)
        .unwrap_or(1.0)
}

/// CSS size of the canvas; an unlaid-out canvas falls back to the window.
pub fn viewport_of(canvas: &web::HtmlCanvasElement) -> Viewport {
    let rect = canvas.get_bounding_client_rect();
    let (mut width, mut height) = (rect.width() as f32, rect.height() as f32);
    if width <= 0.0 || height <= 0.0 {
        if let Some(w) = web::window() {
            width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
            height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
        }
    }
    Viewport::new(width, height, device_pixel_ratio())
}

pub fn surface_rect(canvas: &web::HtmlCanvasElement) -> SurfaceRect {
    let rect = canvas.get_bounding_client_rect();
    SurfaceRect {
        left: rect.left() as f32,
        top: rect.top() as f32,
        width: rect.width() as f32,
        height: rect.height() as f32,
    }
}

/// (scroll offset, document height, viewport height) in CSS pixels.
pub fn scroll_metrics() -> Option<(f32, f32, f32)> {
    let window = web::window()?;
    let scroll_y = window.scroll_y().unwrap_or(0.0) as f32;
    let view_h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0) as f32;
    let doc_h = window
        .document()
        .and_then(|d| d.document_element())
        .map(|el| el.scroll_height() as f32)
        .unwrap_or(view_h);
    Some((scroll_y, doc_h, view_h))
}

pub fn set_canvas_backing_size(canvas: &web::HtmlCanvasElement, width: u32, height: u32) {
    if canvas.width() != width {
        canvas.set_width(width.max(1));
    }
    if canvas.height() != height {
        canvas.set_height(height.max(1));
    }
}
