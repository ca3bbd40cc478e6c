use super::Listener;
use crate::frame::Shared;
use std::rc::Weak;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Track the pointer over the whole window, not just the canvas.
pub fn wire_pointer(window: &web::Window, shared: Weak<Shared>) -> Option<Listener> {
    Listener::attach(window, "pointermove", move |ev| {
        let Some(mouse) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        if let Some(shared) = shared.upgrade() {
            shared.on_pointer(mouse.client_x() as f32, mouse.client_y() as f32);
        }
    })
}
