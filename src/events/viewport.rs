use super::Listener;
use crate::frame::Shared;
use std::rc::Weak;
use web_sys as web;

pub fn wire_scroll(window: &web::Window, shared: Weak<Shared>) -> Option<Listener> {
    Listener::attach(window, "scroll", move |_| {
        if let Some(shared) = shared.upgrade() {
            shared.on_scroll();
        }
    })
}

pub fn wire_resize(window: &web::Window, shared: Weak<Shared>) -> Option<Listener> {
    Listener::attach(window, "resize", move |_| {
        if let Some(shared) = shared.upgrade() {
            shared.on_resize();
        }
    })
}
