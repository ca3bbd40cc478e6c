use crate::dom;
use crate::events::{self, Listener};
use crate::render::GpuRenderer;
use crate::slot::EngineSlot;
use glam::Vec2;
use hero_core::{FrameHost, HeroConfig, HeroEngine};
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::rc::Rc;
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type WebEngine = HeroEngine<WebHost, GpuRenderer>;

/// `requestAnimationFrame` plus the window listeners attached at mount.
pub struct WebHost {
    window: web::Window,
    tick: Closure<dyn FnMut()>,
    listeners: Vec<Listener>,
}

impl FrameHost for WebHost {
    type Handle = i32;

    fn request_frame(&mut self) -> Option<i32> {
        self.window
            .request_animation_frame(self.tick.as_ref().unchecked_ref())
            .ok()
    }

    fn cancel_frame(&mut self, handle: i32) {
        let _ = self.window.cancel_animation_frame(handle);
    }

    fn detach_inputs(&mut self) {
        for listener in self.listeners.drain(..) {
            listener.detach();
        }
    }
}

/// State shared between the JS handle, the frame callback and the listeners.
///
/// Callbacks only hold `Weak` references, so dropping the handle is enough to
/// let everything go. The engine is never dropped from inside its own tick.
pub struct Shared {
    canvas: web::HtmlCanvasElement,
    engine: EngineSlot<WebEngine>,
    origin: Instant,
}

impl Shared {
    pub fn new(canvas: web::HtmlCanvasElement) -> Rc<Self> {
        Rc::new(Self {
            canvas,
            engine: EngineSlot::default(),
            origin: Instant::now(),
        })
    }

    pub fn canvas(&self) -> &web::HtmlCanvasElement {
        &self.canvas
    }

    #[inline]
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    pub fn is_torn_down(&self) -> bool {
        self.engine.is_closed()
    }

    /// Callbacks that arrive after teardown are dropped.
    fn with_engine(&self, f: impl FnOnce(&mut WebEngine)) {
        self.engine.with(f);
    }

    pub fn on_frame(&self) {
        let now = self.now();
        let mut stopped = false;
        self.with_engine(|engine| {
            engine.on_frame(now);
            stopped = !engine.is_mounted();
        });
        if stopped {
            self.engine.close();
        }
    }

    pub fn on_pointer(&self, client_x: f32, client_y: f32) {
        let rect = dom::surface_rect(&self.canvas);
        let now = self.now();
        self.with_engine(|engine| engine.on_pointer_move(Vec2::new(client_x, client_y), rect, now));
    }

    pub fn on_scroll(&self) {
        if let Some((scroll_y, document_height, viewport_height)) = dom::scroll_metrics() {
            self.with_engine(|engine| engine.on_scroll(scroll_y, document_height, viewport_height));
        }
    }

    pub fn on_resize(&self) {
        let viewport = dom::viewport_of(&self.canvas);
        self.with_engine(|engine| engine.on_resize(viewport));
    }

    /// Stop the loop and release the engine. Returns false on repeat calls.
    pub fn teardown(&self) -> bool {
        let first = self.engine.close();
        // an engine that was busy at the first call is picked up by a later one
        if let Some(mut engine) = self.engine.take_if_closed() {
            engine.teardown();
        }
        if first {
            log::info!("[hero] torn down");
        }
        first
    }
}

/// Wire the listeners and the frame callback, then mount the engine.
pub fn start(shared: &Rc<Shared>, window: web::Window, config: HeroConfig, renderer: GpuRenderer) {
    let weak = Rc::downgrade(shared);
    let tick_weak = weak.clone();
    let tick = Closure::wrap(Box::new(move || {
        if let Some(shared) = tick_weak.upgrade() {
            shared.on_frame();
        }
    }) as Box<dyn FnMut()>);

    let listeners: Vec<Listener> = [
        events::pointer::wire_pointer(&window, weak.clone()),
        events::viewport::wire_scroll(&window, weak.clone()),
        events::viewport::wire_resize(&window, weak),
    ]
    .into_iter()
    .flatten()
    .collect();

    let host = WebHost {
        window,
        tick,
        listeners,
    };
    let viewport = dom::viewport_of(&shared.canvas);
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let engine = HeroEngine::mount(config, viewport, host, renderer, shared.now(), &mut rng);
    if let Err(mut engine) = shared.engine.put(engine) {
        engine.teardown();
    }
}
