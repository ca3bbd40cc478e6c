// Counting host and renderer shared by the engine tests.
#![allow(dead_code)]

use hero_core::{
    FrameHost, HeroConfig, HeroEngine, HeroError, QualityParams, Renderer, Scene, Viewport,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct MockHost {
    pub requested: u32,
    pub cancelled: Vec<u32>,
    pub detached: u32,
    next_handle: u32,
}

impl MockHost {
    pub fn listeners_active(&self) -> bool {
        self.detached == 0
    }
}

impl FrameHost for MockHost {
    type Handle = u32;

    fn request_frame(&mut self) -> Option<u32> {
        self.requested += 1;
        self.next_handle += 1;
        Some(self.next_handle)
    }

    fn cancel_frame(&mut self, handle: u32) {
        self.cancelled.push(handle);
    }

    fn detach_inputs(&mut self) {
        self.detached += 1;
    }
}

#[derive(Debug, Default)]
pub struct RenderLog {
    pub resizes: Vec<(Viewport, f32)>,
    pub quality: Vec<QualityParams>,
    pub frames: u32,
    pub released: u32,
    pub fail_with: Option<HeroError>,
}

pub struct MockRenderer {
    pub log: Rc<RefCell<RenderLog>>,
}

impl Renderer for MockRenderer {
    fn resize(&mut self, viewport: &Viewport, pixel_ratio: f32) {
        self.log.borrow_mut().resizes.push((*viewport, pixel_ratio));
    }

    fn apply_quality(&mut self, params: &QualityParams) {
        self.log.borrow_mut().quality.push(*params);
    }

    fn render(&mut self, _scene: &Scene) -> Result<(), HeroError> {
        let mut log = self.log.borrow_mut();
        log.frames += 1;
        match log.fail_with.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn release(self) {
        self.log.borrow_mut().released += 1;
    }
}

pub type TestEngine = HeroEngine<MockHost, MockRenderer>;

pub fn desktop_viewport() -> Viewport {
    Viewport::new(1280.0, 720.0, 1.0)
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

pub fn mount_with(config: HeroConfig, viewport: Viewport) -> (TestEngine, Rc<RefCell<RenderLog>>) {
    let log = Rc::new(RefCell::new(RenderLog::default()));
    let renderer = MockRenderer { log: log.clone() };
    let mut rng = StdRng::seed_from_u64(7);
    let engine = HeroEngine::mount(
        config,
        viewport,
        MockHost::default(),
        renderer,
        Duration::ZERO,
        &mut rng,
    );
    (engine, log)
}

pub fn mount_default() -> (TestEngine, Rc<RefCell<RenderLog>>) {
    mount_with(HeroConfig::default(), desktop_viewport())
}

/// Run `count` ticks spaced `step_ms` apart, starting after `from`.
pub fn run_ticks(engine: &mut TestEngine, from: Duration, count: u32, step_ms: u64) -> Duration {
    let mut now = from;
    for _ in 0..count {
        now += ms(step_ms);
        engine.on_frame(now);
    }
    now
}
