// Default tuning for the hero animation. Everything here is a starting point
// for `HeroConfig`; nothing reads these directly during a frame.

// Viewport classification
pub const MOBILE_BREAKPOINT_PX: f32 = 768.0; // narrower than this is "mobile"

// Scene population
pub const DESKTOP_OBJECT_COUNT: usize = 12;
pub const MOBILE_OBJECT_COUNT: usize = 8;
pub const DESKTOP_SPREAD: f32 = 14.0; // horizontal spread of the candle row
pub const MOBILE_SPREAD: f32 = 8.0;
pub const MIN_OBJECT_COUNT: usize = 1;
pub const MAX_OBJECT_COUNT: usize = 64;
pub const PARTICLE_COUNT: usize = 200;
pub const MAX_PARTICLE_COUNT: usize = 4096;
pub const PLACEMENT_JITTER: f32 = 0.4; // +/- random depth jitter per candle
pub const DEPTH_FALLOFF: f32 = 0.1; // candles further from center sit further back

// Inertia (fraction of the remaining distance covered per tick)
pub const POSITION_INERTIA: f32 = 0.06;
pub const ROTATION_INERTIA: f32 = 0.06;
pub const CAMERA_INERTIA: f32 = 0.05;
pub const SCROLL_INERTIA: f32 = 0.08;

// Pointer / scroll response
pub const CAMERA_SENSITIVITY_X: f32 = 1.4;
pub const CAMERA_SENSITIVITY_Y: f32 = 0.5;
pub const POINTER_GAIN_X: f32 = 1.2;
pub const POINTER_GAIN_Y: f32 = 1.4;
pub const POINTER_DEPTH_PULL: f32 = 0.4;
pub const SCROLL_DEPTH_GAIN: f32 = 0.3;
pub const DEPTH_REFERENCE_X: f32 = 6.0; // x distance at which depth gains reach 1.0
pub const DISTANCE_FACTOR_DIVISOR: f32 = 10.0;
pub const DESKTOP_SCROLL_SENSITIVITY: f32 = 0.5;
pub const MOBILE_SCROLL_SENSITIVITY: f32 = 0.3;
pub const POINTER_STOP_MS: u64 = 200;

// Tilt
pub const TILT_POINTER: f32 = 0.05;
pub const TILT_SCROLL_X: f32 = 0.02;
pub const TILT_SCROLL_Y: f32 = 0.01;

// Idle bob
pub const BOB_SPEED: f32 = 1.2; // radians per second
pub const DESKTOP_BOB_MOVING: f32 = 0.25;
pub const DESKTOP_BOB_IDLE: f32 = 0.1;
pub const MOBILE_BOB_MOVING: f32 = 0.15;
pub const MOBILE_BOB_IDLE: f32 = 0.05;

// Level of detail
pub const LOD_DISTANCE: f32 = 15.0; // camera distance beyond which reduced tiers draw low-poly

// Adaptive quality
pub const FPS_DOWNGRADE_BELOW: f32 = 30.0;
pub const FPS_UPGRADE_ABOVE: f32 = 50.0;
pub const FPS_WINDOW_MS: u64 = 1000;
pub const FOG_DENSITY_FULL: f32 = 0.028;
pub const FOG_DENSITY_REDUCED: f32 = 0.04;
pub const MAX_PIXEL_RATIO: f32 = 2.0;
pub const HIGH_DPR_THRESHOLD: f32 = 1.5;

// Camera
pub const CAMERA_FOV_DEG: f32 = 40.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 200.0;
pub const CAMERA_DISTANCE: f32 = 20.0;
pub const DESKTOP_CAMERA_HEIGHT: f32 = 3.5;
pub const MOBILE_CAMERA_HEIGHT: f32 = 2.5;
