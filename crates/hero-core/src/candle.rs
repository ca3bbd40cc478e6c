//! Candlestick scene objects.
//!
//! Simulation state lives here, keyed by [`CandleId`] (an index into the
//! scene's candle arena). The renderer only sees the parts a candle exposes
//! for its current [`DetailVariant`].

use crate::color::hex_rgba;
use crate::constants::DISTANCE_FACTOR_DIVISOR;
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use smallvec::SmallVec;

pub const BULLISH_HEX: u32 = 0x2de07c;
pub const BEARISH_HEX: u32 = 0xff4c4c;
pub const WICK_HEX: u32 = 0xffffff;

pub const BODY_WIDTH: f32 = 0.8;
pub const WICK_DIAMETER: f32 = 0.12;
pub const WICK_HEIGHT: f32 = 0.35;
pub const UPPER_WICK_SCALE: f32 = 1.2;
pub const LOWER_WICK_SCALE: f32 = 0.8;
pub const BODY_EMISSIVE: f32 = 0.05;
pub const WICK_EMISSIVE: f32 = 0.05;

/// Stable handle into the scene's candle arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandleId(pub usize);

/// Chart pattern archetype; decides body height.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    Hammer,
    Bullish,
    Shooting,
    Morning,
    Piercing,
}

impl Pattern {
    pub const ALL: [Pattern; 5] = [
        Pattern::Hammer,
        Pattern::Bullish,
        Pattern::Shooting,
        Pattern::Morning,
        Pattern::Piercing,
    ];

    /// Round-robin assignment by index.
    pub fn for_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn body_height(self, index: usize) -> f32 {
        let i = index as f32;
        match self {
            Pattern::Hammer => 0.7,
            Pattern::Bullish => 1.8 + (i * 0.7).sin().abs() * 0.5,
            Pattern::Shooting => 1.0 + i.cos().abs() * 0.3,
            Pattern::Morning => 1.2 + (i * 0.5).sin().abs() * 0.5,
            Pattern::Piercing => 1.4 + (i * 0.9).sin().abs() * 0.4,
        }
    }
}

/// Market color coding, alternating by index parity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    Bullish,
    Bearish,
}

impl Trend {
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 {
            Trend::Bullish
        } else {
            Trend::Bearish
        }
    }

    pub fn color(self) -> [f32; 4] {
        match self {
            Trend::Bullish => hex_rgba(BULLISH_HEX, 1.0),
            Trend::Bearish => hex_rgba(BEARISH_HEX, 1.0),
        }
    }
}

/// Which representation of a candle is drawn. Exactly one at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DetailVariant {
    #[default]
    High,
    Low,
}

/// Shared unit meshes a candle part can reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Unit box; high-detail body.
    Body,
    /// Six-sided unit cylinder; wicks.
    Wick,
    /// Eight-sided unit cylinder; the whole low-detail candle.
    LowPoly,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CandlePart {
    pub shape: Shape,
    /// Transform relative to the candle's own frame.
    pub local: Mat4,
    pub color: [f32; 4],
    pub emissive: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Candle {
    base_position: Vec3,
    position: Vec3,
    /// Euler tilt around X and Y.
    rotation: Vec2,
    bob_phase: f32,
    pattern: Pattern,
    trend: Trend,
    body_height: f32,
    detail: DetailVariant,
}

impl Candle {
    pub fn new(index: usize, base_position: Vec3, bob_phase: f32) -> Self {
        let pattern = Pattern::for_index(index);
        Self {
            base_position,
            position: base_position,
            rotation: Vec2::ZERO,
            bob_phase,
            pattern,
            trend: Trend::for_index(index),
            body_height: pattern.body_height(index),
            detail: DetailVariant::High,
        }
    }

    pub fn base_position(&self) -> Vec3 {
        self.base_position
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> Vec2 {
        self.rotation
    }

    pub fn bob_phase(&self) -> f32 {
        self.bob_phase
    }

    pub fn pattern(&self) -> Pattern {
        self.pattern
    }

    pub fn trend(&self) -> Trend {
        self.trend
    }

    pub fn body_height(&self) -> f32 {
        self.body_height
    }

    pub fn detail(&self) -> DetailVariant {
        self.detail
    }

    pub(crate) fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub(crate) fn set_rotation(&mut self, rotation: Vec2) {
        self.rotation = rotation;
    }

    pub(crate) fn set_detail(&mut self, detail: DetailVariant) {
        self.detail = detail;
    }

    /// Parallax gain: candles further from center react more strongly.
    pub fn distance_factor(&self) -> f32 {
        1.0 + self.base_position.x.abs() / DISTANCE_FACTOR_DIVISOR
    }

    /// World transform of the candle's own frame (base of the body).
    pub fn transform(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, 0.0);
        Mat4::from_rotation_translation(rotation, self.position)
    }

    /// Parts of the currently visible representation.
    pub fn parts(&self) -> SmallVec<[CandlePart; 3]> {
        let h = self.body_height;
        let color = self.trend.color();
        let mut parts = SmallVec::new();
        match self.detail {
            DetailVariant::High => {
                parts.push(CandlePart {
                    shape: Shape::Body,
                    local: Mat4::from_scale_rotation_translation(
                        Vec3::new(BODY_WIDTH, h, BODY_WIDTH),
                        Quat::IDENTITY,
                        Vec3::new(0.0, h * 0.5, 0.0),
                    ),
                    color,
                    emissive: BODY_EMISSIVE,
                });
                let upper = WICK_HEIGHT * UPPER_WICK_SCALE;
                let lower = WICK_HEIGHT * LOWER_WICK_SCALE;
                let wick_color = hex_rgba(WICK_HEX, 1.0);
                for (height, center_y) in [(upper, h + upper * 0.5), (lower, -lower * 0.5)] {
                    parts.push(CandlePart {
                        shape: Shape::Wick,
                        local: Mat4::from_scale_rotation_translation(
                            Vec3::new(WICK_DIAMETER, height, WICK_DIAMETER),
                            Quat::IDENTITY,
                            Vec3::new(0.0, center_y, 0.0),
                        ),
                        color: wick_color,
                        emissive: WICK_EMISSIVE,
                    });
                }
            }
            DetailVariant::Low => {
                parts.push(CandlePart {
                    shape: Shape::LowPoly,
                    local: Mat4::from_scale_rotation_translation(
                        Vec3::new(BODY_WIDTH, h, BODY_WIDTH),
                        Quat::IDENTITY,
                        Vec3::new(0.0, h * 0.5, 0.0),
                    ),
                    color,
                    emissive: 0.0,
                });
            }
        }
        parts
    }
}
