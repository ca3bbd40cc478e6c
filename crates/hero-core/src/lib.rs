pub mod camera;
pub mod candle;
pub mod color;
pub mod config;
pub mod constants;
pub mod ease;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod input;
pub mod lifecycle;
pub mod particles;
pub mod quality;
pub mod scene;

pub use camera::*;
pub use candle::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use input::*;
pub use lifecycle::*;
pub use particles::*;
pub use quality::*;
pub use scene::*;
