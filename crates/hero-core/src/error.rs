use thiserror::Error;

/// Failures a renderer can report back to the engine.
///
/// None of these ever reach the hosting page: a failed context leaves the
/// hero region blank and a lost context stops the animation loop.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HeroError {
    /// The render surface could not produce a usable graphics context.
    #[error("graphics context unavailable: {0}")]
    ContextUnavailable(String),
    /// The context went away mid-session; the engine instance is finished.
    #[error("graphics context lost: {0}")]
    ContextLost(String),
    /// A single frame could not be presented; the next frame may succeed.
    #[error("surface error: {0}")]
    Surface(String),
}

impl HeroError {
    /// Whether the engine must stop after seeing this error.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, HeroError::Surface(_))
    }
}
