use thiserror::Error;

/// Rejected tuning parameters.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("hue bucket count must be non-zero")]
    ZeroHueBuckets,
    #[error("frame dt band is inverted or non-positive: min={min} max={max}")]
    InvalidDtBand { min: f32, max: f32 },
    #[error("device pixel ratio cap must be >= 1, got {0}")]
    InvalidDprCap(f32),
    #[error("bloom scale must be > 1, got {0}")]
    InvalidBloomScale(f32),
    #[error("a scroll section needs at least one step")]
    ZeroSteps,
    #[error("section nav needs at least one section")]
    NoSections,
    #[error("nav offset must be finite and non-negative, got {0}")]
    InvalidNavOffset(f64),
}

/// Failures reported by a drawing surface.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SurfaceError {
    #[error("drawing context unavailable")]
    ContextUnavailable,
    #[error("sprite upload failed: {0}")]
    SpriteUpload(String),
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    #[error("store already has a live writer")]
    WriterTaken,
}
