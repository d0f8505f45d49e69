use thiserror::Error;

/// Errors raised while building or loading a [`CarouselConfig`](crate::CarouselConfig).
///
/// These are configuration errors only. Bad input events (non-finite wheel
/// deltas, pointer coordinates) are dropped by the controller and never
/// reach the caller.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The carousel has no items to lay out.
    #[error("carousel needs at least one item")]
    EmptyTrack,
    /// A field that must be strictly positive was zero or negative.
    #[error("`{field}` must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    /// A weight or magnitude that must not be negative was.
    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    /// A field was NaN or infinite.
    #[error("`{field}` must be finite")]
    NonFinite { field: &'static str },
    /// A field fell outside its allowed interval.
    #[error("`{field}` = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
    /// A `min_*`/`max_*` pair is inverted.
    #[error("`min_{field}` is greater than `max_{field}`")]
    InvertedRange { field: &'static str },
    /// The config file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The config file is not valid TOML for this schema.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
