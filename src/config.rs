//! Carousel tuning: track geometry, input physics and the distance-to-look mapping.
//!
//! Every carousel variant (flat shelf, depth lane, arc, pyramid) is the same
//! controller and layout driven by a different [`CarouselConfig`]. Pick a preset
//! and adjust it with the builder methods, or load one from TOML:
//!
//! ```
//! use sleeve::{CarouselConfig, WrapMode};
//!
//! let config = CarouselConfig::pyramid(8)
//!     .spacing(0.5)
//!     .smoothing(0.08)
//!     .wrap_mode(WrapMode::Infinite);
//! assert!(config.validate().is_ok());
//! ```
//!
//! ```toml
//! item_count = 7
//! wrap_mode = "clamped"
//! axis = "horizontal"
//! smoothing = 0.1
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How the track behaves at its ends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    /// The track loops forever; items re-enter from the opposite side.
    #[default]
    Infinite,
    /// The target is clamped to `[0, item_count - 1]` items.
    Clamped,
}

/// The scene axis items travel along.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// Left to right along +X.
    #[default]
    Horizontal,
    /// Top to bottom along -Y.
    Vertical,
    /// Far to near along +Z.
    Depth,
}

/// Immutable tuning for one carousel instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    /// Number of items on the track. Must be at least one.
    pub item_count: usize,
    /// Layout-space distance between neighbouring items.
    pub spacing: f32,
    /// Loop forever or stop at the ends.
    pub wrap_mode: WrapMode,
    /// Axis the items travel along.
    pub axis: Axis,

    /// Scroll units per pixel of pointer drag.
    pub drag_sensitivity: f32,
    /// Scroll units per wheel-delta unit.
    pub wheel_sensitivity: f32,
    /// Share of a wheel delta applied directly to the target.
    pub wheel_target_weight: f32,
    /// Share of a wheel delta added to momentum.
    pub wheel_velocity_weight: f32,
    /// Fraction of the last drag delta kept as release momentum.
    pub velocity_carry: f32,
    /// Per-frame velocity multiplier when not dragging, in `(0, 1)`.
    pub momentum_decay: f32,
    /// Per-frame fraction of the remaining distance covered, in `(0, 1)`.
    pub smoothing: f32,
    /// Velocity below this snaps to exactly zero.
    pub velocity_epsilon: f32,
    /// Position closer than this to an idle target snaps onto it.
    pub settle_epsilon: f32,
    /// Largest scroll change a single input event may cause.
    pub max_event_delta: f32,
    /// Longest frame step accepted from the wall clock, in 60 Hz frames.
    pub max_frame_delta: f32,

    /// Layout units per scroll unit.
    pub scroll_to_space: f32,
    /// Scene units per layout unit along [`Axis`].
    pub track_scale: f32,
    /// Layout distance that maps to `|normalized| == 1`. Defaults to half the track.
    pub half_extent: Option<f32>,
    /// Power applied to `|normalized|` for depth falloff.
    pub curve_exponent: f32,
    /// Depth of an item at `|normalized| == 1`.
    pub depth_scale: f32,
    /// Scale at the edge of the visible window.
    pub min_scale: f32,
    /// Scale at center.
    pub max_scale: f32,
    /// Opacity lost per unit of `|normalized|`.
    pub falloff_rate: f32,
    /// Opacity floor.
    pub min_opacity: f32,
    /// Y rotation in radians at `normalized == 1`.
    pub rotation_factor: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            item_count: 6,
            spacing: 0.25,
            wrap_mode: WrapMode::Infinite,
            axis: Axis::Horizontal,
            drag_sensitivity: 0.0015,
            wheel_sensitivity: 0.0003,
            wheel_target_weight: 1.0,
            wheel_velocity_weight: 1.0,
            velocity_carry: 0.3,
            momentum_decay: 0.92,
            smoothing: 0.05,
            velocity_epsilon: 0.00005,
            settle_epsilon: 0.0001,
            max_event_delta: 2.0,
            max_frame_delta: 2.0,
            scroll_to_space: 0.05,
            track_scale: 6.0,
            half_extent: None,
            curve_exponent: 1.25,
            depth_scale: 1.5,
            min_scale: 0.6,
            max_scale: 1.0,
            falloff_rate: 0.7,
            min_opacity: 0.3,
            rotation_factor: 0.3,
        }
    }
}

impl CarouselConfig {
    /// Default tuning for `item_count` items.
    pub fn new(item_count: usize) -> Self {
        Self {
            item_count,
            ..Default::default()
        }
    }

    /// A flat row of sleeves seen edge-on, looping forever.
    ///
    /// No depth, scale or fade; only position changes with scroll.
    pub fn shelf(item_count: usize) -> Self {
        Self {
            item_count,
            curve_exponent: 1.0,
            depth_scale: 0.0,
            min_scale: 1.0,
            max_scale: 1.0,
            falloff_rate: 0.0,
            min_opacity: 1.0,
            rotation_factor: 0.0,
            ..Default::default()
        }
    }

    /// Sleeves flying toward the viewer along Z, fading and shrinking with distance.
    pub fn depth_lane(item_count: usize) -> Self {
        Self {
            item_count,
            spacing: 3.0,
            axis: Axis::Depth,
            drag_sensitivity: 0.01,
            wheel_sensitivity: 0.003,
            wheel_velocity_weight: 0.0,
            velocity_carry: 0.0,
            smoothing: 0.1,
            scroll_to_space: 2.0,
            track_scale: 1.0,
            half_extent: Some(8.0),
            curve_exponent: 1.0,
            depth_scale: 0.0,
            min_scale: 0.6,
            max_scale: 1.0,
            falloff_rate: 0.7,
            min_opacity: 0.3,
            rotation_factor: std::f32::consts::PI * 0.1,
            ..Default::default()
        }
    }

    /// A curved arc with a finite range, stepped one sleeve at a time.
    ///
    /// Positions are in item units, so `jump_to(3)` centers the fourth item.
    pub fn arc(item_count: usize) -> Self {
        Self {
            item_count,
            spacing: 1.0,
            wrap_mode: WrapMode::Clamped,
            drag_sensitivity: 0.02,
            wheel_sensitivity: 0.01,
            wheel_velocity_weight: 0.0,
            velocity_carry: 0.0,
            smoothing: 0.1,
            scroll_to_space: 1.0,
            track_scale: 2.5,
            half_extent: Some(3.0),
            curve_exponent: 1.0,
            depth_scale: 4.5,
            min_scale: 0.85,
            max_scale: 1.0,
            falloff_rate: 0.0,
            min_opacity: 1.0,
            rotation_factor: 0.9,
            ..Default::default()
        }
    }

    /// A funnel: sleeves recede steeply away from the centered one.
    pub fn pyramid(item_count: usize) -> Self {
        Self {
            item_count,
            curve_exponent: 1.5,
            depth_scale: 2.0,
            ..Default::default()
        }
    }

    /// Parse a TOML document and validate it.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(
            path = %path.display(),
            items = config.item_count,
            "loaded carousel config"
        );
        Ok(config)
    }

    /// Set the number of items.
    pub fn item_count(mut self, item_count: usize) -> Self {
        self.item_count = item_count;
        self
    }

    /// Set the distance between neighbouring items.
    pub fn spacing(mut self, spacing: f32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Set the wrap mode.
    pub fn wrap_mode(mut self, wrap_mode: WrapMode) -> Self {
        self.wrap_mode = wrap_mode;
        self
    }

    /// Set the travel axis.
    pub fn axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    /// Set drag and wheel sensitivities.
    pub fn sensitivity(mut self, drag: f32, wheel: f32) -> Self {
        self.drag_sensitivity = drag;
        self.wheel_sensitivity = wheel;
        self
    }

    /// Split wheel input between direct target movement and momentum.
    pub fn wheel_split(mut self, target_weight: f32, velocity_weight: f32) -> Self {
        self.wheel_target_weight = target_weight;
        self.wheel_velocity_weight = velocity_weight;
        self
    }

    /// Set the momentum decay per frame.
    pub fn momentum_decay(mut self, decay: f32) -> Self {
        self.momentum_decay = decay;
        self
    }

    /// Set the smoothing factor per frame.
    pub fn smoothing(mut self, smoothing: f32) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// Set the layout units covered by one scroll unit.
    pub fn scroll_to_space(mut self, factor: f32) -> Self {
        self.scroll_to_space = factor;
        self
    }

    /// Set the layout distance that counts as the edge of the visible window.
    pub fn half_extent(mut self, half_extent: f32) -> Self {
        self.half_extent = Some(half_extent);
        self
    }

    /// Set depth falloff shape and strength.
    pub fn depth(mut self, curve_exponent: f32, depth_scale: f32) -> Self {
        self.curve_exponent = curve_exponent;
        self.depth_scale = depth_scale;
        self
    }

    /// Set the scale range from edge to center.
    pub fn scale_range(mut self, min: f32, max: f32) -> Self {
        self.min_scale = min;
        self.max_scale = max;
        self
    }

    /// Set opacity falloff and floor.
    pub fn opacity(mut self, falloff_rate: f32, min_opacity: f32) -> Self {
        self.falloff_rate = falloff_rate;
        self.min_opacity = min_opacity;
        self
    }

    /// Set the fan-out rotation at the edge of the visible window.
    pub fn rotation_factor(mut self, radians: f32) -> Self {
        self.rotation_factor = radians;
        self
    }

    /// Total layout length of the track.
    pub fn track_length(&self) -> f32 {
        self.item_count as f32 * self.spacing
    }

    /// Layout distance mapped to `|normalized| == 1`.
    pub fn effective_half_extent(&self) -> f32 {
        self.half_extent.unwrap_or(self.track_length() / 2.0)
    }

    /// Scroll units between two neighbouring items.
    pub fn units_per_item(&self) -> f32 {
        self.spacing / self.scroll_to_space
    }

    /// Largest scroll target allowed in [`WrapMode::Clamped`].
    pub fn max_target(&self) -> f32 {
        self.item_count.saturating_sub(1) as f32 * self.units_per_item()
    }

    /// Check every field, failing on the first bad one.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.item_count == 0 {
            return Err(ConfigError::EmptyTrack);
        }

        for (field, value) in [
            ("spacing", self.spacing),
            ("scroll_to_space", self.scroll_to_space),
            ("track_scale", self.track_scale),
            ("curve_exponent", self.curve_exponent),
            ("velocity_epsilon", self.velocity_epsilon),
            ("settle_epsilon", self.settle_epsilon),
            ("max_event_delta", self.max_event_delta),
            ("max_frame_delta", self.max_frame_delta),
        ] {
            positive(field, value)?;
        }
        if let Some(half_extent) = self.half_extent {
            positive("half_extent", half_extent)?;
        }

        for (field, value) in [
            ("wheel_target_weight", self.wheel_target_weight),
            ("wheel_velocity_weight", self.wheel_velocity_weight),
            ("velocity_carry", self.velocity_carry),
            ("depth_scale", self.depth_scale),
        ] {
            non_negative(field, value)?;
        }

        for (field, value) in [
            ("drag_sensitivity", self.drag_sensitivity),
            ("wheel_sensitivity", self.wheel_sensitivity),
            ("min_scale", self.min_scale),
            ("max_scale", self.max_scale),
            ("falloff_rate", self.falloff_rate),
            ("rotation_factor", self.rotation_factor),
        ] {
            finite(field, value)?;
        }

        open_unit("momentum_decay", self.momentum_decay)?;
        open_unit("smoothing", self.smoothing)?;

        finite("min_opacity", self.min_opacity)?;
        if !(0.0..=1.0).contains(&self.min_opacity) {
            return Err(ConfigError::OutOfRange {
                field: "min_opacity",
                value: self.min_opacity,
                min: 0.0,
                max: 1.0,
            });
        }
        if self.min_scale > self.max_scale {
            return Err(ConfigError::InvertedRange { field: "scale" });
        }

        Ok(())
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite { field })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

fn open_unit(field: &'static str, value: f32) -> Result<(), ConfigError> {
    finite(field, value)?;
    if value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            min: 0.0,
            max: 1.0,
        })
    }
}
