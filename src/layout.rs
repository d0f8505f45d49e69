//! Distance-to-look mapping for items on a wrapping track.
//!
//! [`CarouselLayout`] is a pure function of `(index, position)`: it holds no
//! mutable state, so it can be evaluated any number of times per frame and
//! always returns the same [`VisualAttributes`] for the same input.
//!
//! For each item the layout
//!
//! 1. places it at `index * spacing - position * scroll_to_space`,
//! 2. wraps that offset into `[-track/2, track/2]` on an infinite track,
//! 3. normalises it against the visible half extent,
//! 4. derives depth (power-law falloff), scale, opacity and a Y fan-out from
//!    the normalised distance.
//!
//! Wrapping happens before anything is derived, so no attribute jumps when an
//! item crosses the back of the loop.

use std::f32::consts::PI;

use glam::{Quat, Vec3};

use crate::config::{Axis, CarouselConfig, WrapMode};
use crate::error::ConfigError;
use crate::transform::{ItemInstance, Transform};

/// Where and how to draw one item this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualAttributes {
    /// Scene-space offset along the travel axis.
    pub offset: Vec3,
    /// Recession toward -Z; zero at center, negative elsewhere.
    pub depth_z: f32,
    pub scale: f32,
    /// In `[min_opacity, 1]`.
    pub opacity: f32,
    /// Fan-out around Y in radians.
    pub rotation_y: f32,
}

impl VisualAttributes {
    /// Combined position: the axis offset pushed back by `depth_z`.
    pub fn translation(&self) -> Vec3 {
        self.offset + Vec3::Z * self.depth_z
    }

    pub fn transform(&self) -> Transform {
        Transform::from_position(self.translation())
            .rotation(Quat::from_rotation_y(self.rotation_y))
            .uniform_scale(self.scale)
    }

    /// GPU-ready record for this item.
    pub fn instance(&self) -> ItemInstance {
        ItemInstance::new(&self.transform(), self.opacity)
    }
}

/// Maps a scroll position to per-item [`VisualAttributes`].
#[derive(Clone, Debug)]
pub struct CarouselLayout {
    config: CarouselConfig,
}

impl CarouselLayout {
    /// Fails if `config` does not validate (e.g. zero items).
    pub fn new(config: CarouselConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn item_count(&self) -> usize {
        self.config.item_count
    }

    /// Layout-space offset of `index` from center, wrapped on an infinite track.
    pub fn raw_offset(&self, index: usize, position: f32) -> f32 {
        let config = &self.config;
        let position = if position.is_finite() { position } else { 0.0 };
        let raw = index as f32 * config.spacing - position * config.scroll_to_space;

        // A lone item is always the centered one, whatever the mode.
        if config.item_count == 1 {
            return 0.0;
        }
        match config.wrap_mode {
            WrapMode::Infinite => wrap(raw, config.track_length()),
            WrapMode::Clamped => raw,
        }
    }

    /// Attributes of item `index` with the track scrolled to `position`.
    pub fn attributes(&self, index: usize, position: f32) -> VisualAttributes {
        let config = &self.config;
        let raw = self.raw_offset(index, position);
        let normalized = raw / config.effective_half_extent();
        let distance = normalized.abs();

        let depth_z = -distance.powf(config.curve_exponent) * config.depth_scale;
        let t = distance.min(1.0);
        let scale = config.max_scale + (config.min_scale - config.max_scale) * t;
        let opacity = (1.0 - distance * config.falloff_rate).clamp(config.min_opacity, 1.0);
        let rotation_y = -config.rotation_factor * self.fan(raw, normalized);

        VisualAttributes {
            offset: axis_direction(config.axis) * raw * config.track_scale,
            depth_z,
            scale,
            opacity,
            rotation_y,
        }
    }

    /// Attributes for every item, in index order.
    pub fn iter(&self, position: f32) -> impl Iterator<Item = (usize, VisualAttributes)> + '_ {
        (0..self.config.item_count).map(move |index| (index, self.attributes(index, position)))
    }

    /// Fan-out driver: `normalized` near center, easing to zero at the loop's
    /// back edge so both sides of the seam agree.
    fn fan(&self, raw: f32, normalized: f32) -> f32 {
        let config = &self.config;
        if config.wrap_mode == WrapMode::Clamped || config.item_count == 1 {
            return normalized;
        }
        let half_track = config.track_length() / 2.0;
        let phase = raw / half_track;
        (PI * phase).sin() / PI * (half_track / config.effective_half_extent())
    }
}

fn wrap(raw: f32, total: f32) -> f32 {
    let half = total / 2.0;
    (raw + half).rem_euclid(total) - half
}

fn axis_direction(axis: Axis) -> Vec3 {
    match axis {
        Axis::Horizontal => Vec3::X,
        Axis::Vertical => Vec3::NEG_Y,
        Axis::Depth => Vec3::NEG_Z,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(config: CarouselConfig) -> CarouselLayout {
        CarouselLayout::new(config).unwrap()
    }

    fn positions() -> impl Iterator<Item = f32> {
        (-400..400).map(|i| i as f32 * 0.731)
    }

    #[test]
    fn zero_items_fail_fast() {
        assert!(matches!(
            CarouselLayout::new(CarouselConfig::new(0)),
            Err(ConfigError::EmptyTrack)
        ));
    }

    #[test]
    fn raw_offset_stays_within_half_track() {
        let layout = layout(CarouselConfig::new(6));
        let half = layout.config().track_length() / 2.0;

        for position in positions().chain([1.0e6, -1.0e6, 12_345.678]) {
            for index in 0..6 {
                let raw = layout.raw_offset(index, position);
                assert!(
                    (-half..=half).contains(&raw),
                    "index {index} at {position}: {raw}"
                );
            }
        }
    }

    #[test]
    fn items_occupy_distinct_slots() {
        let layout = layout(CarouselConfig::new(6));
        let mut offsets: Vec<f32> = (0..6).map(|i| layout.raw_offset(i, 17.3)).collect();
        offsets.sort_by(f32::total_cmp);
        for pair in offsets.windows(2) {
            assert!((pair[1] - pair[0] - 0.25).abs() < 1e-4);
        }
    }

    #[test]
    fn centered_item() {
        let layout = layout(CarouselConfig::new(6));
        let attrs = layout.attributes(0, 0.0);

        assert_eq!(attrs.offset, Vec3::ZERO);
        assert_eq!(attrs.depth_z, 0.0);
        assert_eq!(attrs.scale, 1.0);
        assert_eq!(attrs.opacity, 1.0);
        assert_eq!(attrs.rotation_y, 0.0);
    }

    #[test]
    fn attributes_fall_off_with_distance() {
        let layout = layout(CarouselConfig::new(6));
        let near = layout.attributes(1, 0.0);
        let far = layout.attributes(2, 0.0);

        assert!(far.depth_z < near.depth_z && near.depth_z < 0.0);
        assert!(far.scale < near.scale && near.scale < 1.0);
        assert!(far.opacity < near.opacity && near.opacity < 1.0);
        assert!(far.opacity >= layout.config().min_opacity);
    }

    #[test]
    fn fan_out_tilts_each_side_opposite_ways() {
        let layout = layout(CarouselConfig::new(6));
        let ahead = layout.attributes(1, 0.0);
        let behind = layout.attributes(5, 0.0);

        assert!(ahead.rotation_y < 0.0);
        assert!(behind.rotation_y > 0.0);
        assert!((ahead.rotation_y + behind.rotation_y).abs() < 1e-5);
    }

    #[test]
    fn depth_follows_power_law() {
        let config = CarouselConfig::pyramid(8).half_extent(1.0);
        let layout = layout(config);
        // Item 2 sits 0.5 layout units from center.
        let attrs = layout.attributes(2, 0.0);
        let expected = -(0.5_f32).powf(1.5) * 2.0;
        assert!((attrs.depth_z - expected).abs() < 1e-5);
    }

    #[test]
    fn opacity_is_clamped_to_floor() {
        let config = CarouselConfig::new(6).half_extent(0.1).opacity(2.0, 0.25);
        let attrs = layout(config).attributes(3, 0.0);
        assert_eq!(attrs.opacity, 0.25);
    }

    #[test]
    fn continuous_across_wrap_seam() {
        let layout = layout(CarouselConfig::new(6));
        let step = 0.001;
        let bound = 0.01;

        for index in 0..6 {
            let mut previous = layout.attributes(index, -40.0);
            for i in 1..80_000 {
                let position = -40.0 + i as f32 * step;
                let attrs = layout.attributes(index, position);
                assert!((attrs.depth_z - previous.depth_z).abs() < bound, "depth at {position}");
                assert!((attrs.scale - previous.scale).abs() < bound, "scale at {position}");
                assert!((attrs.opacity - previous.opacity).abs() < bound, "opacity at {position}");
                assert!(
                    (attrs.rotation_y - previous.rotation_y).abs() < bound,
                    "rotation at {position}"
                );
                previous = attrs;
            }
        }
    }

    #[test]
    fn layout_is_idempotent() {
        let layout = layout(CarouselConfig::pyramid(7));
        for position in positions() {
            for index in 0..7 {
                let a = layout.attributes(index, position);
                let b = layout.attributes(index, position);
                assert_eq!(
                    a.offset.to_array().map(f32::to_bits),
                    b.offset.to_array().map(f32::to_bits)
                );
                assert_eq!(a.depth_z.to_bits(), b.depth_z.to_bits());
                assert_eq!(a.scale.to_bits(), b.scale.to_bits());
                assert_eq!(a.opacity.to_bits(), b.opacity.to_bits());
                assert_eq!(a.rotation_y.to_bits(), b.rotation_y.to_bits());
            }
        }
    }

    #[test]
    fn single_item_always_centered() {
        let layout = layout(CarouselConfig::new(1));
        for position in positions().chain([f32::NAN, f32::INFINITY]) {
            let attrs = layout.attributes(0, position);
            assert_eq!(attrs.offset, Vec3::ZERO);
            assert_eq!(attrs.depth_z, 0.0);
            assert!(attrs.depth_z.is_sign_negative());
            assert_eq!(attrs.rotation_y, 0.0);
        }
    }

    #[test]
    fn single_clamped_item_stays_centered() {
        let layout = layout(CarouselConfig::arc(1));
        for position in [-3.0, -0.4, 0.0, 0.7, 12.5] {
            let attrs = layout.attributes(0, position);
            assert_eq!(layout.raw_offset(0, position), 0.0);
            assert_eq!(attrs.offset, Vec3::ZERO);
            assert_eq!(attrs.depth_z, 0.0);
            assert_eq!(attrs.scale, 1.0);
            assert_eq!(attrs.rotation_y, 0.0);
        }
    }

    #[test]
    fn clamped_track_does_not_wrap() {
        let layout = layout(CarouselConfig::arc(7));
        let last = layout.attributes(6, 0.0);
        assert_eq!(layout.raw_offset(6, 0.0), 6.0);
        assert!((last.offset.x - 15.0).abs() < 1e-5);
        assert_eq!(last.scale, layout.config().min_scale);
        assert!((last.rotation_y + 1.8).abs() < 1e-5);
    }

    #[test]
    fn axis_selects_offset_direction() {
        let vertical = layout(CarouselConfig::new(6).axis(Axis::Vertical));
        let attrs = vertical.attributes(1, 0.0);
        assert!(attrs.offset.y < 0.0);
        assert_eq!(attrs.offset.x, 0.0);

        let lane = layout(CarouselConfig::depth_lane(8));
        let attrs = lane.attributes(1, 0.0);
        assert!((attrs.offset.z + 3.0).abs() < 1e-5);
    }

    #[test]
    fn transform_combines_offset_and_depth() {
        let attrs = VisualAttributes {
            offset: Vec3::new(1.5, 0.0, 0.0),
            depth_z: -0.5,
            scale: 0.8,
            opacity: 0.6,
            rotation_y: 0.0,
        };
        assert_eq!(attrs.translation(), Vec3::new(1.5, 0.0, -0.5));

        let transform = attrs.transform();
        assert_eq!(transform.scale, Vec3::splat(0.8));

        let instance = attrs.instance();
        assert_eq!(instance.model[3], [1.5, 0.0, -0.5, 1.0]);
        assert_eq!(instance.opacity, 0.6);
    }

    #[test]
    fn iter_visits_every_item() {
        let layout = layout(CarouselConfig::new(5));
        let indices: Vec<usize> = layout.iter(3.2).map(|(i, _)| i).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    }
}
