//! Inertial scroll controller.
//!
//! [`ScrollController`] turns noisy wheel, drag and keyboard input into one
//! smoothly animated scalar. Input only ever moves the *target*; every frame
//! [`tick`](ScrollController::tick) lets momentum carry the target on and then
//! eases the visible position toward it.
//!
//! ```
//! use sleeve::{CarouselConfig, ScrollController};
//!
//! let mut scroll = ScrollController::new(CarouselConfig::new(6)).unwrap();
//! scroll.on_pointer_down(500.0);
//! scroll.on_pointer_move(400.0);
//! scroll.on_pointer_up();
//!
//! for _ in 0..10 {
//!     scroll.tick(1.0);
//! }
//! assert!(scroll.position() > 0.0);
//! ```
//!
//! All per-frame factors are raised to the power of the frame step, so a
//! 144 Hz display and a 30 Hz one cover the same distance per second.

use std::time::Instant;

use crate::clock::frames_since;
use crate::config::{CarouselConfig, WrapMode};
use crate::error::ConfigError;

/// Mutable scroll state. Only the owning [`ScrollController`] writes to it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    /// Position the layout is drawn at.
    pub position: f32,
    /// Position the controller is easing toward.
    pub target: f32,
    /// Momentum in scroll units per frame.
    pub velocity: f32,
    /// A pointer drag session is active.
    pub dragging: bool,
    /// Last pointer coordinate seen during the drag.
    pub last_pointer_coord: f32,
    /// Time of the last [`ScrollController::tick_at`].
    pub last_timestamp: Option<Instant>,
}

/// Owns [`ScrollState`] and advances it from input events and frame ticks.
#[derive(Clone, Debug)]
pub struct ScrollController {
    config: CarouselConfig,
    state: ScrollState,
}

impl ScrollController {
    /// Create a controller at position zero.
    ///
    /// Fails if `config` does not validate.
    pub fn new(config: CarouselConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: ScrollState::default(),
        })
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn position(&self) -> f32 {
        self.state.position
    }

    pub fn target(&self) -> f32 {
        self.state.target
    }

    pub fn velocity(&self) -> f32 {
        self.state.velocity
    }

    pub fn is_dragging(&self) -> bool {
        self.state.dragging
    }

    /// No drag, no momentum, and the position has reached the target.
    pub fn is_settled(&self) -> bool {
        !self.state.dragging
            && self.state.velocity == 0.0
            && self.state.position == self.state.target
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Apply a wheel delta, split between the target and momentum.
    pub fn on_wheel(&mut self, delta: f32) {
        if !delta.is_finite() {
            tracing::debug!(delta, "discarding non-finite wheel delta");
            return;
        }
        let scaled = self.clamp_event(delta * self.config.wheel_sensitivity);
        self.state.target += self.clamp_event(scaled * self.config.wheel_target_weight);
        self.state.velocity =
            self.clamp_event(self.state.velocity + scaled * self.config.wheel_velocity_weight);
    }

    /// Begin a drag session at `coord`. Ignored while a session is already active.
    pub fn on_pointer_down(&mut self, coord: f32) {
        if !coord.is_finite() {
            tracing::debug!(coord, "discarding non-finite pointer-down");
            return;
        }
        if self.state.dragging {
            return;
        }
        self.state.dragging = true;
        self.state.last_pointer_coord = coord;
        self.state.velocity = 0.0;
    }

    /// Follow the pointer during a drag. Moving toward lower coordinates scrolls forward.
    pub fn on_pointer_move(&mut self, coord: f32) {
        if !self.state.dragging {
            return;
        }
        if !coord.is_finite() {
            tracing::debug!(coord, "discarding non-finite pointer-move");
            return;
        }
        let moved = self.state.last_pointer_coord - coord;
        let delta = self.clamp_event(moved * self.config.drag_sensitivity);
        self.state.target += delta;
        self.state.velocity = self.clamp_event(delta * self.config.velocity_carry);
        self.state.last_pointer_coord = coord;
    }

    /// End the drag session. The last drag velocity carries on as momentum.
    ///
    /// Hosts should route pointer-cancel and pointer-leave here as well.
    pub fn on_pointer_up(&mut self) {
        self.state.dragging = false;
    }

    // ========================================================================
    // Discrete navigation
    // ========================================================================

    /// Move the target to an absolute scroll position and drop any momentum.
    pub fn set_target(&mut self, target: f32) {
        if !target.is_finite() {
            tracing::debug!(target, "discarding non-finite target");
            return;
        }
        self.state.target = self.clamp_target(target);
        self.state.velocity = 0.0;
    }

    /// Jump both position and target without animating.
    pub fn snap_to(&mut self, position: f32) {
        if !position.is_finite() {
            tracing::debug!(position, "discarding non-finite snap");
            return;
        }
        let position = self.clamp_target(position);
        self.state.position = position;
        self.state.target = position;
        self.state.velocity = 0.0;
    }

    /// Ease toward item `index`.
    ///
    /// On an infinite track the copy of `index` nearest the current target is
    /// chosen so the carousel takes the short way round.
    pub fn jump_to(&mut self, index: usize) {
        let n = self.config.item_count;
        let per_item = self.config.units_per_item();
        let mut goal = match self.config.wrap_mode {
            WrapMode::Infinite => (index % n) as f32 * per_item,
            WrapMode::Clamped => index.min(n - 1) as f32 * per_item,
        };
        if self.config.wrap_mode == WrapMode::Infinite {
            let period = n as f32 * per_item;
            goal += ((self.state.target - goal) / period).round() * period;
        }
        self.set_target(goal);
    }

    /// Ease `delta` items forward (or back) from the item nearest the target.
    pub fn step(&mut self, delta: i32) {
        let per_item = self.config.units_per_item();
        let current = (self.state.target / per_item).round();
        self.set_target((current + delta as f32) * per_item);
    }

    /// Index of the item nearest center at the current position.
    pub fn active_index(&self) -> usize {
        self.index_at(self.state.position)
    }

    /// Index of the item the controller is heading toward.
    pub fn target_index(&self) -> usize {
        self.index_at(self.state.target)
    }

    fn index_at(&self, scroll: f32) -> usize {
        let n = self.config.item_count as i64;
        let nearest = (scroll / self.config.units_per_item()).round() as i64;
        match self.config.wrap_mode {
            WrapMode::Infinite => nearest.rem_euclid(n) as usize,
            WrapMode::Clamped => nearest.clamp(0, n - 1) as usize,
        }
    }

    // ========================================================================
    // Frame update
    // ========================================================================

    /// Advance by the wall-clock time since the previous call.
    ///
    /// The first call only records `now` and does not move anything.
    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let frames = frames_since(self.state.last_timestamp, now, self.config.max_frame_delta);
        self.state.last_timestamp = Some(now);
        self.tick(frames)
    }

    /// Forget the last frame timestamp, e.g. after the host was suspended.
    pub fn reset_clock(&mut self) {
        self.state.last_timestamp = None;
    }

    /// Advance by `delta_frames` nominal 60 Hz frames and return the new position.
    ///
    /// Negative or non-finite steps are treated as zero. One call with `n`
    /// frames lands where `n` single-frame calls would.
    pub fn tick(&mut self, delta_frames: f32) -> f32 {
        let df = if delta_frames.is_finite() {
            f64::from(delta_frames.max(0.0))
        } else {
            0.0
        };
        let config = &self.config;
        let state = &mut self.state;

        let start = f64::from(state.position);
        let retain_gap = 1.0 - f64::from(config.smoothing);
        // Target drift still owed by momentum: T(k) = settle - owed * decay^k.
        let mut drift = None;

        if !state.dragging && state.velocity != 0.0 {
            let decay = f64::from(config.momentum_decay);
            let initial = f64::from(state.velocity);
            let epsilon = f64::from(config.velocity_epsilon);
            let velocity = initial * decay.powf(df);
            // Whole frames whose decayed velocity still clears the epsilon.
            let live = if velocity.abs() >= epsilon {
                df
            } else {
                ((epsilon / initial.abs()).ln() / decay.ln())
                    .floor()
                    .clamp(0.0, df)
            };
            state.velocity = if live == df { velocity as f32 } else { 0.0 };
            if live > 0.0 {
                let owed = initial * decay / (1.0 - decay);
                let settle = f64::from(state.target) + owed;
                state.target = (settle - owed * decay.powf(live)) as f32;
                drift = Some(Drift {
                    settle,
                    owed,
                    decay,
                    frames: live,
                });
            }
        }

        if config.wrap_mode == WrapMode::Clamped {
            let clamped = state.target.clamp(0.0, config.max_target());
            if clamped != state.target {
                state.target = clamped;
                state.velocity = 0.0;
                drift = None;
            }
        }

        let target = f64::from(state.target);
        let position = match drift {
            Some(drift) => {
                let chased = drift.chase(start, 1.0 - retain_gap);
                let rest = df - drift.frames;
                chased + (target - chased) * (1.0 - retain_gap.powf(rest))
            }
            None => start + (target - start) * (1.0 - retain_gap.powf(df)),
        };
        state.position = position as f32;

        if !state.dragging
            && state.velocity == 0.0
            && (state.target - state.position).abs() < config.settle_epsilon
        {
            state.position = state.target;
        }

        if config.wrap_mode == WrapMode::Infinite {
            let period = f64::from(config.item_count as f32 * config.units_per_item());
            let laps = (f64::from(state.position) / period).trunc();
            if laps != 0.0 {
                state.position = (f64::from(state.position) - laps * period) as f32;
                state.target = (f64::from(state.target) - laps * period) as f32;
            }
        }

        tracing::trace!(
            position = state.position,
            target = state.target,
            velocity = state.velocity,
            df,
            "scroll tick"
        );
        state.position
    }

    fn clamp_event(&self, delta: f32) -> f32 {
        let max = self.config.max_event_delta;
        delta.clamp(-max, max)
    }

    fn clamp_target(&self, target: f32) -> f32 {
        match self.config.wrap_mode {
            WrapMode::Infinite => target,
            WrapMode::Clamped => target.clamp(0.0, self.config.max_target()),
        }
    }
}

/// A target sliding geometrically toward `settle` while momentum decays.
#[derive(Clone, Copy, Debug)]
struct Drift {
    settle: f64,
    owed: f64,
    decay: f64,
    /// Frames of this tick spent under momentum.
    frames: f64,
}

impl Drift {
    /// Position after `frames` steps of `p += smoothing * (T(k) - p)`.
    fn chase(&self, start: f64, smoothing: f64) -> f64 {
        let frames = self.frames;
        let keep = 1.0 - smoothing;
        let gap = start - self.settle;
        let pull = smoothing * self.owed;
        if (keep - self.decay).abs() < 1e-9 {
            return self.settle + (gap - pull * frames) * keep.powf(frames);
        }
        let lag = pull * self.decay / (keep - self.decay);
        self.settle + (gap - lag) * keep.powf(frames) + lag * self.decay.powf(frames)
    }
}
