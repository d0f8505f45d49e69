//! # Sleeve
//!
//! **Inertial scrolling and wrap-around placement for album-sleeve carousels.**
//!
//! Sleeve is the motion half of a carousel: feed it wheel, drag and key
//! events, tick it once per frame, and it tells you where every sleeve goes.
//! Drawing is up to you; the output works the same for a wgpu scene, a 2D
//! canvas, or a list of styled widgets.
//!
//! ## Quick Start
//!
//! ```
//! use sleeve::*;
//!
//! let mut carousel = Carousel::new(CarouselConfig::pyramid(6)).unwrap();
//!
//! // Input events move the target...
//! carousel.scroll_mut().on_wheel(120.0);
//!
//! // ...and each frame eases toward it.
//! carousel.update_frames(1.0);
//! for (index, attrs) in carousel.items() {
//!     let transform = attrs.transform();
//!     let _ = (index, transform, attrs.opacity);
//! }
//! ```
//!
//! ## Pieces
//!
//! - [`ScrollController`]: momentum, smoothing and discrete navigation over one scalar.
//! - [`CarouselLayout`]: pure mapping from `(index, position)` to [`VisualAttributes`].
//! - [`CarouselConfig`]: one struct (and TOML file) for every variant: shelf, lane, arc, pyramid.
//! - [`CarouselInput`]: winit event adapter.
//! - [`SparkleField`]: seeded decorative particles, independent of scrolling.

mod carousel;
mod clock;
mod config;
mod decor;
mod error;
mod input;
mod layout;
mod scroll;
mod transform;

pub use carousel::Carousel;
pub use clock::{BASELINE_FRAME, frames_in, frames_since};
pub use config::{Axis, CarouselConfig, WrapMode};
pub use decor::{Sparkle, SparkleField};
pub use error::ConfigError;
pub use input::{CarouselInput, PIXELS_PER_LINE};
pub use layout::{CarouselLayout, VisualAttributes};
pub use scroll::{ScrollController, ScrollState};
pub use transform::{ItemInstance, Transform};

// Re-export glam math types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

// Re-export commonly used winit types for convenience
pub use winit::event::{ElementState, MouseButton, MouseScrollDelta};
pub use winit::keyboard::KeyCode;
