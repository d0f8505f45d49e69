use std::time::Instant;

use winit::event::WindowEvent;

use crate::config::CarouselConfig;
use crate::error::ConfigError;
use crate::input::CarouselInput;
use crate::layout::{CarouselLayout, VisualAttributes};
use crate::scroll::ScrollController;

/// A scroll controller, its layout, and the input adapter feeding them.
///
/// # Example
/// ```ignore
/// let mut carousel = Carousel::new(CarouselConfig::pyramid(albums.len()))?;
///
/// // Window events:
/// carousel.handle_event(&event);
///
/// // Each redraw:
/// carousel.update(Instant::now());
/// for (index, attrs) in carousel.items() {
///     draw_sleeve(&albums[index], attrs.transform(), attrs.opacity);
/// }
/// ```
#[derive(Clone, Debug)]
pub struct Carousel {
    scroll: ScrollController,
    layout: CarouselLayout,
    input: CarouselInput,
}

impl Carousel {
    pub fn new(config: CarouselConfig) -> Result<Self, ConfigError> {
        let input = CarouselInput::new(config.axis);
        let layout = CarouselLayout::new(config.clone())?;
        let scroll = ScrollController::new(config)?;
        Ok(Self {
            scroll,
            layout,
            input,
        })
    }

    pub fn scroll(&self) -> &ScrollController {
        &self.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut ScrollController {
        &mut self.scroll
    }

    pub fn layout(&self) -> &CarouselLayout {
        &self.layout
    }

    pub fn handle_event(&mut self, event: &WindowEvent) {
        self.input.handle_event(&mut self.scroll, event);
    }

    /// Advance physics to `now`. Call once per redraw.
    pub fn update(&mut self, now: Instant) -> f32 {
        self.scroll.tick_at(now)
    }

    /// Advance physics by an explicit number of 60 Hz frames.
    pub fn update_frames(&mut self, delta_frames: f32) -> f32 {
        self.scroll.tick(delta_frames)
    }

    /// Attributes for every item at the current position.
    pub fn items(&self) -> impl Iterator<Item = (usize, VisualAttributes)> + '_ {
        self.layout.iter(self.scroll.position())
    }

    pub fn active_index(&self) -> usize {
        self.scroll.active_index()
    }

    pub fn jump_to(&mut self, index: usize) {
        self.scroll.jump_to(index);
    }

    pub fn step(&mut self, delta: i32) {
        self.scroll.step(delta);
    }
}
