use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::config::Axis;
use crate::scroll::ScrollController;

/// Pixels one wheel notch is worth when the platform reports lines.
pub const PIXELS_PER_LINE: f32 = 100.0;

/// Translates window events into [`ScrollController`] calls.
///
/// Wheel deltas are converted to the "positive scrolls forward" pixel
/// convention the sensitivities are tuned for. Drags follow the cursor
/// coordinate along the carousel's axis.
#[derive(Clone, Debug, Default)]
pub struct CarouselInput {
    axis: Axis,
    cursor: Option<PhysicalPosition<f64>>,
}

impl CarouselInput {
    pub fn new(axis: Axis) -> Self {
        Self { axis, cursor: None }
    }

    /// Last known cursor position, if the cursor is inside the window.
    pub fn cursor(&self) -> Option<PhysicalPosition<f64>> {
        self.cursor
    }

    /// Process a window event, forwarding anything relevant to `scroll`.
    pub fn handle_event(&mut self, scroll: &mut ScrollController, event: &WindowEvent) {
        match event {
            WindowEvent::MouseWheel { delta, .. } => self.wheel(scroll, *delta),
            WindowEvent::MouseInput { state, button, .. } => self.button(scroll, *button, *state),
            WindowEvent::CursorMoved { position, .. } => self.cursor_moved(scroll, *position),
            WindowEvent::CursorLeft { .. } => self.cursor_left(scroll),
            WindowEvent::Focused(false) => scroll.on_pointer_up(),
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    self.key(scroll, key, event.state);
                }
            }
            _ => {}
        }
    }

    pub fn wheel(&mut self, scroll: &mut ScrollController, delta: MouseScrollDelta) {
        let (x, y) = match delta {
            MouseScrollDelta::LineDelta(x, y) => (x * PIXELS_PER_LINE, y * PIXELS_PER_LINE),
            MouseScrollDelta::PixelDelta(pos) => (pos.x as f32, pos.y as f32),
        };
        // winit reports "away from the user" as positive.
        let forward = if y != 0.0 { -y } else { -x };
        if forward != 0.0 {
            scroll.on_wheel(forward);
        }
    }

    pub fn button(
        &mut self,
        scroll: &mut ScrollController,
        button: MouseButton,
        state: ElementState,
    ) {
        if button != MouseButton::Left {
            return;
        }
        match state {
            ElementState::Pressed => {
                if let Some(coord) = self.cursor.map(|c| self.along_axis(c)) {
                    scroll.on_pointer_down(coord);
                }
            }
            ElementState::Released => scroll.on_pointer_up(),
        }
    }

    pub fn cursor_moved(&mut self, scroll: &mut ScrollController, position: PhysicalPosition<f64>) {
        self.cursor = Some(position);
        scroll.on_pointer_move(self.along_axis(position));
    }

    /// Leaving the window ends any drag, like a pointer-up.
    pub fn cursor_left(&mut self, scroll: &mut ScrollController) {
        self.cursor = None;
        scroll.on_pointer_up();
    }

    /// Arrow keys step one item; Home and End jump to the ends.
    pub fn key(&mut self, scroll: &mut ScrollController, key: KeyCode, state: ElementState) {
        if state != ElementState::Pressed {
            return;
        }
        match key {
            KeyCode::ArrowRight | KeyCode::ArrowDown => scroll.step(1),
            KeyCode::ArrowLeft | KeyCode::ArrowUp => scroll.step(-1),
            KeyCode::Home => scroll.jump_to(0),
            KeyCode::End => scroll.jump_to(scroll.config().item_count - 1),
            _ => {}
        }
    }

    fn along_axis(&self, position: PhysicalPosition<f64>) -> f32 {
        match self.axis {
            Axis::Horizontal => position.x as f32,
            Axis::Vertical | Axis::Depth => position.y as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CarouselConfig;

    fn setup(axis: Axis) -> (CarouselInput, ScrollController) {
        let config = CarouselConfig::new(6).axis(axis).scroll_to_space(0.25);
        (CarouselInput::new(axis), ScrollController::new(config).unwrap())
    }

    #[test]
    fn wheel_notch_scrolls_forward() {
        let (mut input, mut scroll) = setup(Axis::Horizontal);
        input.wheel(&mut scroll, MouseScrollDelta::LineDelta(0.0, -1.0));
        assert!((scroll.target() - 0.03).abs() < 1e-6);
    }

    #[test]
    fn pixel_wheel_falls_back_to_horizontal() {
        let (mut input, mut scroll) = setup(Axis::Horizontal);
        input.wheel(&mut scroll, MouseScrollDelta::PixelDelta(PhysicalPosition::new(50.0, 0.0)));
        assert!((scroll.target() + 0.015).abs() < 1e-6);
    }

    #[test]
    fn drag_follows_cursor_along_axis() {
        let (mut input, mut scroll) = setup(Axis::Horizontal);
        input.cursor_moved(&mut scroll, PhysicalPosition::new(500.0, 20.0));
        input.button(&mut scroll, MouseButton::Left, ElementState::Pressed);
        assert!(scroll.is_dragging());

        input.cursor_moved(&mut scroll, PhysicalPosition::new(400.0, 300.0));
        assert!((scroll.target() - 0.15).abs() < 1e-6);

        input.button(&mut scroll, MouseButton::Left, ElementState::Released);
        assert!(!scroll.is_dragging());
    }

    #[test]
    fn vertical_drag_uses_y() {
        let (mut input, mut scroll) = setup(Axis::Vertical);
        input.cursor_moved(&mut scroll, PhysicalPosition::new(0.0, 500.0));
        input.button(&mut scroll, MouseButton::Left, ElementState::Pressed);
        input.cursor_moved(&mut scroll, PhysicalPosition::new(900.0, 400.0));
        assert!((scroll.target() - 0.15).abs() < 1e-6);
    }

    #[test]
    fn press_without_cursor_does_not_drag() {
        let (mut input, mut scroll) = setup(Axis::Horizontal);
        input.button(&mut scroll, MouseButton::Left, ElementState::Pressed);
        assert!(!scroll.is_dragging());
    }

    #[test]
    fn other_buttons_are_ignored() {
        let (mut input, mut scroll) = setup(Axis::Horizontal);
        input.cursor_moved(&mut scroll, PhysicalPosition::new(10.0, 10.0));
        input.button(&mut scroll, MouseButton::Right, ElementState::Pressed);
        assert!(!scroll.is_dragging());
    }

    #[test]
    fn leaving_window_cancels_drag() {
        let (mut input, mut scroll) = setup(Axis::Horizontal);
        input.cursor_moved(&mut scroll, PhysicalPosition::new(10.0, 10.0));
        input.button(&mut scroll, MouseButton::Left, ElementState::Pressed);
        input.cursor_left(&mut scroll);
        assert!(!scroll.is_dragging());
        assert!(input.cursor().is_none());
    }

    #[test]
    fn keys_navigate_by_item() {
        let (mut input, mut scroll) = setup(Axis::Horizontal);
        input.key(&mut scroll, KeyCode::ArrowRight, ElementState::Pressed);
        input.key(&mut scroll, KeyCode::ArrowRight, ElementState::Released);
        assert_eq!(scroll.target(), 1.0);

        input.key(&mut scroll, KeyCode::End, ElementState::Pressed);
        assert_eq!(scroll.target_index(), 5);

        input.key(&mut scroll, KeyCode::Home, ElementState::Pressed);
        assert_eq!(scroll.target_index(), 0);

        input.key(&mut scroll, KeyCode::ArrowLeft, ElementState::Pressed);
        assert_eq!(scroll.target_index(), 5);
    }
}
