use glam::Vec2;

/// Input button identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Button {
    Escape,
    MouseLeft,
    MouseRight,
    MouseMiddle,
}

/// Controller - button state plus pointer motion accumulated since the last frame
pub trait Controller {
    /// Check if button is currently down
    fn is_down(&self, button: Button) -> bool;

    /// Get all currently pressed buttons
    fn get_down_keys(&self) -> &[Button];

    /// Cursor movement in physical pixels, +y pointing down the screen
    fn pointer_delta(&self) -> Vec2;

    /// Wheel movement in notches, positive when scrolling away from the user
    fn scroll_delta(&self) -> f32;
}

/// Controller that reports nothing, for driving the loop without a window
#[derive(Debug, Clone, Copy, Default)]
pub struct NoInput;

impl Controller for NoInput {
    fn is_down(&self, _button: Button) -> bool {
        false
    }

    fn get_down_keys(&self) -> &[Button] {
        &[]
    }

    fn pointer_delta(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn scroll_delta(&self) -> f32 {
        0.0
    }
}
