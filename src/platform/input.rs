//! Input events and per-frame snapshots
//!
//! The window layer pushes raw events into an [`InputState`]. Once per frame
//! the game takes a [`FrameInput`] snapshot: held movement keys carry over,
//! one-shot presses (enter, pause, clicks) are cleared after being taken.

use glam::IVec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Enter,
    Pause,
    Backspace,
    Escape,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(Key),
    KeyUp(Key),
    /// Pointer click in screen pixels
    Click(IVec2),
    /// Typed character for free-text answers
    Text(char),
    /// Window closed
    Quit,
}

/// Directional keys currently held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MovementKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MovementKeys {
    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// Everything the game needs from input for one frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameInput {
    pub movement: MovementKeys,
    /// Enter pressed this frame
    pub enter: bool,
    /// Text buffer at the moment Enter was pressed
    pub submitted_text: Option<String>,
    pub pause: bool,
    /// Escape: leave the current screen
    pub back: bool,
    pub click: Option<IVec2>,
    pub quit: bool,
}

/// Accumulates raw events between frames
#[derive(Debug, Default)]
pub struct InputState {
    movement: MovementKeys,
    pending: FrameInput,
    text: String,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents of the text entry box
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn clear_text(&mut self) {
        self.text.clear();
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => self.key(key, true),
            InputEvent::KeyUp(key) => self.key(key, false),
            InputEvent::Click(pos) => self.pending.click = Some(pos),
            InputEvent::Text(c) if !c.is_control() => self.text.push(c),
            InputEvent::Text(_) => {}
            InputEvent::Quit => self.pending.quit = true,
        }
    }

    fn key(&mut self, key: Key, down: bool) {
        match key {
            Key::Left => self.movement.left = down,
            Key::Right => self.movement.right = down,
            Key::Up => self.movement.up = down,
            Key::Down => self.movement.down = down,
            Key::Enter if down => {
                self.pending.enter = true;
                self.pending.submitted_text = Some(std::mem::take(&mut self.text));
            }
            Key::Pause if down => self.pending.pause = true,
            Key::Escape if down => self.pending.back = true,
            Key::Backspace if down => {
                self.text.pop();
            }
            _ => {}
        }
    }

    /// Snapshot for this frame; clears one-shot inputs
    pub fn take_frame(&mut self) -> FrameInput {
        let mut frame = std::mem::take(&mut self.pending);
        frame.movement = self.movement;
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_held_keys_persist_one_shots_clear() {
        let mut input = InputState::new();
        input.apply(InputEvent::KeyDown(Key::Right));
        input.apply(InputEvent::KeyDown(Key::Pause));

        let frame = input.take_frame();
        assert!(frame.movement.right);
        assert!(frame.pause);

        let frame = input.take_frame();
        assert!(frame.movement.right);
        assert!(!frame.pause);

        input.apply(InputEvent::KeyUp(Key::Right));
        assert!(!input.take_frame().movement.any());
    }

    #[test]
    fn test_text_entry_submit() {
        let mut input = InputState::new();
        for c in "Paris".chars() {
            input.apply(InputEvent::Text(c));
        }
        input.apply(InputEvent::KeyDown(Key::Backspace));
        input.apply(InputEvent::Text('s'));
        input.apply(InputEvent::Text('\n'));
        assert_eq!(input.text(), "Paris");

        input.apply(InputEvent::KeyDown(Key::Enter));
        let frame = input.take_frame();
        assert!(frame.enter);
        assert_eq!(frame.submitted_text.as_deref(), Some("Paris"));
        assert_eq!(input.text(), "");
    }

    #[test]
    fn test_click_and_quit() {
        let mut input = InputState::new();
        input.apply(InputEvent::Click(IVec2::new(3, 4)));
        input.apply(InputEvent::Quit);
        let frame = input.take_frame();
        assert_eq!(frame.click, Some(IVec2::new(3, 4)));
        assert!(frame.quit);
    }
}
