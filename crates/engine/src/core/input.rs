/// Keys the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    W,
    A,
    S,
    D,
    Space,
    C,
    LShift,
    Escape,
}

const KEY_COUNT: usize = KeyCode::Escape as usize + 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Back,
    Forward,
}

const MOUSE_BUTTON_COUNT: usize = MouseButton::Forward as usize + 1;

/// A single device event, fed to [`Input::update`] as it arrives.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    KeyPressed { key: KeyCode },
    KeyReleased { key: KeyCode },
    MouseButtonPressed { button: MouseButton },
    MouseButtonReleased { button: MouseButton },
    MouseMoved { delta_x: f32, delta_y: f32 },
    MouseWheelScrolled { delta_x: f32, delta_y: f32 },
}

#[derive(Debug, Default, PartialEq, Copy, Clone)]
struct InputState {
    /// Stores whether a mouse button is held down
    mouse_held: [bool; MOUSE_BUTTON_COUNT],
    /// Stores whether a key is held down
    key_held: [bool; KEY_COUNT],
    /// Mouse movement accumulated over the frame
    mouse_delta: (f32, f32),
    /// Scroll amount accumulated over the frame
    scroll_delta: (f32, f32),
}

impl InputState {
    // rolling over to the next frame, deciding which values to keep and which not
    fn rollover(&mut self) {
        self.mouse_delta = (0.0, 0.0);
        self.scroll_delta = (0.0, 0.0);
    }
}

/// Double-buffered input state. The current frame accumulates events, the
/// previous frame stays around so edges can be told apart from held keys.
pub struct Input {
    state: InputState,
    state_prev: InputState,
}

impl Input {
    pub(crate) fn new() -> Self {
        Self {
            state: InputState::default(),
            state_prev: InputState::default(),
        }
    }

    pub(crate) fn update(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::KeyPressed { key } => {
                self.state.key_held[key as usize] = true;
            }
            InputEvent::KeyReleased { key } => {
                self.state.key_held[key as usize] = false;
            }
            InputEvent::MouseButtonPressed { button } => {
                self.state.mouse_held[button as usize] = true;
            }
            InputEvent::MouseButtonReleased { button } => {
                self.state.mouse_held[button as usize] = false;
            }
            InputEvent::MouseMoved { delta_x, delta_y } => {
                self.state.mouse_delta.0 += delta_x;
                self.state.mouse_delta.1 += delta_y;
            }
            InputEvent::MouseWheelScrolled { delta_x, delta_y } => {
                self.state.scroll_delta.0 += delta_x;
                self.state.scroll_delta.1 += delta_y;
            }
        }
    }

    // run this right after the per-frame update
    /// Rolls the input state over to the next frame
    pub(crate) fn rollover_state(&mut self) {
        self.state_prev = self.state;
        self.state.rollover();
    }

    /// Returns whether the key went down this frame
    pub fn key_was_pressed(&self, key: KeyCode) -> bool {
        !self.state_prev.key_held[key as usize] && self.state.key_held[key as usize]
    }

    /// Returns whether the key came up this frame
    pub fn key_was_released(&self, key: KeyCode) -> bool {
        self.state_prev.key_held[key as usize] && !self.state.key_held[key as usize]
    }

    /// Returns whether the key is held down right now
    pub fn key_down(&self, key: KeyCode) -> bool {
        self.state.key_held[key as usize]
    }

    /// Returns whether the key is not held right now
    pub fn key_up(&self, key: KeyCode) -> bool {
        !self.key_down(key)
    }

    /// Returns whether the mouse button is held down right now
    pub fn mouse_button_down(&self, button: MouseButton) -> bool {
        self.state.mouse_held[button as usize]
    }

    /// Returns the mouse delta accumulated this frame
    pub fn mouse_delta(&self) -> (f32, f32) {
        self.state.mouse_delta
    }

    /// Returns the scroll delta accumulated this frame
    pub fn scroll_delta(&self) -> (f32, f32) {
        self.state.scroll_delta
    }
}
