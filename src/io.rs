use crate::constants::KEY_COUNT;
use crate::framebuffer::FrameBuffer;

/// Renderer is used by the engine to show the frame buffer. It should abstract
/// the implementation details, so a variety of kinds of screen would work.
pub trait Renderer {
    /// Called after every CLS and DRW with the current frame
    fn present(&mut self, frame: &FrameBuffer);
}

/// Reads the 16-key hexadecimal keypad
pub trait Input {
    /// Whether `key` (0..=F) is currently held down
    fn is_key_down(&self, key: u8) -> bool;

    /// The most recent key press since the last poll, if any.
    ///
    /// This is the non-blocking half of "await any key": the engine keeps
    /// polling it while an `Fx0A` is waiting, so timers carry on ticking.
    fn poll_any_key(&mut self) -> Option<u8>;

    /// Polled once per cycle; true halts the engine
    fn request_quit(&mut self) -> bool;
}

/// Makes the tone that plays while the sound timer is non-zero
pub trait Buzzer {
    fn start(&mut self);
    fn stop(&mut self);
}

/// The collaborators the engine talks to during one call
pub struct Io<'a> {
    pub renderer: &'a mut dyn Renderer,
    pub input: &'a mut dyn Input,
    pub buzzer: &'a mut dyn Buzzer,
}

impl<'a> Io<'a> {
    pub fn new(
        renderer: &'a mut dyn Renderer,
        input: &'a mut dyn Input,
        buzzer: &'a mut dyn Buzzer,
    ) -> Self {
        Io {
            renderer,
            input,
            buzzer,
        }
    }
}

/// # Keypad
/// Tracks the pressed status of keys 0..F plus a pending quit request.
/// Frontends translate their own key events into `press` / `release`.
#[derive(Debug, Default, Clone)]
pub struct Keypad {
    pressed: [bool; KEY_COUNT],
    last_pressed: Option<u8>,
    quit: bool,
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 4-bit representation of the key that was pressed
    pub fn press(&mut self, key: u8) {
        if let Some(slot) = self.pressed.get_mut(key as usize) {
            *slot = true;
            self.last_pressed = Some(key);
        }
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 4-bit representation of the key that was released
    pub fn release(&mut self, key: u8) {
        if let Some(slot) = self.pressed.get_mut(key as usize) {
            *slot = false;
        }
    }

    pub fn quit(&mut self) {
        self.quit = true;
    }
}

impl Input for Keypad {
    fn is_key_down(&self, key: u8) -> bool {
        self.pressed.get(key as usize).copied().unwrap_or(false)
    }

    fn poll_any_key(&mut self) -> Option<u8> {
        self.last_pressed.take()
    }

    fn request_quit(&mut self) -> bool {
        self.quit
    }
}

/// useful for running headless
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn present(&mut self, _frame: &FrameBuffer) {}
}

#[derive(Debug, Default)]
pub struct Mute;

impl Buzzer for Mute {
    fn start(&mut self) {}
    fn stop(&mut self) {}
}
