use crate::core::error::EmuError;

/// Describes a single input button that a machine accepts.
pub struct InputButton {
    /// Machine-defined button identifier, passed to `set_input()`.
    pub id: u8,
    /// Human-readable name for display/configuration (e.g., "Joy Fire").
    pub name: &'static str,
}

/// Machine-agnostic interface for emulated systems.
///
/// The frontend is a pure rendering engine that does not know about
/// specific hardware (video chips, port latches, palette formats); it
/// drives whatever implements this trait.
pub trait Machine {
    /// Native display resolution as (width, height) in pixels.
    fn display_size(&self) -> (u32, u32);

    /// Run one frame of emulation (step the CPU until the video chip
    /// reports a completed frame).
    ///
    /// A CPU fault (invalid opcode, stack underflow) stops the frame and
    /// is returned; the machine must not be stepped afterwards.
    fn run_frame(&mut self) -> Result<(), EmuError>;

    /// Render the current video state into an RGB24 pixel buffer.
    ///
    /// The buffer must be at least `width * height * 3` bytes (from
    /// `display_size()`). Pixels are stored left-to-right, top-to-bottom,
    /// 3 bytes per pixel (R, G, B).
    fn render_frame(&self, buffer: &mut [u8]);

    /// Handle an input event. `button` is a machine-defined ID from
    /// `input_map()`. `pressed` is true for key-down, false for key-up.
    ///
    /// Called per-event, not per-frame; each call latches the button state
    /// so that `run_frame()` sees the accumulated input.
    fn set_input(&mut self, button: u8, pressed: bool);

    /// Get the list of input buttons this machine accepts.
    fn input_map(&self) -> &[InputButton];

    /// Feed one character of typed text to the machine, in its native
    /// encoding. Machines without a text-entry path ignore it.
    fn type_key(&mut self, _key: u8) {}

    /// Inject a guest program image at `origin` in guest memory. Returns
    /// false when the machine has no direct program-injection path.
    fn load_program(&mut self, _origin: u16, _data: &[u8]) -> bool {
        false
    }

    /// Reset the machine to its initial power-on state.
    fn reset(&mut self);
}
