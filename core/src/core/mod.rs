pub mod bus;
pub mod error;
pub mod machine;

pub use bus::{Bus, InterruptState};
pub use error::EmuError;
pub use machine::{InputButton, Machine};
