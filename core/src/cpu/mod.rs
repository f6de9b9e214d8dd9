pub mod mos6510;
pub mod state;

pub use mos6510::Mos6510;
pub use state::Mos6510State;
