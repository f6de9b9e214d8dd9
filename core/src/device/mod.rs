pub mod cia;
pub mod sid;
pub mod vic;

pub use cia::Cia6526;
pub use sid::Sid6581;
pub use vic::{VideoMemory, VideoStandard, Vic656x};
