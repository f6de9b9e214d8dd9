/// Fatal emulation faults.
///
/// Guest programs never observe these as trapped exceptions; any of them
/// stops the step loop and surfaces to the host as a single fatal result.
/// Raster and timer IRQs are normal control flow, not errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmuError {
    /// An opcode outside the documented 6502 instruction set.
    /// `pc` is the address the byte was fetched from.
    InvalidOpcode { pc: u16, opcode: u8 },

    /// A pull (RTS/RTI/PLA/PLP) with the stack pointer already at $FF.
    StackUnderflow { pc: u16 },
}

impl std::fmt::Display for EmuError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidOpcode { pc, opcode } => {
                write!(f, "invalid opcode ${opcode:02X} at ${pc:04X}")
            }
            Self::StackUnderflow { pc } => {
                write!(f, "stack underflow at ${pc:04X}")
            }
        }
    }
}

impl std::error::Error for EmuError {}
