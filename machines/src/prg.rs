//! PRG program loading (host collaborator).
//!
//! A .PRG file is a two-byte little-endian load address followed by the
//! program bytes. Loading writes the payload into RAM and points the
//! BASIC program/variable pointers at it so a typed RUN finds it.

use std::path::Path;

#[derive(Debug)]
pub enum PrgError {
    Io(std::io::Error),

    /// Shorter than the two-byte load-address header.
    TooShort,

    /// Payload would run past the end of the 64 KB address space.
    TooLarge { load_address: u16, size: usize },
}

impl std::fmt::Display for PrgError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::TooShort => write!(f, "PRG file is shorter than its header"),
            Self::TooLarge { load_address, size } => write!(
                f,
                "PRG payload of {size} bytes at ${load_address:04X} exceeds memory"
            ),
        }
    }
}

impl std::error::Error for PrgError {}

impl From<std::io::Error> for PrgError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

/// A parsed PRG image: where it loads and what it contains.
pub struct Prg {
    pub load_address: u16,
    pub data: Vec<u8>,
}

impl Prg {
    pub fn from_file(path: &Path) -> Result<Self, PrgError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, PrgError> {
        if bytes.len() < 2 {
            return Err(PrgError::TooShort);
        }
        let load_address = u16::from_le_bytes([bytes[0], bytes[1]]);
        let data = bytes[2..].to_vec();
        if load_address as usize + data.len() > 0x10000 {
            return Err(PrgError::TooLarge {
                load_address,
                size: data.len(),
            });
        }
        Ok(Self { load_address, data })
    }

    /// Address of the first byte past the program.
    pub fn end_address(&self) -> u16 {
        self.load_address.wrapping_add(self.data.len() as u16)
    }
}
