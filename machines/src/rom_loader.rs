//! ROM image loading and validation.
//!
//! The C64 needs three binary images: KERNAL, BASIC, and the character
//! generator. They can come from a directory of files or from in-memory
//! byte slices (so tests can construct a machine with stub ROM bytes).
//! No checksum validation: ROM revisions differ legitimately and all of
//! them are acceptable, but a wrong-sized file is always an error.

use std::path::Path;

pub const KERNAL_SIZE: usize = 8192;
pub const BASIC_SIZE: usize = 8192;
pub const CHARGEN_SIZE: usize = 4096;

pub const KERNAL_FILE: &str = "kernal.bin";
pub const BASIC_FILE: &str = "basic.bin";
pub const CHARGEN_FILE: &str = "chargen.bin";

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading the ROM set. All of them abort
/// startup.
#[derive(Debug)]
pub enum RomLoadError {
    /// Underlying I/O error (permission denied, short read, etc.)
    Io(std::io::Error),

    /// A required ROM file was not found.
    MissingFile(String),

    /// ROM file size does not match the expected size.
    SizeMismatch {
        file: String,
        expected: usize,
        actual: usize,
    },
}

impl std::fmt::Display for RomLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::MissingFile(name) => write!(f, "missing ROM file: {name}"),
            Self::SizeMismatch {
                file,
                expected,
                actual,
            } => write!(f, "ROM {file}: expected {expected} bytes, got {actual}"),
        }
    }
}

impl std::error::Error for RomLoadError {}

impl From<std::io::Error> for RomLoadError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// RomImages
// ---------------------------------------------------------------------------

/// The three ROM images, size-validated at load time and read-only from
/// then on.
#[derive(Clone)]
pub struct RomImages {
    pub kernal: [u8; KERNAL_SIZE],
    pub basic: [u8; BASIC_SIZE],
    pub chargen: [u8; CHARGEN_SIZE],
}

impl RomImages {
    /// Load `kernal.bin`, `basic.bin`, and `chargen.bin` from a directory.
    pub fn from_directory(dir: &Path) -> Result<Self, RomLoadError> {
        Ok(Self {
            kernal: read_rom(dir, KERNAL_FILE)?,
            basic: read_rom(dir, BASIC_FILE)?,
            chargen: read_rom(dir, CHARGEN_FILE)?,
        })
    }

    /// Build a ROM set from byte slices. Sizes are validated the same way
    /// as for files; tests typically pass stub contents here.
    pub fn from_bytes(kernal: &[u8], basic: &[u8], chargen: &[u8]) -> Result<Self, RomLoadError> {
        Ok(Self {
            kernal: copy_rom(kernal, KERNAL_FILE)?,
            basic: copy_rom(basic, BASIC_FILE)?,
            chargen: copy_rom(chargen, CHARGEN_FILE)?,
        })
    }

    /// All-zero ROM images, for tests that patch individual vectors.
    pub fn empty() -> Self {
        Self {
            kernal: [0; KERNAL_SIZE],
            basic: [0; BASIC_SIZE],
            chargen: [0; CHARGEN_SIZE],
        }
    }
}

fn read_rom<const N: usize>(dir: &Path, name: &str) -> Result<[u8; N], RomLoadError> {
    let path = dir.join(name);
    let data = match std::fs::read(&path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(RomLoadError::MissingFile(name.to_string()));
        }
        Err(e) => return Err(e.into()),
    };
    copy_rom(&data, name)
}

fn copy_rom<const N: usize>(data: &[u8], name: &str) -> Result<[u8; N], RomLoadError> {
    if data.len() != N {
        return Err(RomLoadError::SizeMismatch {
            file: name.to_string(),
            expected: N,
            actual: data.len(),
        });
    }
    let mut rom = [0u8; N];
    rom.copy_from_slice(data);
    Ok(rom)
}
