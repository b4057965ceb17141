use std::io;
use std::path::PathBuf;

/// Errors produced while loading or decoding an ELF header.
#[derive(thiserror::Error, Debug)]
pub enum HeaderError {
    /// The first four bytes are not the ELF signature.
    #[error("Not an ELF file")]
    InvalidMagic,

    #[error("ELF header truncated: need {needed} bytes, got {got}")]
    Truncated { needed: usize, got: usize },

    #[error("Can't read file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl HeaderError {
    /// Returns true when the input was rejected because it is not an ELF file at all.
    pub fn is_not_elf(&self) -> bool {
        matches!(self, HeaderError::InvalidMagic)
    }
}

pub type Result<T> = std::result::Result<T, HeaderError>;
