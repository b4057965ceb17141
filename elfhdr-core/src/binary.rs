use crate::error::{HeaderError, Result};
use crate::header::elf::ElfHeader;
use crate::header::ident::MagicCheck;
use crate::header::Header;
use crate::report::Report;
use std::io::Read;

/// Size of an ELF64 file header, the most that is ever read from a file.
const MAX_HEADER_LEN: u64 = 64;

pub struct Binary {
    pub path: String,
    pub header: Box<dyn Header>,
}

impl Binary {
    /// Reads the start of the file at `path` and decodes its header.
    pub fn open<P: AsRef<std::path::Path>>(path: P, check: MagicCheck) -> Result<Self> {
        let read_err = |source| HeaderError::Read {
            path: path.as_ref().to_path_buf(),
            source,
        };

        let file = std::fs::File::open(&path).map_err(read_err)?;
        let mut buf = Vec::with_capacity(MAX_HEADER_LEN as usize);
        file.take(MAX_HEADER_LEN)
            .read_to_end(&mut buf)
            .map_err(read_err)?;
        log::info!("Read {} header bytes from {}", buf.len(), path.as_ref().display());

        let mut bin = Self::parse(&buf, check)?;
        bin.path = path.as_ref().display().to_string();
        Ok(bin)
    }

    /// Decodes a header already in memory.
    pub fn parse(bytes: &[u8], check: MagicCheck) -> Result<Self> {
        let header = ElfHeader::parse(bytes, check)?;
        Ok(Self {
            path: String::new(),
            header: Box::new(header),
        })
    }

    pub fn report(&self) -> Report {
        Report::new(self.header.as_ref())
    }
}
