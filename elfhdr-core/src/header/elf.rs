use crate::error::{HeaderError, Result};
use crate::header::ident::{fmt_unknown, DataEncoding, ElfClass, Identification, MagicCheck};
use crate::header::Header;
use byteorder::{ReadBytesExt, LE};
use std::fmt;
use std::io::{self, Cursor, SeekFrom};

/// Offset of `e_type`, right after `e_ident`.
const E_TYPE_OFFSET: u64 = 16;
/// Offset of `e_entry`, the same for ELF32 and ELF64.
const E_ENTRY_OFFSET: u64 = 24;

const ET_NONE: u16 = 0;
const ET_REL: u16 = 1;
const ET_EXEC: u16 = 2;
const ET_DYN: u16 = 3;
const ET_CORE: u16 = 4;

/// Object file type (`e_type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    None,
    Relocatable,
    Executable,
    SharedObject,
    Core,
    Unknown(u16),
}

impl ObjectType {
    /// Decodes `raw`, the `e_type` field read little-endian.
    ///
    /// For big-endian files the value is shifted right by 8 instead of byte-swapped.
    /// This only recovers codes that fit in one byte (`ET_NONE`..=`ET_CORE`); the low
    /// byte is dropped. Unknown codes keep the raw value from before the shift.
    pub fn decode(raw: u16, data: DataEncoding) -> Self {
        let code = match data {
            DataEncoding::BigEndian => raw >> 8,
            _ => raw,
        };

        match code {
            ET_NONE => ObjectType::None,
            ET_REL => ObjectType::Relocatable,
            ET_EXEC => ObjectType::Executable,
            ET_DYN => ObjectType::SharedObject,
            ET_CORE => ObjectType::Core,
            _ => ObjectType::Unknown(raw),
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectType::None => "NONE (None)",
            ObjectType::Relocatable => "REL (Relocatable file)",
            ObjectType::Executable => "EXEC (Executable file)",
            ObjectType::SharedObject => "DYN (Shared object file)",
            ObjectType::Core => "CORE (Core file)",
            ObjectType::Unknown(raw) => return fmt_unknown(f, *raw),
        };
        f.write_str(name)
    }
}

/// Virtual address where execution starts (`e_entry`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryPoint {
    pub address: u64,
    /// Decides the rendered width.
    pub class: ElfClass,
}

impl EntryPoint {
    /// Decodes `raw`, the `e_entry` field read little-endian.
    ///
    /// Big-endian values go through the 32-bit swap of [`swap32`] whatever the class.
    /// ELF32 renders the low word, which is the correctly swapped address; other classes
    /// render the whole result, so a 64-bit big-endian entry point comes out wrong.
    pub fn decode(raw: u64, data: DataEncoding, class: ElfClass) -> Self {
        let address = match data {
            DataEncoding::BigEndian => {
                if class != ElfClass::Elf32 {
                    log::warn!(
                        "Big-endian {} entry point {:#x}: only a 32-bit swap is applied",
                        class,
                        raw
                    );
                }
                swap32(raw)
            }
            _ => raw,
        };

        EntryPoint { address, class }
    }
}

impl fmt::Display for EntryPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.class {
            ElfClass::Elf32 => write!(f, "{:#x}", self.address as u32),
            _ => write!(f, "{:#x}", self.address),
        }
    }
}

/// Swaps adjacent bytes of the low 32 bits of `v`, then rotates the 16-bit halves.
///
/// The first step drops the upper 32 bits. The second is not masked, so the result can be
/// up to 48 bits wide; its low 32 bits are the byte-reversed low word of `v`.
fn swap32(v: u64) -> u64 {
    let v = ((v << 8) & 0xff00_ff00) | ((v >> 8) & 0x00ff_00ff);
    (v << 16) | (v >> 16)
}

/// The part of the ELF file header this crate decodes: `e_ident`, `e_type` and `e_entry`.
///
/// Multi-byte fields are stored as read little-endian; the big-endian correction is
/// applied when they are decoded.
///
/// Reference: [ELF Specification v1.2](https://refspecs.linuxfoundation.org/elf/elf.pdf)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElfHeader {
    pub ident: Identification,

    /// Object file type, raw.
    pub e_type: u16,

    /// Entry point, raw. Only the low 32 bits are read for ELF32.
    pub e_entry: u64,
}

impl ElfHeader {
    /// Decodes the header at the start of `bytes`.
    ///
    /// `bytes` must hold `e_ident` plus `e_entry`: 28 bytes for ELF32, 32 otherwise.
    pub fn parse(bytes: &[u8], check: MagicCheck) -> Result<Self> {
        let ident = Identification::decode(bytes, check)?;

        let needed = E_ENTRY_OFFSET as usize + ident.class.entry_width();
        if bytes.len() < needed {
            return Err(HeaderError::Truncated {
                needed,
                got: bytes.len(),
            });
        }

        Self::from_reader(ident, &mut Cursor::new(bytes))
    }

    fn from_reader<R: io::Read + io::Seek>(ident: Identification, cur: &mut R) -> Result<Self> {
        cur.seek(SeekFrom::Start(E_TYPE_OFFSET))?;
        let e_type = cur.read_u16::<LE>()?;

        cur.seek(SeekFrom::Start(E_ENTRY_OFFSET))?;
        let e_entry = match ident.class {
            ElfClass::Elf32 => cur.read_u32::<LE>()? as u64,
            _ => cur.read_u64::<LE>()?,
        };

        log::debug!(
            "{} {}: e_type {:#06x}, e_entry {:#x}",
            ident.class,
            ident.data,
            e_type,
            e_entry
        );

        Ok(ElfHeader {
            ident,
            e_type,
            e_entry,
        })
    }
}

impl Header for ElfHeader {
    fn ident(&self) -> &Identification {
        &self.ident
    }

    fn object_type(&self) -> ObjectType {
        ObjectType::decode(self.e_type, self.ident.data)
    }

    fn entry_point(&self) -> EntryPoint {
        EntryPoint::decode(self.e_entry, self.ident.data, self.ident.class)
    }

    fn format_name(&self) -> &'static str {
        "ELF"
    }
}
