//! The 16-byte `e_ident` block at the start of every ELF file.
//!
//! Layout (offsets into `e_ident`):
//! - `0..4`  magic signature `0x7F 'E' 'L' 'F'`
//! - `4`     class (32/64-bit)
//! - `5`     data encoding (byte order)
//! - `6`     identification version
//! - `7`     OS/ABI
//! - `8`     ABI version
//! - `9..16` padding

use crate::error::{HeaderError, Result};
use std::fmt;

pub const EI_NIDENT: usize = 16;
pub const EI_CLASS: usize = 4;
pub const EI_DATA: usize = 5;
pub const EI_VERSION: usize = 6;
pub const EI_OSABI: usize = 7;
pub const EI_ABIVERSION: usize = 8;

/// The ELF signature.
pub const ELFMAG: [u8; 4] = [0x7f, b'E', b'L', b'F'];

pub const EV_CURRENT: u8 = 1;

const ELFCLASSNONE: u8 = 0;
const ELFCLASS32: u8 = 1;
const ELFCLASS64: u8 = 2;

const ELFDATANONE: u8 = 0;
const ELFDATA2LSB: u8 = 1;
const ELFDATA2MSB: u8 = 2;

const ELFOSABI_SYSV: u8 = 0;
const ELFOSABI_HPUX: u8 = 1;
const ELFOSABI_NETBSD: u8 = 2;
const ELFOSABI_LINUX: u8 = 3;
const ELFOSABI_SOLARIS: u8 = 6;
const ELFOSABI_IRIX: u8 = 8;
const ELFOSABI_FREEBSD: u8 = 9;
const ELFOSABI_TRU64: u8 = 10;
const ELFOSABI_ARM: u8 = 97;
const ELFOSABI_STANDALONE: u8 = 255;

/// How strictly the magic signature is matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MagicCheck {
    /// Each byte only has to be one of `0x7F`, `'E'`, `'L'`, `'F'`, in any position.
    /// Permuted or repeated signature bytes pass.
    #[default]
    Membership,
    /// Each byte must equal the signature byte at the same position.
    Positional,
}

/// Checks the first four bytes of `bytes` against the ELF signature.
pub fn validate(bytes: &[u8], check: MagicCheck) -> Result<()> {
    let magic = bytes.get(..ELFMAG.len()).ok_or(HeaderError::Truncated {
        needed: ELFMAG.len(),
        got: bytes.len(),
    })?;

    for (i, &b) in magic.iter().enumerate() {
        let matches = match check {
            MagicCheck::Membership => ELFMAG.contains(&b),
            MagicCheck::Positional => b == ELFMAG[i],
        };
        if !matches {
            log::debug!("magic byte {} is {:#04x}, rejecting", i, b);
            return Err(HeaderError::InvalidMagic);
        }
    }

    if magic != &ELFMAG[..] {
        log::warn!("Accepting non-standard magic {:02x?}", magic);
    }
    Ok(())
}

pub(crate) fn fmt_unknown<T: fmt::LowerHex>(
    f: &mut fmt::Formatter<'_>,
    raw: T,
) -> fmt::Result {
    write!(f, "<unknown: {:#x}>", raw)
}

/// `EI_CLASS`: word size of the object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElfClass {
    None,
    Elf32,
    Elf64,
    Unknown(u8),
}

impl ElfClass {
    pub fn decode(byte: u8) -> Self {
        match byte {
            ELFCLASSNONE => ElfClass::None,
            ELFCLASS32 => ElfClass::Elf32,
            ELFCLASS64 => ElfClass::Elf64,
            other => ElfClass::Unknown(other),
        }
    }

    /// Size in bytes of the `e_entry` field. Anything that is not ELF32 is read as 64-bit.
    pub fn entry_width(self) -> usize {
        match self {
            ElfClass::Elf32 => 4,
            _ => 8,
        }
    }
}

impl fmt::Display for ElfClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElfClass::None => f.write_str("none"),
            ElfClass::Elf32 => f.write_str("ELF32"),
            ElfClass::Elf64 => f.write_str("ELF64"),
            ElfClass::Unknown(raw) => fmt_unknown(f, *raw),
        }
    }
}

/// `EI_DATA`: byte order of the multi-byte header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataEncoding {
    None,
    LittleEndian,
    BigEndian,
    Unknown(u8),
}

impl DataEncoding {
    pub fn decode(byte: u8) -> Self {
        match byte {
            ELFDATANONE => DataEncoding::None,
            ELFDATA2LSB => DataEncoding::LittleEndian,
            ELFDATA2MSB => DataEncoding::BigEndian,
            other => DataEncoding::Unknown(other),
        }
    }
}

impl fmt::Display for DataEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataEncoding::None => f.write_str("none"),
            DataEncoding::LittleEndian => f.write_str("2's complement, little endian"),
            DataEncoding::BigEndian => f.write_str("2's complement, big endian"),
            DataEncoding::Unknown(raw) => fmt_unknown(f, *raw),
        }
    }
}

/// `EI_VERSION`: kept raw, flagged when it is `EV_CURRENT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub value: u8,
    pub is_current: bool,
}

impl Version {
    pub fn decode(byte: u8) -> Self {
        Version {
            value: byte,
            is_current: byte == EV_CURRENT,
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_current {
            write!(f, "{} (current)", self.value)
        } else {
            write!(f, "{}", self.value)
        }
    }
}

/// `EI_OSABI`: target operating system / ABI extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsAbi {
    SystemV,
    HpUx,
    NetBsd,
    Linux,
    Solaris,
    Irix,
    FreeBsd,
    Tru64,
    Arm,
    Standalone,
    Unknown(u8),
}

impl OsAbi {
    pub fn decode(byte: u8) -> Self {
        match byte {
            ELFOSABI_SYSV => OsAbi::SystemV,
            ELFOSABI_HPUX => OsAbi::HpUx,
            ELFOSABI_NETBSD => OsAbi::NetBsd,
            ELFOSABI_LINUX => OsAbi::Linux,
            ELFOSABI_SOLARIS => OsAbi::Solaris,
            ELFOSABI_IRIX => OsAbi::Irix,
            ELFOSABI_FREEBSD => OsAbi::FreeBsd,
            ELFOSABI_TRU64 => OsAbi::Tru64,
            ELFOSABI_ARM => OsAbi::Arm,
            ELFOSABI_STANDALONE => OsAbi::Standalone,
            other => OsAbi::Unknown(other),
        }
    }
}

impl fmt::Display for OsAbi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OsAbi::SystemV => "UNIX - System V",
            OsAbi::HpUx => "UNIX - HP-UX",
            OsAbi::NetBsd => "UNIX - NetBSD",
            OsAbi::Linux => "UNIX - Linux",
            OsAbi::Solaris => "UNIX - Solaris",
            OsAbi::Irix => "UNIX - IRIX",
            OsAbi::FreeBsd => "UNIX - FreeBSD",
            OsAbi::Tru64 => "UNIX - TRU64",
            OsAbi::Arm => "ARM",
            OsAbi::Standalone => "Standalone App",
            OsAbi::Unknown(raw) => return fmt_unknown(f, *raw),
        };
        f.write_str(name)
    }
}

/// Decoded view of `e_ident`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identification {
    /// The raw identification bytes, magic included.
    pub bytes: [u8; EI_NIDENT],
    pub class: ElfClass,
    pub data: DataEncoding,
    pub version: Version,
    pub os_abi: OsAbi,
    /// `EI_ABIVERSION`, passed through as-is.
    pub abi_version: u8,
}

impl Identification {
    /// Validates the magic and decodes the identification fields of `bytes`.
    pub fn decode(bytes: &[u8], check: MagicCheck) -> Result<Self> {
        validate(bytes, check)?;

        let ident: [u8; EI_NIDENT] = bytes
            .get(..EI_NIDENT)
            .and_then(|b| b.try_into().ok())
            .ok_or(HeaderError::Truncated {
                needed: EI_NIDENT,
                got: bytes.len(),
            })?;

        Ok(Identification {
            bytes: ident,
            class: ElfClass::decode(ident[EI_CLASS]),
            data: DataEncoding::decode(ident[EI_DATA]),
            version: Version::decode(ident[EI_VERSION]),
            os_abi: OsAbi::decode(ident[EI_OSABI]),
            abi_version: ident[EI_ABIVERSION],
        })
    }

    pub fn magic(&self) -> &[u8] {
        &self.bytes[..ELFMAG.len()]
    }
}
