pub mod binary;
pub mod error;
pub mod header;
pub mod report;

pub use binary::*;
pub use error::{HeaderError, Result};
pub use header::elf::{ElfHeader, EntryPoint, ObjectType};
pub use header::ident::{DataEncoding, ElfClass, Identification, MagicCheck, OsAbi, Version};
pub use header::Header;
pub use report::Report;
