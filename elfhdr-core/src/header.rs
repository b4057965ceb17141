pub mod elf;
pub mod ident;

use elf::{EntryPoint, ObjectType};
use ident::Identification;

pub trait Header: std::fmt::Debug + Send + Sync {
    /// Returns the decoded identification block.
    fn ident(&self) -> &Identification;

    /// Returns the object file type, corrected for the file's byte order.
    fn object_type(&self) -> ObjectType;

    /// Returns the entry point address, corrected for the file's byte order.
    fn entry_point(&self) -> EntryPoint;

    /// Returns a short human-readable name, e.g. "ELF".
    fn format_name(&self) -> &'static str;
}
