use crate::header::elf::{EntryPoint, ObjectType};
use crate::header::ident::{DataEncoding, ElfClass, OsAbi, Version, EI_NIDENT};
use crate::header::Header;
use std::fmt;

/// Labels are padded to this width so every value starts at the same column.
const LABEL_WIDTH: usize = 35;

/// Everything printed for one header, decoded once and rendered `readelf -h` style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Report {
    pub format_name: &'static str,
    pub magic: [u8; EI_NIDENT],
    pub class: ElfClass,
    pub data: DataEncoding,
    pub version: Version,
    pub os_abi: OsAbi,
    pub abi_version: u8,
    pub object_type: ObjectType,
    pub entry_point: EntryPoint,
}

impl Report {
    pub fn new(header: &dyn Header) -> Self {
        let ident = header.ident();
        Report {
            format_name: header.format_name(),
            magic: ident.bytes,
            class: ident.class,
            data: ident.data,
            version: ident.version,
            os_abi: ident.os_abi,
            abi_version: ident.abi_version,
            object_type: header.object_type(),
            entry_point: header.entry_point(),
        }
    }

    pub fn heading(&self) -> String {
        format!("{} Header:", self.format_name)
    }

    /// All identification bytes as space-separated two-digit hex.
    pub fn magic_hex(&self) -> String {
        self.magic
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// One line per field, in `readelf` order. The heading is not included.
    pub fn lines(&self) -> Vec<String> {
        let fields = [
            ("Class:", self.class.to_string()),
            ("Data:", self.data.to_string()),
            ("Version:", self.version.to_string()),
            ("OS/ABI:", self.os_abi.to_string()),
            ("ABI Version:", self.abi_version.to_string()),
            ("Type:", self.object_type.to_string()),
            ("Entry point address:", self.entry_point.to_string()),
        ];

        let mut lines = Vec::with_capacity(fields.len() + 1);
        // readelf layout: the byte list is too wide for the value column
        lines.push(format!("  Magic:   {}", self.magic_hex()));
        lines.extend(
            fields
                .iter()
                .map(|(label, value)| format!("  {:<width$}{}", label, value, width = LABEL_WIDTH)),
        );
        lines
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading())?;
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
