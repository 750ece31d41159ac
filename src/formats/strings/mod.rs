//! Bethesda string table file format
//!
//! Binary format mapping numeric string ids to localized text, used by
//! Skyrim-era games as `.strings`, `.dlstrings` and `.ilstrings` files.
//! A file is a directory of (id, offset) pairs followed by a data block of
//! null-terminated string payloads; the three extensions share the layout
//! and differ only in per-string framing.
//!
//! See <https://en.uesp.net/wiki/Skyrim_Mod:String_Table_File_Format> for
//! format details.

mod editor;
mod reader;
mod writer;

use std::collections::{HashMap, HashSet};
use std::path::Path;

pub use reader::{parse_strings_bytes, read_strings};
pub use writer::{strings_to_bytes, write_strings};

use crate::error::{Error, Result};

/// Size of the fixed header: entry count + data block size, both u32
pub const HEADER_SIZE: usize = 8;

/// Size of each directory entry: id + offset, both u32
pub const DIR_ENTRY_SIZE: usize = 8;

/// Per-string framing inside the data block.
///
/// The directory layout is identical for both variants; only the bytes each
/// directory offset points at differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringsVariant {
    /// `.strings`: the offset points directly at the payload, which runs to
    /// a terminating null byte.
    Simple,
    /// `.dlstrings` / `.ilstrings`: the offset points at a u32 length field
    /// (payload byte count, excluding the trailing null), immediately
    /// followed by the payload and its null terminator.
    ///
    /// Historical tooling disagrees on whether the length field counts the
    /// null terminator; this library writes it excluding the null and never
    /// trusts it on read (the terminator is authoritative).
    LengthPrefixed,
}

impl StringsVariant {
    /// Classify a file extension (without the dot), case-insensitively.
    ///
    /// # Errors
    /// Returns [`Error::InvalidExtension`] for anything other than
    /// `strings`, `dlstrings` or `ilstrings`.
    pub fn from_extension(ext: &str) -> Result<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "strings" => Ok(StringsVariant::Simple),
            "dlstrings" | "ilstrings" => Ok(StringsVariant::LengthPrefixed),
            _ => Err(Error::InvalidExtension(ext.to_string())),
        }
    }

    /// Classify a path by its extension.
    ///
    /// # Errors
    /// Returns [`Error::InvalidExtension`] if the path has no extension or
    /// an unrecognized one.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(std::ffi::OsStr::to_str)
            .ok_or_else(|| Error::InvalidExtension(path.as_ref().display().to_string()))?;
        Self::from_extension(ext)
    }
}

/// An editable string table: id → text mapping plus the orphan strings
/// found in the source file.
///
/// Constructed by [`StringTable::open`] from a file (or an absent path,
/// yielding an empty table) or by [`StringTable::new`] for a fresh one.
/// Edits go through the methods in the editor module; [`StringTable::save`]
/// re-encodes the mapping to disk. Not internally synchronized.
#[derive(Debug, Clone)]
pub struct StringTable {
    variant: StringsVariant,
    entries: HashMap<u32, String>,
    /// Strings present in the source data block that no directory entry
    /// referenced. Snapshot taken at load time; edits do not update it and
    /// save never writes it.
    unreferenced: HashSet<String>,
}

impl StringTable {
    /// Create an empty table with the given framing variant.
    #[must_use]
    pub fn new(variant: StringsVariant) -> Self {
        Self {
            variant,
            entries: HashMap::new(),
            unreferenced: HashSet::new(),
        }
    }
}
