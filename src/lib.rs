//! # bethstrings
//!
//! A pure-Rust library for reading, editing and writing Bethesda game
//! localization string tables - the `.STRINGS`, `.DLSTRINGS` and
//! `.ILSTRINGS` files used by Skyrim-era titles.
//!
//! A string table maps a numeric id to a localized text string. The three
//! extensions share one layout (header, directory of id/offset pairs, data
//! block of null-terminated payloads) and differ only in per-string
//! framing: `.strings` stores bare payloads, while `.dlstrings` and
//! `.ilstrings` prefix each payload with a u32 length field.
//!
//! Files in the wild may be UTF-8 or one of the Windows-1250/1251/1252
//! code pages; strings are held internally as UTF-8 and transcoded at the
//! file boundary. Tables may also carry *unreferenced* strings - payload
//! bytes no directory entry points at, left behind by earlier tooling -
//! which are surfaced on load and dropped on save.
//!
//! ## Quick Start
//!
//! ```no_run
//! use bethstrings::{StringTable, TextEncoding};
//!
//! // Open a table; files that are not valid UTF-8 fall back to the given
//! // code page. An absent path yields an empty table.
//! let mut table = StringTable::open("Skyrim_English.strings", TextEncoding::Windows1252)?;
//!
//! // Edit by id
//! table.replace(0x12a6, "Dragonborn")?;
//! table.add(0xff000001, "A brand new line")?;
//!
//! // Write back, choosing the output encoding
//! table.save_to("Skyrim_English.strings", TextEncoding::Utf8)?;
//! # Ok::<(), bethstrings::Error>(())
//! ```
//!
//! ### Working with raw bytes
//!
//! ```
//! use bethstrings::formats::strings::{parse_strings_bytes, StringsVariant};
//! use bethstrings::TextEncoding;
//!
//! // count=0, data_size=0: the smallest valid table
//! let table = parse_strings_bytes(&[0; 8], StringsVariant::Simple, TextEncoding::Utf8)?;
//! assert!(table.is_empty());
//! # Ok::<(), bethstrings::Error>(())
//! ```

pub mod encoding;
pub mod error;
pub mod formats;

// Re-exports for convenience
pub use encoding::TextEncoding;
pub use error::{Error, ErrorKind, Result};
pub use formats::strings::{StringTable, StringsVariant};

/// Prelude module for common imports
pub mod prelude {
    pub use crate::encoding::TextEncoding;
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::formats::strings::{
        StringTable, StringsVariant, parse_strings_bytes, read_strings, strings_to_bytes,
        write_strings,
    };
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
