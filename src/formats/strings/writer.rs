//! String table file writing

use std::collections::HashMap;
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};

use super::{DIR_ENTRY_SIZE, HEADER_SIZE, StringsVariant};
use crate::encoding::{self, TextEncoding};
use crate::error::{Error, Result};

fn push_u32(buf: &mut Vec<u8>, value: u32) {
    let mut bytes = [0u8; 4];
    LittleEndian::write_u32(&mut bytes, value);
    buf.extend_from_slice(&bytes);
}

/// Serialize an id → text mapping into string table file bytes.
///
/// Ids are emitted in ascending order. Strings that encode to identical
/// framed bytes are stored once, with every referencing directory entry
/// sharing the first occurrence's offset.
///
/// # Errors
/// Returns [`Error::UnencodableText`] if some string cannot be represented
/// in the target encoding. No bytes are produced on failure.
///
/// [`Error::UnencodableText`]: crate::Error::UnencodableText
pub fn strings_to_bytes(
    entries: &HashMap<u32, String>,
    variant: StringsVariant,
    encoding: TextEncoding,
) -> Result<Vec<u8>> {
    let mut ids: Vec<u32> = entries.keys().copied().collect();
    ids.sort_unstable();

    let mut directory = Vec::with_capacity(entries.len() * DIR_ENTRY_SIZE);
    let mut block: Vec<u8> = Vec::new();
    // Framed payload bytes -> offset of their first occurrence in the block
    let mut dedup: HashMap<Vec<u8>, u32> = HashMap::new();

    for id in ids {
        let payload = encoding::encode_text(&entries[&id], encoding)?;

        let mut framed = Vec::with_capacity(payload.len() + 5);
        if variant == StringsVariant::LengthPrefixed {
            // Payload byte count, excluding the null terminator
            push_u32(&mut framed, payload.len() as u32);
        }
        framed.extend_from_slice(&payload);
        framed.push(0);

        let offset = if let Some(&existing) = dedup.get(&framed) {
            existing
        } else {
            let offset = block.len() as u32;
            block.extend_from_slice(&framed);
            dedup.insert(framed, offset);
            offset
        };

        push_u32(&mut directory, id);
        push_u32(&mut directory, offset);
    }

    let mut out = Vec::with_capacity(HEADER_SIZE + directory.len() + block.len());
    push_u32(&mut out, entries.len() as u32);
    push_u32(&mut out, block.len() as u32);
    out.extend_from_slice(&directory);
    out.extend_from_slice(&block);

    tracing::debug!(
        "encoded string table: {} entries, {} unique payloads, {} data bytes",
        entries.len(),
        dedup.len(),
        block.len()
    );

    Ok(out)
}

/// Write an id → text mapping to a string table file on disk.
///
/// The file is fully encoded in memory first, so an encoding failure
/// produces no file at all. The write itself is a single plain write to the
/// target path, with no temp-file-and-rename step; an IO failure mid-write
/// can leave a truncated file behind.
///
/// # Errors
/// Returns [`Error::UnencodableText`] if encoding fails and
/// [`Error::FileWriteFailed`] if the disk write fails.
///
/// [`Error::UnencodableText`]: crate::Error::UnencodableText
/// [`Error::FileWriteFailed`]: crate::Error::FileWriteFailed
pub fn write_strings<P: AsRef<Path>>(
    path: P,
    entries: &HashMap<u32, String>,
    variant: StringsVariant,
    encoding: TextEncoding,
) -> Result<()> {
    let bytes = strings_to_bytes(entries, variant, encoding)?;
    std::fs::write(&path, bytes).map_err(|source| Error::FileWriteFailed {
        path: path.as_ref().to_path_buf(),
        source,
    })
}
