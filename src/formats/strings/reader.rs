//! String table file reading and parsing

use std::collections::{HashMap, HashSet};
use std::path::Path;

use byteorder::{ByteOrder, LittleEndian};

use super::{DIR_ENTRY_SIZE, HEADER_SIZE, StringTable, StringsVariant};
use crate::encoding::{self, TextEncoding};
use crate::error::{Error, Result};

/// Read a string table file from disk.
///
/// # Errors
///
/// Returns [`Error::FileReadFailed`] if the file cannot be opened or read,
/// or any error [`parse_strings_bytes`] produces for its contents.
///
/// [`Error::FileReadFailed`]: crate::Error::FileReadFailed
pub fn read_strings<P: AsRef<Path>>(
    path: P,
    variant: StringsVariant,
    fallback: TextEncoding,
) -> Result<StringTable> {
    let data = std::fs::read(&path).map_err(|source| Error::FileReadFailed {
        path: path.as_ref().to_path_buf(),
        source,
    })?;
    parse_strings_bytes(&data, variant, fallback)
}

/// Parse string table data from bytes.
///
/// The directory is read in file order and every referenced offset is
/// resolved to its null-terminated payload; duplicate ids are permitted
/// (the last directory entry wins, as deduplicated files may repeat
/// references). The data block is then walked densely from the start to
/// collect strings no directory entry points at.
///
/// # Errors
///
/// Returns [`Error::TruncatedFile`] if the declared directory or data block
/// runs past the end of the buffer, [`Error::MissingTerminator`] if a
/// referenced string has no null byte before the block ends,
/// [`Error::MisalignedData`] if the block does not parse as a dense
/// sequence of framed strings, and [`Error::DecodeFailed`] if payload bytes
/// are not valid UTF-8 or the fallback encoding.
///
/// [`Error::TruncatedFile`]: crate::Error::TruncatedFile
/// [`Error::MissingTerminator`]: crate::Error::MissingTerminator
/// [`Error::MisalignedData`]: crate::Error::MisalignedData
/// [`Error::DecodeFailed`]: crate::Error::DecodeFailed
pub fn parse_strings_bytes(
    data: &[u8],
    variant: StringsVariant,
    fallback: TextEncoding,
) -> Result<StringTable> {
    let available = data.len();
    if available < HEADER_SIZE {
        return Err(Error::TruncatedFile {
            needed: HEADER_SIZE,
            available,
        });
    }

    let count = LittleEndian::read_u32(&data[0..4]) as usize;
    let data_size = LittleEndian::read_u32(&data[4..8]) as usize;

    let start_of_data = HEADER_SIZE + count * DIR_ENTRY_SIZE;
    let needed = start_of_data + data_size;
    if available < needed {
        return Err(Error::TruncatedFile { needed, available });
    }

    // Directory: (id, offset) pairs in file order, plus the set of all
    // referenced offsets for the orphan scan.
    let mut directory = Vec::new();
    directory.try_reserve_exact(count)?;
    let mut referenced = HashSet::new();
    referenced.try_reserve(count)?;
    for entry in data[HEADER_SIZE..start_of_data].chunks_exact(DIR_ENTRY_SIZE) {
        let id = LittleEndian::read_u32(&entry[0..4]);
        let offset = LittleEndian::read_u32(&entry[4..8]);
        directory.push((id, offset));
        referenced.insert(offset);
    }

    let block = &data[start_of_data..needed];

    let mut entries = HashMap::new();
    entries.try_reserve(count)?;
    for (id, offset) in directory {
        let payload = payload_at(block, offset as usize, variant)?;
        let text = encoding::decode_bytes(payload, fallback)?;
        entries.insert(id, text);
    }

    let unreferenced = scan_orphans(block, variant, &referenced, fallback)?;

    tracing::debug!(
        "parsed string table: {} entries, {} unreferenced strings, {} data bytes",
        entries.len(),
        unreferenced.len(),
        data_size
    );

    Ok(StringTable {
        variant,
        entries,
        unreferenced,
    })
}

/// Resolve a directory offset to its payload bytes.
///
/// The length field of the length-prefixed variant is skipped, not trusted:
/// the null terminator alone bounds the payload.
fn payload_at(block: &[u8], offset: usize, variant: StringsVariant) -> Result<&[u8]> {
    let start = match variant {
        StringsVariant::Simple => offset,
        StringsVariant::LengthPrefixed => offset + 4,
    };
    let rest = block
        .get(start..)
        .ok_or(Error::MissingTerminator { offset: start })?;
    let len = rest
        .iter()
        .position(|&b| b == 0)
        .ok_or(Error::MissingTerminator { offset: start })?;
    Ok(&rest[..len])
}

/// Walk the data block as a dense sequence of framed strings and collect
/// every string whose start offset no directory entry references.
///
/// Entries are not necessarily laid out in directory order and offsets are
/// unsorted, so the walk is positional rather than directory-driven.
fn scan_orphans(
    block: &[u8],
    variant: StringsVariant,
    referenced: &HashSet<u32>,
    fallback: TextEncoding,
) -> Result<HashSet<String>> {
    let data_size = block.len();
    let mut orphans = HashSet::new();
    let mut pos = 0;
    while pos < data_size {
        let entry_start = pos;
        let payload_start = match variant {
            StringsVariant::Simple => pos,
            StringsVariant::LengthPrefixed => {
                if pos + 4 > data_size {
                    return Err(Error::MisalignedData {
                        offset: entry_start,
                        data_size,
                    });
                }
                pos + 4
            }
        };
        let len = block[payload_start..]
            .iter()
            .position(|&b| b == 0)
            .ok_or(Error::MisalignedData {
                offset: entry_start,
                data_size,
            })?;
        if !referenced.contains(&(entry_start as u32)) {
            orphans.insert(encoding::decode_bytes(
                &block[payload_start..payload_start + len],
                fallback,
            )?);
        }
        pos = payload_start + len + 1;
    }
    Ok(orphans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_file(entries: &[(u32, u32)], block: &[u8]) -> Vec<u8> {
        let mut data = Vec::new();
        data.extend_from_slice(&(entries.len() as u32).to_le_bytes());
        data.extend_from_slice(&(block.len() as u32).to_le_bytes());
        for &(id, offset) in entries {
            data.extend_from_slice(&id.to_le_bytes());
            data.extend_from_slice(&offset.to_le_bytes());
        }
        data.extend_from_slice(block);
        data
    }

    #[test]
    fn test_parse_simple() {
        let data = simple_file(&[(1, 0), (2, 6)], b"Hello\0World\0");
        let table = parse_strings_bytes(&data, StringsVariant::Simple, TextEncoding::Utf8).unwrap();
        assert_eq!(table.entries.len(), 2);
        assert_eq!(table.entries[&1], "Hello");
        assert_eq!(table.entries[&2], "World");
        assert!(table.unreferenced.is_empty());
    }

    #[test]
    fn test_parse_length_prefixed() {
        // Offset points at the length field; payload starts 4 bytes later
        let mut block = Vec::new();
        block.extend_from_slice(&5u32.to_le_bytes());
        block.extend_from_slice(b"Hello\0");
        let data = simple_file(&[(7, 0)], &block);
        let table =
            parse_strings_bytes(&data, StringsVariant::LengthPrefixed, TextEncoding::Utf8).unwrap();
        assert_eq!(table.entries[&7], "Hello");
    }

    #[test]
    fn test_length_field_not_trusted() {
        // A lying length field must not change where the payload ends
        let mut block = Vec::new();
        block.extend_from_slice(&100u32.to_le_bytes());
        block.extend_from_slice(b"Hi\0");
        let data = simple_file(&[(1, 0)], &block);
        let table =
            parse_strings_bytes(&data, StringsVariant::LengthPrefixed, TextEncoding::Utf8).unwrap();
        assert_eq!(table.entries[&1], "Hi");
    }

    #[test]
    fn test_orphan_detection() {
        let data = simple_file(&[(1, 0)], b"Ref\0Ghost\0");
        let table = parse_strings_bytes(&data, StringsVariant::Simple, TextEncoding::Utf8).unwrap();
        assert_eq!(table.entries.len(), 1);
        assert_eq!(table.entries[&1], "Ref");
        assert_eq!(table.unreferenced.len(), 1);
        assert!(table.unreferenced.contains("Ghost"));
    }

    #[test]
    fn test_duplicate_ids_last_wins() {
        let data = simple_file(&[(1, 0), (1, 2)], b"A\0B\0");
        let table = parse_strings_bytes(&data, StringsVariant::Simple, TextEncoding::Utf8).unwrap();
        assert_eq!(table.entries.len(), 1);
        assert_eq!(table.entries[&1], "B");
    }

    #[test]
    fn test_shared_offsets_not_orphaned() {
        // Deduplicated files repeat an offset across directory entries
        let data = simple_file(&[(1, 0), (2, 0)], b"Same\0");
        let table = parse_strings_bytes(&data, StringsVariant::Simple, TextEncoding::Utf8).unwrap();
        assert_eq!(table.entries[&1], "Same");
        assert_eq!(table.entries[&2], "Same");
        assert!(table.unreferenced.is_empty());
    }

    #[test]
    fn test_fallback_decoding() {
        let data = simple_file(&[(1, 0)], &[b'c', b'a', b'f', 0xE9, 0]);
        let table =
            parse_strings_bytes(&data, StringsVariant::Simple, TextEncoding::Windows1252).unwrap();
        assert_eq!(table.entries[&1], "café");
    }

    #[test]
    fn test_truncated_header() {
        let err =
            parse_strings_bytes(&[0, 0], StringsVariant::Simple, TextEncoding::Utf8).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::FileReadFailure);
    }

    #[test]
    fn test_declared_sizes_exceed_buffer() {
        // Header claims one directory entry and ten data bytes, provides none
        let mut data = Vec::new();
        data.extend_from_slice(&1u32.to_le_bytes());
        data.extend_from_slice(&10u32.to_le_bytes());
        let err = parse_strings_bytes(&data, StringsVariant::Simple, TextEncoding::Utf8).unwrap_err();
        assert!(matches!(err, Error::TruncatedFile { .. }));
    }

    #[test]
    fn test_missing_terminator() {
        let data = simple_file(&[(1, 0)], b"NoNull");
        let err = parse_strings_bytes(&data, StringsVariant::Simple, TextEncoding::Utf8).unwrap_err();
        assert!(matches!(err, Error::MissingTerminator { .. }));
    }

    #[test]
    fn test_misaligned_data_block() {
        // Length-prefixed block too short to hold a length field at the
        // second entry position
        let mut block = Vec::new();
        block.extend_from_slice(&1u32.to_le_bytes());
        block.extend_from_slice(b"A\0");
        block.extend_from_slice(&[0xFF, 0xFF]);
        let data = simple_file(&[(1, 0)], &block);
        let err = parse_strings_bytes(&data, StringsVariant::LengthPrefixed, TextEncoding::Utf8)
            .unwrap_err();
        assert!(matches!(err, Error::MisalignedData { .. }));
    }

    #[test]
    fn test_empty_file() {
        let data = simple_file(&[], b"");
        let table = parse_strings_bytes(&data, StringsVariant::Simple, TextEncoding::Utf8).unwrap();
        assert!(table.entries.is_empty());
        assert!(table.unreferenced.is_empty());
    }
}
