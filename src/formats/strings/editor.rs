//! String table editing operations
//!
//! Methods for working with a loaded [`StringTable`]:
//! - Open a file (or start an empty table for an absent path)
//! - Read, add, replace and remove strings by id
//! - Replace the whole mapping at once
//! - Save back to disk, possibly as a different variant

use std::collections::HashMap;
use std::path::Path;

use super::{StringTable, StringsVariant, read_strings, write_strings};
use crate::encoding::TextEncoding;
use crate::error::{Error, Result};

impl StringTable {
    /// Open a string table file, classifying the variant from the path
    /// extension. An absent file yields an empty table of that variant.
    ///
    /// # Errors
    /// Returns [`Error::InvalidExtension`] for an unrecognized extension,
    /// or any error from [`read_strings`] for an existing file.
    ///
    /// [`Error::InvalidExtension`]: crate::Error::InvalidExtension
    pub fn open<P: AsRef<Path>>(path: P, fallback: TextEncoding) -> Result<Self> {
        let variant = StringsVariant::from_path(&path)?;
        if path.as_ref().exists() {
            read_strings(path, variant, fallback)
        } else {
            tracing::debug!("opening new string table for {:?}", path.as_ref());
            Ok(Self::new(variant))
        }
    }

    /// The framing variant this table was opened or created with.
    #[must_use]
    pub fn variant(&self) -> StringsVariant {
        self.variant
    }

    /// Snapshot of all (id, text) pairs, in ascending id order.
    #[must_use]
    pub fn get_all(&self) -> Vec<(u32, String)> {
        let mut pairs: Vec<(u32, String)> = self
            .entries
            .iter()
            .map(|(&id, text)| (id, text.clone()))
            .collect();
        pairs.sort_unstable_by_key(|&(id, _)| id);
        pairs
    }

    /// Snapshot of the strings the source file held without any directory
    /// reference, sorted.
    ///
    /// The set reflects the file as it was at load time: edits never update
    /// it, and [`StringTable::save`] never writes it.
    #[must_use]
    pub fn unreferenced(&self) -> Vec<String> {
        let mut strings: Vec<String> = self.unreferenced.iter().cloned().collect();
        strings.sort_unstable();
        strings
    }

    /// Look up the string with the given id.
    ///
    /// # Errors
    /// Returns [`Error::IdNotFound`] if the id is absent.
    ///
    /// [`Error::IdNotFound`]: crate::Error::IdNotFound
    pub fn get(&self, id: u32) -> Result<&str> {
        self.entries
            .get(&id)
            .map(String::as_str)
            .ok_or(Error::IdNotFound(id))
    }

    /// Check whether an id is present.
    #[must_use]
    pub fn contains_id(&self, id: u32) -> bool {
        self.entries.contains_key(&id)
    }

    /// The number of ids in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Replace the whole mapping with the given pairs.
    ///
    /// All-or-nothing: a duplicate id anywhere in `pairs` leaves the
    /// current mapping untouched.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateId`] if an id appears twice in `pairs`.
    ///
    /// [`Error::DuplicateId`]: crate::Error::DuplicateId
    pub fn set_all(&mut self, pairs: Vec<(u32, String)>) -> Result<()> {
        let mut new_entries = HashMap::new();
        new_entries.try_reserve(pairs.len())?;
        for (id, text) in pairs {
            if new_entries.insert(id, text).is_some() {
                return Err(Error::DuplicateId(id));
            }
        }
        self.entries = new_entries;
        Ok(())
    }

    /// Add a new string under an unused id.
    ///
    /// # Errors
    /// Returns [`Error::DuplicateId`] if the id is already present; the
    /// existing string is left unchanged.
    ///
    /// [`Error::DuplicateId`]: crate::Error::DuplicateId
    pub fn add(&mut self, id: u32, text: impl Into<String>) -> Result<()> {
        if self.entries.contains_key(&id) {
            return Err(Error::DuplicateId(id));
        }
        self.entries.insert(id, text.into());
        Ok(())
    }

    /// Replace the string under an existing id.
    ///
    /// # Errors
    /// Returns [`Error::IdNotFound`] if the id is absent.
    ///
    /// [`Error::IdNotFound`]: crate::Error::IdNotFound
    pub fn replace(&mut self, id: u32, text: impl Into<String>) -> Result<()> {
        let Some(entry) = self.entries.get_mut(&id) else {
            return Err(Error::IdNotFound(id));
        };
        *entry = text.into();
        Ok(())
    }

    /// Remove the string under an id, returning it.
    ///
    /// # Errors
    /// Returns [`Error::IdNotFound`] if the id is absent.
    ///
    /// [`Error::IdNotFound`]: crate::Error::IdNotFound
    pub fn remove(&mut self, id: u32) -> Result<String> {
        self.entries.remove(&id).ok_or(Error::IdNotFound(id))
    }

    /// Save the table to disk with an explicit framing variant.
    ///
    /// Unreferenced strings are never written; identical strings are
    /// deduplicated, so the output is semantically rather than
    /// byte-for-byte equivalent to hand-authored input.
    ///
    /// # Errors
    /// Returns [`Error::UnencodableText`] if some string cannot be encoded
    /// and [`Error::FileWriteFailed`] if the disk write fails.
    ///
    /// [`Error::UnencodableText`]: crate::Error::UnencodableText
    /// [`Error::FileWriteFailed`]: crate::Error::FileWriteFailed
    pub fn save<P: AsRef<Path>>(
        &self,
        path: P,
        variant: StringsVariant,
        encoding: TextEncoding,
    ) -> Result<()> {
        write_strings(path, &self.entries, variant, encoding)
    }

    /// Save the table to disk, classifying the variant from the destination
    /// extension. Saving a `.strings` table to a `.dlstrings` path converts
    /// between variants.
    ///
    /// # Errors
    /// As [`StringTable::save`], plus [`Error::InvalidExtension`] for an
    /// unrecognized destination extension.
    ///
    /// [`Error::InvalidExtension`]: crate::Error::InvalidExtension
    pub fn save_to<P: AsRef<Path>>(&self, path: P, encoding: TextEncoding) -> Result<()> {
        let variant = StringsVariant::from_path(&path)?;
        self.save(path, variant, encoding)
    }
}
