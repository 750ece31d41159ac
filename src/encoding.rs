//! Text transcoding between UTF-8 and the legacy Windows code pages
//!
//! String table files in the wild may be UTF-8, Windows-1250, Windows-1251
//! or Windows-1252. Strings are held internally as UTF-8; the code pages
//! only appear at the file boundary, as a decode fallback on read and as an
//! explicit target on write. Lossy conversion is rejected in both
//! directions: bytes with no mapping and characters with no code page
//! representation are errors, never silent substitutions.

use crate::error::{Error, Result};

/// A text encoding accepted at the file boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    /// UTF-8, the canonical internal encoding.
    Utf8,
    /// Windows-1250 (Central European).
    Windows1250,
    /// Windows-1251 (Cyrillic).
    Windows1251,
    /// Windows-1252 (Western European).
    Windows1252,
}

impl TextEncoding {
    /// Parse an encoding label, case-insensitively.
    ///
    /// # Errors
    /// Returns [`Error::UnknownEncoding`] for any label other than `UTF-8`,
    /// `Windows-1250`, `Windows-1251` or `Windows-1252`.
    pub fn from_label(label: &str) -> Result<Self> {
        match label.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "windows-1250" => Ok(TextEncoding::Windows1250),
            "windows-1251" => Ok(TextEncoding::Windows1251),
            "windows-1252" => Ok(TextEncoding::Windows1252),
            _ => Err(Error::UnknownEncoding(label.to_string())),
        }
    }

    /// The canonical name of this encoding.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Windows1250 => "Windows-1250",
            TextEncoding::Windows1251 => "Windows-1251",
            TextEncoding::Windows1252 => "Windows-1252",
        }
    }

    fn code_page(self) -> Option<&'static encoding_rs::Encoding> {
        match self {
            TextEncoding::Utf8 => None,
            TextEncoding::Windows1250 => Some(encoding_rs::WINDOWS_1250),
            TextEncoding::Windows1251 => Some(encoding_rs::WINDOWS_1251),
            TextEncoding::Windows1252 => Some(encoding_rs::WINDOWS_1252),
        }
    }
}

/// Decode raw payload bytes to a string.
///
/// Well-formed UTF-8 is taken as-is regardless of the fallback; anything
/// else is decoded through the fallback code page.
///
/// # Errors
/// Returns [`Error::DecodeFailed`] if the bytes are not valid UTF-8 and the
/// fallback cannot decode them either (including a fallback of UTF-8).
pub fn decode_bytes(bytes: &[u8], fallback: TextEncoding) -> Result<String> {
    if let Ok(s) = std::str::from_utf8(bytes) {
        return Ok(s.to_string());
    }
    let Some(code_page) = fallback.code_page() else {
        return Err(Error::DecodeFailed {
            encoding: fallback.name(),
        });
    };
    match code_page.decode_without_bom_handling_and_without_replacement(bytes) {
        Some(text) => Ok(text.into_owned()),
        None => Err(Error::DecodeFailed {
            encoding: fallback.name(),
        }),
    }
}

/// Encode a string into the target encoding.
///
/// # Errors
/// Returns [`Error::UnencodableText`] if some character of `text` has no
/// representation in the target code page.
pub fn encode_text(text: &str, target: TextEncoding) -> Result<Vec<u8>> {
    let Some(code_page) = target.code_page() else {
        return Ok(text.as_bytes().to_vec());
    };
    let (bytes, _, had_unmappable) = code_page.encode(text);
    if had_unmappable {
        return Err(Error::UnencodableText {
            text: text.to_string(),
            encoding: target.name(),
        });
    }
    Ok(bytes.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_parsing() {
        assert_eq!(
            TextEncoding::from_label("UTF-8").unwrap(),
            TextEncoding::Utf8
        );
        assert_eq!(
            TextEncoding::from_label("windows-1252").unwrap(),
            TextEncoding::Windows1252
        );
        assert_eq!(
            TextEncoding::from_label("WINDOWS-1251").unwrap(),
            TextEncoding::Windows1251
        );
        assert!(TextEncoding::from_label("latin-1").is_err());
    }

    #[test]
    fn test_utf8_wins_over_fallback() {
        // "é" as UTF-8 is valid, so the fallback must not be consulted
        let bytes = "café".as_bytes();
        let decoded = decode_bytes(bytes, TextEncoding::Windows1251).unwrap();
        assert_eq!(decoded, "café");
    }

    #[test]
    fn test_fallback_decode() {
        // 0xE9 alone is not valid UTF-8; Windows-1252 maps it to é
        let decoded = decode_bytes(&[b'c', b'a', b'f', 0xE9], TextEncoding::Windows1252).unwrap();
        assert_eq!(decoded, "café");
        // Windows-1251 maps 0xE9 to Cyrillic щ
        let decoded = decode_bytes(&[0xE9], TextEncoding::Windows1251).unwrap();
        assert_eq!(decoded, "щ");
    }

    #[test]
    fn test_invalid_utf8_with_utf8_fallback_fails() {
        let err = decode_bytes(&[0xFF, 0xFE], TextEncoding::Utf8).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::EncodingError);
    }

    #[test]
    fn test_encode_round_trip() {
        let bytes = encode_text("café", TextEncoding::Windows1252).unwrap();
        assert_eq!(bytes, vec![b'c', b'a', b'f', 0xE9]);
        assert_eq!(encode_text("café", TextEncoding::Utf8).unwrap(), "café".as_bytes());
    }

    #[test]
    fn test_unencodable_text_rejected() {
        // Cyrillic has no representation in Windows-1252
        let err = encode_text("привет", TextEncoding::Windows1252).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::EncodingError);
    }
}
