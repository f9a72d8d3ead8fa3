//! Text encodings accepted for included files.

use std::fmt;

/// Encoding used to decode included mindmap files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextEncoding {
    /// Strict UTF-8.
    #[default]
    Utf8,
    /// UTF-8 with an optional leading byte order mark, which is stripped.
    Utf8Sig,
    /// UTF-16, byte order taken from the BOM (little-endian without one).
    Utf16,
    /// UTF-16 little-endian.
    Utf16Le,
    /// UTF-16 big-endian.
    Utf16Be,
    /// ISO-8859-1, every byte maps to the code point of the same value.
    Latin1,
    /// 7-bit ASCII.
    Ascii,
}

/// Error decoding file bytes with a [`TextEncoding`].
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Byte sequence is not valid for the encoding.
    #[error("invalid {encoding} data: {message}")]
    Invalid {
        /// Encoding label.
        encoding: &'static str,
        /// Decoder message.
        message: String,
    },
    /// UTF-16 input with an odd number of bytes.
    #[error("truncated {encoding} data: {len} bytes is not a multiple of 2")]
    OddLength {
        /// Encoding label.
        encoding: &'static str,
        /// Input length in bytes.
        len: usize,
    },
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

impl TextEncoding {
    /// Parse an encoding label such as `utf-8`, `UTF_16LE` or `latin-1`.
    ///
    /// Matching ignores case, `-` and `_`. Returns `None` for unsupported
    /// encodings.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        let normalized: String = label
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "utf8" => Some(Self::Utf8),
            "utf8sig" => Some(Self::Utf8Sig),
            "utf16" => Some(Self::Utf16),
            "utf16le" => Some(Self::Utf16Le),
            "utf16be" => Some(Self::Utf16Be),
            "latin1" | "iso88591" => Some(Self::Latin1),
            "ascii" | "usascii" => Some(Self::Ascii),
            _ => None,
        }
    }

    /// Canonical label for this encoding.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Utf8 => "utf-8",
            Self::Utf8Sig => "utf-8-sig",
            Self::Utf16 => "utf-16",
            Self::Utf16Le => "utf-16le",
            Self::Utf16Be => "utf-16be",
            Self::Latin1 => "latin-1",
            Self::Ascii => "ascii",
        }
    }

    /// Decode raw file bytes into a string.
    pub fn decode(self, bytes: &[u8]) -> Result<String, DecodeError> {
        match self {
            Self::Utf8 => self.decode_utf8(bytes),
            Self::Utf8Sig => self.decode_utf8(bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)),
            Self::Utf16 => match bytes {
                [0xFE, 0xFF, rest @ ..] => self.decode_utf16(rest, u16::from_be_bytes),
                [0xFF, 0xFE, rest @ ..] => self.decode_utf16(rest, u16::from_le_bytes),
                _ => self.decode_utf16(bytes, u16::from_le_bytes),
            },
            Self::Utf16Le => self.decode_utf16(bytes, u16::from_le_bytes),
            Self::Utf16Be => self.decode_utf16(bytes, u16::from_be_bytes),
            Self::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            Self::Ascii => match bytes.iter().position(|b| !b.is_ascii()) {
                Some(pos) => Err(DecodeError::Invalid {
                    encoding: self.label(),
                    message: format!("byte 0x{:02x} at offset {pos} is not ASCII", bytes[pos]),
                }),
                None => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
            },
        }
    }

    fn decode_utf8(self, bytes: &[u8]) -> Result<String, DecodeError> {
        String::from_utf8(bytes.to_vec()).map_err(|e| DecodeError::Invalid {
            encoding: self.label(),
            message: e.utf8_error().to_string(),
        })
    }

    fn decode_utf16(
        self,
        bytes: &[u8],
        unit: fn([u8; 2]) -> u16,
    ) -> Result<String, DecodeError> {
        if !bytes.len().is_multiple_of(2) {
            return Err(DecodeError::OddLength {
                encoding: self.label(),
                len: bytes.len(),
            });
        }
        let units: Vec<u16> = bytes
            .chunks_exact(2)
            .map(|pair| unit([pair[0], pair[1]]))
            .collect();
        String::from_utf16(&units).map_err(|e| DecodeError::Invalid {
            encoding: self.label(),
            message: e.to_string(),
        })
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
