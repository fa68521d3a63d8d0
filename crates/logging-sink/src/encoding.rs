//! crates/logging-sink/src/encoding.rs
//! Character encodings applied when text is written to a raw byte sink.

use std::borrow::Cow;
use std::fmt;

use encoding_rs::Encoding;

/// Error returned when an encoding label cannot be used for output.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum EncodingError {
    /// The label names no known encoding.
    #[error("unknown text encoding: {label}")]
    Unknown {
        /// The label that failed to resolve.
        label: String,
    },
    /// The encoding can only be decoded; `encoding_rs` would write UTF-8.
    #[error("text encoding {name} cannot be used for output (label {label:?})")]
    DecodeOnly {
        /// The label as given.
        label: String,
        /// Canonical name the label resolved to.
        name: &'static str,
    },
}

impl EncodingError {
    /// The label as given by the caller.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Unknown { label } | Self::DecodeOnly { label, .. } => label,
        }
    }
}

/// Character encoding used by an [`EncodedWriter`](crate::EncodedWriter).
///
/// The default is UTF-8, which is also what the facade uses when a host does
/// not name an encoding explicitly. Labels follow the WHATWG encoding
/// standard, so `"latin1"`, `"iso-8859-1"` and `"windows-1252"` all resolve.
///
/// # Examples
///
/// ```
/// use logging_sink::TextEncoding;
///
/// let latin1 = TextEncoding::for_label("latin1")?;
/// assert_eq!(latin1.name(), "windows-1252");
/// assert_eq!(latin1.encode("café").as_ref(), b"caf\xe9");
///
/// assert!(TextEncoding::for_label("no-such-charset").is_err());
/// # Ok::<(), logging_sink::EncodingError>(())
/// ```
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct TextEncoding {
    encoding: &'static Encoding,
}

impl TextEncoding {
    /// Returns the UTF-8 encoding.
    #[must_use]
    pub fn utf8() -> Self {
        Self {
            encoding: encoding_rs::UTF_8,
        }
    }

    /// Resolves an encoding label.
    ///
    /// An empty label or `"."` selects the default (UTF-8). Labels of
    /// decode-only encodings (`UTF-16LE`, `UTF-16BE`, `replacement`) are
    /// rejected, since `encoding_rs` would silently write UTF-8 for them.
    pub fn for_label(label: &str) -> Result<Self, EncodingError> {
        let trimmed = label.trim();
        if trimmed.is_empty() || trimmed == "." {
            return Ok(Self::utf8());
        }

        let encoding =
            Encoding::for_label(trimmed.as_bytes()).ok_or_else(|| EncodingError::Unknown {
                label: label.to_owned(),
            })?;
        if encoding.output_encoding() != encoding {
            return Err(EncodingError::DecodeOnly {
                label: label.to_owned(),
                name: encoding.name(),
            });
        }
        Ok(Self { encoding })
    }

    /// Canonical name of the encoding.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.encoding.name()
    }

    /// Reports whether text passes through unchanged.
    #[must_use]
    pub fn is_utf8(self) -> bool {
        self.encoding == encoding_rs::UTF_8
    }

    /// Encodes `text`, borrowing it when no conversion is needed.
    ///
    /// Characters the target encoding cannot represent are replaced with
    /// HTML numeric character references.
    #[must_use]
    pub fn encode(self, text: &str) -> Cow<'_, [u8]> {
        if self.is_utf8() {
            return Cow::Borrowed(text.as_bytes());
        }
        let (encoded, _, _) = self.encoding.encode(text);
        encoded
    }
}

impl Default for TextEncoding {
    fn default() -> Self {
        Self::utf8()
    }
}

impl fmt::Debug for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextEncoding").field(&self.name()).finish()
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for TextEncoding {
    type Err = EncodingError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        Self::for_label(label)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for TextEncoding {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.name())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for TextEncoding {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Self::for_label(&label).map_err(serde::de::Error::custom)
    }
}
