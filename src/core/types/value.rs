//! Numeric encodings of operator-supplied values
//!
//! A query such as `"100"` has no known type. At a given [`Width`] it may be a
//! signed integer, an unsigned integer and (at 32/64 bits) an IEEE float, all
//! at once. [`MatchSet`] holds every encoding that parsed, and a byte window
//! matches when any one of them does.

use super::error::{MemoryError, MemoryResult};
use super::width::Width;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One numeric interpretation of a fixed-width byte window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    Signed,
    Unsigned,
    Float,
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Encoding::Signed => "signed",
            Encoding::Unsigned => "unsigned",
            Encoding::Float => "float",
        };
        f.write_str(name)
    }
}

/// A value encoded as `width / 8` little-endian bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedValue {
    encoding: Encoding,
    width: Width,
    raw: [u8; 8],
}

impl EncodedValue {
    fn from_le(encoding: Encoding, width: Width, bytes: &[u8]) -> Self {
        let mut raw = [0u8; 8];
        raw[..bytes.len()].copy_from_slice(bytes);
        EncodedValue {
            encoding,
            width,
            raw,
        }
    }

    /// Encoding this value was produced under
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// The little-endian representation, exactly `width / 8` bytes long
    pub fn bytes(&self) -> &[u8] {
        &self.raw[..self.width.bytes()]
    }

    /// Tests a window of memory against this value
    ///
    /// Integers compare bit-for-bit. Floats compare with IEEE equality, so
    /// `-0.0` matches `0.0` and NaN matches nothing.
    pub fn matches(&self, window: &[u8]) -> bool {
        let size = self.width.bytes();
        let Some(window) = window.get(..size) else {
            return false;
        };

        match self.encoding {
            Encoding::Signed | Encoding::Unsigned => window == self.bytes(),
            Encoding::Float => match (
                decode_float(self.width, window),
                decode_float(self.width, self.bytes()),
            ) {
                (Some(found), Some(wanted)) => found == wanted,
                _ => false,
            },
        }
    }

    /// Encodes a value to be written over a result
    ///
    /// Text carrying a fractional marker (a trailing `f`, or a decimal point)
    /// is written as a float, which only exists at 32 and 64 bits. Anything
    /// else is written as an integer: signed range first, then unsigned.
    pub fn for_patch(text: &str, width: Width) -> MemoryResult<Self> {
        let text = text.trim();

        if is_fractional_literal(text) {
            if !width.supports_float() {
                return Err(MemoryError::parse_failed(text, width.bits()));
            }
            return parse_float(text, width)
                .ok_or_else(|| MemoryError::parse_failed(text, width.bits()));
        }

        parse_signed(text, width)
            .or_else(|| parse_unsigned(text, width))
            .ok_or_else(|| MemoryError::parse_failed(text, width.bits()))
    }
}

impl fmt::Display for EncodedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} [{}]",
            self.encoding,
            self.width,
            hex::encode(self.bytes())
        )
    }
}

/// Every encoding of a query string that fits the active width
#[derive(Debug, Clone, PartialEq)]
pub struct MatchSet {
    text: String,
    width: Width,
    values: Vec<EncodedValue>,
}

impl MatchSet {
    /// Parses `text` under every encoding available at `width`
    ///
    /// Each encoding is attempted independently. A failed or out-of-range
    /// parse contributes nothing, so an unparseable query yields an empty
    /// set rather than an error.
    pub fn parse(text: &str, width: Width) -> Self {
        let text = text.trim();
        let mut values = Vec::with_capacity(3);

        values.extend(parse_signed(text, width));
        values.extend(parse_unsigned(text, width));
        if width.supports_float() {
            values.extend(parse_float(text, width));
        }

        MatchSet {
            text: text.to_string(),
            width,
            values,
        }
    }

    /// The query as typed
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn width(&self) -> Width {
        self.width
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Encoding kinds present in the set
    pub fn encodings(&self) -> Vec<Encoding> {
        self.values.iter().map(EncodedValue::encoding).collect()
    }

    /// True when any encoding matches the start of `window`
    pub fn matches(&self, window: &[u8]) -> bool {
        self.values.iter().any(|value| value.matches(window))
    }
}

/// Whether the literal selects float encoding for a write
pub fn is_fractional_literal(text: &str) -> bool {
    text.ends_with(['f', 'F']) || text.contains('.')
}

fn parse_signed(text: &str, width: Width) -> Option<EncodedValue> {
    let encoded = match width {
        Width::W8 => text.parse::<i8>().ok()?.to_le_bytes().to_vec(),
        Width::W16 => text.parse::<i16>().ok()?.to_le_bytes().to_vec(),
        Width::W32 => text.parse::<i32>().ok()?.to_le_bytes().to_vec(),
        Width::W64 => text.parse::<i64>().ok()?.to_le_bytes().to_vec(),
    };
    Some(EncodedValue::from_le(Encoding::Signed, width, &encoded))
}

fn parse_unsigned(text: &str, width: Width) -> Option<EncodedValue> {
    let encoded = match width {
        Width::W8 => text.parse::<u8>().ok()?.to_le_bytes().to_vec(),
        Width::W16 => text.parse::<u16>().ok()?.to_le_bytes().to_vec(),
        Width::W32 => text.parse::<u32>().ok()?.to_le_bytes().to_vec(),
        Width::W64 => text.parse::<u64>().ok()?.to_le_bytes().to_vec(),
    };
    Some(EncodedValue::from_le(Encoding::Unsigned, width, &encoded))
}

fn parse_float(text: &str, width: Width) -> Option<EncodedValue> {
    // "inf" ends in 'f', so the literal is tried whole before the marker is cut
    let stripped = text.strip_suffix(['f', 'F']);
    let encoded = match width {
        Width::W32 => text
            .parse::<f32>()
            .ok()
            .or_else(|| stripped?.parse::<f32>().ok())?
            .to_le_bytes()
            .to_vec(),
        Width::W64 => text
            .parse::<f64>()
            .ok()
            .or_else(|| stripped?.parse::<f64>().ok())?
            .to_le_bytes()
            .to_vec(),
        Width::W8 | Width::W16 => return None,
    };
    Some(EncodedValue::from_le(Encoding::Float, width, &encoded))
}

/// Decodes a float window; f32 widens to f64 exactly, so equality is preserved
fn decode_float(width: Width, bytes: &[u8]) -> Option<f64> {
    match width {
        Width::W32 => {
            let raw: [u8; 4] = bytes.get(..4)?.try_into().ok()?;
            Some(f64::from(f32::from_le_bytes(raw)))
        }
        Width::W64 => {
            let raw: [u8; 8] = bytes.get(..8)?.try_into().ok()?;
            Some(f64::from_le_bytes(raw))
        }
        Width::W8 | Width::W16 => None,
    }
}
