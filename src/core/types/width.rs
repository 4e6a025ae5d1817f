//! Scan width: how many bits are decoded per candidate

use serde::{Deserialize, Serialize};
use std::fmt;

/// Bit width under which candidate bytes are decoded and compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Width {
    W8,
    W16,
    #[default]
    W32,
    W64,
}

impl Width {
    /// All widths from narrowest to widest
    pub const ALL: [Width; 4] = [Width::W8, Width::W16, Width::W32, Width::W64];

    /// Maps a bit count to a width; anything outside {8, 16, 32, 64} is `None`
    pub const fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            8 => Some(Width::W8),
            16 => Some(Width::W16),
            32 => Some(Width::W32),
            64 => Some(Width::W64),
            _ => None,
        }
    }

    /// Number of bits in the window
    pub const fn bits(&self) -> u32 {
        match self {
            Width::W8 => 8,
            Width::W16 => 16,
            Width::W32 => 32,
            Width::W64 => 64,
        }
    }

    /// Number of bytes read per candidate
    pub const fn bytes(&self) -> usize {
        self.bits() as usize / 8
    }

    /// Whether IEEE floating point exists at this width
    pub const fn supports_float(&self) -> bool {
        matches!(self, Width::W32 | Width::W64)
    }
}

impl TryFrom<u32> for Width {
    type Error = String;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        Width::from_bits(bits).ok_or_else(|| format!("unsupported width {bits}, expected 8/16/32/64"))
    }
}

impl From<Width> for u32 {
    fn from(width: Width) -> Self {
        width.bits()
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_bits() {
        assert_eq!(Width::from_bits(8), Some(Width::W8));
        assert_eq!(Width::from_bits(64), Some(Width::W64));
        assert_eq!(Width::from_bits(24), None);
        assert_eq!(Width::from_bits(0), None);
    }

    #[test]
    fn test_sizes() {
        let bytes: Vec<usize> = Width::ALL.iter().map(Width::bytes).collect();
        assert_eq!(bytes, vec![1, 2, 4, 8]);
        assert_eq!(Width::default(), Width::W32);
    }

    #[test]
    fn test_float_support() {
        assert!(!Width::W8.supports_float());
        assert!(!Width::W16.supports_float());
        assert!(Width::W32.supports_float());
        assert!(Width::W64.supports_float());
    }
}
