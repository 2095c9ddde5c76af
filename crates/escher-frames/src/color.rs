//! Face colors.
//!
//! Colors are presentation constants: the core threads them through to the
//! draw commands unchanged.
//!
//! # Example
//!
//! ```
//! use escher_frames::Rgb;
//!
//! let roof: Rgb = "#d65226".parse().unwrap();
//! assert_eq!(roof, Rgb::new(0xd6, 0x52, 0x26));
//! assert_eq!(roof.to_string(), "#d65226");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An opaque 24-bit color.
///
/// Serializes to strings like "#ffe0b3".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Creates a new color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Error type for parsing an [`Rgb`] from a hex string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseColorError {
    #[error("invalid color format: '{0}', expected '#rrggbb'")]
    InvalidFormat(String),
    #[error("invalid hex digits in color: '{0}'")]
    InvalidHex(String),
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parses a color from a string like "#d65226".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ParseColorError::InvalidFormat(s.to_string()))?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(ParseColorError::InvalidFormat(s.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| ParseColorError::InvalidHex(s.to_string()))
        };

        Ok(Rgb {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

// Serialized as a hex string so config files stay readable
impl Serialize for Rgb {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
