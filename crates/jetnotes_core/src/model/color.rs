//! Note color palette model.
//!
//! # Responsibility
//! - Define the immutable `Color` value referenced by notes.
//! - Own the fixed palette seeded into storage.
//!
//! # Invariants
//! - `hex` is always `#RRGGBB` in upper case.
//! - Palette ids are stable; id `1` is the default color.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#?([0-9a-fA-F]{6})$").expect("valid hex color regex"));

/// Stable identifier of a palette color.
pub type ColorId = i64;

/// Id of the color assigned to fresh notes.
pub const DEFAULT_COLOR_ID: ColorId = 1;

const PALETTE: &[(ColorId, &str, &str)] = &[
    (1, "White", "#FFFFFF"),
    (2, "Red", "#FF0000"),
    (3, "Pink", "#F06292"),
    (4, "Purple", "#CE93D8"),
    (5, "Blue", "#2196F3"),
    (6, "Cyan", "#00ACC1"),
    (7, "Teal", "#26A69A"),
    (8, "Green", "#4CAF50"),
    (9, "Lime", "#CDDC39"),
    (10, "Yellow", "#FFEB3B"),
    (11, "Orange", "#FF9800"),
    (12, "Brown", "#BCAAA4"),
    (13, "Gray", "#9E9E9E"),
];

/// Invalid color input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    /// Value is not a `#RRGGBB` hex string.
    InvalidHex(String),
}

impl Display for ColorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidHex(value) => write!(f, "invalid hex color: `{value}`"),
        }
    }
}

impl Error for ColorError {}

/// Note background color.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub id: ColorId,
    pub name: String,
    /// Canonical `#RRGGBB` form.
    pub hex: String,
}

impl Color {
    /// Creates a color after normalizing and validating `hex`.
    ///
    /// Accepts `RRGGBB` or `#RRGGBB` in any case.
    pub fn new(id: ColorId, name: impl Into<String>, hex: &str) -> Result<Self, ColorError> {
        Ok(Self {
            id,
            name: name.into(),
            hex: normalize_hex(hex)?,
        })
    }

    /// Returns the default color for new notes.
    pub fn default_color() -> Self {
        palette()
            .into_iter()
            .find(|color| color.id == DEFAULT_COLOR_ID)
            .unwrap_or_else(|| Self {
                id: DEFAULT_COLOR_ID,
                name: "White".to_string(),
                hex: "#FFFFFF".to_string(),
            })
    }

    /// Checks that `hex` is already canonical `#RRGGBB`.
    ///
    /// Fields are public, so values built without `new` are checked here
    /// before they reach storage.
    pub fn validate(&self) -> Result<(), ColorError> {
        if normalize_hex(&self.hex)? == self.hex {
            Ok(())
        } else {
            Err(ColorError::InvalidHex(self.hex.clone()))
        }
    }

    /// Returns `(r, g, b)` channels.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let channel = |range: std::ops::Range<usize>| {
            self.hex
                .get(range)
                .and_then(|digits| u8::from_str_radix(digits, 16).ok())
                .unwrap_or(0)
        };
        (channel(1..3), channel(3..5), channel(5..7))
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::default_color()
    }
}

/// Returns the fixed palette ordered by id.
pub fn palette() -> Vec<Color> {
    PALETTE
        .iter()
        .map(|(id, name, hex)| Color {
            id: *id,
            name: (*name).to_string(),
            hex: (*hex).to_string(),
        })
        .collect()
}

/// Normalizes `RRGGBB`/`#rrggbb` into `#RRGGBB`.
pub fn normalize_hex(value: &str) -> Result<String, ColorError> {
    let trimmed = value.trim();
    let caps = HEX_COLOR_RE
        .captures(trimmed)
        .ok_or_else(|| ColorError::InvalidHex(trimmed.to_string()))?;
    Ok(format!("#{}", caps[1].to_ascii_uppercase()))
}
