//! RGBA color value type and hex parsing
//!
//! Colors are four 8-bit channels with exact equality. The serde form is the
//! object `{"r":..,"g":..,"b":..,"a":..}` used by the `.ssp` document.
//!
//! Hex parsing supports `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.

use image::Rgba;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Input string doesn't start with '#'
    #[error("color must start with '#'")]
    MissingHash,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// An RGBA color with 8-bit channels.
///
/// Plain value type: copying is cheap and equality is exact channel
/// equality. Serializes as an object with `r`/`g`/`b`/`a` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Fully transparent black. The default pixel state of a fresh frame.
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0 };
    /// Opaque black. The default pen color of a fresh editing session.
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// True when the pixel is fully transparent (alpha 0).
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Parse a hex color string (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`).
    ///
    /// 3- and 4-digit forms double each digit (`#F00` -> red); 6-digit form
    /// defaults alpha to 255.
    ///
    /// # Examples
    ///
    /// ```
    /// use spritepad::color::Color;
    ///
    /// let red = Color::from_hex("#F00").unwrap();
    /// assert_eq!(red, Color::new(255, 0, 0, 255));
    ///
    /// let half = Color::from_hex("#00FF0080").unwrap();
    /// assert_eq!(half, Color::new(0, 255, 0, 128));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `ColorError` if the input is empty, missing the leading `#`,
    /// the wrong length, or contains non-hex characters.
    pub fn from_hex(s: &str) -> Result<Color, ColorError> {
        if s.is_empty() {
            return Err(ColorError::Empty);
        }
        let Some(hex) = s.strip_prefix('#') else {
            return Err(ColorError::MissingHash);
        };

        for c in hex.chars() {
            if !c.is_ascii_hexdigit() {
                return Err(ColorError::InvalidHex(c));
            }
        }

        match hex.len() {
            3 => {
                let mut chars = hex.chars();
                let r = hex_digit(chars.next().unwrap()) * 17;
                let g = hex_digit(chars.next().unwrap()) * 17;
                let b = hex_digit(chars.next().unwrap()) * 17;
                Ok(Color::new(r, g, b, 255))
            }
            4 => {
                let mut chars = hex.chars();
                let r = hex_digit(chars.next().unwrap()) * 17;
                let g = hex_digit(chars.next().unwrap()) * 17;
                let b = hex_digit(chars.next().unwrap()) * 17;
                let a = hex_digit(chars.next().unwrap()) * 17;
                Ok(Color::new(r, g, b, a))
            }
            6 => {
                let r = hex_pair(&hex[0..2]);
                let g = hex_pair(&hex[2..4]);
                let b = hex_pair(&hex[4..6]);
                Ok(Color::new(r, g, b, 255))
            }
            8 => {
                let r = hex_pair(&hex[0..2]);
                let g = hex_pair(&hex[2..4]);
                let b = hex_pair(&hex[4..6]);
                let a = hex_pair(&hex[6..8]);
                Ok(Color::new(r, g, b, a))
            }
            len => Err(ColorError::InvalidLength(len)),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::TRANSPARENT
    }
}

impl From<Color> for Rgba<u8> {
    fn from(c: Color) -> Self {
        Rgba([c.r, c.g, c.b, c.a])
    }
}

impl From<Rgba<u8>> for Color {
    fn from(p: Rgba<u8>) -> Self {
        Color::new(p.0[0], p.0[1], p.0[2], p.0[3])
    }
}

// Callers validate with is_ascii_hexdigit first.
fn hex_digit(c: char) -> u8 {
    c.to_digit(16).unwrap_or(0) as u8
}

fn hex_pair(s: &str) -> u8 {
    u8::from_str_radix(s, 16).unwrap_or(0)
}
