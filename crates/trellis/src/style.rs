//! Colors and text alignment.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// An RGBA color.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 255 is opaque.
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Fully transparent.
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// An opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// A color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Constructs a color from a hex string.
    ///
    /// # Arguments
    /// * `hex` - `"#RRGGBB"` or `"#RRGGBBAA"`, with the `#` optional.
    ///
    /// # Examples
    /// ```
    /// use trellis::style::Color;
    ///
    /// assert_eq!(Color::hex("#ff0000").unwrap(), Color::rgb(255, 0, 0));
    /// assert_eq!(Color::hex("00ff0080").unwrap().a, 0x80);
    /// ```
    pub fn hex(hex: &str) -> Result<Self> {
        let digits = hex.trim_start_matches('#');
        let bad = || Error::Config(format!("invalid hex color: {hex:?}"));
        if !digits.is_ascii() || !(digits.len() == 6 || digits.len() == 8) {
            return Err(bad());
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| bad());
        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

/// Horizontal text placement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HAlign {
    /// Flush with the left edge.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Flush with the right edge.
    Right,
}

/// Vertical text placement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VAlign {
    /// Flush with the top edge.
    Top,
    /// Centered.
    #[default]
    Middle,
    /// Flush with the bottom edge.
    Bottom,
}

/// Placement of a text run inside its rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Align {
    /// Horizontal placement.
    pub h: HAlign,
    /// Vertical placement.
    pub v: VAlign,
}

impl Align {
    /// Left, vertically centered.
    pub const LEFT: Self = Self::new(HAlign::Left, VAlign::Middle);
    /// Centered on both axes.
    pub const CENTER: Self = Self::new(HAlign::Center, VAlign::Middle);
    /// Right, vertically centered.
    pub const RIGHT: Self = Self::new(HAlign::Right, VAlign::Middle);

    /// Construct an alignment.
    pub const fn new(h: HAlign, v: VAlign) -> Self {
        Self { h, v }
    }
}
