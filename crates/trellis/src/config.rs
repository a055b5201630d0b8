//! Menu configuration.

use serde::{Deserialize, Serialize};

use crate::{error::Result, geom::Expanse, style::Color};

/// Colors used to paint a menu.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuColors {
    /// Body fill.
    pub background: Color,
    /// Title strip fill.
    pub title_background: Color,
    /// Title text.
    pub title_text: Color,
    /// Line between the title strip and the body.
    pub separator: Color,
    /// Close and collapse glyphs.
    pub control: Color,
    /// Glyphs under the pointer.
    pub control_hover: Color,
    /// Resize affordance strokes.
    pub resize_handle: Color,
    /// Outer outline.
    pub outline: Color,
}

impl Default for MenuColors {
    fn default() -> Self {
        Self {
            background: Color::rgba(30, 30, 36, 230),
            title_background: Color::rgb(48, 52, 70),
            title_text: Color::rgb(230, 230, 235),
            separator: Color::rgb(80, 84, 104),
            control: Color::rgb(180, 180, 190),
            control_hover: Color::rgb(255, 120, 100),
            resize_handle: Color::rgb(120, 124, 140),
            outline: Color::rgb(80, 84, 104),
        }
    }
}

/// Menu behavior and geometry. Every field is optional when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Height of the title strip.
    pub title_height: f32,
    /// Side of the bottom-right resize square.
    pub resize_handle: f32,
    /// Smallest size a resize can reach.
    pub min_size: Expanse,
    /// Vertical gap between stacked children.
    pub spacing: f32,
    /// Show the title strip and its controls.
    pub title_bar: bool,
    /// Paint the body background.
    pub background: bool,
    /// Confine children to the body.
    pub clip: bool,
    /// Allow resizing from the bottom-right corner.
    pub resizable: bool,
    /// Palette.
    pub colors: MenuColors,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            title_height: 22.0,
            resize_handle: 12.0,
            min_size: Expanse::new(50.0, 50.0),
            spacing: 4.0,
            title_bar: true,
            background: true,
            clip: true,
            resizable: true,
            colors: MenuColors::default(),
        }
    }
}

impl MenuConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Height the title strip occupies, zero when it is disabled.
    pub fn effective_title_height(&self) -> f32 {
        if self.title_bar { self.title_height } else { 0.0 }
    }
}
