//! Role vocabulary and color configuration
//!
//! The vocabulary and the role → color mapping are plain values handed to
//! the assembler and to every renderer. They can be loaded from TOML:
//!
//! ```toml
//! roles = ["E - 8-6", "LD - 8-7", "SL - Sick Leave", ""]
//! default_color = "#FFFFFF"
//!
//! [colors]
//! "E - 8-6" = "#FFDDC1"
//! "LD - 8-7" = "#FFABAB"
//! "SL - Sick Leave" = "#FFC3A0"
//! "" = "#FFFFFF"
//! MATCH = "#90EE90"
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{RoleLabel, RosterError, MATCH_LABEL};

// ============================================================================
// Color
// ============================================================================

/// 24-bit RGB color, written as `#RRGGBB`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(u32);

impl Color {
    pub const WHITE: Color = Color(0xFF_FFFF);

    /// Build from a packed 0xRRGGBB value (upper byte is discarded)
    pub const fn from_rgb(rgb: u32) -> Self {
        Self(rgb & 0xFF_FFFF)
    }

    /// Packed 0xRRGGBB value
    pub const fn rgb(self) -> u32 {
        self.0
    }

    /// Channels as (red, green, blue)
    pub const fn channels(self) -> (u8, u8, u8) {
        ((self.0 >> 16) as u8, (self.0 >> 8) as u8, self.0 as u8)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

impl FromStr for Color {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| RosterError::InvalidColor(s.to_string()))?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(RosterError::InvalidColor(s.to_string()));
        }
        u32::from_str_radix(hex, 16)
            .map(Self)
            .map_err(|_| RosterError::InvalidColor(s.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = RosterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

// ============================================================================
// Color Map
// ============================================================================

/// Label → color mapping with an explicit fallback
///
/// Keys are role labels plus the reserved `MATCH` sentinel. Lookups never
/// fail: an unmapped label resolves to `default_color`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorMap {
    #[serde(rename = "colors", default)]
    entries: BTreeMap<String, Color>,
    #[serde(default)]
    default_color: Color,
}

impl Default for ColorMap {
    fn default() -> Self {
        Self::new()
            .with("E - 8-6", Color::from_rgb(0xFF_DDC1))
            .with("LD - 8-7", Color::from_rgb(0xFF_ABAB))
            .with("SL - Sick Leave", Color::from_rgb(0xFF_C3A0))
            .with("", Color::WHITE)
            .with(MATCH_LABEL, Color::from_rgb(0x90_EE90))
    }
}

impl ColorMap {
    /// Empty map falling back to white
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            default_color: Color::WHITE,
        }
    }

    /// Add or replace the color for `label`
    pub fn with(mut self, label: impl Into<String>, color: Color) -> Self {
        self.entries.insert(label.into(), color);
        self
    }

    /// Set the fallback color for unmapped labels
    pub fn default_color(mut self, color: Color) -> Self {
        self.default_color = color;
        self
    }

    pub fn fallback(&self) -> Color {
        self.default_color
    }

    /// Resolve the display color for `label`
    pub fn color_of(&self, label: &str) -> Color {
        self.entries.get(label).copied().unwrap_or(self.default_color)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.entries.contains_key(label)
    }

    /// Mapped labels in sorted order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Color)> {
        self.entries.iter().map(|(label, color)| (label.as_str(), *color))
    }
}

// ============================================================================
// Roster Configuration
// ============================================================================

/// Role vocabulary plus colors
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Ordered selectable roles, including the empty label
    pub roles: Vec<RoleLabel>,
    #[serde(flatten)]
    pub colors: ColorMap,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            roles: ["E - 8-6", "LD - 8-7", "SL - Sick Leave", ""]
                .into_iter()
                .map(RoleLabel::from)
                .collect(),
            colors: ColorMap::default(),
        }
    }
}

/// Configuration document as written, before colors are validated
#[derive(Deserialize)]
struct RawConfig {
    roles: Vec<RoleLabel>,
    #[serde(default)]
    default_color: Option<String>,
    #[serde(default)]
    colors: BTreeMap<String, String>,
}

impl RosterConfig {
    /// Parse a TOML configuration document
    ///
    /// Colors are read as strings first so a malformed one surfaces as
    /// [`RosterError::InvalidColor`] rather than a generic parse error.
    pub fn from_toml_str(input: &str) -> Result<Self, RosterError> {
        let raw: RawConfig =
            toml::from_str(input).map_err(|e| RosterError::Config(e.message().to_string()))?;
        if raw.roles.is_empty() {
            return Err(RosterError::Config("role vocabulary is empty".into()));
        }

        let mut colors = ColorMap::new();
        if let Some(fallback) = raw.default_color {
            colors = colors.default_color(fallback.parse()?);
        }
        for (label, color) in raw.colors {
            colors = colors.with(label, color.parse()?);
        }

        Ok(Self {
            roles: raw.roles,
            colors,
        })
    }

    /// Vocabulary roles that have no color entry
    ///
    /// Not an error: such roles render with the default color.
    pub fn validate(&self) -> Vec<&RoleLabel> {
        self.roles
            .iter()
            .filter(|role| !self.colors.contains(role.as_str()))
            .collect()
    }

    pub fn is_known_role(&self, label: &RoleLabel) -> bool {
        self.roles.contains(label)
    }
}
