//! Chart colors.
//!
//! Colors are 24-bit RGB. A theme can be loaded from JSON or YAML where
//! each color is written as a `#RRGGBB` hex string; omitted entries keep
//! their defaults.

use serde::{Deserialize, Serialize};
use std::fmt;

use mrds_common::{MrdsError, MrdsResult};

/// An 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Rgb {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        hex_to_rgb(&value)
            .map(|(r, g, b)| Rgb::new(r, g, b))
            .ok_or_else(|| format!("invalid color '{}', expected #RRGGBB", value))
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

/// Parse hex color string to RGB
pub fn hex_to_rgb(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some((r, g, b))
}

/// Colors used by the chart layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartTheme {
    pub background: Rgb,
    pub grid: Rgb,
    pub frame: Rgb,
    pub tick: Rgb,
    pub series: Rgb,
    pub marker: Rgb,
    pub trend: Rgb,
    pub text: Rgb,
}

impl Default for ChartTheme {
    fn default() -> Self {
        Self {
            background: Rgb::WHITE,
            grid: Rgb::new(232, 232, 232),
            frame: Rgb::new(60, 60, 60),
            tick: Rgb::new(80, 80, 80),
            series: Rgb::new(36, 99, 235),
            marker: Rgb::new(18, 52, 120),
            trend: Rgb::new(216, 27, 96),
            text: Rgb::new(35, 35, 35),
        }
    }
}

impl ChartTheme {
    /// Load a theme from a JSON string.
    pub fn from_json(json_str: &str) -> MrdsResult<Self> {
        Ok(serde_json::from_str(json_str)?)
    }

    /// Load a theme from a JSON file.
    pub fn from_file(path: &str) -> MrdsResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| MrdsError::InputReadError(format!("{}: {}", path, e)))?;
        Self::from_json(&content)
    }
}
