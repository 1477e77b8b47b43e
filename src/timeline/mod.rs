//! Timeline data model: eras, their themes and the embedded catalog.

pub mod catalog;

use std::fmt;

use eframe::egui::Color32;
use serde::{Deserialize, Serialize};

pub use catalog::{Catalog, CatalogError};

/// Visual identity of an era. Drives the ambient background and card chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EraTheme {
    Retro,
    Neural,
    Transformer,
    Creative,
    Conversational,
    Multimodal,
}

impl EraTheme {
    pub const ALL: [EraTheme; 6] = [
        EraTheme::Retro,
        EraTheme::Neural,
        EraTheme::Transformer,
        EraTheme::Creative,
        EraTheme::Conversational,
        EraTheme::Multimodal,
    ];

    pub fn label(self) -> &'static str {
        match self {
            EraTheme::Retro => "RETRO",
            EraTheme::Neural => "NEURAL",
            EraTheme::Transformer => "TRANSFORMER",
            EraTheme::Creative => "CREATIVE",
            EraTheme::Conversational => "CONVERSATIONAL",
            EraTheme::Multimodal => "MULTIMODAL",
        }
    }
}

impl fmt::Display for EraTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stat {
    pub label: String,
    pub value: String,
}

/// One era on the timeline. Immutable once the catalog is loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub id: u32,
    pub display_year: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
    /// First tag is the primary one shown on badges and compact cards.
    pub focus_tags: Vec<String>,
    pub stats: Vec<Stat>,
    pub media_url: String,
    pub theme: EraTheme,
    pub accent: Color32,
    pub link: Option<String>,
}

impl EventRecord {
    pub fn primary_tag(&self) -> &str {
        // Catalog validation guarantees at least one tag.
        self.focus_tags.first().map(String::as_str).unwrap_or_default()
    }
}

/// Parses `#rrggbb` (or `rrggbb`) into an opaque color.
pub fn parse_hex_color(hex: &str) -> Option<Color32> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
