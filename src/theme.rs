//! Theme management: window visuals and the per-era decorative parameters.

use eframe::egui::{self, Color32};

use crate::timeline::EraTheme;

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub visuals: egui::Visuals,
}

pub fn dark_theme() -> Theme {
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = Color32::BLACK;
    visuals.window_fill = Color32::from_rgb(10, 10, 10);
    visuals.extreme_bg_color = Color32::BLACK;
    visuals.override_text_color = Some(Color32::from_gray(235));
    Theme {
        name: "Dark",
        visuals,
    }
}

pub fn initial_theme() -> Theme {
    dark_theme()
}

/// Card chrome for one era.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardStyle {
    pub border: Color32,
    pub glow: Color32,
    pub fill: Color32,
    pub rounding: f32,
    pub monospace: bool,
}

const CARD_FILL: Color32 = Color32::from_rgba_premultiplied(9, 9, 9, 230);

/// Neutral chrome for neighbour cards, whatever their era.
pub fn compact_card_style() -> CardStyle {
    CardStyle {
        border: Color32::from_white_alpha(26),
        glow: Color32::TRANSPARENT,
        fill: CARD_FILL,
        rounding: 16.0,
        monospace: false,
    }
}

pub fn card_style(theme: EraTheme) -> CardStyle {
    let base = CardStyle {
        rounding: 16.0,
        fill: CARD_FILL,
        monospace: false,
        ..compact_card_style()
    };
    match theme {
        EraTheme::Retro => CardStyle {
            border: rgba(16, 185, 129, 128),
            glow: rgba(16, 185, 129, 51),
            monospace: true,
            ..base
        },
        EraTheme::Neural => CardStyle {
            border: rgba(244, 63, 94, 128),
            glow: rgba(244, 63, 94, 51),
            ..base
        },
        // Deep navy keeps text readable against the blue ambient light.
        EraTheme::Transformer => CardStyle {
            border: rgba(59, 130, 246, 128),
            glow: rgba(59, 130, 246, 51),
            fill: rgba(2, 4, 16, 230),
            ..base
        },
        EraTheme::Creative => CardStyle {
            border: rgba(168, 85, 247, 128),
            glow: rgba(168, 85, 247, 77),
            fill: rgba(15, 5, 24, 230),
            ..base
        },
        EraTheme::Conversational => CardStyle {
            border: rgba(14, 165, 233, 128),
            glow: rgba(14, 165, 233, 51),
            rounding: 24.0,
            ..base
        },
        EraTheme::Multimodal => CardStyle {
            border: rgba(249, 115, 22, 128),
            glow: rgba(249, 115, 22, 51),
            ..base
        },
    }
}

/// Base fill behind an era's ambient animation.
pub fn ambient_base(theme: EraTheme) -> Color32 {
    match theme {
        EraTheme::Transformer => Color32::from_rgb(2, 4, 16),
        EraTheme::Conversational => Color32::from_rgb(15, 23, 42),
        EraTheme::Retro
        | EraTheme::Neural
        | EraTheme::Creative
        | EraTheme::Multimodal => Color32::BLACK,
    }
}

/// Straight (unmultiplied) alpha color.
pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// Luma-weighted gray with the same alpha, for de-emphasised content.
pub fn grayscale(color: Color32) -> Color32 {
    let [r, g, b, a] = color.to_array();
    let luma = 0.299 * r as f32 + 0.587 * g as f32 + 0.114 * b as f32;
    let level = luma.round().clamp(0.0, a as f32) as u8;
    Color32::from_rgba_premultiplied(level, level, level, a)
}

/// Same hue at a fraction of its current opacity.
pub fn fade(color: Color32, opacity: f32) -> Color32 {
    color.gamma_multiply(opacity.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_retro_cards_use_monospace() {
        for theme in EraTheme::ALL {
            assert_eq!(card_style(theme).monospace, theme == EraTheme::Retro);
        }
    }

    #[test]
    fn every_era_has_a_tinted_border() {
        let neutral = compact_card_style().border;
        for theme in EraTheme::ALL {
            assert_ne!(card_style(theme).border, neutral, "{theme} should tint its border");
        }
    }

    #[test]
    fn dark_theme_paints_a_black_canvas() {
        let theme = initial_theme();
        assert_eq!(theme.name, "Dark");
        assert_eq!(theme.visuals.panel_fill, Color32::BLACK);
        assert!(theme.visuals.dark_mode);
    }

    #[test]
    fn grayscale_drops_hue_and_keeps_alpha() {
        let gray = grayscale(Color32::from_rgb(249, 115, 22));
        assert_eq!(gray.r(), gray.g());
        assert_eq!(gray.g(), gray.b());
        assert_eq!(gray.a(), 255);
        assert_eq!(grayscale(Color32::WHITE), Color32::WHITE);
        assert_eq!(grayscale(Color32::TRANSPARENT), Color32::TRANSPARENT);
    }

    #[test]
    fn fade_scales_alpha() {
        let color = rgba(255, 0, 0, 200);
        assert_eq!(fade(color, 1.0), color);
        assert_eq!(fade(color, 0.0).a(), 0);
        assert!(fade(color, 0.5).a() < color.a());
    }
}
