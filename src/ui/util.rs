use eframe::egui::{self, pos2, vec2, Color32, FontFamily, Id, Rect, RichText, Rounding, Stroke};

use crate::theme::fade;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chevron {
    Left,
    Right,
}

/// Circular button with a chevron, tinted with `accent` while hovered.
pub fn round_icon_button(
    ui: &mut egui::Ui,
    rect: Rect,
    id: Id,
    chevron: Chevron,
    accent: Color32,
) -> egui::Response {
    let response = ui
        .interact(rect, id, egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand);
    let painter = ui.painter();
    let radius = rect.width().min(rect.height()) * 0.5;
    let (fill, icon) = if response.hovered() {
        (Color32::from_white_alpha(26), accent)
    } else {
        (Color32::from_white_alpha(13), Color32::from_gray(220))
    };
    painter.circle(rect.center(), radius, fill, Stroke::new(1.0, Color32::from_white_alpha(26)));

    let arm = radius * 0.3;
    let dir = match chevron {
        Chevron::Left => -1.0,
        Chevron::Right => 1.0,
    };
    let tip = rect.center() + vec2(dir * arm * 0.5, 0.0);
    let stroke = Stroke::new(2.0, icon);
    painter.line_segment([tip, tip + vec2(-dir * arm, -arm)], stroke);
    painter.line_segment([tip, tip + vec2(-dir * arm, arm)], stroke);
    response
}

/// Text styled for a card; era cards may ask for a monospace face.
pub fn styled(text: impl Into<String>, size: f32, monospace: bool) -> RichText {
    let family = if monospace {
        FontFamily::Monospace
    } else {
        FontFamily::Proportional
    };
    RichText::new(text).size(size).family(family)
}

/// Small rounded pill with a translucent fill.
pub fn chip(ui: &mut egui::Ui, text: RichText, color: Color32, opacity: f32) {
    egui::Frame::none()
        .fill(fade(color, 0.12 * opacity))
        .stroke(Stroke::new(1.0, fade(color, 0.4 * opacity)))
        .rounding(Rounding::same(999.0))
        .inner_margin(egui::Margin::symmetric(10.0, 3.0))
        .show(ui, |ui| ui.label(text.color(fade(color, opacity))));
}

/// First token of a display year, e.g. "1950" for "1950 - 2010".
pub fn leading_year(display_year: &str) -> &str {
    display_year
        .split(|c: char| c.is_whitespace() || c == '-')
        .find(|part| !part.is_empty())
        .unwrap_or(display_year)
}

/// Rect of `size` centered horizontally in `outer`, with its top at `top`.
pub fn centered_at(outer: Rect, top: f32, size: egui::Vec2) -> Rect {
    Rect::from_min_size(pos2(outer.center().x - size.x * 0.5, top), size)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leading_year_takes_the_first_token() {
        assert_eq!(leading_year("1950 - 2010"), "1950");
        assert_eq!(leading_year("2021-2022"), "2021");
        assert_eq!(leading_year("2024+"), "2024+");
        assert_eq!(leading_year(""), "");
    }

    #[test]
    fn centered_rect_is_centered() {
        let outer = Rect::from_min_size(pos2(0.0, 0.0), vec2(200.0, 100.0));
        let rect = centered_at(outer, 10.0, vec2(50.0, 20.0));
        assert_eq!(rect.center().x, 100.0);
        assert_eq!(rect.top(), 10.0);
    }
}
