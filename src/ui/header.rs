//! Title block and the badge naming the active era's year.

use eframe::egui::{self, pos2, vec2, Align2, Color32, FontId, Rect, Rounding, Stroke};

use crate::anim;
use crate::theme::fade;
use crate::timeline::EventRecord;

pub const TITLE: &str = "AIGC Chronicles";
pub const TAGLINE: &str = "From logic rules to world simulators: the eras of generative AI";

pub fn draw_header(ui: &egui::Ui, rect: Rect, event: &EventRecord, time: f64) {
    let painter = ui.painter_at(rect);
    let left = rect.left() + 32.0;

    painter.text(
        pos2(left, rect.top() + 24.0),
        Align2::LEFT_TOP,
        TITLE,
        FontId::proportional(28.0),
        Color32::WHITE,
    );
    painter.text(
        pos2(left, rect.top() + 60.0),
        Align2::LEFT_TOP,
        TAGLINE,
        FontId::proportional(13.0),
        Color32::from_gray(150),
    );

    let label = painter.layout_no_wrap(
        event.display_year.clone(),
        FontId::monospace(14.0),
        Color32::WHITE,
    );
    let badge_size = label.size() + vec2(44.0, 14.0);
    let badge = Rect::from_min_size(
        pos2(rect.right() - 32.0 - badge_size.x, rect.top() + 28.0),
        badge_size,
    );
    let rounding = Rounding::same(badge_size.y * 0.5);
    painter.rect_filled(badge, rounding, Color32::from_white_alpha(13));
    painter.rect_stroke(badge, rounding, badge_stroke(event.accent));

    let dot = pos2(badge.left() + 16.0, badge.center().y);
    let ping = anim::looped(time, 1.5, 0.0);
    painter.circle_filled(dot, 4.0 + 6.0 * ping, fade(event.accent, 0.6 * (1.0 - ping)));
    painter.circle_filled(dot, 4.0, event.accent);

    painter.text(
        pos2(dot.x + 12.0, badge.center().y),
        Align2::LEFT_CENTER,
        &event.display_year,
        FontId::monospace(14.0),
        Color32::WHITE,
    );
}

/// Badge outline, a quarter-strength tint of the era accent.
fn badge_stroke(accent: Color32) -> Stroke {
    Stroke::new(1.0, fade(accent, 0.25))
}
