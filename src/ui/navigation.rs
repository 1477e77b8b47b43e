//! Progress bar, previous/next buttons and the row of jump dots.

use eframe::egui::{self, pos2, vec2, Align2, Color32, FontId, Rect, Rounding, Stroke, Vec2};

use crate::anim;
use crate::carousel::Carousel;
use crate::theme::fade;
use crate::timeline::Catalog;
use crate::ui::util::{self, Chevron};

const BAR_WIDTH: f32 = 480.0;
const BUTTON_SIZE: f32 = 48.0;
const DOT_SIZE: f32 = 8.0;
const DOT_SPACING: f32 = 20.0;

/// Something the user asked the carousel to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Previous,
    Next,
    First,
    Last,
    JumpTo(usize),
}

impl NavAction {
    /// Applies the action, returning whether the active entry changed.
    pub fn apply(self, carousel: &mut Carousel) -> bool {
        let before = carousel.active();
        match self {
            NavAction::Previous => carousel.previous(),
            NavAction::Next => carousel.next(),
            NavAction::First => return carousel.first(),
            NavAction::Last => return carousel.last(),
            NavAction::JumpTo(index) => return carousel.jump_to(index),
        }
        carousel.active() != before
    }
}

/// Height the navigation block needs below the cards.
pub fn height() -> f32 {
    40.0 + BUTTON_SIZE + 24.0
}

pub fn draw_navigation(
    ui: &mut egui::Ui,
    rect: Rect,
    catalog: &Catalog,
    carousel: &Carousel,
    progress: f32,
    time: f64,
) -> Option<NavAction> {
    let accent = catalog
        .get(carousel.active())
        .map_or(Color32::WHITE, |event| event.accent);
    draw_progress(ui, rect, catalog, progress, accent);

    let row_top = rect.top() + 40.0;
    let dots_width = DOT_SPACING * carousel.len() as f32;
    let row_width = dots_width + 2.0 * (BUTTON_SIZE + 24.0);
    let row = util::centered_at(rect, row_top, vec2(row_width, BUTTON_SIZE));

    let mut action = None;

    let prev_rect = Rect::from_min_size(row.left_top(), Vec2::splat(BUTTON_SIZE));
    let prev_id = ui.id().with("nav_prev");
    if util::round_icon_button(ui, prev_rect, prev_id, Chevron::Left, accent).clicked() {
        action = Some(NavAction::Previous);
    }
    let next_rect = Rect::from_min_size(
        pos2(row.right() - BUTTON_SIZE, row.top()),
        Vec2::splat(BUTTON_SIZE),
    );
    let next_id = ui.id().with("nav_next");
    if util::round_icon_button(ui, next_rect, next_id, Chevron::Right, accent).clicked() {
        action = Some(NavAction::Next);
    }

    let first_dot_x = row.center().x - dots_width * 0.5 + DOT_SPACING * 0.5;
    for index in 0..carousel.len() {
        let center = pos2(first_dot_x + index as f32 * DOT_SPACING, row.center().y);
        let hit = Rect::from_center_size(center, Vec2::splat(DOT_SPACING));
        let response = ui
            .interact(hit, ui.id().with(("nav_dot", index)), egui::Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand);
        if response.clicked() {
            action = Some(NavAction::JumpTo(index));
        }

        let painter = ui.painter();
        if index == carousel.active() {
            let radius = DOT_SIZE * 0.75;
            let ping = anim::looped(time, 1.2, 0.0);
            painter.circle_stroke(
                center,
                radius + 8.0 * ping,
                Stroke::new(1.5, fade(accent, 1.0 - ping)),
            );
            painter.circle_filled(center, radius, accent);
        } else {
            let alpha = if response.hovered() { 128 } else { 51 };
            painter.circle_filled(center, DOT_SIZE * 0.5, Color32::from_white_alpha(alpha));
        }
    }

    action
}

fn draw_progress(ui: &egui::Ui, rect: Rect, catalog: &Catalog, progress: f32, accent: Color32) {
    let width = BAR_WIDTH.min(rect.width() * 0.5);
    let track = util::centered_at(rect, rect.top() + 4.0, vec2(width, 4.0));
    let painter = ui.painter();
    painter.rect_filled(track, Rounding::same(2.0), Color32::from_white_alpha(26));

    let filled = Rect::from_min_size(
        track.min,
        vec2(width * progress.clamp(0.0, 1.0), track.height()),
    );
    painter.rect_filled(filled, Rounding::same(2.0), accent);

    let font = FontId::monospace(11.0);
    let color = Color32::from_gray(120);
    painter.text(
        pos2(track.left(), track.bottom() + 6.0),
        Align2::LEFT_TOP,
        util::leading_year(&catalog.first().display_year),
        font.clone(),
        color,
    );
    painter.text(
        pos2(track.right(), track.bottom() + 6.0),
        Align2::RIGHT_TOP,
        &catalog.last().display_year,
        font,
        color,
    );
}
