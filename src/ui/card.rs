//! Event cards: the detailed active card and its compact neighbours.
//!
//! Each visible entry owns a [`Tween`] of its [`Pose`]; when the carousel
//! moves, poses are retargeted so cards glide into their new slot.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use eframe::egui::{self, pos2, vec2, Align2, Color32, FontId, Rect, Rounding, Stroke, Vec2};

use crate::ambient::paint;
use crate::anim::{Lerp, Tween};
use crate::carousel::{Carousel, SlotRole, VisibleSlot};
use crate::theme::{self, fade, CardStyle};
use crate::timeline::{Catalog, EventRecord};
use crate::ui::navigation::NavAction;
use crate::ui::tech_animation::paint_tech_animation;
use crate::ui::util::{chip, styled};

const ACTIVE_MAX_WIDTH: f32 = 896.0;
const COMPACT_SIZE: Vec2 = vec2(300.0 * 0.9, 400.0 * 0.9);
const NEIGHBOUR_OPACITY: f32 = 0.4;
const HOVER_BOOST: f32 = 0.2;

/// Slot position (`offset`, in card slots from the centre) and opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub offset: f32,
    pub opacity: f32,
}

impl Pose {
    pub fn resting(role: SlotRole) -> Self {
        let opacity = if role.is_active() { 1.0 } else { NEIGHBOUR_OPACITY };
        Self {
            offset: role.offset() as f32,
            opacity,
        }
    }

    /// Where a card that was out of view starts from.
    fn entering(role: SlotRole) -> Self {
        Self {
            offset: role.offset() as f32 * 2.0,
            opacity: 0.0,
        }
    }

    /// 1 at the centre slot, 0 from one slot away.
    fn closeness(self) -> f32 {
        1.0 - self.offset.abs().min(1.0)
    }
}

impl Lerp for Pose {
    fn lerp(from: Self, to: Self, t: f32) -> Self {
        Self {
            offset: f32::lerp(from.offset, to.offset, t),
            opacity: f32::lerp(from.opacity, to.opacity, t),
        }
    }
}

/// Pose animations of the cards currently on screen.
pub struct CardMotion {
    duration: Duration,
    tweens: HashMap<usize, Tween<Pose>>,
}

impl CardMotion {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            tweens: HashMap::new(),
        }
    }

    /// Current pose for `slot`, starting or retargeting its animation as needed.
    pub fn pose(&mut self, slot: VisibleSlot, now: Instant) -> Pose {
        let target = Pose::resting(slot.role);
        let duration = self.duration;
        let tween = self
            .tweens
            .entry(slot.index)
            .or_insert_with(|| Tween::toward(Pose::entering(slot.role), target, duration, now));
        tween.retarget(target, now);
        tween.value(now)
    }

    /// Forgets cards that left the view so they re-enter from the side.
    pub fn retain_visible(&mut self, slots: &[VisibleSlot]) {
        self.tweens
            .retain(|index, _| slots.iter().any(|slot| slot.index == *index));
    }

    pub fn is_settled(&self, now: Instant) -> bool {
        self.tweens.values().all(|tween| tween.is_settled(now))
    }
}

/// Size of the detailed card for the available `area`.
pub fn active_size(area: Rect) -> Vec2 {
    let width = (area.width() * 0.9).min(ACTIVE_MAX_WIDTH);
    let height = (area.height() * 0.62).clamp(300.0, 500.0).min(area.height());
    vec2(width, height)
}

/// Screen rect of a card at `pose`. Size blends from compact to full as it nears the centre.
pub fn card_rect(area: Rect, pose: Pose) -> Rect {
    let full = active_size(area);
    let compact = vec2(COMPACT_SIZE.x.min(full.x), COMPACT_SIZE.y.min(full.y));
    let size = compact + (full - compact) * pose.closeness();
    // Neighbours peek out from behind the active card.
    let spacing = full.x * 0.5 + compact.x * 0.2;
    let center = area.center() + vec2(pose.offset * spacing, 0.0);
    Rect::from_center_size(center, size)
}

/// Draws every visible card and returns the jump requested by a click on a neighbour.
pub fn draw_cards(
    ui: &mut egui::Ui,
    area: Rect,
    catalog: &Catalog,
    carousel: &Carousel,
    motion: &mut CardMotion,
    time: f64,
    now: Instant,
) -> Option<NavAction> {
    let slots = carousel.visible_slots();
    motion.retain_visible(&slots);

    let placed: Vec<(VisibleSlot, Pose, Rect)> = slots
        .iter()
        .map(|slot| {
            let pose = motion.pose(*slot, now);
            (*slot, pose, card_rect(area, pose))
        })
        .collect();
    let active_rect = placed
        .iter()
        .find(|(slot, _, _)| slot.role.is_active())
        .map(|(_, _, rect)| *rect);
    let pointer_on_active = ui
        .ctx()
        .pointer_hover_pos()
        .zip(active_rect)
        .is_some_and(|(pos, rect)| rect.contains(pos));

    let mut action = None;
    for (slot, pose, rect) in placed {
        let Some(event) = catalog.get(slot.index) else {
            continue;
        };
        if slot.role.is_active() {
            draw_full_card(ui, rect, event, pose.opacity, time);
            continue;
        }

        let response = ui.interact(rect, ui.id().with(("card", slot.index)), egui::Sense::click());
        let hovered = response.hovered() && !pointer_on_active;
        if hovered {
            ui.ctx().set_cursor_icon(egui::CursorIcon::PointingHand);
        }
        if response.clicked() && !pointer_on_active {
            action = Some(NavAction::JumpTo(slot.index));
        }
        let opacity = if hovered { pose.opacity + HOVER_BOOST } else { pose.opacity };
        draw_compact_card(ui, rect, event, opacity.min(1.0), time);
    }
    action
}

fn draw_chrome(
    painter: &egui::Painter,
    rect: Rect,
    style: &CardStyle,
    accent: Color32,
    opacity: f32,
) {
    let rounding = Rounding::same(style.rounding);
    for ring in 1..=4 {
        let spread = ring as f32 * 4.0;
        let strength = opacity / ring as f32;
        painter.rect_stroke(
            rect.expand(spread),
            Rounding::same(style.rounding + spread),
            Stroke::new(4.0, fade(style.glow, strength)),
        );
    }
    painter.rect_filled(rect, rounding, fade(style.fill, opacity));

    let clipped = painter.with_clip_rect(rect.shrink(style.rounding * 0.3));
    paint::radial_glow(
        &clipped,
        rect.right_top(),
        rect.width() * 0.45,
        fade(accent, 0.12 * opacity),
    );
    if style.monospace {
        let mut y = rect.top() + 2.0;
        while y < rect.bottom() {
            clipped.hline(
                rect.x_range(),
                y,
                Stroke::new(1.0, fade(Color32::from_black_alpha(60), opacity)),
            );
            y += 4.0;
        }
    }

    painter.rect_stroke(rect, rounding, Stroke::new(1.0, fade(style.border, opacity)));
}

/// Tech illustration framed inside a card, tinted with `accent`.
fn draw_animation_pane(
    ui: &egui::Ui,
    pane: Rect,
    event: &EventRecord,
    accent: Color32,
    style: &CardStyle,
    opacity: f32,
    time: f64,
) {
    let painter = ui.painter_at(pane);
    paint_tech_animation(&painter, pane, event.theme, accent, time, opacity);
    painter.rect_stroke(
        pane,
        Rounding::same(style.rounding * 0.6),
        Stroke::new(1.0, fade(Color32::from_white_alpha(20), opacity)),
    );
}

/// "TECH: <primary tag>" label in the pane's top-left corner.
fn draw_tech_badge(ui: &egui::Ui, pane: Rect, event: &EventRecord, opacity: f32) {
    let painter = ui.painter_at(pane);
    let text = format!("TECH: {}", event.primary_tag().to_uppercase());
    let font = FontId::monospace(11.0);
    let galley = painter.layout_no_wrap(text.clone(), font.clone(), Color32::WHITE);
    let badge_rect = Rect::from_min_size(
        pane.left_top() + vec2(12.0, 12.0),
        galley.size() + vec2(16.0, 8.0),
    );
    painter.rect_filled(
        badge_rect,
        Rounding::same(4.0),
        fade(Color32::from_black_alpha(180), opacity),
    );
    painter.rect_stroke(
        badge_rect,
        Rounding::same(4.0),
        Stroke::new(1.0, fade(event.accent, 0.6 * opacity)),
    );
    painter.text(
        badge_rect.center(),
        Align2::CENTER_CENTER,
        text,
        font,
        fade(event.accent, opacity),
    );
}

fn draw_full_card(ui: &mut egui::Ui, rect: Rect, event: &EventRecord, opacity: f32, time: f64) {
    let style = theme::card_style(event.theme);
    draw_chrome(ui.painter(), rect, &style, event.accent, opacity);

    let inner = rect.shrink(24.0);
    let (pane, text) = if inner.width() >= 560.0 {
        let split = inner.left() + inner.width() * 0.42;
        (
            Rect::from_min_max(inner.min, pos2(split, inner.bottom())),
            Rect::from_min_max(pos2(split + 24.0, inner.top()), inner.max),
        )
    } else {
        let split = inner.top() + inner.height() * 0.35;
        (
            Rect::from_min_max(inner.min, pos2(inner.right(), split)),
            Rect::from_min_max(pos2(inner.left(), split + 16.0), inner.max),
        )
    };
    draw_animation_pane(ui, pane, event, event.accent, &style, opacity, time);
    draw_tech_badge(ui, pane, event, opacity);

    let mono = style.monospace;
    ui.allocate_ui_at_rect(text, |ui| {
        ui.set_clip_rect(text.intersect(ui.clip_rect()));
        ui.spacing_mut().item_spacing.y = 10.0;

        chip(ui, styled(&event.display_year, 12.0, true), event.accent, opacity);
        ui.label(styled(&event.title, 30.0, mono).strong().color(fade(Color32::WHITE, opacity)));
        ui.label(styled(&event.subtitle, 16.0, mono).color(fade(event.accent, opacity)));

        let body = fade(Color32::from_gray(200), opacity);
        let description = ui
            .indent(("description", event.id), |ui| {
                ui.label(styled(&event.description, 14.0, mono).color(body))
            })
            .response;
        let bar_x = description.rect.left() + 2.0;
        ui.painter().vline(
            bar_x,
            description.rect.y_range(),
            Stroke::new(2.0, fade(event.accent, 0.6 * opacity)),
        );

        ui.horizontal_wrapped(|ui| {
            for tag in &event.focus_tags {
                chip(ui, styled(format!("#{tag}"), 12.0, mono), Color32::from_gray(200), opacity);
            }
        });

        let stat_label = fade(Color32::from_gray(130), opacity);
        let stat_value = fade(Color32::WHITE, opacity);
        egui::Grid::new(("stats", event.id))
            .num_columns(2)
            .spacing(vec2(32.0, 8.0))
            .show(ui, |ui| {
                for row in event.stats.chunks(2) {
                    for stat in row {
                        ui.vertical(|ui| {
                            let label = stat.label.to_uppercase();
                            ui.label(styled(label, 10.0, true).color(stat_label));
                            ui.label(styled(&stat.value, 18.0, mono).strong().color(stat_value));
                        });
                    }
                    ui.end_row();
                }
            });
    });
}

/// Neighbour card. Drawn in grayscale so only the active era carries color.
fn draw_compact_card(ui: &mut egui::Ui, rect: Rect, event: &EventRecord, opacity: f32, time: f64) {
    let style = theme::compact_card_style();
    let accent = theme::grayscale(event.accent);
    draw_chrome(ui.painter(), rect, &style, accent, opacity);

    let inner = rect.shrink(16.0);
    let pane = Rect::from_min_size(inner.min, vec2(inner.width(), inner.height() * 0.45));
    draw_animation_pane(ui, pane, event, accent, &style, opacity, time);

    let text = Rect::from_min_max(pos2(inner.left(), pane.bottom() + 12.0), inner.max);
    ui.allocate_ui_at_rect(text, |ui| {
        ui.set_clip_rect(text.intersect(ui.clip_rect()));
        ui.spacing_mut().item_spacing.y = 6.0;
        let year = fade(Color32::from_gray(150), opacity);
        let title = fade(Color32::from_gray(225), opacity);
        let subtitle = fade(Color32::from_gray(160), opacity);
        ui.label(styled(&event.display_year, 12.0, true).color(year));
        ui.label(styled(&event.title, 20.0, false).strong().color(title));
        ui.label(styled(&event.subtitle, 13.0, false).color(subtitle));
        let tag = format!("● {}", event.primary_tag());
        ui.label(styled(tag, 12.0, false).color(fade(accent, opacity)));
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::Pos2;

    fn area() -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), vec2(1280.0, 600.0))
    }

    #[test]
    fn active_card_is_capped_and_centered() {
        let rect = card_rect(area(), Pose::resting(SlotRole::Active));
        assert_eq!(rect.width(), ACTIVE_MAX_WIDTH);
        assert_eq!(rect.center(), area().center());
        assert!(rect.height() >= 300.0 && rect.height() <= 500.0);
    }

    #[test]
    fn neighbours_sit_on_either_side_and_peek_out() {
        let active = card_rect(area(), Pose::resting(SlotRole::Active));
        let prev = card_rect(area(), Pose::resting(SlotRole::Previous));
        let next = card_rect(area(), Pose::resting(SlotRole::Next));
        assert!((prev.size() - COMPACT_SIZE).length() < 1e-3);
        assert!(prev.left() < active.left() && prev.right() > active.left());
        assert!(next.right() > active.right() && next.left() < active.right());
    }

    #[test]
    fn poses_settle_on_their_resting_slot() {
        let t0 = Instant::now();
        let mut motion = CardMotion::new(Duration::from_millis(700));
        let slot = VisibleSlot { index: 3, role: SlotRole::Next };

        let start = motion.pose(slot, t0);
        assert_eq!(start, Pose::entering(SlotRole::Next));

        let settled = motion.pose(slot, t0 + Duration::from_millis(700));
        assert_eq!(settled, Pose::resting(SlotRole::Next));
        assert!(motion.is_settled(t0 + Duration::from_millis(700)));
    }

    #[test]
    fn retargeting_moves_from_the_current_pose() {
        let t0 = Instant::now();
        let mut motion = CardMotion::new(Duration::from_millis(700));
        motion.pose(VisibleSlot { index: 1, role: SlotRole::Next }, t0);
        let later = t0 + Duration::from_millis(2000);

        let pose = motion.pose(VisibleSlot { index: 1, role: SlotRole::Active }, later);
        assert_eq!(pose, Pose::resting(SlotRole::Next));
        assert!(!motion.is_settled(later));

        let done = motion.pose(
            VisibleSlot { index: 1, role: SlotRole::Active },
            later + Duration::from_millis(700),
        );
        assert_eq!(done, Pose::resting(SlotRole::Active));
    }

    #[test]
    fn cards_that_leave_the_view_are_forgotten() {
        let t0 = Instant::now();
        let mut motion = CardMotion::new(Duration::from_millis(700));
        let a = VisibleSlot { index: 0, role: SlotRole::Active };
        let b = VisibleSlot { index: 1, role: SlotRole::Next };
        motion.pose(a, t0);
        motion.pose(b, t0);
        motion.retain_visible(&[a]);
        assert_eq!(motion.tweens.len(), 1);
    }

    /// Moves the pointer to `pos`, then presses and releases the primary button
    /// over the following frames. Returns whatever the cards asked for.
    fn click_cards_at(pos: Pos2) -> Option<NavAction> {
        let catalog = Catalog::embedded().expect("embedded catalog");
        let carousel = Carousel::new(catalog.len(), 0);
        let mut motion = CardMotion::new(Duration::ZERO);
        let ctx = egui::Context::default();
        let button = |pressed| egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::default(),
        };

        let mut requested = None;
        let frames = [
            vec![egui::Event::PointerMoved(pos)],
            vec![button(true)],
            vec![button(false)],
        ];
        for events in frames {
            let input = egui::RawInput {
                events,
                ..Default::default()
            };
            let _ = ctx.run(input, |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    let now = Instant::now();
                    let action = draw_cards(ui, area(), &catalog, &carousel, &mut motion, 0.0, now);
                    if action.is_some() {
                        requested = action;
                    }
                });
            });
        }
        requested
    }

    #[test]
    fn clicking_a_neighbour_jumps_to_it() {
        let active = card_rect(area(), Pose::resting(SlotRole::Active));
        let next = card_rect(area(), Pose::resting(SlotRole::Next));
        let prev = card_rect(area(), Pose::resting(SlotRole::Previous));

        let beside_next = pos2((active.right() + next.right()) * 0.5, next.center().y);
        assert!(!active.contains(beside_next));
        assert_eq!(click_cards_at(beside_next), Some(NavAction::JumpTo(1)));

        let beside_prev = pos2((prev.left() + active.left()) * 0.5, prev.center().y);
        assert_eq!(click_cards_at(beside_prev), Some(NavAction::JumpTo(5)));
    }

    #[test]
    fn clicking_the_active_card_does_nothing() {
        let active = card_rect(area(), Pose::resting(SlotRole::Active));
        let next = card_rect(area(), Pose::resting(SlotRole::Next));
        assert_eq!(click_cards_at(active.center()), None);

        // Where the active card covers the neighbour, the active card wins.
        let overlap = pos2((next.left() + active.right()) * 0.5, next.center().y);
        assert!(next.contains(overlap) && active.contains(overlap));
        assert_eq!(click_cards_at(overlap), None);
    }

    #[test]
    fn cards_paint_for_every_era() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        let ctx = egui::Context::default();
        let mut motion = CardMotion::new(Duration::ZERO);
        for start in 0..catalog.len() {
            let carousel = Carousel::new(catalog.len(), start);
            let output = ctx.run(egui::RawInput::default(), |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    let action = draw_cards(
                        ui,
                        area(),
                        &catalog,
                        &carousel,
                        &mut motion,
                        1.5,
                        Instant::now(),
                    );
                    assert_eq!(action, None);
                });
            });
            assert!(!output.shapes.is_empty());
        }
    }
}
