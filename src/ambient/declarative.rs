//! Treatments that are a pure function of time, plus a little fixed layout
//! rolled once when the renderer is created.

use std::f32::consts::TAU;

use eframe::egui::{emath::Rot2, pos2, vec2, Color32, Painter, Pos2, Rect, Shape, Stroke, Vec2};
use rand::rngs::StdRng;
use rand::Rng;

use super::paint::{self, at};
use super::AmbientRenderer;
use crate::anim;
use crate::theme::{ambient_base, fade, rgba};
use crate::timeline::EraTheme;

const ROSE: Color32 = Color32::from_rgb(244, 63, 94);
const BLUE: Color32 = Color32::from_rgb(59, 130, 246);
const ORANGE: Color32 = Color32::from_rgb(249, 115, 22);

/// NEURAL: two opposing glows joined by dashed connections, a generator and a
/// discriminator facing off.
pub struct NeuralWeb;

impl AmbientRenderer for NeuralWeb {
    fn theme(&self) -> EraTheme {
        EraTheme::Neural
    }

    fn paint(&self, painter: &Painter, rect: Rect, time: f64, opacity: f32) {
        painter.rect_filled(rect, 0.0, fade(Color32::BLACK, opacity));

        let haze = 0.12 + 0.08 * anim::pulse(time, 1.0);
        paint::radial_glow(
            painter,
            rect.center(),
            rect.width().max(rect.height()) * 0.6,
            fade(Color32::from_gray(31), haze * opacity),
        );

        let side = vec2(rect.width() * 0.45, rect.height() * 0.9);
        let left = 0.35 + 0.25 * anim::pulse(time, 2.0);
        let right = 0.35 + 0.25 * anim::pulse(time + 0.5, 2.0);
        paint::radial_glow_scaled(
            painter,
            at(rect, 0.0, 0.5),
            side,
            fade(rgba(136, 19, 55, 160), left * opacity),
        );
        paint::radial_glow_scaled(
            painter,
            at(rect, 1.0, 0.5),
            side,
            fade(rgba(30, 58, 138, 160), right * opacity),
        );

        let dash_phase = (time * 40.0) as f32;
        let lines = [
            (at(rect, 0.0, 0.2), at(rect, 1.0, 0.8), (ROSE, BLUE), 0.3),
            (at(rect, 0.0, 0.8), at(rect, 1.0, 0.2), (BLUE, ROSE), 0.3),
            (at(rect, 0.2, 0.0), at(rect, 0.8, 1.0), (ROSE, BLUE), 0.18),
        ];
        for (a, b, (c0, c1), alpha) in lines {
            paint::dashed_gradient_line(
                painter,
                a,
                b,
                2.0,
                (fade(c0, alpha * opacity), fade(c1, alpha * opacity)),
                20.0,
                20.0,
                dash_phase,
            );
        }

        let core = 0.1 + 0.1 * anim::pulse(time, 2.0);
        paint::radial_glow(painter, rect.center(), 260.0, fade(Color32::WHITE, core * opacity));
    }
}

#[derive(Debug, Clone, Copy)]
struct Ping {
    at: Vec2,
    period: f32,
}

/// TRANSFORMER: star-field grid, slowly turning attention spokes and pinging tokens.
pub struct AttentionField {
    pings: Vec<Ping>,
}

impl AttentionField {
    pub fn new(mut rng: StdRng) -> Self {
        let pings = (0..20)
            .map(|_| Ping {
                at: vec2(rng.gen(), rng.gen()),
                period: 1.0 + rng.gen::<f32>() * 2.0,
            })
            .collect();
        Self { pings }
    }
}

impl AmbientRenderer for AttentionField {
    fn theme(&self) -> EraTheme {
        EraTheme::Transformer
    }

    fn paint(&self, painter: &Painter, rect: Rect, time: f64, opacity: f32) {
        painter.rect_filled(rect, 0.0, fade(ambient_base(EraTheme::Transformer), opacity));

        let dot = fade(Color32::WHITE, 0.2 * opacity);
        let mut y = rect.top() + 30.0;
        while y < rect.bottom() {
            let mut x = rect.left() + 30.0;
            while x < rect.right() {
                painter.circle_filled(pos2(x, y), 1.0, dot);
                x += 60.0;
            }
            y += 60.0;
        }

        let center = rect.center();
        let reach = rect.width().max(rect.height()) * 0.75;
        let spin = anim::looped(time, 60.0, 0.0) * TAU;
        let spoke = fade(BLUE, 0.3 * opacity);
        for i in 0..12 {
            let dir = Rot2::from_angle(spin + i as f32 * TAU / 12.0) * Vec2::X;
            let mid = center + dir * reach * 0.5;
            paint::gradient_segment(painter, center, mid, 2.0, Color32::TRANSPARENT, spoke);
            paint::gradient_segment(
                painter,
                mid,
                center + dir * reach,
                2.0,
                spoke,
                Color32::TRANSPARENT,
            );
        }

        for ping in &self.pings {
            let p = anim::looped(time, ping.period as f64, 0.0);
            let pos = at(rect, ping.at.x, ping.at.y);
            let color = fade(rgba(96, 165, 250, 128), (1.0 - p) * opacity);
            painter.circle_filled(pos, 2.0 * (1.0 + p), color);
        }
    }
}

/// CREATIVE: large drifting color blobs mixing like paint.
pub struct LiquidBlobs;

impl LiquidBlobs {
    const BLOBS: [(Color32, f32, f32, f32, f32); 3] = [
        // color, anchor x, anchor y, phase offset (s), alpha
        (Color32::from_rgb(147, 51, 234), 0.3, 0.1, 0.0, 0.6),
        (Color32::from_rgb(249, 115, 22), 0.7, 0.95, -5.0, 0.6),
        (Color32::from_rgb(219, 39, 119), 0.65, 0.55, -2.0, 0.5),
    ];
}

impl AmbientRenderer for LiquidBlobs {
    fn theme(&self) -> EraTheme {
        EraTheme::Creative
    }

    fn paint(&self, painter: &Painter, rect: Rect, time: f64, opacity: f32) {
        painter.rect_filled(rect, 0.0, fade(Color32::BLACK, opacity));

        let size = rect.width().max(rect.height());
        for (color, ax, ay, offset, alpha) in Self::BLOBS {
            let t = anim::looped(time + offset as f64, 20.0, 0.0) * TAU;
            let drift = vec2(t.cos() * 0.12, (2.0 * t).sin() * 0.08);
            let center = at(rect, ax + drift.x, ay + drift.y);
            let wobble = 1.0 + 0.08 * (3.0 * t).sin();
            let radii = vec2(size * 0.6 * wobble, size * 0.6 / wobble);
            paint::radial_glow_scaled(painter, center, radii, fade(color, alpha * opacity));
        }

        painter.rect_filled(rect, 0.0, fade(Color32::from_black_alpha(64), opacity));
    }
}

#[derive(Debug, Clone, Copy)]
struct FloatingFrame {
    at: Vec2,
    size: Vec2,
    angle: f32,
}

/// MULTIMODAL: orbiting rings, a perspective floor and floating video frames.
pub struct WorldGrid {
    frames: Vec<FloatingFrame>,
}

impl WorldGrid {
    pub fn new(mut rng: StdRng) -> Self {
        let frames = (0..5)
            .map(|_| FloatingFrame {
                at: vec2(rng.gen(), rng.gen::<f32>() * 0.8),
                size: vec2(100.0 + rng.gen::<f32>() * 200.0, 100.0 + rng.gen::<f32>() * 200.0),
                angle: rng.gen::<f32>() * TAU,
            })
            .collect();
        Self { frames }
    }
}

fn rotated_rect(center: Pos2, size: Vec2, angle: f32) -> Vec<Pos2> {
    let rot = Rot2::from_angle(angle);
    let half = size * 0.5;
    [vec2(-half.x, -half.y), vec2(half.x, -half.y), vec2(half.x, half.y), vec2(-half.x, half.y)]
        .into_iter()
        .map(|corner| center + rot * corner)
        .collect()
}

impl AmbientRenderer for WorldGrid {
    fn theme(&self) -> EraTheme {
        EraTheme::Multimodal
    }

    fn paint(&self, painter: &Painter, rect: Rect, time: f64, opacity: f32) {
        painter.rect_filled(rect, 0.0, fade(ambient_base(EraTheme::Multimodal), opacity));

        let center = rect.center();
        let radius = rect.width() * 0.5;
        let spin = anim::looped(time, 40.0, 0.0) * TAU;
        let rings = [(1.0, 0.1), (0.8, 0.2), (0.6, 0.2)];
        for (scale, alpha) in rings {
            let stroke = Stroke::new(1.0, fade(ORANGE, alpha * opacity));
            painter.circle_stroke(center, radius * scale, stroke);
            for notch in 0..4 {
                let dir = Rot2::from_angle(spin * scale + notch as f32 * TAU / 4.0) * Vec2::X;
                let p = center + dir * radius * scale;
                painter.line_segment([p - dir * 6.0, p + dir * 6.0], stroke);
            }
        }

        let floor_alpha = 0.06 + 0.06 * anim::pulse(time, 8.0);
        let floor = Stroke::new(1.0, fade(ORANGE, floor_alpha * opacity));
        let horizon = at(rect, 0.5, 0.6);
        for i in -15..=15 {
            let foot = pos2(horizon.x + i as f32 * 100.0, rect.bottom());
            let head = pos2(horizon.x + i as f32 * 35.0, horizon.y);
            painter.line_segment([head, foot], floor);
        }
        let depth = rect.bottom() - horizon.y;
        for i in 1..10 {
            let z = i as f32 / 10.0;
            let y = horizon.y + depth * z * z;
            painter.line_segment([pos2(rect.left(), y), pos2(rect.right(), y)], floor);
        }

        for (i, frame) in self.frames.iter().enumerate() {
            let bob = anim::looped(time - 2.0 * i as f64 + 100.0, 6.0, 0.0) * TAU;
            let pos = at(rect, frame.at.x, frame.at.y) + vec2(0.0, bob.sin() * 20.0);
            let points = rotated_rect(pos, frame.size, frame.angle + bob.cos() * 0.05);
            painter.add(Shape::convex_polygon(
                points,
                fade(ORANGE, 0.05 * opacity),
                Stroke::new(1.0, fade(ORANGE, 0.3 * opacity)),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn attention_pings_stay_on_screen_with_bounded_periods() {
        let field = AttentionField::new(StdRng::seed_from_u64(21));
        assert_eq!(field.pings.len(), 20);
        for ping in &field.pings {
            assert!((0.0..=1.0).contains(&ping.at.x) && (0.0..=1.0).contains(&ping.at.y));
            assert!((1.0..=3.0).contains(&ping.period));
        }
    }

    #[test]
    fn floating_frames_are_placed_in_the_upper_area() {
        let grid = WorldGrid::new(StdRng::seed_from_u64(22));
        assert_eq!(grid.frames.len(), 5);
        for frame in &grid.frames {
            assert!(frame.at.y <= 0.8);
            assert!(frame.size.x >= 100.0 && frame.size.x <= 300.0);
        }
    }

    #[test]
    fn rotated_rect_keeps_its_center() {
        let center = pos2(50.0, 40.0);
        let points = rotated_rect(center, vec2(20.0, 10.0), 1.0);
        let sum = points.iter().fold(Vec2::ZERO, |acc, p| acc + p.to_vec2());
        let mean = (sum / 4.0).to_pos2();
        assert!((mean - center).length() < 1e-4);
    }
}
