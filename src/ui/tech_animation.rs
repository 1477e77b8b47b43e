//! Small looping illustration shown on each card, one per era.
//!
//! Drawn on a 200x200 design grid that is scaled to fit the pane.

use eframe::egui::{
    vec2, Align2, Color32, FontId, Painter, Pos2, Rect, Rounding, Shape, Stroke, Vec2,
};

use crate::ambient::paint;
use crate::anim::{self, even_keyframes, keyframes, looped, phase};
use crate::theme::fade;
use crate::timeline::EraTheme;

const BLUE: Color32 = Color32::from_rgb(59, 130, 246);
const SLATE: Color32 = Color32::from_rgb(51, 65, 85);
const TOKEN_GRAY: Color32 = Color32::from_gray(85);

/// Maps the 200x200 design grid into a square centered in the pane.
struct Grid {
    origin: Pos2,
    scale: f32,
}

impl Grid {
    fn fit(rect: Rect) -> Self {
        let side = rect.width().min(rect.height());
        Self {
            origin: rect.center() - Vec2::splat(side * 0.5),
            scale: side / 200.0,
        }
    }

    fn p(&self, x: f32, y: f32) -> Pos2 {
        self.origin + vec2(x, y) * self.scale
    }

    fn s(&self, len: f32) -> f32 {
        len * self.scale
    }

    fn rect(&self, x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::from_min_size(self.p(x, y), vec2(w, h) * self.scale)
    }
}

pub fn paint_tech_animation(
    painter: &Painter,
    rect: Rect,
    theme: EraTheme,
    accent: Color32,
    time: f64,
    opacity: f32,
) {
    paint::vertical_gradient(
        painter,
        rect,
        fade(Color32::from_black_alpha(128), opacity),
        fade(Color32::from_black_alpha(204), opacity),
    );

    let grid = Grid::fit(rect);
    let painter = painter.with_clip_rect(rect.intersect(painter.clip_rect()));
    let scene = Scene { painter: &painter, grid: &grid, accent, time, opacity };
    match theme {
        EraTheme::Retro => scene.logic_tree(),
        EraTheme::Neural => scene.adversarial_collision(),
        EraTheme::Transformer => scene.attention(),
        EraTheme::Creative => scene.diffusion(),
        EraTheme::Conversational => scene.chat_stream(),
        EraTheme::Multimodal => scene.world_sim(),
    }
}

struct Scene<'a> {
    painter: &'a Painter,
    grid: &'a Grid,
    accent: Color32,
    time: f64,
    opacity: f32,
}

impl Scene<'_> {
    fn c(&self, color: Color32, alpha: f32) -> Color32 {
        fade(color, alpha * self.opacity)
    }

    fn line(&self, from: (f32, f32), to: (f32, f32), width: f32, color: Color32) {
        let g = self.grid;
        self.painter.line_segment(
            [g.p(from.0, from.1), g.p(to.0, to.1)],
            Stroke::new(g.s(width), color),
        );
    }

    fn dot(&self, x: f32, y: f32, r: f32, color: Color32) {
        self.painter.circle_filled(self.grid.p(x, y), self.grid.s(r), color);
    }

    /// Decision tree with signals travelling from the root to the leaves.
    fn logic_tree(&self) {
        let edge = self.c(self.accent, 0.3);
        let edges = [
            ((100.0, 20.0), (100.0, 60.0)),
            ((100.0, 60.0), (60.0, 100.0)),
            ((100.0, 60.0), (140.0, 100.0)),
            ((60.0, 100.0), (40.0, 150.0)),
            ((60.0, 100.0), (80.0, 150.0)),
            ((140.0, 100.0), (120.0, 150.0)),
            ((140.0, 100.0), (160.0, 150.0)),
        ];
        for (a, b) in edges {
            self.line(a, b, 2.0, edge);
        }

        let root_alpha = 0.5 + 0.5 * anim::pulse(self.time, 2.0);
        self.dot(100.0, 20.0, 4.0, self.c(self.accent, root_alpha));
        self.painter.rect_stroke(
            self.grid.rect(95.0, 55.0, 10.0, 10.0),
            0.0,
            Stroke::new(self.grid.s(1.0), self.c(self.accent, 1.0)),
        );

        let p = looped(self.time, 2.0, 0.0);
        let trunk_y = keyframes(&[20.0, 60.0, 60.0], &[0.0, 0.3, 1.0], p);
        self.glow_dot(100.0, trunk_y, 1.0);

        if let Some(p) = phase(self.time, 2.0, 0.3) {
            for dir in [-1.0, 1.0] {
                self.glow_dot(100.0 + dir * 40.0 * p, 60.0 + 40.0 * p, 1.0 - p);
            }
        }

        for (x, period, begin) in [(35.0, 1.0, 1.0), (155.0, 1.5, 1.2)] {
            let alpha = phase(self.time, period, begin)
                .map_or(0.2, |p| even_keyframes(&[0.2, 1.0, 0.2], p));
            self.painter.rect_filled(
                self.grid.rect(x, 150.0, 10.0, 10.0),
                0.0,
                self.c(self.accent, alpha),
            );
        }
    }

    fn glow_dot(&self, x: f32, y: f32, alpha: f32) {
        paint::radial_glow(
            self.painter,
            self.grid.p(x, y),
            self.grid.s(7.0),
            self.c(Color32::WHITE, 0.5 * alpha),
        );
        self.dot(x, y, 3.0, self.c(Color32::WHITE, alpha));
    }

    /// Generator and discriminator colliding in the middle, throwing sparks.
    fn adversarial_collision(&self) {
        let p = looped(self.time, 3.0, 0.0);
        let swing = anim::ease_in_out(even_keyframes(&[0.0, 1.0, 0.0], p));
        let left = 60.0 + 30.0 * swing;
        let right = 140.0 - 30.0 * swing;

        for (x, color) in [(left, self.accent), (right, BLUE)] {
            paint::radial_glow(
                self.painter,
                self.grid.p(x, 100.0),
                self.grid.s(42.0),
                self.c(color, 0.6),
            );
            self.dot(x, 100.0, 15.0, self.c(Color32::WHITE, 1.0));
        }

        let flash = keyframes(&[0.0, 0.8, 0.0], &[0.0, 0.5, 1.0], p);
        let width = keyframes(&[10.0, 50.0, 10.0], &[0.0, 0.5, 1.0], p);
        self.painter.rect_filled(
            self.grid.rect(100.0 - width * 0.5, 0.0, width, 200.0),
            0.0,
            self.c(Color32::WHITE, flash),
        );

        if let Some(p) = phase(self.time, 3.0, 1.4) {
            let spark = self.c(Color32::WHITE, even_keyframes(&[0.0, 1.0, 0.0], p));
            self.line((100.0, 100.0), (100.0 - 30.0 * p, 100.0 - 50.0 * p), 2.0, spark);
            self.line((100.0, 100.0), (100.0 + 30.0 * p, 100.0 + 50.0 * p), 2.0, spark);
        }
    }

    /// Input tokens attending to the last output token while the next one is predicted.
    fn attention(&self) {
        for i in 0..4 {
            let x = 40.0 + i as f32 * 40.0;
            self.dot(x, 150.0, 4.0, self.c(TOKEN_GRAY, 1.0));
            let (color, alpha) = if i == 3 {
                (self.accent, 0.5 + 0.5 * anim::pulse(self.time, 2.0))
            } else {
                (TOKEN_GRAY, 1.0)
            };
            self.dot(x, 50.0, 4.0, self.c(color, alpha));
        }

        for (i, x) in [40.0, 80.0, 120.0, 160.0].into_iter().enumerate() {
            let peak = if i == 3 { 1.0 } else { 0.8 };
            if let Some(p) = phase(self.time, 2.0, 0.2 * i as f64) {
                let alpha = 0.5 * even_keyframes(&[0.0, peak, 0.0], p);
                self.line((x, 150.0), (160.0, 50.0), 1.0, self.c(self.accent, alpha));
            }
        }

        let frame = self.grid.rect(150.0, 40.0, 20.0, 20.0);
        let corners = [
            frame.left_top(),
            frame.right_top(),
            frame.right_bottom(),
            frame.left_bottom(),
            frame.left_top(),
        ];
        let stroke = Stroke::new(self.grid.s(2.0), self.c(self.accent, 1.0));
        let dash_shift = looped(self.time, 2.0, 0.0) * self.grid.s(6.0);
        for window in corners.windows(2) {
            paint::dashed_gradient_line(
                self.painter,
                window[0],
                window[1],
                stroke.width,
                (stroke.color, stroke.color),
                self.grid.s(4.0),
                self.grid.s(2.0),
                dash_shift,
            );
        }

        let fill = keyframes(
            &[0.0, 0.0, 1.0, 0.0],
            &[0.0, 0.8, 0.9, 1.0],
            looped(self.time, 2.0, 0.0),
        );
        self.painter.rect_filled(
            self.grid.rect(154.0, 44.0, 12.0, 12.0),
            0.0,
            self.c(self.accent, fill),
        );
    }

    /// A letter resolving out of noise under a scanning bar.
    fn diffusion(&self) {
        let p = looped(self.time, 6.0, 0.0);
        let noise = even_keyframes(&[1.0, 0.0, 1.0], p);

        let glyph_center = self.grid.p(100.0, 100.0);
        let font = FontId::proportional(self.grid.s(140.0));
        let spread = self.grid.s(20.0) * noise;
        // Scattered ghost copies stand in for displacement and blur.
        for k in 0..6 {
            let angle = k as f32 * 1.047 + (self.time as f32) * 3.0;
            let offset = vec2(angle.cos(), angle.sin()) * spread;
            self.painter.text(
                glyph_center + offset,
                Align2::CENTER_CENTER,
                "A",
                font.clone(),
                self.c(self.accent, 0.15 * noise),
            );
        }
        self.painter.text(
            glyph_center,
            Align2::CENTER_CENTER,
            "A",
            font,
            self.c(self.accent, 0.9 * (1.0 - 0.7 * noise)),
        );

        let specks = (60.0 * noise) as usize;
        for i in 0..specks {
            let tick = (self.time * 8.0).floor() as f32;
            let seed = (i as f32 * 12.9898 + tick * 78.233).sin() * 43_758.547;
            let x = seed.fract().abs() * 200.0;
            let y = (seed * 1.7).fract().abs() * 200.0;
            self.dot(x, y, 1.2, self.c(self.accent, 0.5 * noise));
        }

        let bar_y = keyframes(&[-20.0, 220.0], &[0.0, 1.0], looped(self.time, 3.0, 0.0));
        let half = self.grid.rect(0.0, bar_y, 200.0, 10.0);
        paint::vertical_gradient(
            self.painter,
            half,
            Color32::TRANSPARENT,
            self.c(Color32::WHITE, 0.4),
        );
        let lower = half.translate(vec2(0.0, half.height()));
        paint::vertical_gradient(
            self.painter,
            lower,
            self.c(Color32::WHITE, 0.4),
            Color32::TRANSPARENT,
        );

        self.painter.text(
            self.grid.p(100.0, 180.0),
            Align2::CENTER_CENTER,
            "D I F F U S I O N",
            FontId::proportional(self.grid.s(10.0)),
            self.c(Color32::WHITE, 0.6),
        );
    }

    /// A user bubble followed by a streamed, typed-out reply.
    fn chat_stream(&self) {
        // The sequence replays every few seconds so it stays alive on screen.
        let t = (self.time % 6.0) as f32;
        let rise = (t / 0.5).min(1.0);
        let user_y = 200.0 - 60.0 * rise;
        self.painter.rect_filled(
            self.grid.rect(20.0, user_y, 60.0, 40.0),
            Rounding::same(self.grid.s(10.0)),
            self.c(SLATE, rise),
        );

        let bubble = self.grid.rect(80.0, 40.0, 100.0, 80.0);
        let rounding = Rounding::same(self.grid.s(10.0));
        self.painter.rect_filled(bubble, rounding, self.c(self.accent, 0.2));
        self.painter.rect_stroke(
            bubble,
            rounding,
            Stroke::new(self.grid.s(1.0), self.c(self.accent, 1.0)),
        );

        for (y, end, begin) in [(60.0, 170.0, 0.5), (75.0, 160.0, 0.8), (90.0, 175.0, 1.1)] {
            let typed = ((t - begin) / 0.5).clamp(0.0, 1.0);
            if typed > 0.0 {
                let x = 90.0 + (end - 90.0) * typed;
                self.line((90.0, y), (x, y), 4.0, self.c(Color32::WHITE, 1.0));
            }
        }

        let blink = even_keyframes(&[0.0, 1.0, 0.0], looped(self.time, 0.8, 0.0));
        self.dot(90.0, 105.0, 3.0, self.c(Color32::WHITE, blink));
    }

    /// A bouncing orb rippling a perspective floor while frames drift upward.
    fn world_sim(&self) {
        let floor = |x: f32, y: f32| self.grid.p(100.0 + x, 150.0 + y * 0.4);
        for (r, dashed) in [(80.0, true), (50.0, true), (20.0, false)] {
            let points: Vec<Pos2> = (0..=48)
                .map(|i| {
                    let a = i as f32 / 48.0 * std::f32::consts::TAU;
                    floor(a.cos() * r, a.sin() * r)
                })
                .collect();
            let stroke = Stroke::new(self.grid.s(1.0), self.c(self.accent, 0.2));
            if dashed {
                let (dash, gap) = (self.grid.s(4.0), self.grid.s(4.0));
                self.painter.extend(Shape::dashed_line(&points, stroke, dash, gap));
            } else {
                self.painter.add(Shape::line(points, stroke));
            }
        }
        let cross = Stroke::new(self.grid.s(1.0), self.c(self.accent, 0.3));
        self.painter.line_segment([floor(-100.0, 0.0), floor(100.0, 0.0)], cross);
        self.painter.line_segment([floor(0.0, -100.0), floor(0.0, 100.0)], cross);

        let p = looped(self.time, 2.0, 0.0);
        let cy = keyframes(&[40.0, 150.0, 110.0, 150.0], &[0.0, 0.5, 0.75, 1.0], p);
        let r = keyframes(&[15.0, 15.0, 14.0, 15.0], &[0.0, 0.45, 0.5, 1.0], p);
        let orb = self.grid.p(100.0, cy - r * 0.5);
        paint::radial_glow(self.painter, orb, self.grid.s(r * 1.4), self.c(self.accent, 0.8));
        paint::radial_glow(self.painter, orb, self.grid.s(r * 0.8), self.c(Color32::WHITE, 0.9));

        let ripples = [(10.0, 100.0, 0.5, 1.0, Color32::WHITE), (5.0, 70.0, 0.6, 0.8, self.accent)];
        for (from, to, begin, alpha, color) in ripples {
            if let Some(p) = phase(self.time, 2.0, begin) {
                let radius = from + (to - from) * p;
                let center = floor(0.0, 0.0);
                let radii = vec2(self.grid.s(radius), self.grid.s(radius * 0.3));
                let points: Vec<Pos2> = (0..=48)
                    .map(|i| {
                        let a = i as f32 / 48.0 * std::f32::consts::TAU;
                        center + vec2(a.cos() * radii.x, a.sin() * radii.y)
                    })
                    .collect();
                let stroke = Stroke::new(self.grid.s(2.0), self.c(color, alpha * (1.0 - p)));
                self.painter.add(Shape::line(points, stroke));
            }
        }

        let frames = [
            (30.0, 140.0, 60.0, 30.0, 20.0, 4.0, 0.0, self.accent, 1.0),
            (140.0, 160.0, 80.0, 40.0, 25.0, 3.0, 1.0, Color32::WHITE, 1.0),
            (80.0, 100.0, 40.0, 20.0, 15.0, 5.0, 0.5, self.accent, 0.5),
        ];
        for (x, y_from, y_to, w, h, period, begin, color, peak) in frames {
            if let Some(p) = phase(self.time, period, begin) {
                let y = y_from + (y_to - y_from) * p;
                let alpha = even_keyframes(&[0.0, peak, 0.0], p);
                let rect = self.grid.rect(x, y, w, h);
                self.painter.rect_filled(rect, 0.0, self.c(color, 0.1 * alpha));
                self.painter.rect_stroke(
                    rect,
                    0.0,
                    Stroke::new(self.grid.s(1.0), self.c(color, alpha)),
                );
            }
        }
    }
}
