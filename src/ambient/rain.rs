use eframe::egui::{pos2, Align2, Color32, FontId, Painter, Rect, Stroke};
use rand::rngs::StdRng;
use rand::Rng;

use super::paint::{self, at};
use super::AmbientRenderer;
use crate::theme::{fade, rgba};
use crate::timeline::EraTheme;

const CELL: f32 = 20.0;
const TRAIL: usize = 14;
/// Cells advanced per second; one per frame at 60 Hz.
const FALL_SPEED: f32 = 60.0;
/// The rain covers the upper part of the screen, the grid the lower part.
const RAIN_HEIGHT: f32 = 0.6;
const GLYPHS: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'C', 'E', 'F', 'H', 'K', 'L', 'M',
    'N', 'R', 'T', 'X', 'Z', '$', '+', '<', '>', '=', '*', '#', '%', ':',
];
const MATRIX_GREEN: Color32 = Color32::from_rgb(0, 255, 65);

#[derive(Debug, Clone, Copy)]
struct Column {
    /// Row of the leading glyph, in cells. Negative while still above the screen.
    head: f32,
    seed: u32,
}

/// RETRO: falling glyph columns over a receding perspective grid.
pub struct DigitalRain {
    columns: Vec<Column>,
    rng: StdRng,
}

impl DigitalRain {
    pub fn new(rng: StdRng) -> Self {
        Self {
            columns: Vec::new(),
            rng,
        }
    }

    fn new_column(rng: &mut StdRng) -> Column {
        Column {
            head: rng.gen_range(-100.0..0.0),
            seed: rng.gen(),
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

fn mix(a: u32, b: u32, c: u32) -> u32 {
    let mut h =
        a.wrapping_mul(0x9E37_79B1) ^ b.wrapping_mul(0x85EB_CA77) ^ c.wrapping_mul(0xC2B2_AE3D);
    h ^= h >> 15;
    h = h.wrapping_mul(0x2C1B_3C6D);
    h ^= h >> 12;
    h
}

impl AmbientRenderer for DigitalRain {
    fn theme(&self) -> EraTheme {
        EraTheme::Retro
    }

    fn step(&mut self, dt: f32, bounds: Rect) {
        let wanted = (bounds.width() / CELL).ceil().max(0.0) as usize;
        if wanted != self.columns.len() {
            let rng = &mut self.rng;
            self.columns.resize_with(wanted, || Self::new_column(rng));
        }

        let floor = bounds.height() * RAIN_HEIGHT;
        for column in &mut self.columns {
            if column.head * CELL > floor && self.rng.gen::<f32>() > 0.975 {
                column.head = 0.0;
                column.seed = self.rng.gen();
            }
            column.head += dt * FALL_SPEED;
        }
    }

    fn paint(&self, painter: &Painter, rect: Rect, time: f64, opacity: f32) {
        painter.rect_filled(rect, 0.0, fade(Color32::BLACK, opacity));
        paint_grid(painter, rect, time, opacity);

        let rain_floor = rect.top() + rect.height() * RAIN_HEIGHT;
        let font = FontId::monospace(CELL * 0.9);
        let flicker = (time * 20.0) as u32;

        for (i, column) in self.columns.iter().enumerate() {
            let head_row = column.head.floor() as i64;
            let x = rect.left() + i as f32 * CELL + CELL * 0.5;
            for k in 0..TRAIL {
                let row = head_row - k as i64;
                if row < 0 {
                    break;
                }
                let y = rect.top() + row as f32 * CELL;
                if y > rain_floor {
                    continue;
                }

                let (glyph_seed, color) = if k == 0 {
                    let roll = mix(column.seed, row as u32, flicker);
                    let color = if roll % 50 == 0 { Color32::WHITE } else { MATRIX_GREEN };
                    (roll, color)
                } else {
                    (mix(column.seed, row as u32, 0), MATRIX_GREEN)
                };
                let glyph = GLYPHS[glyph_seed as usize % GLYPHS.len()];
                let trail = 1.0 - k as f32 / TRAIL as f32;
                painter.text(
                    pos2(x, y),
                    Align2::CENTER_TOP,
                    glyph,
                    font.clone(),
                    fade(color, 0.8 * trail * opacity),
                );
            }
        }

        paint::vertical_gradient(
            painter,
            Rect::from_min_max(
                pos2(rect.left(), rain_floor - 80.0),
                pos2(rect.right(), rain_floor),
            ),
            Color32::TRANSPARENT,
            fade(Color32::BLACK, opacity),
        );
        paint::vignette(painter, rect, 0.4, fade(Color32::BLACK, opacity));
    }
}

/// Green floor grid receding toward the horizon, scrolling toward the viewer.
fn paint_grid(painter: &Painter, rect: Rect, time: f64, opacity: f32) {
    let horizon = at(rect, 0.5, 1.0 - RAIN_HEIGHT);
    let bottom = rect.bottom();
    let depth = bottom - horizon.y;
    let line = |alpha: f32| Stroke::new(1.0, fade(rgba(16, 185, 129, 255), alpha * opacity));

    for i in -12..=12 {
        let foot_x = horizon.x + i as f32 * rect.width() / 10.0;
        painter.line_segment([horizon, pos2(foot_x, bottom)], line(0.25));
    }

    let scroll = (time * 0.5).fract() as f32;
    for i in 0..12 {
        let z = (i as f32 + scroll) / 12.0;
        let y = horizon.y + depth * z * z;
        painter.line_segment([pos2(rect.left(), y), pos2(rect.right(), y)], line(0.35 * z));
    }
}
