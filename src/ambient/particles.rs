use eframe::egui::{pos2, vec2, Color32, Painter, Rect};
use rand::rngs::StdRng;
use rand::Rng;

use super::paint;
use super::AmbientRenderer;
use crate::theme::{ambient_base, fade, rgba};
use crate::timeline::EraTheme;

const PARTICLE_COUNT: usize = 150;
const GLOW_HEIGHT: f32 = 300.0;
const STREAK: Color32 = Color32::from_rgb(56, 189, 248);

#[derive(Debug, Clone, Copy, PartialEq)]
struct Particle {
    x: f32,
    y: f32,
    /// Pixels per frame at 60 Hz.
    speed: f32,
    size: f32,
    alpha: f32,
}

/// CONVERSATIONAL: streaks rising out of a sky-blue glow, like messages scrolling up.
pub struct RisingParticles {
    particles: Vec<Particle>,
    rng: StdRng,
}

impl RisingParticles {
    pub fn new(rng: StdRng) -> Self {
        Self {
            particles: Vec::new(),
            rng,
        }
    }

    fn spawn(rng: &mut StdRng, width: f32, height: f32) -> Particle {
        Particle {
            x: rng.gen::<f32>() * width,
            y: height + rng.gen::<f32>() * 500.0,
            speed: 2.0 + rng.gen::<f32>() * 5.0,
            size: 2.0 + rng.gen::<f32>() * 3.0,
            alpha: 0.1 + rng.gen::<f32>() * 0.5,
        }
    }
}

impl AmbientRenderer for RisingParticles {
    fn theme(&self) -> EraTheme {
        EraTheme::Conversational
    }

    fn step(&mut self, dt: f32, bounds: Rect) {
        let (width, height) = (bounds.width(), bounds.height());
        if self.particles.is_empty() {
            let rng = &mut self.rng;
            self.particles = (0..PARTICLE_COUNT).map(|_| Self::spawn(rng, width, height)).collect();
        }

        let frames = dt * 60.0;
        for p in &mut self.particles {
            p.y -= p.speed * frames;
            if p.y < -50.0 {
                p.y = height + self.rng.gen::<f32>() * 100.0;
                p.x = self.rng.gen::<f32>() * width;
            }
        }
    }

    fn paint(&self, painter: &Painter, rect: Rect, _time: f64, opacity: f32) {
        let base = ambient_base(EraTheme::Conversational);
        painter.rect_filled(rect, 0.0, fade(base, opacity));

        let glow = Rect::from_min_max(
            pos2(rect.left(), rect.bottom() - GLOW_HEIGHT),
            rect.right_bottom(),
        );
        paint::vertical_gradient(
            painter,
            glow,
            Color32::TRANSPARENT,
            fade(rgba(14, 165, 233, 102), opacity),
        );

        for p in &self.particles {
            let min = rect.left_top() + vec2(p.x, p.y);
            let streak = Rect::from_min_size(min, vec2(2.0, p.size * 5.0));
            if streak.intersects(rect) {
                painter.rect_filled(streak, 0.0, fade(STREAK, p.alpha * opacity));
            }
        }

        let top = Rect::from_min_max(rect.left_top(), pos2(rect.right(), rect.center().y));
        paint::vertical_gradient(painter, top, fade(base, 0.8 * opacity), Color32::TRANSPARENT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn bounds() -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), vec2(640.0, 480.0))
    }

    #[test]
    fn spawns_below_the_screen() {
        let mut field = RisingParticles::new(StdRng::seed_from_u64(11));
        field.step(0.0, bounds());
        assert_eq!(field.particles.len(), PARTICLE_COUNT);
        assert!(field.particles.iter().all(|p| p.y >= 480.0 && p.x <= 640.0));
    }

    #[test]
    fn particles_rise_and_recycle_at_the_top() {
        let mut field = RisingParticles::new(StdRng::seed_from_u64(12));
        field.step(0.0, bounds());
        let start = field.particles[0];
        field.step(1.0 / 60.0, bounds());
        assert!((field.particles[0].y - (start.y - start.speed)).abs() < 1e-3);

        for _ in 0..600 {
            field.step(1.0 / 60.0, bounds());
        }
        assert!(field.particles.iter().all(|p| p.y >= -50.0 - 7.0 && p.y <= 480.0 + 500.0));
    }
}
