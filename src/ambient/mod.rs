//! Full-screen ambient backgrounds, one treatment per era.
//!
//! The [`AmbientStage`] mirrors the [`CrossFade`] state: it keeps the renderer
//! for the active theme and, during a fade, the one being faded out. Renderers
//! own their transient animation state; it is dropped as soon as their theme
//! leaves the screen.

mod declarative;
mod particles;
pub mod paint;
mod rain;

use eframe::egui::{Color32, Painter, Rect};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::crossfade::CrossFade;
use crate::timeline::EraTheme;

pub use declarative::{AttentionField, LiquidBlobs, NeuralWeb, WorldGrid};
pub use particles::RisingParticles;
pub use rain::DigitalRain;

pub trait AmbientRenderer {
    fn theme(&self) -> EraTheme;

    /// Advances per-frame state by `dt` seconds. Time-driven treatments ignore it.
    fn step(&mut self, _dt: f32, _bounds: Rect) {}

    /// Paints the treatment over `rect`, scaled by `opacity`.
    fn paint(&self, painter: &Painter, rect: Rect, time: f64, opacity: f32);
}

/// Builds the treatment for `theme`.
pub fn renderer_for(theme: EraTheme, rng: &mut StdRng) -> Box<dyn AmbientRenderer> {
    let seeded = StdRng::from_rng(&mut *rng).unwrap_or_else(|_| StdRng::seed_from_u64(0));
    match theme {
        EraTheme::Retro => Box::new(DigitalRain::new(seeded)),
        EraTheme::Neural => Box::new(NeuralWeb),
        EraTheme::Transformer => Box::new(AttentionField::new(seeded)),
        EraTheme::Creative => Box::new(LiquidBlobs),
        EraTheme::Conversational => Box::new(RisingParticles::new(seeded)),
        EraTheme::Multimodal => Box::new(WorldGrid::new(seeded)),
    }
}

/// Fallback when no era treatment is on screen.
pub fn paint_plain_backdrop(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::BLACK);
}

pub struct AmbientStage {
    active: Option<Box<dyn AmbientRenderer>>,
    outgoing: Option<Box<dyn AmbientRenderer>>,
    rng: StdRng,
}

impl AmbientStage {
    pub fn new(theme: EraTheme) -> Self {
        Self::with_rng(theme, StdRng::from_entropy())
    }

    pub fn with_rng(theme: EraTheme, mut rng: StdRng) -> Self {
        let active = renderer_for(theme, &mut rng);
        Self {
            active: Some(active),
            outgoing: None,
            rng,
        }
    }

    pub fn active_theme(&self) -> Option<EraTheme> {
        self.active.as_ref().map(|r| r.theme())
    }

    pub fn outgoing_theme(&self) -> Option<EraTheme> {
        self.outgoing.as_ref().map(|r| r.theme())
    }

    /// Reconciles the renderers with the fade state, reusing any renderer
    /// whose theme is still wanted so its animation continues seamlessly.
    pub fn sync(&mut self, fade: &CrossFade) {
        let want_active = fade.active_theme();
        let want_outgoing = fade.outgoing_theme();
        if self.active_theme() == Some(want_active) && self.outgoing_theme() == want_outgoing {
            return;
        }

        let mut pool: Vec<Box<dyn AmbientRenderer>> = Vec::with_capacity(2);
        pool.extend(self.active.take());
        pool.extend(self.outgoing.take());

        self.active = Some(self.take_or_build(&mut pool, want_active));
        let outgoing = match want_outgoing {
            Some(theme) => Some(self.take_or_build(&mut pool, theme)),
            None => None,
        };
        self.outgoing = outgoing;

        for retired in pool {
            tracing::debug!(theme = %retired.theme(), "ambient renderer released");
        }
    }

    fn take_or_build(
        &mut self,
        pool: &mut Vec<Box<dyn AmbientRenderer>>,
        theme: EraTheme,
    ) -> Box<dyn AmbientRenderer> {
        match pool.iter().position(|r| r.theme() == theme) {
            Some(i) => pool.swap_remove(i),
            None => {
                tracing::debug!(%theme, "ambient renderer started");
                renderer_for(theme, &mut self.rng)
            }
        }
    }

    pub fn step(&mut self, dt: f32, bounds: Rect) {
        for renderer in self.active.iter_mut().chain(self.outgoing.iter_mut()) {
            renderer.step(dt, bounds);
        }
    }

    /// Active treatment at full strength, the outgoing one on top at `outgoing_opacity`.
    pub fn paint(&self, painter: &Painter, rect: Rect, time: f64, outgoing_opacity: f32) {
        match &self.active {
            Some(active) => active.paint(painter, rect, time, 1.0),
            None => paint_plain_backdrop(painter, rect),
        }
        if let Some(outgoing) = &self.outgoing {
            if outgoing_opacity > 0.0 {
                outgoing.paint(painter, rect, time, outgoing_opacity);
            }
        }
    }
}
