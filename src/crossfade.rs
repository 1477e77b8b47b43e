//! Timed cross-fade between two ambient themes.
//!
//! The incoming theme is shown at full strength immediately; the outgoing one
//! is layered on top and fades out over a fixed window. A change that arrives
//! mid-fade replaces the outgoing layer with whatever was active at that
//! moment and restarts the window, so at most one outgoing layer exists.

use std::time::{Duration, Instant};

use crate::anim;
use crate::timeline::EraTheme;

pub const DEFAULT_FADE: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FadeState {
    Stable(EraTheme),
    Transitioning {
        from: EraTheme,
        to: EraTheme,
        started: Instant,
    },
}

#[derive(Debug, Clone)]
pub struct CrossFade {
    state: FadeState,
    duration: Duration,
}

impl CrossFade {
    pub fn new(theme: EraTheme, duration: Duration) -> Self {
        Self {
            state: FadeState::Stable(theme),
            duration,
        }
    }

    pub fn state(&self) -> FadeState {
        self.state
    }

    /// Theme rendered at full strength underneath any fading layer.
    pub fn active_theme(&self) -> EraTheme {
        match self.state {
            FadeState::Stable(theme) => theme,
            FadeState::Transitioning { to, .. } => to,
        }
    }

    pub fn outgoing_theme(&self) -> Option<EraTheme> {
        match self.state {
            FadeState::Stable(_) => None,
            FadeState::Transitioning { from, .. } => Some(from),
        }
    }

    /// Feeds the theme of the currently selected event. Returns `true` if a fade started.
    pub fn observe(&mut self, theme: EraTheme, now: Instant) -> bool {
        let current = self.active_theme();
        if theme == current {
            return false;
        }

        if let FadeState::Transitioning { from, .. } = self.state {
            tracing::debug!(dropped = %from, "superseding in-flight theme fade");
        }
        tracing::info!(from = %current, to = %theme, "theme cross-fade started");

        self.state = FadeState::Transitioning {
            from: current,
            to: theme,
            started: now,
        };
        true
    }

    /// Clears the outgoing layer once its window has elapsed. Returns `true` on that edge.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.state {
            FadeState::Transitioning { to, started, .. }
                if now.saturating_duration_since(started) >= self.duration =>
            {
                self.state = FadeState::Stable(to);
                tracing::debug!(theme = %to, "theme cross-fade finished");
                true
            }
            _ => false,
        }
    }

    pub fn elapsed(&self, now: Instant) -> Option<Duration> {
        match self.state {
            FadeState::Stable(_) => None,
            FadeState::Transitioning { started, .. } => {
                Some(now.saturating_duration_since(started).min(self.duration))
            }
        }
    }

    /// Time until the outgoing layer must be dropped, for scheduling a single repaint.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.elapsed(now).map(|elapsed| self.duration - elapsed)
    }

    /// Opacity of the outgoing layer: 1 at the start of a fade, 0 at the end.
    pub fn outgoing_opacity(&self, now: Instant) -> f32 {
        let Some(elapsed) = self.elapsed(now) else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 0.0;
        }
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        1.0 - anim::ease_out_cubic(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FADE: Duration = Duration::from_millis(1000);

    #[test]
    fn same_theme_keeps_stable() {
        let now = Instant::now();
        let mut fade = CrossFade::new(EraTheme::Retro, FADE);
        assert!(!fade.observe(EraTheme::Retro, now));
        assert_eq!(fade.state(), FadeState::Stable(EraTheme::Retro));
        assert_eq!(fade.remaining(now), None);
    }

    #[test]
    fn change_shows_new_theme_immediately_and_fades_old() {
        let t0 = Instant::now();
        let mut fade = CrossFade::new(EraTheme::Retro, FADE);

        assert!(fade.observe(EraTheme::Neural, t0));
        assert_eq!(
            fade.state(),
            FadeState::Transitioning { from: EraTheme::Retro, to: EraTheme::Neural, started: t0 }
        );
        assert_eq!(fade.active_theme(), EraTheme::Neural);
        assert_eq!(fade.outgoing_theme(), Some(EraTheme::Retro));
        assert_eq!(fade.elapsed(t0), Some(Duration::ZERO));
        assert_eq!(fade.outgoing_opacity(t0), 1.0);
    }

    #[test]
    fn fade_ends_after_duration() {
        let t0 = Instant::now();
        let mut fade = CrossFade::new(EraTheme::Retro, FADE);
        fade.observe(EraTheme::Neural, t0);

        assert!(!fade.tick(t0 + Duration::from_millis(999)));
        assert_eq!(fade.outgoing_theme(), Some(EraTheme::Retro));
        assert_eq!(
            fade.remaining(t0 + Duration::from_millis(400)),
            Some(Duration::from_millis(600)),
        );

        assert!(fade.tick(t0 + FADE));
        assert_eq!(fade.state(), FadeState::Stable(EraTheme::Neural));
        assert_eq!(fade.outgoing_theme(), None);
        assert_eq!(fade.outgoing_opacity(t0 + FADE), 0.0);
        assert!(!fade.tick(t0 + FADE * 2));
    }

    #[test]
    fn opacity_decreases_over_the_window() {
        let t0 = Instant::now();
        let mut fade = CrossFade::new(EraTheme::Retro, FADE);
        fade.observe(EraTheme::Creative, t0);

        let early = fade.outgoing_opacity(t0 + Duration::from_millis(100));
        let late = fade.outgoing_opacity(t0 + Duration::from_millis(900));
        assert!(early > late);
        assert!(late > 0.0 && early < 1.0);
    }

    #[test]
    fn change_during_fade_replaces_outgoing_layer_and_restarts_timer() {
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_millis(400);
        let mut fade = CrossFade::new(EraTheme::Retro, FADE);
        fade.observe(EraTheme::Neural, t0);

        assert!(fade.observe(EraTheme::Transformer, t1));
        assert_eq!(
            fade.state(),
            FadeState::Transitioning {
                from: EraTheme::Neural,
                to: EraTheme::Transformer,
                started: t1,
            }
        );

        // The earlier deadline no longer applies.
        assert!(!fade.tick(t0 + FADE));
        assert_eq!(fade.outgoing_theme(), Some(EraTheme::Neural));
        assert!(fade.tick(t1 + FADE));
        assert_eq!(fade.state(), FadeState::Stable(EraTheme::Transformer));
    }

    #[test]
    fn returning_to_the_fading_theme_swaps_layers() {
        let t0 = Instant::now();
        let t1 = t0 + Duration::from_millis(200);
        let mut fade = CrossFade::new(EraTheme::Retro, FADE);
        fade.observe(EraTheme::Neural, t0);
        fade.observe(EraTheme::Retro, t1);

        assert_eq!(fade.active_theme(), EraTheme::Retro);
        assert_eq!(fade.outgoing_theme(), Some(EraTheme::Neural));
    }

    #[test]
    fn zero_duration_fade_is_invisible() {
        let t0 = Instant::now();
        let mut fade = CrossFade::new(EraTheme::Retro, Duration::ZERO);
        fade.observe(EraTheme::Multimodal, t0);
        assert_eq!(fade.outgoing_opacity(t0), 0.0);
        assert!(fade.tick(t0));
    }
}
