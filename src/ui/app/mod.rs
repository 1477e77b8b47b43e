use std::time::{Duration, Instant};

use eframe::egui::{self, pos2, Key, Rect};

use crate::ambient::AmbientStage;
use crate::anim::Tween;
use crate::carousel::Carousel;
use crate::config::AppConfig;
use crate::crossfade::CrossFade;
use crate::preload::{MediaPreloader, MediaStatus};
use crate::theme;
use crate::timeline::{Catalog, EventRecord};
use crate::ui::card::{self, CardMotion};
use crate::ui::header;
use crate::ui::navigation::{self, NavAction};

const HEADER_HEIGHT: f32 = 100.0;
const MAX_FRAME_STEP: f32 = 0.1;
const AMBIENT_FRAME: Duration = Duration::from_millis(16);

pub struct ChroniclesApp {
    pub theme: theme::Theme,
    catalog: Catalog,
    carousel: Carousel,
    fade: CrossFade,
    stage: AmbientStage,
    motion: CardMotion,
    progress: Tween<f32>,
    preloader: Option<MediaPreloader>,
}

impl ChroniclesApp {
    pub fn new(cc: &eframe::CreationContext<'_>, catalog: Catalog, config: &AppConfig) -> Self {
        let theme = theme::initial_theme();
        cc.egui_ctx.set_visuals(theme.visuals.clone());
        tracing::debug!(visuals = theme.name, "theme applied");

        let preloader = config.preload_media.then(|| {
            egui_extras::install_image_loaders(&cc.egui_ctx);
            MediaPreloader::new(catalog.media_urls())
        });
        Self::with_state(catalog, config, preloader)
    }

    fn with_state(catalog: Catalog, config: &AppConfig, preloader: Option<MediaPreloader>) -> Self {
        let now = Instant::now();
        let carousel = Carousel::new(catalog.len(), config.start_index);
        let start = catalog
            .get(carousel.active())
            .unwrap_or_else(|| catalog.first())
            .theme;
        tracing::info!(events = catalog.len(), start = carousel.active(), "timeline loaded");

        Self {
            theme: theme::initial_theme(),
            fade: CrossFade::new(start, config.crossfade()),
            stage: AmbientStage::new(start),
            motion: CardMotion::new(config.card_transition()),
            progress: Tween::new(carousel.progress(), config.crossfade(), now),
            carousel,
            catalog,
            preloader,
        }
    }

    pub fn active_event(&self) -> &EventRecord {
        self.catalog
            .get(self.carousel.active())
            .unwrap_or_else(|| self.catalog.first())
    }

    pub fn apply(&mut self, action: NavAction) {
        let from = self.carousel.active();
        if action.apply(&mut self.carousel) {
            let event = self.active_event();
            tracing::info!(
                ?action,
                from,
                to = self.carousel.active(),
                year = %event.display_year,
                "navigated"
            );
        }
    }

    fn poll_preloader(&mut self, ctx: &egui::Context) {
        let Some(preloader) = self.preloader.as_mut() else {
            return;
        };
        preloader.poll(ctx);
        if preloader.is_finished() {
            tracing::debug!(
                ready = preloader.count(MediaStatus::Ready),
                failed = preloader.count(MediaStatus::Failed),
                "media preload finished"
            );
            self.preloader = None;
        }
    }

    /// Keeps the cross-fade and the ambient renderers in step with the active event.
    fn sync_theme(&mut self, now: Instant) {
        let theme = self.active_event().theme;
        self.fade.observe(theme, now);
        self.fade.tick(now);
        self.stage.sync(&self.fade);
    }

    /// The progress bar glides over the same window as the background fade.
    fn sync_progress(&mut self, now: Instant) {
        self.progress.retarget(self.carousel.progress(), now);
    }

    fn show(&mut self, ctx: &egui::Context, now: Instant) {
        let len = self.carousel.len();
        if let Some(action) = ctx.input(|i| keyboard_action(|key| i.key_pressed(key), len)) {
            self.apply(action);
        }
        self.poll_preloader(ctx);
        self.sync_theme(now);
        self.sync_progress(now);

        let (time, dt) = ctx.input(|i| (i.time, i.stable_dt.min(MAX_FRAME_STEP)));
        let outgoing_opacity = self.fade.outgoing_opacity(now);
        let progress = self.progress.value(now);

        let catalog = &self.catalog;
        let carousel = &self.carousel;
        let stage = &mut self.stage;
        let motion = &mut self.motion;
        let event = catalog.get(carousel.active()).unwrap_or_else(|| catalog.first());

        let mut clicked = None;
        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                let screen = ui.max_rect();
                stage.step(dt, screen);
                stage.paint(ui.painter(), screen, time, outgoing_opacity);

                let header_rect = Rect::from_min_max(
                    screen.min,
                    pos2(screen.right(), screen.top() + HEADER_HEIGHT),
                );
                header::draw_header(ui, header_rect, event, time);

                let nav_top = screen.bottom() - navigation::height();
                let cards_rect = Rect::from_min_max(
                    pos2(screen.left(), header_rect.bottom()),
                    pos2(screen.right(), nav_top),
                );
                let nav_rect = Rect::from_min_max(pos2(screen.left(), nav_top), screen.max);

                if let Some(action) = card::draw_cards(
                    ui,
                    cards_rect,
                    catalog,
                    carousel,
                    motion,
                    time,
                    now,
                ) {
                    clicked = Some(action);
                }
                if let Some(action) = navigation::draw_navigation(
                    ui,
                    nav_rect,
                    catalog,
                    carousel,
                    progress,
                    time,
                ) {
                    clicked = Some(action);
                }
            });

        if let Some(action) = clicked {
            self.apply(action);
        }

        // One deadline for the end of the running fade, so the outgoing
        // layer is dropped on time even if frames are throttled.
        if let Some(remaining) = self.fade.remaining(now) {
            ctx.request_repaint_after(remaining.max(Duration::from_millis(1)));
        }
        if self.motion.is_settled(now) {
            ctx.request_repaint_after(AMBIENT_FRAME);
        } else {
            ctx.request_repaint();
        }
    }
}

/// Maps the navigation shortcuts onto actions. Digits past the catalog length are ignored.
fn keyboard_action(pressed: impl Fn(Key) -> bool, len: usize) -> Option<NavAction> {
    const DIGITS: [Key; 9] = [
        Key::Num1,
        Key::Num2,
        Key::Num3,
        Key::Num4,
        Key::Num5,
        Key::Num6,
        Key::Num7,
        Key::Num8,
        Key::Num9,
    ];

    if pressed(Key::ArrowLeft) {
        return Some(NavAction::Previous);
    }
    if pressed(Key::ArrowRight) {
        return Some(NavAction::Next);
    }
    if pressed(Key::Home) {
        return Some(NavAction::First);
    }
    if pressed(Key::End) {
        return Some(NavAction::Last);
    }
    DIGITS
        .iter()
        .take(len)
        .position(|key| pressed(*key))
        .map(NavAction::JumpTo)
}

impl eframe::App for ChroniclesApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(self.theme.visuals.clone());
        self.show(ctx, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::EraTheme;

    fn app() -> ChroniclesApp {
        let config = AppConfig {
            preload_media: false,
            ..AppConfig::default()
        };
        ChroniclesApp::with_state(Catalog::embedded().expect("embedded catalog"), &config, None)
    }

    #[test]
    fn start_index_is_clamped() {
        let config = AppConfig {
            start_index: 42,
            ..AppConfig::default()
        };
        let app = ChroniclesApp::with_state(
            Catalog::embedded().expect("embedded catalog"),
            &config,
            None,
        );
        assert_eq!(app.carousel.active(), app.catalog.len() - 1);
        assert_eq!(app.fade.active_theme(), app.catalog.last().theme);
    }

    #[test]
    fn navigation_starts_a_cross_fade() {
        let mut app = app();
        let t0 = Instant::now();
        assert_eq!(app.fade.active_theme(), EraTheme::Retro);

        app.apply(NavAction::Next);
        app.sync_theme(t0);
        assert_eq!(app.fade.active_theme(), EraTheme::Neural);
        assert_eq!(app.fade.outgoing_theme(), Some(EraTheme::Retro));
        assert_eq!(app.stage.outgoing_theme(), Some(EraTheme::Retro));

        app.sync_theme(t0 + Duration::from_millis(1000));
        assert_eq!(app.fade.outgoing_theme(), None);
        assert_eq!(app.stage.outgoing_theme(), None);
    }

    #[test]
    fn frames_render_and_keep_state() {
        let mut app = app();
        let ctx = egui::Context::default();
        for _ in 0..3 {
            let output = ctx.run(egui::RawInput::default(), |ctx| app.show(ctx, Instant::now()));
            assert!(!output.shapes.is_empty());
        }
        assert_eq!(app.carousel.active(), 0);
    }

    fn shortcut(key: Key, len: usize) -> Option<NavAction> {
        keyboard_action(|pressed| pressed == key, len)
    }

    #[test]
    fn arrows_and_home_end_navigate() {
        assert_eq!(shortcut(Key::ArrowLeft, 6), Some(NavAction::Previous));
        assert_eq!(shortcut(Key::ArrowRight, 6), Some(NavAction::Next));
        assert_eq!(shortcut(Key::Home, 6), Some(NavAction::First));
        assert_eq!(shortcut(Key::End, 6), Some(NavAction::Last));
        assert_eq!(shortcut(Key::Space, 6), None);
        assert_eq!(keyboard_action(|_| false, 6), None);
    }

    #[test]
    fn digits_jump_within_the_catalog_only() {
        assert_eq!(shortcut(Key::Num1, 6), Some(NavAction::JumpTo(0)));
        assert_eq!(shortcut(Key::Num6, 6), Some(NavAction::JumpTo(5)));
        assert_eq!(shortcut(Key::Num7, 6), None);
        assert_eq!(shortcut(Key::Num9, 6), None);
        assert_eq!(shortcut(Key::Num9, 9), Some(NavAction::JumpTo(8)));
    }

    #[test]
    fn progress_bar_uses_the_crossfade_window() {
        let config = AppConfig {
            crossfade_ms: 0,
            card_transition_ms: 60_000,
            preload_media: false,
            ..AppConfig::default()
        };
        let catalog = Catalog::embedded().expect("embedded catalog");
        let mut app = ChroniclesApp::with_state(catalog, &config, None);
        let now = Instant::now();

        app.apply(NavAction::Last);
        app.sync_progress(now);
        assert_eq!(app.progress.value(now), 1.0);
    }

    #[test]
    fn active_event_follows_the_carousel() {
        let mut app = app();
        app.apply(NavAction::Last);
        assert_eq!(app.active_event().id, app.catalog.last().id);
        app.apply(NavAction::JumpTo(2));
        assert_eq!(app.active_event().id, app.catalog.get(2).expect("entry").id);
    }
}
