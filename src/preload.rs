//! Fire-and-forget prefetch of event media.
//!
//! Requests go through egui's image loaders, which fetch and decode on their
//! own threads. The UI only polls; failures are logged and otherwise ignored.

use eframe::egui::{self, load::ImagePoll, load::SizeHint};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaStatus {
    Pending,
    Ready,
    Failed,
}

#[derive(Debug)]
pub struct MediaPreloader {
    entries: Vec<(String, MediaStatus)>,
}

impl MediaPreloader {
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entries: urls.into_iter().map(|url| (url.into(), MediaStatus::Pending)).collect(),
        }
    }

    /// Starts or advances every outstanding load. Cheap once everything resolved.
    pub fn poll(&mut self, ctx: &egui::Context) {
        for (url, status) in self.entries.iter_mut().filter(|(_, s)| *s == MediaStatus::Pending) {
            match ctx.try_load_image(url, SizeHint::default()) {
                Ok(ImagePoll::Ready { .. }) => {
                    tracing::debug!(%url, "media preloaded");
                    *status = MediaStatus::Ready;
                }
                Ok(ImagePoll::Pending { .. }) => {}
                Err(e) => {
                    tracing::debug!(%url, error = %e, "media preload failed");
                    *status = MediaStatus::Failed;
                }
            }
        }
    }

    pub fn is_finished(&self) -> bool {
        self.entries.iter().all(|(_, s)| *s != MediaStatus::Pending)
    }

    pub fn count(&self, status: MediaStatus) -> usize {
        self.entries.iter().filter(|(_, s)| *s == status).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_everything_pending() {
        let preloader =
            MediaPreloader::new(["https://example.com/a.jpg", "https://example.com/b.jpg"]);
        assert_eq!(preloader.count(MediaStatus::Pending), 2);
        assert!(!preloader.is_finished());
        assert_eq!(preloader.count(MediaStatus::Ready), 0);
    }

    #[test]
    fn load_errors_resolve_quietly() {
        // No image loaders are installed on a bare context, so every load fails.
        let ctx = egui::Context::default();
        let mut preloader = MediaPreloader::new(vec!["https://example.com/a.jpg".to_string()]);
        preloader.poll(&ctx);
        assert!(preloader.is_finished());
        assert_eq!(preloader.count(MediaStatus::Failed), 1);

        preloader.poll(&ctx);
        assert_eq!(preloader.count(MediaStatus::Failed), 1);
    }

    #[test]
    fn empty_preloader_is_finished() {
        let preloader = MediaPreloader::new(Vec::<String>::new());
        assert!(preloader.is_finished());
    }
}
