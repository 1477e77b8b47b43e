//! Loading and validation of the embedded event catalog.

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use super::{parse_hex_color, EraTheme, EventRecord, Stat};

const EMBEDDED_TIMELINE: &str = include_str!("../../assets/timeline.json");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("timeline data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("timeline contains no events")]
    Empty,
    #[error("event id {0} appears more than once")]
    DuplicateId(u32),
    #[error("event id {id} follows id {previous}; events must be listed in ascending id order")]
    OutOfOrder { previous: u32, id: u32 },
    #[error("event {id} has an invalid accent color {color:?}")]
    BadAccent { id: u32, color: String },
    #[error("event {0} has no focus tags")]
    NoFocusTags(u32),
}

#[derive(Debug, Deserialize)]
struct RawStat {
    label: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct RawEvent {
    id: u32,
    year: String,
    title: String,
    subtitle: String,
    description: String,
    focus: Vec<String>,
    stats: Vec<RawStat>,
    media_url: String,
    theme: EraTheme,
    color: String,
    #[serde(default)]
    link: Option<String>,
}

impl TryFrom<RawEvent> for EventRecord {
    type Error = CatalogError;

    fn try_from(raw: RawEvent) -> Result<Self, Self::Error> {
        let accent = parse_hex_color(&raw.color).ok_or_else(|| CatalogError::BadAccent {
            id: raw.id,
            color: raw.color.clone(),
        })?;
        if raw.focus.is_empty() {
            return Err(CatalogError::NoFocusTags(raw.id));
        }

        Ok(EventRecord {
            id: raw.id,
            display_year: raw.year,
            title: raw.title,
            subtitle: raw.subtitle,
            description: raw.description,
            focus_tags: raw.focus,
            stats: raw
                .stats
                .into_iter()
                .map(|s| Stat { label: s.label, value: s.value })
                .collect(),
            media_url: raw.media_url,
            theme: raw.theme,
            accent,
            link: raw.link,
        })
    }
}

/// Ordered, non-empty list of events. The order is the cyclic navigation order.
#[derive(Debug, Clone)]
pub struct Catalog {
    events: Vec<EventRecord>,
}

impl Catalog {
    /// Loads the timeline compiled into the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_TIMELINE)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawEvent> = serde_json::from_str(json)?;
        let events = raw
            .into_iter()
            .map(EventRecord::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(events)
    }

    pub fn new(events: Vec<EventRecord>) -> Result<Self, CatalogError> {
        if events.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(events.len());
        let mut previous: Option<u32> = None;
        for event in &events {
            if !seen.insert(event.id) {
                return Err(CatalogError::DuplicateId(event.id));
            }
            if let Some(previous) = previous {
                if event.id < previous {
                    return Err(CatalogError::OutOfOrder { previous, id: event.id });
                }
            }
            previous = Some(event.id);
        }

        Ok(Self { events })
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn get(&self, index: usize) -> Option<&EventRecord> {
        self.events.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventRecord> {
        self.events.iter()
    }

    pub fn first(&self) -> &EventRecord {
        &self.events[0]
    }

    pub fn last(&self) -> &EventRecord {
        &self.events[self.events.len() - 1]
    }

    /// Each distinct media URL once, in catalog order.
    pub fn media_urls(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.iter()
            .map(|e| e.media_url.as_str())
            .filter(|url| !url.is_empty() && seen.insert(*url))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event_json(id: u32, theme: &str, color: &str) -> String {
        format!(
            r#"{{"id":{id},"year":"20{id:02}","title":"T{id}","subtitle":"S","description":"D",
                "focus":["Tag{id}","Other"],"stats":[{{"label":"L","value":"V"}}],
                "media_url":"https://example.com/{id}.jpg","theme":"{theme}","color":"{color}"}}"#
        )
    }

    #[test]
    fn embedded_catalog_loads_all_six_eras_in_order() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.len(), 6);

        let themes: Vec<EraTheme> = catalog.iter().map(|e| e.theme).collect();
        assert_eq!(themes, EraTheme::ALL.to_vec());

        let ids: Vec<u32> = catalog.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4, 5]);
        assert_eq!(catalog.first().display_year, "1950 - 2010");
        assert_eq!(catalog.last().display_year, "2024+");
        assert_eq!(catalog.get(0).unwrap().primary_tag(), "Symbolic AI");
    }

    #[test]
    fn embedded_catalog_has_distinct_media_urls() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.media_urls().len(), 6);
    }

    #[test]
    fn rejects_empty_catalog() {
        assert!(matches!(Catalog::from_json("[]"), Err(CatalogError::Empty)));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let json = format!(
            "[{},{}]",
            event_json(1, "RETRO", "#10b981"),
            event_json(1, "NEURAL", "#f43f5e"),
        );
        assert!(matches!(Catalog::from_json(&json), Err(CatalogError::DuplicateId(1))));
    }

    #[test]
    fn rejects_descending_ids() {
        let json = format!(
            "[{},{}]",
            event_json(2, "RETRO", "#10b981"),
            event_json(1, "NEURAL", "#f43f5e"),
        );
        assert!(matches!(
            Catalog::from_json(&json),
            Err(CatalogError::OutOfOrder { previous: 2, id: 1 })
        ));
    }

    #[test]
    fn rejects_bad_accent_color() {
        let json = format!("[{}]", event_json(0, "RETRO", "green"));
        match Catalog::from_json(&json) {
            Err(CatalogError::BadAccent { id, color }) => {
                assert_eq!(id, 0);
                assert_eq!(color, "green");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_theme() {
        let json = format!("[{}]", event_json(0, "VAPORWAVE", "#10b981"));
        assert!(matches!(Catalog::from_json(&json), Err(CatalogError::Parse(_))));
    }

    #[test]
    fn rejects_event_without_focus_tags() {
        let json = r##"[{"id":0,"year":"1","title":"t","subtitle":"s","description":"d",
            "focus":[],"stats":[],"media_url":"","theme":"RETRO","color":"#000000"}]"##;
        assert!(matches!(Catalog::from_json(json), Err(CatalogError::NoFocusTags(0))));
    }

    #[test]
    fn optional_link_is_carried() {
        let json = r##"[{"id":0,"year":"1","title":"t","subtitle":"s","description":"d",
            "focus":["a"],"stats":[],"media_url":"","theme":"RETRO","color":"#000000",
            "link":"https://example.com"}]"##;
        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.first().link.as_deref(), Some("https://example.com"));
        assert!(catalog.media_urls().is_empty());
    }
}
