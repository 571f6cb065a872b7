//! Rich content model.
//!
//! A document body is a flat, ordered sequence of units. Every unit occupies
//! exactly one index position, so editor cursors and insertion offsets are
//! plain unit indices.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of an embedded media element within one document.
///
/// Ids are allocated sequentially per document, so two documents built from
/// identical inputs carry identical ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(u64);

impl ElementId {
    /// Wraps a raw element id.
    #[must_use]
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "media-{}", self.0)
    }
}

/// An inline reference to an uploaded media asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaEmbed {
    /// Element identity within the document.
    pub id: ElementId,
    /// Public URL of the asset.
    pub url: String,
    /// Corner rounding attribute, in pixels.
    pub corner_radius_px: Option<u32>,
    /// Editor highlight. Never persisted.
    marked: bool,
}

impl MediaEmbed {
    /// Returns whether the editor currently highlights this element.
    #[must_use]
    pub fn is_marked(&self) -> bool {
        self.marked
    }
}

/// One index position of a document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentUnit {
    /// A single text character.
    Text(char),
    /// A paragraph break.
    Break,
    /// An embedded media element.
    Media(MediaEmbed),
}

/// An ordered document body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RichContent {
    units: Vec<ContentUnit>,
    next_element_id: u64,
}

impl RichContent {
    /// Creates an empty body.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a body from plain text; every `\n` becomes a paragraph break.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let mut content = Self::new();
        content.insert_text(0, text);
        content
    }

    /// Number of units (index positions).
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Returns `true` if the body has no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// All units in document order.
    #[must_use]
    pub fn units(&self) -> &[ContentUnit] {
        &self.units
    }

    /// Inserts `text` at `index` (clamped to the end) and returns the index
    /// just past the inserted text.
    pub fn insert_text(&mut self, index: usize, text: &str) -> usize {
        let mut at = index.min(self.units.len());
        for ch in text.chars() {
            let unit = if ch == '\n' {
                ContentUnit::Break
            } else {
                ContentUnit::Text(ch)
            };
            self.units.insert(at, unit);
            at += 1;
        }
        at
    }

    /// Inserts a paragraph break at `index` (clamped to the end) and returns
    /// the position it landed on.
    pub fn insert_break(&mut self, index: usize) -> usize {
        let at = index.min(self.units.len());
        self.units.insert(at, ContentUnit::Break);
        at
    }

    /// Inserts a media element at `index` (clamped to the end) and returns its
    /// new id.
    pub fn insert_media(&mut self, index: usize, url: &str) -> ElementId {
        let at = index.min(self.units.len());
        let id = self.allocate_element_id();
        self.units.insert(
            at,
            ContentUnit::Media(MediaEmbed {
                id,
                url: url.to_owned(),
                corner_radius_px: None,
                marked: false,
            }),
        );
        id
    }

    /// Appends a media element carrying `corner_radius_px`.
    pub(crate) fn push_media(&mut self, url: &str, corner_radius_px: Option<u32>) -> ElementId {
        let id = self.insert_media(self.units.len(), url);
        if let Some(ContentUnit::Media(media)) = self.units.last_mut() {
            media.corner_radius_px = corner_radius_px;
        }
        id
    }

    /// Appends a raw unit.
    pub(crate) fn push(&mut self, unit: ContentUnit) {
        self.units.push(unit);
    }

    /// Removes up to `count` units starting at `index` and returns them.
    /// Out-of-range positions are ignored.
    pub fn delete(&mut self, index: usize, count: usize) -> Vec<ContentUnit> {
        let start = index.min(self.units.len());
        let end = index.saturating_add(count).min(self.units.len());
        self.units.drain(start..end).collect()
    }

    /// Media elements in document order.
    pub fn media(&self) -> impl Iterator<Item = &MediaEmbed> {
        self.units.iter().filter_map(|unit| match unit {
            ContentUnit::Media(media) => Some(media),
            _ => None,
        })
    }

    /// Mutable media elements in document order.
    pub fn media_mut(&mut self) -> impl Iterator<Item = &mut MediaEmbed> {
        self.units.iter_mut().filter_map(|unit| match unit {
            ContentUnit::Media(media) => Some(media),
            _ => None,
        })
    }

    /// Index of the media element `id`, if present.
    #[must_use]
    pub fn position_of(&self, id: ElementId) -> Option<usize> {
        self.units
            .iter()
            .position(|unit| matches!(unit, ContentUnit::Media(media) if media.id == id))
    }

    /// Sets or clears the editor highlight on `id`. Returns `false` if the
    /// element does not exist.
    pub fn set_marked(&mut self, id: ElementId, marked: bool) -> bool {
        match self.media_mut().find(|media| media.id == id) {
            Some(media) => {
                media.marked = marked;
                true
            }
            None => false,
        }
    }

    /// Ids of every highlighted element.
    #[must_use]
    pub fn marked(&self) -> Vec<ElementId> {
        self.media()
            .filter(|media| media.marked)
            .map(|media| media.id)
            .collect()
    }

    /// URL of the first media element, if any.
    #[must_use]
    pub fn first_media_url(&self) -> Option<&str> {
        self.media().next().map(|media| media.url.as_str())
    }

    /// Text content with a `\n` for every paragraph break. Media elements
    /// contribute nothing.
    #[must_use]
    pub fn plain_text(&self) -> String {
        self.units
            .iter()
            .filter_map(|unit| match unit {
                ContentUnit::Text(ch) => Some(*ch),
                ContentUnit::Break => Some('\n'),
                ContentUnit::Media(_) => None,
            })
            .collect()
    }

    fn allocate_element_id(&mut self) -> ElementId {
        let id = ElementId(self.next_element_id);
        self.next_element_id += 1;
        id
    }
}
