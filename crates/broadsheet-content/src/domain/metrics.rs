//! Derived text metrics for list and detail views.

use super::rich_content::RichContent;

/// Characters of plain text shown in a preview.
pub const PREVIEW_CHAR_LIMIT: usize = 200;

/// Reading speed used for read time estimates.
pub const WORDS_PER_MINUTE: usize = 200;

const ELLIPSIS: &str = "...";

/// Display metrics derived from a document body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextMetrics {
    /// First [`PREVIEW_CHAR_LIMIT`] characters of plain text, with an
    /// ellipsis iff the text is longer.
    pub preview_text: String,
    /// Estimated minutes to read.
    pub read_time_minutes: u32,
    /// URL of the first media element.
    pub first_image_url: Option<String>,
}

impl TextMetrics {
    /// Computes the metrics of `content`.
    #[must_use]
    pub fn of(content: &RichContent) -> Self {
        let plain = content.plain_text();
        Self {
            preview_text: preview_text(&plain),
            read_time_minutes: read_time_minutes(&plain),
            first_image_url: content.first_media_url().map(str::to_owned),
        }
    }
}

/// Shortens `plain` to [`PREVIEW_CHAR_LIMIT`] characters, appending an
/// ellipsis iff anything was cut. Paragraph breaks read as spaces.
#[must_use]
pub fn preview_text(plain: &str) -> String {
    let flat: String = plain
        .chars()
        .map(|ch| if ch == '\n' { ' ' } else { ch })
        .collect();
    let flat = flat.trim_end();

    let mut preview: String = flat.chars().take(PREVIEW_CHAR_LIMIT).collect();
    if flat.chars().count() > PREVIEW_CHAR_LIMIT {
        preview.push_str(ELLIPSIS);
    }
    preview
}

/// Number of whitespace-separated words.
#[must_use]
pub fn word_count(plain: &str) -> usize {
    plain.split_whitespace().count()
}

/// Minutes to read `plain` at [`WORDS_PER_MINUTE`], rounded up.
#[must_use]
pub fn read_time_minutes(plain: &str) -> u32 {
    let minutes = word_count(plain).div_ceil(WORDS_PER_MINUTE);
    u32::try_from(minutes).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(count: usize) -> String {
        vec!["word"; count].join(" ")
    }

    #[test]
    fn test_preview_keeps_short_text_without_ellipsis() {
        let text = "a".repeat(PREVIEW_CHAR_LIMIT);

        assert_eq!(preview_text(&text), text);
    }

    #[test]
    fn test_preview_truncates_long_text_with_ellipsis() {
        let text = "b".repeat(PREVIEW_CHAR_LIMIT + 1);

        let preview = preview_text(&text);

        assert_eq!(preview, format!("{}...", "b".repeat(PREVIEW_CHAR_LIMIT)));
    }

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        let text = "글".repeat(PREVIEW_CHAR_LIMIT);

        assert_eq!(preview_text(&text), text);
    }

    #[test]
    fn test_preview_reads_breaks_as_spaces() {
        assert_eq!(preview_text("one\ntwo\n"), "one two");
    }

    #[test]
    fn test_read_time_rounds_up() {
        assert_eq!(read_time_minutes(&words(450)), 3);
        assert_eq!(read_time_minutes(&words(400)), 2);
        assert_eq!(read_time_minutes(&words(1)), 1);
        assert_eq!(read_time_minutes(""), 0);
    }

    #[test]
    fn test_metrics_of_content() {
        // Arrange
        let mut content = RichContent::from_text(&words(450));
        content.insert_media(0, "https://cdn.example/first.png");
        content.insert_media(3, "https://cdn.example/second.png");

        // Act
        let metrics = TextMetrics::of(&content);

        // Assert
        assert_eq!(metrics.read_time_minutes, 3);
        assert_eq!(
            metrics.first_image_url.as_deref(),
            Some("https://cdn.example/first.png")
        );
        assert!(metrics.preview_text.ends_with(ELLIPSIS));
        assert_eq!(
            metrics.preview_text.chars().count(),
            PREVIEW_CHAR_LIMIT + ELLIPSIS.len()
        );
    }
}
