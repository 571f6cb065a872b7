//! Media embed insertion.

use tracing::debug;

use super::rich_content::RichContent;

/// Corner rounding applied to every embedded media element, in pixels.
pub const EMBED_CORNER_RADIUS_PX: u32 = 16;

/// Splices media embeds into `content` at `cursor`, in the given order.
///
/// Each URL becomes a media unit followed by a paragraph break, and the cursor
/// advances by two per URL. A cursor past the end is clamped to the end. Once
/// all embeds are in, every media element in the document receives the
/// standard corner rounding. Returns the cursor just past the last inserted
/// break.
///
/// `urls` must already be in the order the files were selected.
pub fn insert_embeds<S: AsRef<str>>(content: &mut RichContent, cursor: usize, urls: &[S]) -> usize {
    let mut index = cursor.min(content.len());
    for url in urls {
        content.insert_media(index, url.as_ref());
        content.insert_break(index + 1);
        index += 2;
    }
    round_media_corners(content);
    debug!(embeds = urls.len(), cursor = index, "inserted media embeds");
    index
}

/// Value-returning form of [`insert_embeds`].
#[must_use]
pub fn with_embeds<S: AsRef<str>>(
    mut content: RichContent,
    cursor: usize,
    urls: &[S],
) -> (RichContent, usize) {
    let cursor = insert_embeds(&mut content, cursor, urls);
    (content, cursor)
}

/// Applies the standard corner rounding to every media element. Idempotent.
pub fn round_media_corners(content: &mut RichContent) {
    for media in content.media_mut() {
        media.corner_radius_px = Some(EMBED_CORNER_RADIUS_PX);
    }
}
