//! Markdown codec for persisted document bodies.
//!
//! Bodies are stored as CommonMark. Each paragraph end maps to a
//! [`ContentUnit::Break`], each image to a media element. The corner rounding
//! attribute travels in the image title as `border-radius: <n>px`.

use std::fmt::Write;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use super::rich_content::{ContentUnit, MediaEmbed, RichContent};

const RADIUS_PREFIX: &str = "border-radius:";
const RADIUS_SUFFIX: &str = "px";

/// Parses a Markdown body into rich content.
#[must_use]
pub fn parse_markup(markup: &str) -> RichContent {
    let mut content = RichContent::new();
    let mut image_depth = 0usize;

    for event in Parser::new_ext(markup, Options::empty()) {
        match event {
            Event::Start(Tag::Image {
                dest_url, title, ..
            }) => {
                if image_depth == 0 {
                    content.push_media(&dest_url, parse_radius(&title));
                }
                image_depth += 1;
            }
            Event::End(TagEnd::Image) => {
                image_depth = image_depth.saturating_sub(1);
            }
            // Alt text of an image is not part of the body.
            _ if image_depth > 0 => {}
            Event::Text(text) | Event::Code(text) => {
                for ch in text.chars() {
                    if ch == '\n' {
                        content.push(ContentUnit::Break);
                    } else {
                        content.push(ContentUnit::Text(ch));
                    }
                }
            }
            Event::SoftBreak => content.push(ContentUnit::Text(' ')),
            Event::HardBreak
            | Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => {
                content.push(ContentUnit::Break);
            }
            _ => {}
        }
    }

    content
}

/// Renders rich content as a Markdown body.
///
/// Spaces and tabs at either end of a paragraph are written as character
/// references so the parser keeps them. Empty paragraphs do not survive a
/// render/parse round trip.
#[must_use]
pub fn render_markup(content: &RichContent) -> String {
    let mut out = String::new();
    let mut paragraphs = content
        .units()
        .split(|unit| matches!(unit, ContentUnit::Break))
        .peekable();
    while let Some(paragraph) = paragraphs.next() {
        push_paragraph(&mut out, paragraph);
        if paragraphs.peek().is_some() {
            out.push_str("\n\n");
        }
    }
    out
}

fn push_paragraph(out: &mut String, units: &[ContentUnit]) {
    let is_blank = |unit: &&ContentUnit| matches!(unit, ContentUnit::Text(' ' | '\t'));
    let leading = units.iter().take_while(is_blank).count();
    let trailing = units[leading..].iter().rev().take_while(is_blank).count();
    let trailing_start = units.len() - trailing;

    for (index, unit) in units.iter().enumerate() {
        match unit {
            ContentUnit::Text(ch) if index < leading || index >= trailing_start => {
                // Writing to a String cannot fail.
                let _ = write!(out, "&#{};", u32::from(*ch));
            }
            ContentUnit::Text(ch) => push_escaped(out, *ch),
            ContentUnit::Media(media) => push_image(out, media),
            ContentUnit::Break => {}
        }
    }
}

fn push_escaped(out: &mut String, ch: char) {
    if ch.is_ascii_punctuation() {
        out.push('\\');
    }
    out.push(ch);
}

fn push_image(out: &mut String, media: &MediaEmbed) {
    out.push_str("![](<");
    for ch in media.url.chars() {
        if matches!(ch, '<' | '>' | '\\') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push('>');
    if let Some(radius) = media.corner_radius_px {
        // Writing to a String cannot fail.
        let _ = write!(out, " \"{RADIUS_PREFIX} {radius}{RADIUS_SUFFIX}\"");
    }
    out.push(')');
}

fn parse_radius(title: &str) -> Option<u32> {
    title
        .trim()
        .strip_prefix(RADIUS_PREFIX)?
        .trim()
        .strip_suffix(RADIUS_SUFFIX)?
        .trim()
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::rich_content::ElementId;

    #[test]
    fn test_parse_paragraphs_end_with_breaks() {
        let content = parse_markup("Hello\n\nWorld\n");

        assert_eq!(content.plain_text(), "Hello\nWorld\n");
    }

    #[test]
    fn test_parse_image_becomes_media_unit_and_skips_alt_text() {
        // Act
        let content = parse_markup("Intro ![a cat](https://cdn.example/cat.png) outro\n");

        // Assert
        assert_eq!(content.plain_text(), "Intro  outro\n");
        let media: Vec<_> = content.media().collect();
        assert_eq!(media.len(), 1);
        assert_eq!(media[0].url, "https://cdn.example/cat.png");
        assert_eq!(media[0].corner_radius_px, None);
    }

    #[test]
    fn test_parse_reads_corner_radius_from_title() {
        let content = parse_markup("![](<https://cdn.example/a.png> \"border-radius: 16px\")");

        let media = content.media().next().unwrap();
        assert_eq!(media.corner_radius_px, Some(16));
    }

    #[test]
    fn test_parse_ignores_unrelated_title() {
        let content = parse_markup("![](https://cdn.example/a.png \"holiday\")");

        assert_eq!(content.media().next().unwrap().corner_radius_px, None);
    }

    #[test]
    fn test_render_escapes_markdown_punctuation() {
        let content = RichContent::from_text("*not bold* [x]");

        let markup = render_markup(&content);

        assert_eq!(markup, "\\*not bold\\* \\[x\\]");
        assert_eq!(parse_markup(&markup).plain_text(), "*not bold* [x]\n");
    }

    #[test]
    fn test_render_then_parse_preserves_media_order_and_attributes() {
        // Arrange
        let mut content = RichContent::from_text("Trip\n");
        content.insert_media(content.len(), "https://cdn.example/my photo.png");
        content.insert_break(content.len());
        content.insert_media(content.len(), "https://cdn.example/b.png");
        content.insert_break(content.len());
        for media in content.media_mut() {
            media.corner_radius_px = Some(16);
        }

        // Act
        let parsed = parse_markup(&render_markup(&content));

        // Assert
        assert_eq!(parsed, content);
        assert_eq!(parsed.position_of(ElementId::new(0)), Some(5));
    }

    #[test]
    fn test_edge_whitespace_survives_round_trip() {
        for text in ["Intro\n    x\n", "Intro\n  two\n", "tail  \nnext\n", "\tindented\n"] {
            // Arrange
            let content = RichContent::from_text(text);

            // Act
            let parsed = parse_markup(&render_markup(&content));

            // Assert
            assert_eq!(parsed.plain_text(), text);
            assert_eq!(parsed.len(), content.len());
        }
    }

    #[test]
    fn test_render_writes_edge_spaces_as_character_references() {
        let content = RichContent::from_text(" a b ");

        assert_eq!(render_markup(&content), "&#32;a b&#32;");
    }
}
