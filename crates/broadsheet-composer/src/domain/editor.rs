//! Editor state owned by one editing context.

use broadsheet_content::domain::embed::insert_embeds;
use broadsheet_content::domain::markup::parse_markup;
use broadsheet_content::domain::rich_content::RichContent;
use tracing::debug;

use super::selection::{SelectionEffect, SelectionInput, SelectionState};

/// Document content, cursor and media selection of one editor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Editor {
    content: RichContent,
    cursor: usize,
    selection: SelectionState,
}

impl Editor {
    /// An editor over `content` with the cursor at the end.
    #[must_use]
    pub fn new(content: RichContent) -> Self {
        let cursor = content.len();
        Self {
            content,
            cursor,
            selection: SelectionState::Unselected,
        }
    }

    /// An editor over a persisted Markdown body.
    #[must_use]
    pub fn from_markup(markup: &str) -> Self {
        Self::new(parse_markup(markup))
    }

    /// The document content.
    #[must_use]
    pub fn content(&self) -> &RichContent {
        &self.content
    }

    /// The cursor index.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The media selection.
    #[must_use]
    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    /// Moves the cursor, clamped to the end of the document.
    pub fn set_cursor(&mut self, index: usize) {
        self.cursor = index.min(self.content.len());
    }

    /// Types `text` at the cursor.
    pub fn type_text(&mut self, text: &str) {
        self.cursor = self.content.insert_text(self.cursor, text);
    }

    /// Embeds `urls`, in order, at the cursor and moves the cursor past the
    /// last embed.
    pub fn insert_embeds<S: AsRef<str>>(&mut self, urls: &[S]) -> usize {
        self.cursor = insert_embeds(&mut self.content, self.cursor, urls);
        self.cursor
    }

    /// Applies one selection input.
    ///
    /// A click on an element that is not in the document counts as a click
    /// elsewhere. A click that selects an element moves the cursor onto it.
    pub fn handle(&mut self, input: SelectionInput) -> SelectionState {
        let input = match input {
            SelectionInput::ClickMedia(id) if self.content.position_of(id).is_none() => {
                SelectionInput::ClickElsewhere
            }
            other => other,
        };

        let (next, effects) = self.selection.transition(input);
        for effect in effects {
            match effect {
                SelectionEffect::Unmark(id) => {
                    self.content.set_marked(id, false);
                }
                SelectionEffect::Mark(id) => {
                    self.content.set_marked(id, true);
                }
                SelectionEffect::DeleteAtCursor => {
                    let removed = self.content.delete(self.cursor, 1);
                    debug!(cursor = self.cursor, removed = removed.len(), "deleted at cursor");
                    self.set_cursor(self.cursor);
                }
            }
        }
        if let SelectionInput::ClickMedia(id) = input
            && let Some(position) = self.content.position_of(id)
        {
            self.cursor = position;
        }
        self.selection = next;
        next
    }
}

#[cfg(test)]
mod tests {
    use broadsheet_content::domain::rich_content::{ContentUnit, ElementId};

    use super::*;

    fn editor_with_two_images() -> (Editor, ElementId, ElementId) {
        let mut editor = Editor::new(RichContent::from_text("ab"));
        editor.set_cursor(1);
        editor.insert_embeds(&["https://cdn.example/a.png", "https://cdn.example/b.png"]);
        let ids: Vec<ElementId> = editor.content().media().map(|media| media.id).collect();
        (editor, ids[0], ids[1])
    }

    #[test]
    fn test_clicking_a_then_b_leaves_exactly_b_marked() {
        // Arrange
        let (mut editor, a, b) = editor_with_two_images();

        // Act
        editor.handle(SelectionInput::ClickMedia(a));
        editor.handle(SelectionInput::ClickMedia(b));

        // Assert
        assert_eq!(editor.selection(), SelectionState::Selected(b));
        assert_eq!(editor.content().marked(), vec![b]);
    }

    #[test]
    fn test_click_moves_cursor_onto_element() {
        let (mut editor, _, b) = editor_with_two_images();

        editor.handle(SelectionInput::ClickMedia(b));

        assert_eq!(editor.cursor(), 3);
    }

    #[test]
    fn test_delete_removes_selected_element() {
        // Arrange
        let (mut editor, a, b) = editor_with_two_images();
        editor.handle(SelectionInput::ClickMedia(a));

        // Act
        editor.handle(SelectionInput::Delete);

        // Assert
        assert_eq!(editor.selection(), SelectionState::Unselected);
        assert_eq!(editor.content().position_of(a), None);
        assert!(editor.content().position_of(b).is_some());
        assert!(editor.content().marked().is_empty());
    }

    #[test]
    fn test_escape_clears_highlight() {
        let (mut editor, a, _) = editor_with_two_images();
        editor.handle(SelectionInput::ClickMedia(a));

        editor.handle(SelectionInput::Escape);

        assert_eq!(editor.selection(), SelectionState::Unselected);
        assert!(editor.content().marked().is_empty());
    }

    #[test]
    fn test_click_on_unknown_element_counts_as_click_elsewhere() {
        let (mut editor, a, _) = editor_with_two_images();
        editor.handle(SelectionInput::ClickMedia(a));

        editor.handle(SelectionInput::ClickMedia(ElementId::new(99)));

        assert_eq!(editor.selection(), SelectionState::Unselected);
        assert!(editor.content().marked().is_empty());
    }

    #[test]
    fn test_insert_embeds_advances_cursor() {
        let (editor, _, _) = editor_with_two_images();

        assert_eq!(editor.cursor(), 5);
        assert_eq!(editor.content().units()[5], ContentUnit::Text('b'));
    }

    #[test]
    fn test_from_markup_places_cursor_at_end() {
        let editor = Editor::from_markup("Hello\n");

        assert_eq!(editor.cursor(), editor.content().len());
    }
}
