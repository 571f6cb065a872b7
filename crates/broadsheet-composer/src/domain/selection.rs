//! Single media selection.
//!
//! At most one embedded media element is selected at a time. Transitions are
//! pure: they return the next state together with the highlight changes the
//! editor must apply, always unmarking before marking, so a swap never shows
//! two highlighted elements.

use broadsheet_content::domain::rich_content::ElementId;

/// Current selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SelectionState {
    /// No media element is selected.
    #[default]
    Unselected,
    /// The given media element is selected.
    Selected(ElementId),
}

/// Input events the selection reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionInput {
    /// A click on a media element inside the editor.
    ClickMedia(ElementId),
    /// A click inside the editor that did not hit a media element.
    ClickElsewhere,
    /// The Escape key.
    Escape,
    /// The Delete key.
    Delete,
}

/// Changes the editor applies as part of a transition, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEffect {
    /// Highlight the element.
    Mark(ElementId),
    /// Remove the element's highlight.
    Unmark(ElementId),
    /// Remove one content unit at the cursor.
    DeleteAtCursor,
}

impl SelectionState {
    /// The selected element, if any.
    #[must_use]
    pub fn selected(self) -> Option<ElementId> {
        match self {
            Self::Unselected => None,
            Self::Selected(id) => Some(id),
        }
    }

    /// Computes the state after `input` and the effects to apply.
    #[must_use]
    pub fn transition(self, input: SelectionInput) -> (Self, Vec<SelectionEffect>) {
        use SelectionEffect::{DeleteAtCursor, Mark, Unmark};
        use SelectionInput::{ClickElsewhere, ClickMedia, Delete, Escape};

        match (self, input) {
            (Self::Unselected, ClickMedia(id)) => (Self::Selected(id), vec![Mark(id)]),
            (Self::Selected(current), ClickMedia(id)) if current == id => (self, Vec::new()),
            (Self::Selected(current), ClickMedia(id)) => {
                (Self::Selected(id), vec![Unmark(current), Mark(id)])
            }
            (Self::Selected(current), ClickElsewhere | Escape) => {
                (Self::Unselected, vec![Unmark(current)])
            }
            (Self::Selected(current), Delete) => {
                (Self::Unselected, vec![Unmark(current), DeleteAtCursor])
            }
            (Self::Unselected, ClickElsewhere | Escape | Delete) => (Self::Unselected, Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: u64) -> ElementId {
        ElementId::new(raw)
    }

    #[test]
    fn test_click_media_from_unselected_marks_it() {
        let (next, effects) = SelectionState::Unselected.transition(SelectionInput::ClickMedia(id(1)));

        assert_eq!(next, SelectionState::Selected(id(1)));
        assert_eq!(effects, vec![SelectionEffect::Mark(id(1))]);
    }

    #[test]
    fn test_click_other_media_swaps_unmark_first() {
        for a in 0..4 {
            for b in (0..4).filter(|b| *b != a) {
                // Act
                let (next, effects) =
                    SelectionState::Selected(id(a)).transition(SelectionInput::ClickMedia(id(b)));

                // Assert
                assert_eq!(next, SelectionState::Selected(id(b)));
                assert_eq!(
                    effects,
                    vec![SelectionEffect::Unmark(id(a)), SelectionEffect::Mark(id(b))]
                );
            }
        }
    }

    #[test]
    fn test_click_selected_media_again_is_a_no_op() {
        let state = SelectionState::Selected(id(3));

        let (next, effects) = state.transition(SelectionInput::ClickMedia(id(3)));

        assert_eq!(next, state);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_click_elsewhere_and_escape_unselect() {
        for input in [SelectionInput::ClickElsewhere, SelectionInput::Escape] {
            let (next, effects) = SelectionState::Selected(id(2)).transition(input);

            assert_eq!(next, SelectionState::Unselected);
            assert_eq!(effects, vec![SelectionEffect::Unmark(id(2))]);
        }
    }

    #[test]
    fn test_delete_removes_at_cursor_and_unselects() {
        let (next, effects) = SelectionState::Selected(id(2)).transition(SelectionInput::Delete);

        assert_eq!(next, SelectionState::Unselected);
        assert_eq!(
            effects,
            vec![SelectionEffect::Unmark(id(2)), SelectionEffect::DeleteAtCursor]
        );
    }

    #[test]
    fn test_inputs_other_than_media_clicks_do_nothing_while_unselected() {
        for input in [
            SelectionInput::ClickElsewhere,
            SelectionInput::Escape,
            SelectionInput::Delete,
        ] {
            let (next, effects) = SelectionState::Unselected.transition(input);

            assert_eq!(next, SelectionState::Unselected);
            assert!(effects.is_empty());
        }
    }
}
