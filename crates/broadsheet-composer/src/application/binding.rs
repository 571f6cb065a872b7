//! Wires an editor's media selection to an input surface.

use std::cell::RefCell;
use std::rc::Rc;

use broadsheet_core::subscription::Subscription;
use tracing::debug;

use crate::domain::editor::Editor;
use crate::domain::selection::SelectionInput;
use crate::domain::surface::{EditorSurface, Key, KeyEvent, PointerEvent, PointerTarget};

/// Exactly one pointer listener and one key listener driving an editor's
/// selection. Both are unregistered when the binding is dropped.
#[derive(Debug)]
pub struct SelectionBinding {
    _pointer: Subscription,
    _keys: Subscription,
}

impl SelectionBinding {
    /// Registers the selection listeners for `editor` on `surface`.
    #[must_use]
    pub fn attach(surface: &EditorSurface, editor: &Rc<RefCell<Editor>>) -> Self {
        let pointer_editor = Rc::clone(editor);
        let pointer = surface.on_root_pointer(move |event: &PointerEvent| {
            let input = match event.target {
                PointerTarget::Media(id) => SelectionInput::ClickMedia(id),
                PointerTarget::Content | PointerTarget::Outside => SelectionInput::ClickElsewhere,
            };
            apply(&pointer_editor, input);
        });

        let key_editor = Rc::clone(editor);
        let keys = surface.on_global_key(move |event: &KeyEvent| {
            let input = match event.key {
                Key::Escape => SelectionInput::Escape,
                Key::Delete => SelectionInput::Delete,
                Key::Other(_) => return,
            };
            apply(&key_editor, input);
        });

        Self {
            _pointer: pointer,
            _keys: keys,
        }
    }

    /// Unregisters both listeners now.
    pub fn detach(self) {}
}

fn apply(editor: &RefCell<Editor>, input: SelectionInput) {
    match editor.try_borrow_mut() {
        Ok(mut editor) => {
            let state = editor.handle(input);
            debug!(?input, ?state, "selection updated");
        }
        Err(_) => debug!(?input, "editor busy, selection input dropped"),
    }
}

#[cfg(test)]
mod tests {
    use broadsheet_content::domain::rich_content::{ElementId, RichContent};

    use super::*;
    use crate::domain::selection::SelectionState;

    fn mounted() -> (EditorSurface, Rc<RefCell<Editor>>, ElementId, ElementId) {
        let mut editor = Editor::new(RichContent::from_text("text"));
        editor.insert_embeds(&["https://cdn.example/a.png", "https://cdn.example/b.png"]);
        let ids: Vec<ElementId> = editor.content().media().map(|media| media.id).collect();
        (
            EditorSurface::new(),
            Rc::new(RefCell::new(editor)),
            ids[0],
            ids[1],
        )
    }

    fn click(surface: &EditorSurface, target: PointerTarget) {
        surface.dispatch_pointer(&PointerEvent { target });
    }

    fn press(surface: &EditorSurface, key: Key) {
        surface.dispatch_key(&KeyEvent { key });
    }

    #[test]
    fn test_clicks_and_keys_drive_selection() {
        // Arrange
        let (surface, editor, a, b) = mounted();
        let _binding = SelectionBinding::attach(&surface, &editor);

        // Act
        click(&surface, PointerTarget::Media(a));
        click(&surface, PointerTarget::Media(b));

        // Assert
        assert_eq!(editor.borrow().selection(), SelectionState::Selected(b));
        assert_eq!(editor.borrow().content().marked(), vec![b]);

        // Act
        press(&surface, Key::Escape);

        // Assert
        assert_eq!(editor.borrow().selection(), SelectionState::Unselected);
        assert!(editor.borrow().content().marked().is_empty());
    }

    #[test]
    fn test_delete_key_removes_selected_media() {
        // Arrange
        let (surface, editor, a, b) = mounted();
        let _binding = SelectionBinding::attach(&surface, &editor);
        click(&surface, PointerTarget::Media(b));

        // Act
        press(&surface, Key::Delete);

        // Assert
        let editor = editor.borrow();
        assert_eq!(editor.content().position_of(b), None);
        assert!(editor.content().position_of(a).is_some());
        assert_eq!(editor.selection(), SelectionState::Unselected);
    }

    #[test]
    fn test_click_outside_root_keeps_selection() {
        let (surface, editor, a, _) = mounted();
        let _binding = SelectionBinding::attach(&surface, &editor);
        click(&surface, PointerTarget::Media(a));

        click(&surface, PointerTarget::Outside);

        assert_eq!(editor.borrow().selection(), SelectionState::Selected(a));
    }

    #[test]
    fn test_other_keys_are_ignored() {
        let (surface, editor, a, _) = mounted();
        let _binding = SelectionBinding::attach(&surface, &editor);
        click(&surface, PointerTarget::Media(a));

        press(&surface, Key::Other('x'));

        assert_eq!(editor.borrow().selection(), SelectionState::Selected(a));
    }

    #[test]
    fn test_remounting_never_duplicates_listeners() {
        // Arrange
        let (surface, editor, _, _) = mounted();

        // Act
        for _ in 0..3 {
            let binding = SelectionBinding::attach(&surface, &editor);
            assert_eq!(surface.pointer_listener_count(), 1);
            assert_eq!(surface.key_listener_count(), 1);
            binding.detach();
        }

        // Assert
        assert_eq!(surface.pointer_listener_count(), 0);
        assert_eq!(surface.key_listener_count(), 0);
    }

    #[test]
    fn test_detached_binding_no_longer_reacts() {
        let (surface, editor, a, _) = mounted();
        SelectionBinding::attach(&surface, &editor).detach();

        click(&surface, PointerTarget::Media(a));

        assert_eq!(editor.borrow().selection(), SelectionState::Unselected);
    }
}
