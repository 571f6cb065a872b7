//! The host input surface the editor is mounted on.
//!
//! Pointer listeners are scoped to the editor root: events whose target lies
//! outside the root never reach them. Key listeners are global to the surface.
//! Every registration returns a [`Subscription`] that unregisters on drop.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use broadsheet_content::domain::rich_content::ElementId;
use broadsheet_core::subscription::Subscription;

/// What a pointer event hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// A media element inside the editor root.
    Media(ElementId),
    /// Anything else inside the editor root.
    Content,
    /// Something outside the editor root.
    Outside,
}

/// A click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// What was clicked.
    pub target: PointerTarget,
}

/// A key that was pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Escape.
    Escape,
    /// Delete.
    Delete,
    /// Any other key.
    Other(char),
}

/// A key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The pressed key.
    pub key: Key,
}

type Handler<E> = Rc<dyn Fn(&E)>;

struct Slots<E> {
    next_id: u64,
    handlers: Vec<(u64, Handler<E>)>,
}

impl<E> Default for Slots<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            handlers: Vec::new(),
        }
    }
}

#[derive(Default)]
struct Listeners {
    pointer: Slots<PointerEvent>,
    key: Slots<KeyEvent>,
}

/// Listener registry of one input surface. Cheap to clone; clones share
/// listeners.
#[derive(Clone, Default)]
pub struct EditorSurface {
    listeners: Rc<RefCell<Listeners>>,
}

impl EditorSurface {
    /// Creates a surface with no listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pointer listener on the editor root.
    pub fn on_root_pointer(&self, handler: impl Fn(&PointerEvent) + 'static) -> Subscription {
        self.register(pointer_slots, Rc::new(handler))
    }

    /// Registers a surface-wide key listener.
    pub fn on_global_key(&self, handler: impl Fn(&KeyEvent) + 'static) -> Subscription {
        self.register(key_slots, Rc::new(handler))
    }

    /// Delivers a pointer event to the root listeners, unless its target is
    /// outside the root.
    pub fn dispatch_pointer(&self, event: &PointerEvent) {
        if event.target == PointerTarget::Outside {
            return;
        }
        let handlers = snapshot(&self.listeners.borrow().pointer);
        for handler in handlers {
            handler(event);
        }
    }

    /// Delivers a key event to every key listener.
    pub fn dispatch_key(&self, event: &KeyEvent) {
        let handlers = snapshot(&self.listeners.borrow().key);
        for handler in handlers {
            handler(event);
        }
    }

    /// Number of registered pointer listeners.
    #[must_use]
    pub fn pointer_listener_count(&self) -> usize {
        self.listeners.borrow().pointer.handlers.len()
    }

    /// Number of registered key listeners.
    #[must_use]
    pub fn key_listener_count(&self) -> usize {
        self.listeners.borrow().key.handlers.len()
    }

    fn register<E: 'static>(
        &self,
        slots: fn(&mut Listeners) -> &mut Slots<E>,
        handler: Handler<E>,
    ) -> Subscription {
        let id = {
            let mut listeners = self.listeners.borrow_mut();
            let slots = slots(&mut *listeners);
            let id = slots.next_id;
            slots.next_id += 1;
            slots.handlers.push((id, handler));
            id
        };

        let listeners: Weak<RefCell<Listeners>> = Rc::downgrade(&self.listeners);
        Subscription::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                slots(&mut *listeners.borrow_mut())
                    .handlers
                    .retain(|(handler_id, _)| *handler_id != id);
            }
        })
    }
}

impl std::fmt::Debug for EditorSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorSurface")
            .field("pointer_listeners", &self.pointer_listener_count())
            .field("key_listeners", &self.key_listener_count())
            .finish()
    }
}

fn pointer_slots(listeners: &mut Listeners) -> &mut Slots<PointerEvent> {
    &mut listeners.pointer
}

fn key_slots(listeners: &mut Listeners) -> &mut Slots<KeyEvent> {
    &mut listeners.key
}

fn snapshot<E>(slots: &Slots<E>) -> Vec<Handler<E>> {
    slots
        .handlers
        .iter()
        .map(|(_, handler)| Rc::clone(handler))
        .collect()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn test_pointer_events_outside_root_are_not_delivered() {
        // Arrange
        let surface = EditorSurface::new();
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let _subscription = surface.on_root_pointer(move |_| counter.set(counter.get() + 1));

        // Act
        surface.dispatch_pointer(&PointerEvent {
            target: PointerTarget::Outside,
        });
        surface.dispatch_pointer(&PointerEvent {
            target: PointerTarget::Content,
        });

        // Assert
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_dropping_subscription_unregisters_only_that_listener() {
        // Arrange
        let surface = EditorSurface::new();
        let first = surface.on_global_key(|_| {});
        let _second = surface.on_global_key(|_| {});
        let _pointer = surface.on_root_pointer(|_| {});

        // Act
        drop(first);

        // Assert
        assert_eq!(surface.key_listener_count(), 1);
        assert_eq!(surface.pointer_listener_count(), 1);
    }

    #[test]
    fn test_subscription_outliving_surface_is_harmless() {
        let surface = EditorSurface::new();
        let subscription = surface.on_global_key(|_| {});

        drop(surface);

        subscription.cancel();
    }
}
