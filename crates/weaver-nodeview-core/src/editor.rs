//! Host editor interface.
//!
//! The transaction/state engine lives outside this crate. Node views only
//! need to read a little editor state, subscribe to two events and issue a
//! handful of document commands, which is what [`Editor`] captures.

use std::ops::Range;
use std::rc::Rc;

use tracing::trace;

use crate::dom::Dom;
use crate::model::Attrs;
use crate::types::{EditorEvent, ListenerId, Selection};

/// Listener for editor-level events. Receives the editor that fired it.
pub type EventHandler<E> = Rc<dyn Fn(&E)>;

/// Element type of an editor's DOM.
pub type ElementOf<E> = <<E as Editor>::Dom as Dom>::Element;

/// The editing engine as seen by a node view.
pub trait Editor: Sized + 'static {
    /// DOM backend the editor view renders into.
    type Dom: Dom;

    /// Native drag event type forwarded to [`Editor::start_node_drag`].
    type DragEvent: 'static;

    fn dom(&self) -> &Self::Dom;

    fn is_editable(&self) -> bool;

    fn selection(&self) -> Selection;

    /// Register `handler` for `event`.
    fn on(&self, event: EditorEvent, handler: EventHandler<Self>) -> ListenerId;

    /// Remove a listener registered with [`Editor::on`].
    fn off(&self, event: EditorEvent, id: ListenerId);

    /// Replace the attributes of the node at `pos`.
    fn set_node_attributes(&self, pos: usize, attrs: Attrs);

    fn delete_range(&self, range: Range<usize>);

    /// Select the node at `pos` and hand the drag to the engine.
    fn start_node_drag(&self, pos: usize, event: &Self::DragEvent);
}

/// An editor event listener that is removed when dropped.
pub struct Subscription<E: Editor> {
    editor: Rc<E>,
    event: EditorEvent,
    id: ListenerId,
}

impl<E: Editor> Subscription<E> {
    pub fn new(editor: &Rc<E>, event: EditorEvent, handler: EventHandler<E>) -> Self {
        let id = editor.on(event, handler);
        trace!(%event, ?id, "subscribed");
        Self {
            editor: editor.clone(),
            event,
            id,
        }
    }

    pub fn event(&self) -> EditorEvent {
        self.event
    }
}

impl<E: Editor> Drop for Subscription<E> {
    fn drop(&mut self) {
        trace!(event = %self.event, id = ?self.id, "unsubscribed");
        self.editor.off(self.event, self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestEditor;

    #[test]
    fn subscription_unregisters_on_drop() {
        let editor = TestEditor::new();
        let hits = Rc::new(std::cell::Cell::new(0));
        let hits_in = hits.clone();
        let sub = Subscription::new(
            &editor,
            EditorEvent::Update,
            Rc::new(move |_: &TestEditor| hits_in.set(hits_in.get() + 1)),
        );
        assert_eq!(sub.event(), EditorEvent::Update);
        assert_eq!(editor.listeners_for(EditorEvent::Update), 1);

        editor.emit(EditorEvent::Update);
        editor.emit(EditorEvent::SelectionUpdate);
        assert_eq!(hits.get(), 1);

        drop(sub);
        assert_eq!(editor.listener_count(), 0);
        editor.emit(EditorEvent::Update);
        assert_eq!(hits.get(), 1);
    }
}
