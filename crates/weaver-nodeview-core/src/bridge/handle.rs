//! Component-facing handle on a node view.

use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use crate::editor::Editor;
use crate::model::{Attrs, Node};

use super::Shared;

/// Position lookup and document commands for the node behind a node view.
///
/// Every call reads the node view's *current* node and position, so a
/// handle captured at mount time never acts on a stale node. Once the node
/// view is destroyed, or the engine reports no position for the node, the
/// commands do nothing.
pub struct NodeViewHandle<E: Editor> {
    shared: Weak<Shared<E>>,
}

impl<E: Editor> NodeViewHandle<E> {
    pub(super) fn new(shared: &Rc<Shared<E>>) -> Self {
        Self {
            shared: Rc::downgrade(shared),
        }
    }

    /// Current position of the node in the document.
    pub fn get_pos(&self) -> Option<usize> {
        self.shared.upgrade()?.pos()
    }

    /// The node view's current node.
    pub fn node(&self) -> Option<Node> {
        Some(self.shared.upgrade()?.node.borrow().clone())
    }

    /// Whether the node view is still alive.
    pub fn is_attached(&self) -> bool {
        self.shared.strong_count() > 0
    }

    /// Merge `patch` over the node's attributes and write them back.
    pub fn update_attributes(&self, patch: Attrs) {
        let Some((shared, pos)) = self.resolve("update_attributes") else {
            return;
        };
        let attrs = {
            let node = shared.node.borrow();
            let mut attrs = node.attrs().clone();
            attrs.extend(patch);
            attrs
        };
        debug!(pos, "updating node attributes");
        shared.editor.set_node_attributes(pos, attrs);
    }

    /// Remove the node from the document.
    pub fn delete_node(&self) {
        let Some((shared, pos)) = self.resolve("delete_node") else {
            return;
        };
        let size = shared.node.borrow().node_size();
        debug!(pos, size, "deleting node");
        shared.editor.delete_range(pos..pos + size);
    }

    pub(crate) fn drag_start(&self, event: &E::DragEvent) {
        let Some((shared, pos)) = self.resolve("drag_start") else {
            return;
        };
        shared.editor.start_node_drag(pos, event);
    }

    fn resolve(&self, op: &'static str) -> Option<(Rc<Shared<E>>, usize)> {
        let Some(shared) = self.shared.upgrade() else {
            warn!(op, "node view already destroyed");
            return None;
        };
        let Some(pos) = shared.pos() else {
            debug!(op, "node has no position");
            return None;
        };
        Some((shared, pos))
    }
}

impl<E: Editor> Clone for NodeViewHandle<E> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<E: Editor> fmt::Debug for NodeViewHandle<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeViewHandle")
            .field("attached", &self.is_attached())
            .finish()
    }
}
