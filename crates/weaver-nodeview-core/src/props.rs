//! Props handed to node view components.

use std::fmt;
use std::rc::Rc;

use crate::bridge::NodeViewHandle;
use crate::editor::Editor;
use crate::model::{DecorationSet, Extension, Node};

/// Full prop set a component receives when it mounts.
pub struct NodeViewProps<E: Editor> {
    pub editor: Rc<E>,
    pub node: Node,
    pub decorations: DecorationSet,
    pub selected: bool,
    pub is_editable: bool,
    pub extension: Extension,
    /// Position lookup and document commands for this node.
    pub handle: NodeViewHandle<E>,
}

impl<E: Editor> NodeViewProps<E> {
    /// Shallow merge: fields absent from `patch` are left untouched.
    pub fn merge(&mut self, patch: PropsPatch) {
        let PropsPatch {
            node,
            decorations,
            selected,
            is_editable,
        } = patch;
        if let Some(node) = node {
            self.node = node;
        }
        if let Some(decorations) = decorations {
            self.decorations = decorations;
        }
        if let Some(selected) = selected {
            self.selected = selected;
        }
        if let Some(is_editable) = is_editable {
            self.is_editable = is_editable;
        }
    }
}

impl<E: Editor> Clone for NodeViewProps<E> {
    fn clone(&self) -> Self {
        Self {
            editor: self.editor.clone(),
            node: self.node.clone(),
            decorations: self.decorations.clone(),
            selected: self.selected,
            is_editable: self.is_editable,
            extension: self.extension.clone(),
            handle: self.handle.clone(),
        }
    }
}

impl<E: Editor> fmt::Debug for NodeViewProps<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeViewProps")
            .field("node", &self.node)
            .field("decorations", &self.decorations)
            .field("selected", &self.selected)
            .field("is_editable", &self.is_editable)
            .field("extension", &self.extension.name)
            .finish_non_exhaustive()
    }
}

/// Partial prop update pushed into a live component.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropsPatch {
    pub node: Option<Node>,
    pub decorations: Option<DecorationSet>,
    pub selected: Option<bool>,
    pub is_editable: Option<bool>,
}

impl PropsPatch {
    pub fn selected(selected: bool) -> Self {
        Self {
            selected: Some(selected),
            ..Default::default()
        }
    }

    pub fn is_editable(is_editable: bool) -> Self {
        Self {
            is_editable: Some(is_editable),
            ..Default::default()
        }
    }

    pub fn node(node: Node, decorations: DecorationSet) -> Self {
        Self {
            node: Some(node),
            decorations: Some(decorations),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.node.is_none()
            && self.decorations.is_none()
            && self.selected.is_none()
            && self.is_editable.is_none()
    }
}
