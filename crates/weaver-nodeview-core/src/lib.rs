//! weaver-nodeview-core: component-backed node views without framework dependencies.
//!
//! A node view lets a UI component render one document node inside the
//! editor view. This crate provides:
//! - `Editor` and `Dom`/`DomElement` traits for the engine and DOM seams
//! - `Component` / `ComponentInstance` traits for the component framework seam
//! - `NodeViewBridge` - the node view driving one component for one node
//! - `node_view_renderer` - the constructor registered with the engine
//! - `capture_context` - ambient context propagation into node components
//! - `MemoryDom` - an in-memory DOM for native hosts and tests

pub mod bridge;
pub mod context;
pub mod dom;
pub mod editor;
pub mod error;
pub mod factory;
pub mod memory;
pub mod model;
pub mod options;
pub mod props;
pub mod renderer;
pub mod types;

#[cfg(test)]
pub(crate) mod testing;

pub use bridge::{GetPos, NodeView, NodeViewBridge, NodeViewHandle, NodeViewRendererProps};
pub use context::{
    CapturedContext, ComponentContext, ContextKey, DRAG_START_KEY, DragStartHandler,
    capture_context,
};
pub use dom::{
    Dom, DomElement, NODE_VIEW_CONTENT_ATTR, NODE_VIEW_WRAPPER_ATTR, mark_content, mark_wrapper,
};
pub use editor::{Editor, ElementOf, EventHandler, Subscription};
pub use error::{ComponentError, DomError, NodeViewError};
pub use factory::{NodeViewConstructor, node_view_renderer};
pub use memory::{MemoryDom, MemoryElement};
pub use model::{Attrs, Decoration, DecorationSet, Extension, Node, NodeType};
pub use options::{NodeViewOptions, UpdateContext, UpdateFn, ViewTags};
pub use props::{NodeViewProps, PropsPatch};
pub use renderer::{Component, ComponentInstance, ComponentRenderer, NODE_VIEW_RENDERER_CLASS};
pub use smol_str::SmolStr;
pub use types::{
    DomEvent, DomEventKind, EditorEvent, ListenerId, Mutation, MutationKind, Selection,
};
