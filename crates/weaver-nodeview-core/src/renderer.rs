//! Component framework seam.
//!
//! A [`Component`] is anything that can render a node view into a DOM
//! element and hand back a live [`ComponentInstance`]. The framework behind
//! it (dioxus, a hand-written widget, a JS component through bindings) is
//! not this crate's concern; [`ComponentRenderer`] only marks the element it
//! renders into and owns the instance.

use tracing::trace;

use crate::context::ComponentContext;
use crate::dom::DomElement;
use crate::editor::{Editor, ElementOf};
use crate::error::ComponentError;
use crate::props::{NodeViewProps, PropsPatch};

/// A UI component usable as a node view.
///
/// The rendered output must place an element marked with
/// [`crate::dom::NODE_VIEW_WRAPPER_ATTR`] as the first child of `target`.
/// Components with editable content mark a descendant with
/// [`crate::dom::NODE_VIEW_CONTENT_ATTR`].
pub trait Component<E: Editor>: 'static {
    fn mount(
        &self,
        target: &ElementOf<E>,
        props: NodeViewProps<E>,
        context: ComponentContext,
    ) -> Result<Box<dyn ComponentInstance>, ComponentError>;
}

/// A mounted component.
pub trait ComponentInstance: 'static {
    /// Merge `patch` into the component's props; unspecified keys stay as they are.
    fn set_props(&mut self, patch: PropsPatch) -> Result<(), ComponentError>;

    /// Release the component's resources.
    fn destroy(self: Box<Self>) -> Result<(), ComponentError>;
}

/// Class added to every element a [`ComponentRenderer`] mounts into.
pub const NODE_VIEW_RENDERER_CLASS: &str = "node-view-renderer";

/// Owns one live component instance.
pub struct ComponentRenderer {
    instance: Box<dyn ComponentInstance>,
}

impl ComponentRenderer {
    /// Mark `target` and mount `component` into it.
    pub fn new<E: Editor>(
        component: &dyn Component<E>,
        target: &ElementOf<E>,
        props: NodeViewProps<E>,
        context: ComponentContext,
    ) -> Result<Self, ComponentError> {
        target.add_class(NODE_VIEW_RENDERER_CLASS)?;
        let instance = component.mount(target, props, context)?;
        Ok(Self { instance })
    }

    pub fn update_props(&mut self, patch: PropsPatch) -> Result<(), ComponentError> {
        trace!(?patch, "pushing props");
        self.instance.set_props(patch)
    }

    /// Destroy the component. Consumes the renderer so it happens once.
    pub fn destroy(self) -> Result<(), ComponentError> {
        self.instance.destroy()
    }
}
