//! Node view constructors for the editing engine.

use std::rc::Rc;

use crate::bridge::{NodeView, NodeViewBridge, NodeViewRendererProps};
use crate::editor::Editor;
use crate::error::NodeViewError;
use crate::options::NodeViewOptions;
use crate::renderer::Component;

/// Node view constructor registered with the engine for one node type.
pub type NodeViewConstructor<E> = Box<
    dyn Fn(NodeViewRendererProps<E>) -> Result<Box<dyn NodeView<<E as Editor>::Dom>>, NodeViewError>,
>;

/// Build a constructor rendering `component` for every node it is called with.
///
/// The constructor keeps no state between calls: each call produces an
/// independent [`NodeViewBridge`] configured with a copy of `options`.
pub fn node_view_renderer<E, C>(component: C, options: NodeViewOptions<E>) -> NodeViewConstructor<E>
where
    E: Editor,
    C: Component<E>,
{
    let component: Rc<dyn Component<E>> = Rc::new(component);
    Box::new(move |props| {
        let view = NodeViewBridge::new(component.as_ref(), props, options.clone())?;
        Ok(Box::new(view) as Box<dyn NodeView<E::Dom>>)
    })
}
