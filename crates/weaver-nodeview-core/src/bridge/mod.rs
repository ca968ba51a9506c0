//! Node view bridge.
//!
//! [`NodeViewBridge`] binds one document node to one component. It creates
//! the DOM the editing engine splices into its view, keeps the component's
//! props in sync with the editor, and tears the component down when the
//! engine destroys the view.
//!
//! # Lifecycle
//!
//! - construction mounts the component and subscribes to the editor's
//!   `selectionUpdate` and `update` events
//! - `update`, `select_node`, `deselect_node` and the event listeners push
//!   prop patches while mounted
//! - `destroy` consumes the bridge: component destroyed, both listeners
//!   released, content element dropped
//!
//! # DOM contract
//!
//! The component must render an element marked with
//! [`NODE_VIEW_WRAPPER_ATTR`] as the first child of the root. This is only
//! checked when the engine first asks for [`NodeView::dom`]. Components with
//! editable content mark a descendant with [`NODE_VIEW_CONTENT_ATTR`]; the
//! content element is appended there.

mod handle;


use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use smol_str::SmolStr;
use tracing::{debug, debug_span, error, trace};

use crate::context::{DRAG_START_KEY, DragStartHandler};
use crate::dom::{
    Dom, DomElement, NODE_VIEW_CONTENT_ATTR, NODE_VIEW_WRAPPER_ATTR, is_input_tag,
};
use crate::editor::{Editor, ElementOf, EventHandler, Subscription};
use crate::error::{ComponentError, NodeViewError};
use crate::model::{DecorationSet, Extension, Node};
use crate::options::{NodeViewOptions, UpdateContext};
use crate::props::{NodeViewProps, PropsPatch};
use crate::renderer::{Component, ComponentRenderer};
use crate::types::{DomEvent, DomEventKind, EditorEvent, Mutation, MutationKind};

pub use handle::NodeViewHandle;

/// Position accessor supplied by the engine. `None` once the node is detached.
pub type GetPos = Rc<dyn Fn() -> Option<usize>>;

/// What the engine passes when it asks for a node view.
pub struct NodeViewRendererProps<E: Editor> {
    pub editor: Rc<E>,
    pub node: Node,
    pub decorations: DecorationSet,
    pub get_pos: GetPos,
    pub extension: Extension,
}

/// Node view capabilities the editing engine drives.
pub trait NodeView<D: Dom> {
    /// Root element spliced into the editor view.
    fn dom(&self) -> Result<D::Element, NodeViewError>;

    /// Element the engine renders the node's content into. `None` for leaves.
    fn content_dom(&self) -> Option<D::Element>;

    /// Offer a new node/decorations pair. `false` asks the engine to rebuild
    /// the view instead.
    fn update(&mut self, node: &Node, decorations: &DecorationSet) -> Result<bool, NodeViewError>;

    fn select_node(&self) -> Result<(), NodeViewError>;

    fn deselect_node(&self) -> Result<(), NodeViewError>;

    /// Whether the engine should leave `event` to the node view.
    fn stop_event(&self, event: &DomEvent<D::Element>) -> bool;

    /// Whether the engine should ignore `mutation` rather than re-read the DOM.
    fn ignore_mutation(&self, mutation: &Mutation<D::Element>) -> bool;

    fn destroy(self: Box<Self>) -> Result<(), NodeViewError>;
}

/// State reachable from listeners and handles.
pub(crate) struct Shared<E: Editor> {
    editor: Rc<E>,
    get_pos: GetPos,
    node: RefCell<Node>,
    decorations: RefCell<DecorationSet>,
    is_editable: Cell<bool>,
    root: ElementOf<E>,
    content_dom: RefCell<Option<ElementOf<E>>>,
    renderer: RefCell<Option<ComponentRenderer>>,
    pending: RefCell<VecDeque<PropsPatch>>,
}

impl<E: Editor> Shared<E> {
    fn pos(&self) -> Option<usize> {
        (self.get_pos)()
    }

    /// Deliver `patch` to the component.
    ///
    /// Patches raised while the component is still handling an earlier one
    /// (it fired an editor event from `set_props`) are queued and delivered
    /// in order once that call returns.
    fn push(&self, patch: PropsPatch) -> Result<(), ComponentError> {
        let Ok(mut renderer) = self.renderer.try_borrow_mut() else {
            trace!(?patch, "component busy, queueing props");
            self.pending.borrow_mut().push_back(patch);
            return Ok(());
        };
        let Some(renderer) = renderer.as_mut() else {
            return Ok(());
        };
        renderer.update_props(patch)?;
        loop {
            let Some(next) = self.pending.borrow_mut().pop_front() else {
                return Ok(());
            };
            renderer.update_props(next)?;
        }
    }

    fn on_selection_update(&self, editor: &E) -> Result<(), ComponentError> {
        let size = self.node.borrow().node_size();
        let selection = editor.selection();
        let selected = self.pos().is_some_and(|pos| selection.covers(pos, size));
        self.push(PropsPatch::selected(selected))
    }

    fn on_update(&self, editor: &E) -> Result<(), ComponentError> {
        let is_editable = editor.is_editable();
        if is_editable == self.is_editable.get() {
            return Ok(());
        }
        self.push(PropsPatch::is_editable(is_editable))?;
        self.is_editable.set(is_editable);
        Ok(())
    }

    fn attach_content_dom(&self) -> Result<(), NodeViewError> {
        let Some(content) = self.content_dom.borrow().clone() else {
            return Ok(());
        };
        let Some(slot) = self.root.query_attribute(NODE_VIEW_CONTENT_ATTR)? else {
            trace!("component has no content slot");
            return Ok(());
        };
        if !slot.contains(&content) {
            slot.append_child(&content)?;
        }
        Ok(())
    }
}

/// The two editor listeners of a node view, released together on drop.
struct Subscriptions<E: Editor> {
    _selection_update: Subscription<E>,
    _update: Subscription<E>,
}

impl<E: Editor> Subscriptions<E> {
    fn acquire(shared: &Rc<Shared<E>>) -> Self {
        let weak = Rc::downgrade(shared);
        let on_selection: EventHandler<E> = Rc::new(move |editor: &E| {
            let Some(shared) = weak.upgrade() else { return };
            if let Err(error) = shared.on_selection_update(editor) {
                error!(%error, "failed to push selection state");
            }
        });

        let weak = Rc::downgrade(shared);
        let on_update: EventHandler<E> = Rc::new(move |editor: &E| {
            let Some(shared) = weak.upgrade() else { return };
            if let Err(error) = shared.on_update(editor) {
                error!(%error, "failed to push editable state");
            }
        });

        Self {
            _selection_update: Subscription::new(
                &shared.editor,
                EditorEvent::SelectionUpdate,
                on_selection,
            ),
            _update: Subscription::new(&shared.editor, EditorEvent::Update, on_update),
        }
    }
}

/// Node view rendering a [`Component`].
pub struct NodeViewBridge<E: Editor> {
    shared: Rc<Shared<E>>,
    options: NodeViewOptions<E>,
    subscriptions: Subscriptions<E>,
}

fn default_tag(node: &Node) -> &'static str {
    if node.is_inline() { "span" } else { "div" }
}

impl<E: Editor> NodeViewBridge<E> {
    /// Build the DOM, subscribe to the editor and mount `component`.
    pub fn new(
        component: &dyn Component<E>,
        props: NodeViewRendererProps<E>,
        options: NodeViewOptions<E>,
    ) -> Result<Self, NodeViewError> {
        let NodeViewRendererProps {
            editor,
            node,
            decorations,
            get_pos,
            extension,
        } = props;

        let span = debug_span!("node_view", node_type = %node.type_name());
        let _guard = span.enter();

        let is_editable = editor.is_editable();
        let dom = editor.dom();

        let content_dom = if node.is_leaf() {
            None
        } else {
            let tag = options
                .tags
                .content_as
                .as_deref()
                .unwrap_or(default_tag(&node));
            let content = dom.create_element(tag)?;
            // Text inside the content element otherwise loses the editor's
            // white-space handling in some browsers.
            content.set_style("white-space", "inherit")?;
            Some(content)
        };

        let root_tag = options.tags.as_tag.as_deref().unwrap_or(default_tag(&node));
        let root = dom.create_element(root_tag)?;
        root.add_class(&format!("node-{}", node.type_name()))?;

        let shared = Rc::new(Shared {
            editor: editor.clone(),
            get_pos,
            node: RefCell::new(node.clone()),
            decorations: RefCell::new(decorations.clone()),
            is_editable: Cell::new(is_editable),
            root: root.clone(),
            content_dom: RefCell::new(content_dom),
            renderer: RefCell::new(None),
            pending: RefCell::new(VecDeque::new()),
        });
        let handle = NodeViewHandle::new(&shared);

        let mut context = options.context.fork();
        let drag_handle = handle.clone();
        context.insert(
            DRAG_START_KEY,
            DragStartHandler::<E>::new(move |event| drag_handle.drag_start(event)),
        );

        let subscriptions = Subscriptions::acquire(&shared);

        let props = NodeViewProps {
            editor,
            node,
            decorations,
            selected: false,
            is_editable,
            extension,
            handle,
        };
        let renderer = ComponentRenderer::new(component, &root, props, context)?;
        *shared.renderer.borrow_mut() = Some(renderer);

        if let Err(error) = shared.attach_content_dom() {
            let renderer = shared.renderer.borrow_mut().take();
            if let Some(Err(destroy_error)) = renderer.map(ComponentRenderer::destroy) {
                error!(%destroy_error, "failed to destroy component after mount failure");
            }
            return Err(error);
        }

        debug!("mounted");
        Ok(Self {
            shared,
            options,
            subscriptions,
        })
    }

    /// A handle on this node view, as given to the component.
    pub fn handle(&self) -> NodeViewHandle<E> {
        NodeViewHandle::new(&self.shared)
    }

    pub fn node(&self) -> Node {
        self.shared.node.borrow().clone()
    }

    pub fn decorations(&self) -> DecorationSet {
        self.shared.decorations.borrow().clone()
    }

    /// Editability as last pushed to the component.
    pub fn is_editable(&self) -> bool {
        self.shared.is_editable.get()
    }

    fn type_name(&self) -> SmolStr {
        SmolStr::new(self.shared.node.borrow().type_name())
    }

    fn adopt(&self, node: &Node, decorations: &DecorationSet) -> (Node, DecorationSet) {
        let old_node = self.shared.node.replace(node.clone());
        let old_decorations = self.shared.decorations.replace(decorations.clone());
        (old_node, old_decorations)
    }
}

impl<E: Editor> NodeView<E::Dom> for NodeViewBridge<E> {
    fn dom(&self) -> Result<ElementOf<E>, NodeViewError> {
        let root = &self.shared.root;
        let has_wrapper = root
            .first_element_child()
            .is_some_and(|child| child.has_attribute(NODE_VIEW_WRAPPER_ATTR));
        if !has_wrapper {
            return Err(NodeViewError::MissingWrapper {
                node_type: self.type_name(),
            });
        }
        Ok(root.clone())
    }

    fn content_dom(&self) -> Option<ElementOf<E>> {
        if self.shared.node.borrow().is_leaf() {
            return None;
        }
        self.shared.content_dom.borrow().clone()
    }

    fn update(&mut self, node: &Node, decorations: &DecorationSet) -> Result<bool, NodeViewError> {
        if let Some(predicate) = self.options.update.clone() {
            let (old_node, old_decorations) = self.adopt(node, decorations);
            let shared = &self.shared;
            let update_props = || shared.push(PropsPatch::node(node.clone(), decorations.clone()));
            return Ok(predicate(UpdateContext {
                old_node: &old_node,
                old_decorations: &old_decorations,
                new_node: node,
                new_decorations: decorations,
                update_props: &update_props,
            }));
        }

        if self.shared.node.borrow().node_type() != node.node_type() {
            debug!(
                from = %self.type_name(),
                to = %node.type_name(),
                "node type changed, rejecting update"
            );
            return Ok(false);
        }

        let unchanged = self.shared.node.borrow().ptr_eq(node)
            && self.shared.decorations.borrow().ptr_eq(decorations);
        if unchanged {
            return Ok(true);
        }

        self.adopt(node, decorations);
        self.shared
            .push(PropsPatch::node(node.clone(), decorations.clone()))?;
        Ok(true)
    }

    fn select_node(&self) -> Result<(), NodeViewError> {
        Ok(self.shared.push(PropsPatch::selected(true))?)
    }

    fn deselect_node(&self) -> Result<(), NodeViewError> {
        Ok(self.shared.push(PropsPatch::selected(false))?)
    }

    fn stop_event(&self, event: &DomEvent<ElementOf<E>>) -> bool {
        if let Some(stop_event) = &self.options.stop_event {
            return stop_event(event);
        }

        let target = &event.target;
        let in_content = self
            .shared
            .content_dom
            .borrow()
            .as_ref()
            .is_some_and(|content| content.contains(target));
        if !self.shared.root.contains(target) || in_content {
            return false;
        }

        let kind = &event.kind;
        let is_drop = *kind == DomEventKind::Drop;
        let is_input = is_input_tag(&target.tag_name()) || target.is_content_editable();
        if is_input && !is_drop && !kind.is_drag() {
            return true;
        }

        let selectable = self.shared.node.borrow().node_type().is_selectable();
        let is_click = *kind == DomEventKind::MouseDown;
        if kind.is_drag() || is_drop || kind.is_clipboard() || (is_click && selectable) {
            return false;
        }
        true
    }

    fn ignore_mutation(&self, mutation: &Mutation<ElementOf<E>>) -> bool {
        if let Some(ignore_mutation) = &self.options.ignore_mutation {
            return ignore_mutation(mutation);
        }

        let Some(content) = self.shared.content_dom.borrow().clone() else {
            return true;
        };
        if self.shared.node.borrow().is_atom() {
            return true;
        }
        if mutation.kind == MutationKind::Selection {
            return false;
        }
        if mutation.target == content && mutation.kind == MutationKind::Attributes {
            return true;
        }
        !content.contains(&mutation.target)
    }

    fn destroy(self: Box<Self>) -> Result<(), NodeViewError> {
        let type_name = self.type_name();
        let Self {
            shared,
            subscriptions,
            ..
        } = *self;

        let renderer = shared.renderer.borrow_mut().take();
        let result = match renderer {
            Some(renderer) => renderer.destroy(),
            None => Ok(()),
        };
        drop(subscriptions);
        shared.content_dom.replace(None);

        debug!(node_type = %type_name, "destroyed");
        Ok(result?)
    }
}

impl<E: Editor> fmt::Debug for NodeViewBridge<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeViewBridge")
            .field("node", &*self.shared.node.borrow())
            .field("is_editable", &self.shared.is_editable.get())
            .field("root", &self.shared.root)
            .finish_non_exhaustive()
    }
}
