//! Recording doubles for the editor and component seams.

use std::cell::{Cell, RefCell};
use std::ops::Range;
use std::rc::Rc;

use crate::bridge::NodeViewRendererProps;
use crate::context::ComponentContext;
use crate::dom::{Dom, DomElement, mark_content, mark_wrapper};
use crate::editor::{Editor, ElementOf, EventHandler};
use crate::error::ComponentError;
use crate::memory::MemoryDom;
use crate::model::{Attrs, DecorationSet, Extension, Node, NodeType};
use crate::props::{NodeViewProps, PropsPatch};
use crate::renderer::{Component, ComponentInstance};
use crate::types::{EditorEvent, ListenerId, Selection};

/// Document command issued through the editor.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Command {
    SetNodeAttributes { pos: usize, attrs: Attrs },
    DeleteRange(Range<usize>),
    StartNodeDrag { pos: usize, event: String },
}

pub(crate) struct TestEditor {
    dom: MemoryDom,
    editable: Cell<bool>,
    selection: Cell<Selection>,
    listeners: RefCell<Vec<(EditorEvent, ListenerId, EventHandler<TestEditor>)>>,
    next_listener: Cell<u64>,
    commands: RefCell<Vec<Command>>,
}

impl TestEditor {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self {
            dom: MemoryDom::new(),
            editable: Cell::new(true),
            selection: Cell::new(Selection::collapsed(0)),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
            commands: RefCell::new(Vec::new()),
        })
    }

    pub(crate) fn set_editable(&self, editable: bool) {
        self.editable.set(editable);
    }

    pub(crate) fn select(&self, anchor: usize, head: usize) {
        self.selection.set(Selection::new(anchor, head));
    }

    /// Fire `event` on every listener registered for it.
    pub(crate) fn emit(&self, event: EditorEvent) {
        let handlers: Vec<_> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(e, _, _)| *e == event)
            .map(|(_, _, handler)| handler.clone())
            .collect();
        for handler in handlers {
            handler(self);
        }
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    pub(crate) fn listeners_for(&self, event: EditorEvent) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(e, _, _)| *e == event)
            .count()
    }

    pub(crate) fn commands(&self) -> Vec<Command> {
        self.commands.borrow().clone()
    }
}

impl Editor for TestEditor {
    type Dom = MemoryDom;
    type DragEvent = String;

    fn dom(&self) -> &MemoryDom {
        &self.dom
    }

    fn is_editable(&self) -> bool {
        self.editable.get()
    }

    fn selection(&self) -> Selection {
        self.selection.get()
    }

    fn on(&self, event: EditorEvent, handler: EventHandler<Self>) -> ListenerId {
        let id = ListenerId(self.next_listener.get());
        self.next_listener.set(id.0 + 1);
        self.listeners.borrow_mut().push((event, id, handler));
        id
    }

    fn off(&self, event: EditorEvent, id: ListenerId) {
        self.listeners
            .borrow_mut()
            .retain(|(e, i, _)| !(*e == event && *i == id));
    }

    fn set_node_attributes(&self, pos: usize, attrs: Attrs) {
        self.commands
            .borrow_mut()
            .push(Command::SetNodeAttributes { pos, attrs });
    }

    fn delete_range(&self, range: Range<usize>) {
        self.commands.borrow_mut().push(Command::DeleteRange(range));
    }

    fn start_node_drag(&self, pos: usize, event: &String) {
        self.commands.borrow_mut().push(Command::StartNodeDrag {
            pos,
            event: event.clone(),
        });
    }
}

#[derive(Default)]
struct ComponentLog {
    props: Option<NodeViewProps<TestEditor>>,
    context: Option<ComponentContext>,
    patches: Vec<PropsPatch>,
    mounts: usize,
    destroys: usize,
}

/// Component rendering a wrapper (and optionally a content slot) and
/// recording everything it receives.
#[derive(Clone)]
pub(crate) struct TestComponent {
    log: Rc<RefCell<ComponentLog>>,
    wrapper: bool,
    content_slot: bool,
    slot_tag: &'static str,
    fail_mount: bool,
    on_patch: Option<Rc<dyn Fn(&PropsPatch)>>,
}

impl TestComponent {
    pub(crate) fn new() -> Self {
        Self {
            log: Rc::default(),
            wrapper: true,
            content_slot: true,
            slot_tag: "div",
            fail_mount: false,
            on_patch: None,
        }
    }

    pub(crate) fn without_wrapper(mut self) -> Self {
        self.wrapper = false;
        self
    }

    pub(crate) fn without_content_slot(mut self) -> Self {
        self.content_slot = false;
        self
    }

    /// Render the content slot as `tag`.
    pub(crate) fn with_slot_tag(mut self, tag: &'static str) -> Self {
        self.slot_tag = tag;
        self
    }

    /// Run `f` after each patch has been applied, from inside `set_props`.
    pub(crate) fn on_patch(mut self, f: impl Fn(&PropsPatch) + 'static) -> Self {
        self.on_patch = Some(Rc::new(f));
        self
    }

    pub(crate) fn failing(mut self) -> Self {
        self.fail_mount = true;
        self
    }

    /// Current props, with every pushed patch merged in.
    pub(crate) fn props(&self) -> Option<NodeViewProps<TestEditor>> {
        self.log.borrow().props.clone()
    }

    pub(crate) fn patches(&self) -> Vec<PropsPatch> {
        self.log.borrow().patches.clone()
    }

    pub(crate) fn clear_patches(&self) {
        self.log.borrow_mut().patches.clear();
    }

    pub(crate) fn with_context<R>(&self, f: impl FnOnce(&mut ComponentContext) -> R) -> Option<R> {
        self.log.borrow_mut().context.as_mut().map(f)
    }

    pub(crate) fn mounts(&self) -> usize {
        self.log.borrow().mounts
    }

    pub(crate) fn destroys(&self) -> usize {
        self.log.borrow().destroys
    }
}

impl Component<TestEditor> for TestComponent {
    fn mount(
        &self,
        target: &ElementOf<TestEditor>,
        props: NodeViewProps<TestEditor>,
        context: ComponentContext,
    ) -> Result<Box<dyn ComponentInstance>, ComponentError> {
        if self.fail_mount {
            return Err(ComponentError::from("mount failed"));
        }

        let dom = props.editor.dom();
        let wrapper = dom.create_element("div")?;
        if self.wrapper {
            mark_wrapper(&wrapper)?;
        }
        if self.content_slot {
            let slot = dom.create_element(self.slot_tag)?;
            mark_content(&slot)?;
            wrapper.append_child(&slot)?;
        }
        target.append_child(&wrapper)?;

        let mut log = self.log.borrow_mut();
        log.mounts += 1;
        log.props = Some(props);
        log.context = Some(context);
        Ok(Box::new(TestInstance {
            log: self.log.clone(),
            on_patch: self.on_patch.clone(),
        }))
    }
}

struct TestInstance {
    log: Rc<RefCell<ComponentLog>>,
    on_patch: Option<Rc<dyn Fn(&PropsPatch)>>,
}

impl ComponentInstance for TestInstance {
    fn set_props(&mut self, patch: PropsPatch) -> Result<(), ComponentError> {
        {
            let mut log = self.log.borrow_mut();
            log.patches.push(patch.clone());
            if let Some(props) = log.props.as_mut() {
                props.merge(patch.clone());
            }
        }
        if let Some(on_patch) = &self.on_patch {
            on_patch(&patch);
        }
        Ok(())
    }

    fn destroy(self: Box<Self>) -> Result<(), ComponentError> {
        self.log.borrow_mut().destroys += 1;
        Ok(())
    }
}

pub(crate) fn attrs(value: serde_json::Value) -> Attrs {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// A node with two positions of content (ignored for leaves).
pub(crate) fn node(node_type: NodeType, attrs_json: serde_json::Value) -> Node {
    Node::new(node_type, attrs(attrs_json), 2)
}

pub(crate) fn renderer_props(
    editor: &Rc<TestEditor>,
    node: Node,
    pos: usize,
) -> NodeViewRendererProps<TestEditor> {
    renderer_props_at(editor, node, Rc::new(Cell::new(Some(pos))))
}

/// Props whose position follows `pos`.
pub(crate) fn renderer_props_at(
    editor: &Rc<TestEditor>,
    node: Node,
    pos: Rc<Cell<Option<usize>>>,
) -> NodeViewRendererProps<TestEditor> {
    let extension = Extension::new(node.type_name());
    NodeViewRendererProps {
        editor: editor.clone(),
        node,
        decorations: DecorationSet::empty(),
        get_pos: Rc::new(move || pos.get()),
        extension,
    }
}
