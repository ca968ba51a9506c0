//! Document values handed to node views by the editing engine.
//!
//! Nodes and decoration sets are immutable and replaced wholesale on every
//! edit. Both are reference counted so that identity is cheap to compare:
//! the engine passes the same instance again when nothing changed.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Node attributes, as a JSON object.
pub type Attrs = serde_json::Map<String, serde_json::Value>;

/// Schema-level description of a node type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeType {
    name: SmolStr,
    inline: bool,
    leaf: bool,
    atom: bool,
    draggable: bool,
    selectable: bool,
}

impl NodeType {
    /// A block node type with content.
    pub fn block(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            inline: false,
            leaf: false,
            atom: false,
            draggable: false,
            selectable: true,
        }
    }

    /// An inline node type with content.
    pub fn inline(name: impl Into<SmolStr>) -> Self {
        Self {
            inline: true,
            ..Self::block(name)
        }
    }

    /// Mark the type as having no content.
    pub fn leaf(mut self) -> Self {
        self.leaf = true;
        self
    }

    /// Mark the type as an atom (edited as a single unit).
    pub fn atom(mut self) -> Self {
        self.atom = true;
        self
    }

    pub fn draggable(mut self) -> Self {
        self.draggable = true;
        self
    }

    pub fn unselectable(mut self) -> Self {
        self.selectable = false;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_inline(&self) -> bool {
        self.inline
    }

    pub fn is_leaf(&self) -> bool {
        self.leaf
    }

    /// Leaf types are always atoms.
    pub fn is_atom(&self) -> bool {
        self.atom || self.leaf
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    pub fn is_selectable(&self) -> bool {
        self.selectable
    }
}

#[derive(Debug, PartialEq)]
struct NodeData {
    node_type: NodeType,
    attrs: Attrs,
    content_size: usize,
}

/// One node of the document tree.
///
/// Cloning is cheap and preserves identity; use [`Node::ptr_eq`] to check
/// whether two handles refer to the same instance.
#[derive(Clone, PartialEq)]
pub struct Node(Rc<NodeData>);

impl Node {
    /// Create a node. `content_size` is ignored for leaf types.
    pub fn new(node_type: NodeType, attrs: Attrs, content_size: usize) -> Self {
        let content_size = if node_type.is_leaf() { 0 } else { content_size };
        Node(Rc::new(NodeData {
            node_type,
            attrs,
            content_size,
        }))
    }

    /// A fresh node with the same type and content size but new attributes.
    pub fn with_attrs(&self, attrs: Attrs) -> Self {
        Node::new(self.0.node_type.clone(), attrs, self.0.content_size)
    }

    pub fn node_type(&self) -> &NodeType {
        &self.0.node_type
    }

    pub fn type_name(&self) -> &str {
        self.0.node_type.name()
    }

    pub fn attrs(&self) -> &Attrs {
        &self.0.attrs
    }

    pub fn is_leaf(&self) -> bool {
        self.0.node_type.is_leaf()
    }

    pub fn is_inline(&self) -> bool {
        self.0.node_type.is_inline()
    }

    pub fn is_atom(&self) -> bool {
        self.0.node_type.is_atom()
    }

    /// Size of the node in document positions.
    ///
    /// Leaf nodes occupy a single position; other nodes occupy their content
    /// plus an opening and closing token.
    pub fn node_size(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.0.content_size + 2
        }
    }

    /// Whether both handles refer to the same node instance.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("type", &self.type_name())
            .field("attrs", self.attrs())
            .field("size", &self.node_size())
            .finish()
    }
}

/// A presentation annotation over a document range.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoration {
    pub from: usize,
    pub to: usize,
    pub attrs: BTreeMap<SmolStr, SmolStr>,
}

impl Decoration {
    pub fn new(from: usize, to: usize) -> Self {
        Self {
            from,
            to,
            attrs: BTreeMap::new(),
        }
    }

    pub fn with_attr(mut self, name: impl Into<SmolStr>, value: impl Into<SmolStr>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }
}

/// Ordered decorations applying to one node at one point in time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecorationSet(Rc<[Decoration]>);

impl DecorationSet {
    pub fn new(decorations: Vec<Decoration>) -> Self {
        DecorationSet(decorations.into())
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Decoration> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether both handles refer to the same decoration set instance.
    pub fn ptr_eq(&self, other: &DecorationSet) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Default for DecorationSet {
    fn default() -> Self {
        Self::empty()
    }
}

/// Descriptor of the editor extension that registered the node view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Extension {
    pub name: SmolStr,
    #[serde(default)]
    pub options: serde_json::Value,
}

impl Extension {
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            options: serde_json::Value::Null,
        }
    }

    pub fn with_options(mut self, options: serde_json::Value) -> Self {
        self.options = options;
        self
    }
}
