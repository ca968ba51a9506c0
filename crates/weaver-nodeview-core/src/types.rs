//! Editor and DOM event types shared between the bridge and its hosts.

use std::fmt;
use std::ops::Range;

use smol_str::SmolStr;

/// Document selection with anchor and head positions.
///
/// The anchor is where the selection started, the head is where it ends now.
/// They may be in any order - use `start()` and `end()` for ordered bounds.
#[derive(Clone, Debug, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: usize,
    pub head: usize,
}

impl Selection {
    pub fn new(anchor: usize, head: usize) -> Self {
        Self { anchor, head }
    }

    /// A collapsed selection (cursor position).
    pub fn collapsed(pos: usize) -> Self {
        Self::new(pos, pos)
    }

    /// Lower bound of the selection.
    pub fn start(&self) -> usize {
        self.anchor.min(self.head)
    }

    /// Upper bound of the selection.
    pub fn end(&self) -> usize {
        self.anchor.max(self.head)
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.head
    }

    /// Whether the selection covers the whole span `pos..pos + size`.
    pub fn covers(&self, pos: usize, size: usize) -> bool {
        self.start() <= pos && self.end() >= pos + size
    }

    pub fn to_range(&self) -> Range<usize> {
        self.start()..self.end()
    }
}

/// Editor-level events a node view listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EditorEvent {
    /// The selection changed.
    SelectionUpdate,
    /// The document or editor state was updated.
    Update,
}

impl EditorEvent {
    /// The engine's event name.
    pub fn as_str(self) -> &'static str {
        match self {
            EditorEvent::SelectionUpdate => "selectionUpdate",
            EditorEvent::Update => "update",
        }
    }
}

impl fmt::Display for EditorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one registered editor event listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Kind of a DOM event the engine asks a node view about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DomEventKind {
    DragStart,
    Drag,
    DragEnd,
    DragEnter,
    DragOver,
    DragLeave,
    Drop,
    Copy,
    Paste,
    Cut,
    MouseDown,
    Other(SmolStr),
}

impl DomEventKind {
    /// Parse a DOM `event.type` string.
    pub fn parse(s: &str) -> Self {
        match s {
            "dragstart" => DomEventKind::DragStart,
            "drag" => DomEventKind::Drag,
            "dragend" => DomEventKind::DragEnd,
            "dragenter" => DomEventKind::DragEnter,
            "dragover" => DomEventKind::DragOver,
            "dragleave" => DomEventKind::DragLeave,
            "drop" => DomEventKind::Drop,
            "copy" => DomEventKind::Copy,
            "paste" => DomEventKind::Paste,
            "cut" => DomEventKind::Cut,
            "mousedown" => DomEventKind::MouseDown,
            other => DomEventKind::Other(SmolStr::new(other)),
        }
    }

    /// Drag family events, excluding `drop`.
    pub fn is_drag(&self) -> bool {
        matches!(
            self,
            DomEventKind::DragStart
                | DomEventKind::Drag
                | DomEventKind::DragEnd
                | DomEventKind::DragEnter
                | DomEventKind::DragOver
                | DomEventKind::DragLeave
        )
    }

    pub fn is_clipboard(&self) -> bool {
        matches!(
            self,
            DomEventKind::Copy | DomEventKind::Paste | DomEventKind::Cut
        )
    }
}

/// A DOM event dispatched inside the editor.
#[derive(Clone, Debug, PartialEq)]
pub struct DomEvent<El> {
    pub kind: DomEventKind,
    pub target: El,
}

impl<El> DomEvent<El> {
    pub fn new(kind: DomEventKind, target: El) -> Self {
        Self { kind, target }
    }
}

/// Kind of a DOM mutation observed by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MutationKind {
    /// Selection change, reported by the engine as a pseudo-mutation.
    Selection,
    ChildList,
    Attributes,
    CharacterData,
}

impl MutationKind {
    /// Parse a `MutationRecord.type` string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "selection" => Some(MutationKind::Selection),
            "childList" => Some(MutationKind::ChildList),
            "attributes" => Some(MutationKind::Attributes),
            "characterData" => Some(MutationKind::CharacterData),
            _ => None,
        }
    }
}

/// A DOM mutation inside the editor.
#[derive(Clone, Debug, PartialEq)]
pub struct Mutation<El> {
    pub kind: MutationKind,
    pub target: El,
}

impl<El> Mutation<El> {
    pub fn new(kind: MutationKind, target: El) -> Self {
        Self { kind, target }
    }
}
