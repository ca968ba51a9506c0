//! Error types for node view construction and rendering.

use smol_str::SmolStr;
use thiserror::Error;

/// Errors raised by a DOM backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DomError {
    /// The backend refused to create an element.
    #[error("failed to create <{tag}> element: {reason}")]
    CreateElement { tag: SmolStr, reason: String },

    /// Setting an attribute or class failed.
    #[error("failed to set attribute `{name}`: {reason}")]
    Attribute { name: SmolStr, reason: String },

    /// Setting an inline style property failed.
    #[error("failed to set style `{property}`: {reason}")]
    Style { property: SmolStr, reason: String },

    /// Appending a child failed (cycles, detached documents, ...).
    #[error("failed to append child: {0}")]
    Append(String),

    /// A descendant lookup failed.
    #[error("query failed: {0}")]
    Query(String),
}

/// Failure reported by the component framework.
///
/// Component implementations wrap their own failures in this type; the
/// renderer hands them back to the caller without interpretation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("component error: {0}")]
pub struct ComponentError(pub String);

impl From<&str> for ComponentError {
    fn from(s: &str) -> Self {
        ComponentError(s.to_string())
    }
}

impl From<String> for ComponentError {
    fn from(s: String) -> Self {
        ComponentError(s)
    }
}

impl From<DomError> for ComponentError {
    fn from(e: DomError) -> Self {
        ComponentError(e.to_string())
    }
}

/// Errors surfaced by a node view to the editing engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum NodeViewError {
    /// The component did not render a node view wrapper as the first child
    /// of its root. This is a component authoring mistake and not
    /// recoverable at runtime.
    #[error(
        "node view for `{node_type}` has no wrapper: the first child of the component root must carry `data-node-view-wrapper`"
    )]
    MissingWrapper { node_type: SmolStr },

    #[error(transparent)]
    Dom(#[from] DomError),

    #[error(transparent)]
    Component(#[from] ComponentError),
}
