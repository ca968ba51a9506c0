//! DOM abstraction traits.
//!
//! These traits define the slice of the DOM the bridge needs. The browser
//! implementation wraps `web_sys::Element`; [`crate::memory::MemoryDom`]
//! provides an in-memory tree for native hosts and tests.

use std::fmt;

use smol_str::SmolStr;

use crate::error::DomError;

/// Attribute marking the element a node view component renders as its wrapper.
pub const NODE_VIEW_WRAPPER_ATTR: &str = "data-node-view-wrapper";

/// Attribute marking the element that receives the editable content.
pub const NODE_VIEW_CONTENT_ATTR: &str = "data-node-view-content";

/// Element factory for one document.
pub trait Dom: 'static {
    type Element: DomElement;

    /// Create a detached element with the given tag name.
    fn create_element(&self, tag: &str) -> Result<Self::Element, DomError>;
}

/// Operations on a live element handle.
///
/// Handles are cheap to clone and compare by identity.
pub trait DomElement: Clone + PartialEq + fmt::Debug + 'static {
    /// Tag name as reported by the DOM (upper case for HTML elements).
    fn tag_name(&self) -> SmolStr;

    fn add_class(&self, class: &str) -> Result<(), DomError>;

    fn has_class(&self, class: &str) -> bool;

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError>;

    fn has_attribute(&self, name: &str) -> bool;

    /// Set an inline style property, e.g. `white-space`.
    fn set_style(&self, property: &str, value: &str) -> Result<(), DomError>;

    /// Read an inline style property, `None` when unset.
    fn style(&self, property: &str) -> Option<String>;

    /// Append `child`, moving it out of its current parent if needed.
    fn append_child(&self, child: &Self) -> Result<(), DomError>;

    fn first_element_child(&self) -> Option<Self>;

    /// First descendant (document order, excluding `self`) carrying `name`.
    fn query_attribute(&self, name: &str) -> Result<Option<Self>, DomError>;

    /// Inclusive containment: an element contains itself.
    fn contains(&self, other: &Self) -> bool;

    fn is_content_editable(&self) -> bool;
}

/// Mark `element` as a node view wrapper.
pub fn mark_wrapper<El: DomElement>(element: &El) -> Result<(), DomError> {
    element.set_attribute(NODE_VIEW_WRAPPER_ATTR, "")
}

/// Mark `element` as the content slot of a node view.
pub fn mark_content<El: DomElement>(element: &El) -> Result<(), DomError> {
    element.set_attribute(NODE_VIEW_CONTENT_ATTR, "")
}

/// Tags accepting direct text input, which node views keep to themselves.
pub(crate) fn is_input_tag(tag: &str) -> bool {
    ["INPUT", "BUTTON", "SELECT", "TEXTAREA"]
        .iter()
        .any(|t| t.eq_ignore_ascii_case(tag))
}
