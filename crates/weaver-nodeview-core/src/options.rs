//! Node view configuration.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

use crate::context::CapturedContext;
use crate::editor::{Editor, ElementOf};
use crate::error::ComponentError;
use crate::model::{DecorationSet, Node};
use crate::types::{DomEvent, Mutation};

/// Element tags used by a node view.
///
/// Deserializes from `{ "as": "section", "contentAs": "p" }`, which is how JS
/// callers pass it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewTags {
    /// Tag of the root element. Defaults to `span` for inline nodes, `div` otherwise.
    #[serde(rename = "as", default, skip_serializing_if = "Option::is_none")]
    pub as_tag: Option<SmolStr>,
    /// Tag of the content element. Same defaults as `as_tag`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_as: Option<SmolStr>,
}

/// Arguments of a custom update predicate.
pub struct UpdateContext<'a> {
    pub old_node: &'a Node,
    pub old_decorations: &'a DecorationSet,
    pub new_node: &'a Node,
    pub new_decorations: &'a DecorationSet,
    pub(crate) update_props: &'a dyn Fn() -> Result<(), ComponentError>,
}

impl UpdateContext<'_> {
    /// Push the new node and decorations into the component's props.
    pub fn update_props(&self) -> Result<(), ComponentError> {
        (self.update_props)()
    }
}

/// Custom update policy. Returns whether the update was accepted in place.
pub type UpdateFn = Rc<dyn Fn(UpdateContext<'_>) -> bool>;

/// Custom `stop_event` policy.
pub type StopEventFn<El> = Rc<dyn Fn(&DomEvent<El>) -> bool>;

/// Custom `ignore_mutation` policy.
pub type IgnoreMutationFn<El> = Rc<dyn Fn(&Mutation<El>) -> bool>;

/// Options shared by every node view a factory creates.
pub struct NodeViewOptions<E: Editor> {
    pub tags: ViewTags,
    pub update: Option<UpdateFn>,
    pub stop_event: Option<StopEventFn<ElementOf<E>>>,
    pub ignore_mutation: Option<IgnoreMutationFn<ElementOf<E>>>,
    pub context: CapturedContext,
}

impl<E: Editor> NodeViewOptions<E> {
    pub fn new() -> Self {
        Self {
            tags: ViewTags::default(),
            update: None,
            stop_event: None,
            ignore_mutation: None,
            context: CapturedContext::default(),
        }
    }

    /// Override the root element tag.
    pub fn with_as(mut self, tag: impl Into<SmolStr>) -> Self {
        self.tags.as_tag = Some(tag.into());
        self
    }

    /// Override the content element tag. Ignored for leaf nodes.
    pub fn with_content_as(mut self, tag: impl Into<SmolStr>) -> Self {
        self.tags.content_as = Some(tag.into());
        self
    }

    pub fn with_tags(mut self, tags: ViewTags) -> Self {
        self.tags = tags;
        self
    }

    /// Replace the built-in update policy.
    pub fn with_update(mut self, f: impl Fn(UpdateContext<'_>) -> bool + 'static) -> Self {
        self.update = Some(Rc::new(f));
        self
    }

    pub fn with_stop_event(mut self, f: impl Fn(&DomEvent<ElementOf<E>>) -> bool + 'static) -> Self {
        self.stop_event = Some(Rc::new(f));
        self
    }

    pub fn with_ignore_mutation(
        mut self,
        f: impl Fn(&Mutation<ElementOf<E>>) -> bool + 'static,
    ) -> Self {
        self.ignore_mutation = Some(Rc::new(f));
        self
    }

    /// Ambient context inherited by every component.
    pub fn with_context(mut self, context: CapturedContext) -> Self {
        self.context = context;
        self
    }
}

impl<E: Editor> Default for NodeViewOptions<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Editor> Clone for NodeViewOptions<E> {
    fn clone(&self) -> Self {
        Self {
            tags: self.tags.clone(),
            update: self.update.clone(),
            stop_event: self.stop_event.clone(),
            ignore_mutation: self.ignore_mutation.clone(),
            context: self.context.clone(),
        }
    }
}

impl<E: Editor> fmt::Debug for NodeViewOptions<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeViewOptions")
            .field("tags", &self.tags)
            .field("update", &self.update.is_some())
            .field("stop_event", &self.stop_event.is_some())
            .field("ignore_mutation", &self.ignore_mutation.is_some())
            .field("context", &self.context)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_tags_use_js_field_names() {
        let tags: ViewTags = serde_json::from_str(r#"{"as":"section","contentAs":"p"}"#).unwrap();
        assert_eq!(tags.as_tag.as_deref(), Some("section"));
        assert_eq!(tags.content_as.as_deref(), Some("p"));
    }

    #[test]
    fn view_tags_default_when_absent() {
        let tags: ViewTags = serde_json::from_str("{}").unwrap();
        assert_eq!(tags, ViewTags::default());
        assert_eq!(serde_json::to_string(&tags).unwrap(), "{}");
    }
}
