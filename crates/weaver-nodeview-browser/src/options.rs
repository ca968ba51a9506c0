//! Node view options from JavaScript.

use wasm_bindgen::prelude::*;
use weaver_nodeview_core::{Editor, NodeViewOptions, ViewTags};

/// Parse `{ as?: string, contentAs?: string }`.
///
/// `undefined` and `null` give the default tags.
pub fn parse_view_tags(value: JsValue) -> Result<ViewTags, JsError> {
    if value.is_undefined() || value.is_null() {
        return Ok(ViewTags::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsError::new(&format!("Invalid node view options: {}", e)))
}

/// Options configured from a JS options object.
pub fn node_view_options<E: Editor>(value: JsValue) -> Result<NodeViewOptions<E>, JsError> {
    Ok(NodeViewOptions::new().with_tags(parse_view_tags(value)?))
}
