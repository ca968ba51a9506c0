//! Conversion of browser events and mutation records for node views.

use wasm_bindgen::JsCast;
use web_sys::{Element, Event, MutationRecord, Node};
use weaver_nodeview_core::{DomEvent, DomEventKind, Mutation, MutationKind};

use crate::dom::BrowserElement;

/// Convert a DOM event for `NodeView::stop_event`.
///
/// Returns `None` for events without an element target (window, document).
pub fn dom_event(event: &Event) -> Option<DomEvent<BrowserElement>> {
    let target = event.target()?.dyn_into::<Element>().ok()?;
    Some(DomEvent::new(
        DomEventKind::parse(&event.type_()),
        BrowserElement(target),
    ))
}

/// Convert a mutation record for `NodeView::ignore_mutation`.
///
/// Text node targets are reported as their parent element.
pub fn mutation(record: &MutationRecord) -> Option<Mutation<BrowserElement>> {
    let kind = MutationKind::parse(&record.type_())?;
    let target = element_of(record.target()?)?;
    Some(Mutation::new(kind, BrowserElement(target)))
}

fn element_of(node: Node) -> Option<Element> {
    match node.dyn_into::<Element>() {
        Ok(element) => Some(element),
        Err(node) => node.parent_element(),
    }
}
