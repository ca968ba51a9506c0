//! `web_sys` implementation of the node view DOM traits.

use smol_str::SmolStr;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement};
use weaver_nodeview_core::{Dom, DomElement, DomError};

fn reason(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Element factory backed by a browser document.
#[derive(Clone, Debug)]
pub struct BrowserDom {
    document: Document,
}

impl BrowserDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// The document of the current window.
    pub fn from_window() -> Result<Self, DomError> {
        web_sys::window()
            .and_then(|window| window.document())
            .map(Self::new)
            .ok_or_else(|| DomError::Query("no document in this context".to_string()))
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

impl Dom for BrowserDom {
    type Element = BrowserElement;

    fn create_element(&self, tag: &str) -> Result<BrowserElement, DomError> {
        self.document
            .create_element(tag)
            .map(BrowserElement)
            .map_err(|e| DomError::CreateElement {
                tag: SmolStr::new(tag),
                reason: reason(e),
            })
    }
}

/// A live browser element. Compares by identity.
#[derive(Clone, Debug, PartialEq)]
pub struct BrowserElement(pub Element);

impl BrowserElement {
    pub fn as_element(&self) -> &Element {
        &self.0
    }

    pub fn into_inner(self) -> Element {
        self.0
    }

    fn html(&self) -> Option<&HtmlElement> {
        self.0.dyn_ref::<HtmlElement>()
    }
}

impl From<Element> for BrowserElement {
    fn from(element: Element) -> Self {
        Self(element)
    }
}

impl DomElement for BrowserElement {
    fn tag_name(&self) -> SmolStr {
        SmolStr::new(self.0.tag_name())
    }

    fn add_class(&self, class: &str) -> Result<(), DomError> {
        self.0
            .class_list()
            .add_1(class)
            .map_err(|e| DomError::Attribute {
                name: SmolStr::new_static("class"),
                reason: reason(e),
            })
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
        self.0
            .set_attribute(name, value)
            .map_err(|e| DomError::Attribute {
                name: SmolStr::new(name),
                reason: reason(e),
            })
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.0.has_attribute(name)
    }

    fn set_style(&self, property: &str, value: &str) -> Result<(), DomError> {
        let Some(html) = self.html() else {
            return Err(DomError::Style {
                property: SmolStr::new(property),
                reason: format!("<{}> has no inline style", self.0.tag_name()),
            });
        };
        html.style()
            .set_property(property, value)
            .map_err(|e| DomError::Style {
                property: SmolStr::new(property),
                reason: reason(e),
            })
    }

    fn style(&self, property: &str) -> Option<String> {
        self.html()?
            .style()
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn append_child(&self, child: &Self) -> Result<(), DomError> {
        self.0
            .append_child(&child.0)
            .map(|_| ())
            .map_err(|e| DomError::Append(reason(e)))
    }

    fn first_element_child(&self) -> Option<Self> {
        self.0.first_element_child().map(Self)
    }

    fn query_attribute(&self, name: &str) -> Result<Option<Self>, DomError> {
        self.0
            .query_selector(&format!("[{name}]"))
            .map(|found| found.map(Self))
            .map_err(|e| DomError::Query(reason(e)))
    }

    fn contains(&self, other: &Self) -> bool {
        self.0.contains(Some(other.0.as_ref()))
    }

    fn is_content_editable(&self) -> bool {
        self.html().is_some_and(HtmlElement::is_content_editable)
    }
}
