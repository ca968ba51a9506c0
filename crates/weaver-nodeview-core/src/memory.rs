//! In-memory DOM.
//!
//! A small element tree implementing [`Dom`] and [`DomElement`] so node views
//! can be hosted without a browser: headless rendering, native shells, tests.
//! Only elements are modelled; text nodes are out of scope.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::{Rc, Weak};

use smol_str::SmolStr;

use crate::dom::{Dom, DomElement};
use crate::error::DomError;

/// Element factory for the in-memory tree.
#[derive(Clone, Debug, Default)]
pub struct MemoryDom;

impl MemoryDom {
    pub fn new() -> Self {
        MemoryDom
    }
}

impl Dom for MemoryDom {
    type Element = MemoryElement;

    fn create_element(&self, tag: &str) -> Result<MemoryElement, DomError> {
        let valid = !tag.is_empty()
            && tag
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(DomError::CreateElement {
                tag: SmolStr::new(tag),
                reason: "invalid tag name".to_string(),
            });
        }
        Ok(MemoryElement(Rc::new(RefCell::new(ElementData {
            tag: SmolStr::new(tag.to_ascii_lowercase()),
            ..Default::default()
        }))))
    }
}

/// HTML elements that never have children.
fn is_void_tag(tag: &str) -> bool {
    matches!(
        tag,
        "area" | "base" | "br" | "col" | "embed" | "hr" | "img" | "input" | "link" | "meta"
            | "source" | "track" | "wbr"
    )
}

#[derive(Default)]
struct ElementData {
    tag: SmolStr,
    classes: Vec<SmolStr>,
    attributes: BTreeMap<SmolStr, String>,
    style: Vec<(SmolStr, String)>,
    children: Vec<MemoryElement>,
    parent: Weak<RefCell<ElementData>>,
}

/// Handle to an element of the in-memory tree.
#[derive(Clone)]
pub struct MemoryElement(Rc<RefCell<ElementData>>);

impl MemoryElement {
    pub fn parent(&self) -> Option<MemoryElement> {
        self.0.borrow().parent.upgrade().map(MemoryElement)
    }

    pub fn children(&self) -> Vec<MemoryElement> {
        self.0.borrow().children.clone()
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    /// Serialize the subtree as HTML.
    ///
    /// Classes come first, then attributes in name order, then inline style.
    pub fn outer_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let data = self.0.borrow();
        out.push('<');
        out.push_str(&data.tag);
        if !data.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&data.classes.join(" "));
            out.push('"');
        }
        for (name, value) in &data.attributes {
            out.push_str(&format!(" {name}=\"{value}\""));
        }
        if !data.style.is_empty() {
            let style = data
                .style
                .iter()
                .map(|(prop, value)| format!("{prop}: {value}"))
                .collect::<Vec<_>>()
                .join("; ");
            out.push_str(&format!(" style=\"{style}\""));
        }
        out.push('>');
        for child in &data.children {
            child.write_html(out);
        }
        out.push_str(&format!("</{}>", data.tag));
    }

    fn ancestors_or_self(&self) -> impl Iterator<Item = MemoryElement> {
        std::iter::successors(Some(self.clone()), MemoryElement::parent)
    }

    fn detach(&self) {
        if let Some(parent) = self.parent() {
            parent
                .0
                .borrow_mut()
                .children
                .retain(|c| !Rc::ptr_eq(&c.0, &self.0));
        }
        self.0.borrow_mut().parent = Weak::new();
    }
}

impl PartialEq for MemoryElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        f.debug_struct("MemoryElement")
            .field("tag", &data.tag)
            .field("classes", &data.classes)
            .field("attributes", &data.attributes)
            .field("children", &data.children.len())
            .finish()
    }
}

impl DomElement for MemoryElement {
    fn tag_name(&self) -> SmolStr {
        SmolStr::new(self.0.borrow().tag.to_ascii_uppercase())
    }

    fn add_class(&self, class: &str) -> Result<(), DomError> {
        if class.is_empty() || class.contains(char::is_whitespace) {
            return Err(DomError::Attribute {
                name: SmolStr::new_static("class"),
                reason: format!("invalid class token `{class}`"),
            });
        }
        let mut data = self.0.borrow_mut();
        if !data.classes.iter().any(|c| c == class) {
            data.classes.push(SmolStr::new(class));
        }
        Ok(())
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    fn set_attribute(&self, name: &str, value: &str) -> Result<(), DomError> {
        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(DomError::Attribute {
                name: SmolStr::new(name),
                reason: "invalid attribute name".to_string(),
            });
        }
        self.0
            .borrow_mut()
            .attributes
            .insert(SmolStr::new(name), value.to_string());
        Ok(())
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.0.borrow().attributes.contains_key(name)
    }

    fn set_style(&self, property: &str, value: &str) -> Result<(), DomError> {
        let mut data = self.0.borrow_mut();
        match data.style.iter().position(|(p, _)| p == property) {
            Some(i) => data.style[i].1 = value.to_string(),
            None => data.style.push((SmolStr::new(property), value.to_string())),
        }
        Ok(())
    }

    fn style(&self, property: &str) -> Option<String> {
        self.0
            .borrow()
            .style
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.clone())
    }

    fn append_child(&self, child: &Self) -> Result<(), DomError> {
        let tag = self.0.borrow().tag.clone();
        if is_void_tag(&tag) {
            return Err(DomError::Append(format!("<{tag}> cannot have children")));
        }
        if child.contains(self) {
            return Err(DomError::Append(
                "the new child is an ancestor of the parent".to_string(),
            ));
        }
        child.detach();
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(child.clone());
        Ok(())
    }

    fn first_element_child(&self) -> Option<Self> {
        self.0.borrow().children.first().cloned()
    }

    fn query_attribute(&self, name: &str) -> Result<Option<Self>, DomError> {
        for child in self.children() {
            if child.has_attribute(name) {
                return Ok(Some(child));
            }
            if let Some(found) = child.query_attribute(name)? {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    fn contains(&self, other: &Self) -> bool {
        other.ancestors_or_self().any(|el| el == *self)
    }

    fn is_content_editable(&self) -> bool {
        for el in self.ancestors_or_self() {
            match el.attribute("contenteditable").as_deref() {
                Some("" | "true" | "plaintext-only") => return true,
                Some("false") => return false,
                _ => {}
            }
        }
        false
    }
}
