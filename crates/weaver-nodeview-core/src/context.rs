//! Ambient component context.
//!
//! Components rendered by node views are created outside the component tree
//! that hosts the editor, so they cannot see context values set by its
//! ancestors. The hosting component calls [`capture_context`] once, while it
//! initializes and before any node view mounts, and forwards the result
//! through [`crate::NodeViewOptions::with_context`]. Each node view then
//! gets its own shallow copy plus a [`DragStartHandler`] under
//! [`DRAG_START_KEY`].
//!
//! Capturing late (after node views mounted) or never is not detected: those
//! components simply see no inherited entries.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use smol_str::SmolStr;

use crate::editor::Editor;

/// Key of a context entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContextKey(SmolStr);

impl ContextKey {
    pub fn new(key: impl AsRef<str>) -> Self {
        ContextKey(SmolStr::new(key))
    }

    pub const fn new_static(key: &'static str) -> Self {
        ContextKey(SmolStr::new_static(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Key under which node views expose their [`DragStartHandler`].
pub const DRAG_START_KEY: ContextKey = ContextKey::new_static("onDragStart");

/// Context map handed to a component when it mounts.
///
/// Values are reference counted, so cloning the map is shallow: copies share
/// values but inserting or removing entries in one copy never affects another.
#[derive(Clone, Default)]
pub struct ComponentContext {
    entries: HashMap<ContextKey, Rc<dyn Any>>,
}

impl ComponentContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous one for `key`.
    pub fn insert<T: Any>(&mut self, key: ContextKey, value: T) -> Option<Rc<dyn Any>> {
        self.entries.insert(key, Rc::new(value))
    }

    pub fn insert_rc(&mut self, key: ContextKey, value: Rc<dyn Any>) -> Option<Rc<dyn Any>> {
        self.entries.insert(key, value)
    }

    /// Typed lookup. `None` when missing or of another type.
    pub fn get<T: Any>(&self, key: &ContextKey) -> Option<&T> {
        self.entries.get(key)?.downcast_ref::<T>()
    }

    pub fn get_rc(&self, key: &ContextKey) -> Option<Rc<dyn Any>> {
        self.entries.get(key).cloned()
    }

    pub fn remove(&mut self, key: &ContextKey) -> Option<Rc<dyn Any>> {
        self.entries.remove(key)
    }

    pub fn contains_key(&self, key: &ContextKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &ContextKey> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for ComponentContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<_> = self.entries.keys().map(ContextKey::as_str).collect();
        keys.sort_unstable();
        f.debug_struct("ComponentContext")
            .field("keys", &keys)
            .finish()
    }
}

/// Read-only snapshot of the ambient context of the editor-hosting component.
#[derive(Clone, Debug, Default)]
pub struct CapturedContext(Rc<ComponentContext>);

impl CapturedContext {
    /// A private, mutable copy of the snapshot.
    pub fn fork(&self) -> ComponentContext {
        (*self.0).clone()
    }

    pub fn get<T: Any>(&self, key: &ContextKey) -> Option<&T> {
        self.0.get(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Snapshot the ambient context.
///
/// Must be called synchronously while the editor-hosting component
/// initializes, before the editor creates any node view.
pub fn capture_context(ambient: &ComponentContext) -> CapturedContext {
    CapturedContext(Rc::new(ambient.clone()))
}

/// Starts the engine's native drag for the node view that provided it.
///
/// Looked up by descendant components under [`DRAG_START_KEY`], typically by
/// the element acting as a drag handle.
pub struct DragStartHandler<E: Editor>(Rc<dyn Fn(&E::DragEvent)>);

impl<E: Editor> DragStartHandler<E> {
    pub fn new(f: impl Fn(&E::DragEvent) + 'static) -> Self {
        DragStartHandler(Rc::new(f))
    }

    pub fn call(&self, event: &E::DragEvent) {
        (self.0)(event)
    }
}

impl<E: Editor> Clone for DragStartHandler<E> {
    fn clone(&self) -> Self {
        DragStartHandler(self.0.clone())
    }
}

impl<E: Editor> fmt::Debug for DragStartHandler<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DragStartHandler")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_lookup_checks_type() {
        let mut ctx = ComponentContext::new();
        ctx.insert(ContextKey::new("theme"), String::from("dark"));
        assert_eq!(
            ctx.get::<String>(&ContextKey::new("theme")).map(String::as_str),
            Some("dark")
        );
        assert!(ctx.get::<u32>(&ContextKey::new("theme")).is_none());
        assert!(ctx.get::<String>(&ContextKey::new("locale")).is_none());
    }

    #[test]
    fn forks_are_independent() {
        let mut ambient = ComponentContext::new();
        ambient.insert(ContextKey::new("theme"), String::from("dark"));
        let captured = capture_context(&ambient);

        let mut a = captured.fork();
        let b = captured.fork();
        a.remove(&ContextKey::new("theme"));
        a.insert(ContextKey::new("extra"), 1u8);

        assert!(!a.contains_key(&ContextKey::new("theme")));
        assert!(b.contains_key(&ContextKey::new("theme")));
        assert!(!b.contains_key(&ContextKey::new("extra")));
        assert_eq!(captured.len(), 1);
    }

    #[test]
    fn forks_share_values() {
        let mut ambient = ComponentContext::new();
        ambient.insert(ContextKey::new("store"), 7u32);
        let captured = capture_context(&ambient);

        let a = captured.fork().get_rc(&ContextKey::new("store")).unwrap();
        let b = captured.fork().get_rc(&ContextKey::new("store")).unwrap();
        assert!(Rc::ptr_eq(&a, &b));
    }

    #[test]
    fn capture_ignores_later_ambient_changes() {
        let mut ambient = ComponentContext::new();
        let captured = capture_context(&ambient);
        ambient.insert(ContextKey::new("late"), ());
        assert!(captured.is_empty());
    }

    #[test]
    fn debug_lists_sorted_keys() {
        let mut ctx = ComponentContext::new();
        ctx.insert(ContextKey::new("b"), ());
        ctx.insert(ContextKey::new("a"), ());
        assert_eq!(
            format!("{ctx:?}"),
            r#"ComponentContext { keys: ["a", "b"] }"#
        );
    }
}
