//! Browser backend for weaver node views.
//!
//! Implements the `weaver-nodeview-core` DOM traits over `web_sys`, converts
//! browser events and mutation records into the core types, and parses node
//! view options passed from JavaScript. It assumes a
//! `wasm32-unknown-unknown` target environment.
//!
//! # Re-exports
//!
//! This crate re-exports `weaver-nodeview-core` for convenience, so consumers
//! only need to depend on `weaver-nodeview-browser`.

// Re-export core crate
pub use weaver_nodeview_core;
pub use weaver_nodeview_core::*;

pub mod dom;
pub mod events;
pub mod logging;
pub mod options;

pub use dom::{BrowserDom, BrowserElement};
pub use events::{dom_event, mutation};
pub use logging::{default_level, init_logging};
pub use options::{node_view_options, parse_view_tags};
