//! Client state modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! State types are plain data held in Leptos signals by components; keeping
//! them free of rendering concerns lets the workflows run under `cargo test`.

pub mod apply;
pub mod toast;
