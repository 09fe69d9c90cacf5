//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the apply flow and its notifications while keeping all
//! state transitions in `crate::state`.

pub mod apply_job_drawer;
pub mod toast_container;
