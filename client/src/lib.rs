//! # jobportal-client
//!
//! Leptos + WASM components for the job portal frontend.
//!
//! The crate exposes the `ApplyJobDrawer` component, the framework-free
//! `ApplyWorkflow` state machine it is built on, toast notifications, and the
//! backend wire types. Browser-only code (uploads, file reading, timers) is
//! compiled under the `hydrate` feature; `ssr` lets a host render the
//! components on the server.

pub mod components;
pub mod config;
pub mod net;
pub mod state;

pub use components::apply_job_drawer::ApplyJobDrawer;
pub use config::ClientConfig;
