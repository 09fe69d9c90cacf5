//! Networking modules for the job-portal REST API.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the multipart application upload and `types` defines the
//! backend's wire schema.

pub mod api;
pub mod types;
