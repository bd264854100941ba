//! Résumé section editor core.
//!
//! Timeline sections (education, work, projects, ...) are driven by a generic
//! [`timeline::TimelineController`] talking to one collection endpoint each.
//! Section titles, visibility and field labels live in [`models::section`];
//! single-document sections are edited through a debounced
//! [`draft::DraftPipeline`] that writes into a shared [`draft::DocumentStore`].

pub mod api_client;
pub mod config;
pub mod custom_fields;
pub mod draft;
pub mod errors;
pub mod models;
pub mod timeline;
