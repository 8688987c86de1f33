//! Use-case services over the engine and the stores.
//!
//! # Responsibility
//! - Render routed outcomes into user-facing replies.
//! - Provide catalog management (upload, edit, delete) for admins.
//! - Keep front ends decoupled from storage details.

pub mod answer_service;
pub mod catalog_service;
pub mod fallback;
