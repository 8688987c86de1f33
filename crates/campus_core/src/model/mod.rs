//! Domain model for campus resources and direct-answer records.
//!
//! # Invariants
//! - Every resource belongs to exactly one [`category::Category`].
//! - Records are plain values; persistence identity is the SQLite row id.

pub mod category;
pub mod record;
