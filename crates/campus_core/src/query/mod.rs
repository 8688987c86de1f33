//! Query resolution engine.
//!
//! # Responsibility
//! - Normalize free text into match terms.
//! - Classify a query into a resource category.
//! - Rank stored resources against the residual query.
//! - Route each query to exactly one outcome.
//!
//! # Invariants
//! - The engine is stateless and never mutates stored data.
//! - Store failures propagate unchanged; "not found" is an outcome, not an error.

pub mod classifier;
pub mod matcher;
pub mod normalize;
pub mod resolvers;
pub mod router;
