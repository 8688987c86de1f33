//! File storage for uploaded resources.

pub mod upload;
