//! Fallback responder contract for unresolved queries.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure reported by a fallback responder.
#[derive(Debug)]
pub struct FallbackError {
    message: String,
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl FallbackError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn Error + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}

impl Display for FallbackError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "fallback responder failed: {}", self.message)
    }
}

impl Error for FallbackError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|err| err as &(dyn Error + 'static))
    }
}

/// Answers queries the router could not resolve, e.g. a generative model.
pub trait FallbackResponder {
    fn respond(&self, raw_query: &str) -> Result<String, FallbackError>;
}

/// Responder that always returns the same text.
#[derive(Debug, Clone)]
pub struct StaticFallback {
    message: String,
}

impl StaticFallback {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Default for StaticFallback {
    fn default() -> Self {
        Self::new("Sorry, I can only help with campus timetables, events, classrooms and documents.")
    }
}

impl FallbackResponder for StaticFallback {
    fn respond(&self, _raw_query: &str) -> Result<String, FallbackError> {
        Ok(self.message.clone())
    }
}
