//! Reply rendering for routed queries.
//!
//! # Invariants
//! - Every "not found" reply names what was looked for.
//! - Unresolved queries are answered by the fallback responder verbatim.

use crate::model::category::Category;
use crate::query::router::RouterOutcome;
use crate::service::fallback::{FallbackError, FallbackResponder};
use crate::storage::upload::mime_type_for;
use log::warn;

/// User-facing reply for one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    /// A stored resource to display or offer for download.
    Resource {
        message: String,
        locator: String,
        mime_type: &'static str,
    },
}

impl Reply {
    /// The text shown to the user.
    pub fn message(&self) -> &str {
        match self {
            Self::Text(message) | Self::Resource { message, .. } => message,
        }
    }
}

/// Turns router outcomes into replies, consulting `F` for unresolved queries.
pub struct AnswerService<F: FallbackResponder> {
    fallback: F,
}

impl<F: FallbackResponder> AnswerService<F> {
    pub fn new(fallback: F) -> Self {
        Self { fallback }
    }

    pub fn render(&self, raw_query: &str, outcome: RouterOutcome) -> Result<Reply, FallbackError> {
        let reply = match outcome {
            RouterOutcome::EventsAnswer(events) => Reply::Text(events_message(&events)),
            RouterOutcome::ClassroomAnswer { room, details } => {
                Reply::Text(match room {
                    Some(room) => format!("Classroom {room} details:\n{details}"),
                    None => format!("Classroom details:\n{details}"),
                })
            }
            RouterOutcome::ResourceAnswer {
                category,
                locator,
                query,
                ..
            } => Reply::Resource {
                message: format!("Here is the {} for {query}:", lower_label(category)),
                mime_type: mime_type_for(&locator),
                locator,
            },
            RouterOutcome::NotFoundAnswer(category) => Reply::Text(not_found_message(category)),
            RouterOutcome::Unresolved => match self.fallback.respond(raw_query) {
                Ok(text) => Reply::Text(text),
                Err(err) => {
                    warn!("event=fallback_respond module=answer status=error error={err}");
                    return Err(err);
                }
            },
        };
        Ok(reply)
    }
}

fn events_message(events: &[String]) -> String {
    if events.is_empty() {
        return "There are no events scheduled for today.".to_string();
    }
    let lines = events
        .iter()
        .map(|event| format!("• {event}"))
        .collect::<Vec<_>>();
    format!("Today's events:\n{}", lines.join("\n"))
}

fn not_found_message(category: Category) -> String {
    match category {
        Category::ClassroomNumbers => {
            "Sorry, I couldn't find details for that classroom.".to_string()
        }
        other => format!("Sorry, I couldn't find the requested {}", lower_label(other)),
    }
}

fn lower_label(category: Category) -> String {
    category.label().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::{AnswerService, Reply};
    use crate::model::category::Category;
    use crate::query::router::RouterOutcome;
    use crate::service::fallback::{FallbackError, FallbackResponder, StaticFallback};
    use std::error::Error;
    use std::io;

    struct FailingFallback;

    impl FallbackResponder for FailingFallback {
        fn respond(&self, _raw_query: &str) -> Result<String, FallbackError> {
            Err(FallbackError::with_source(
                "model offline",
                io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"),
            ))
        }
    }

    fn service() -> AnswerService<StaticFallback> {
        AnswerService::new(StaticFallback::new("ask the front office"))
    }

    fn text(reply: Reply) -> String {
        match reply {
            Reply::Text(text) => text,
            other => panic!("expected text reply, got {other:?}"),
        }
    }

    #[test]
    fn events_are_bulleted_or_reported_missing() {
        let listed = service()
            .render("", RouterOutcome::EventsAnswer(vec!["Hackathon".into(), "Seminar".into()]))
            .expect("render should succeed");
        assert_eq!(text(listed), "Today's events:\n• Hackathon\n• Seminar");

        let empty = service()
            .render("", RouterOutcome::EventsAnswer(Vec::new()))
            .expect("render should succeed");
        assert_eq!(text(empty), "There are no events scheduled for today.");
    }

    #[test]
    fn classroom_reply_mentions_room_when_known() {
        let reply = service()
            .render(
                "",
                RouterOutcome::ClassroomAnswer {
                    room: Some("204".into()),
                    details: "Block A, 2nd floor".into(),
                },
            )
            .expect("render should succeed");
        assert_eq!(text(reply), "Classroom 204 details:\nBlock A, 2nd floor");
    }

    #[test]
    fn resource_reply_carries_locator_and_mime() {
        let reply = service()
            .render(
                "",
                RouterOutcome::ResourceAnswer {
                    category: Category::ExamTimetables,
                    name: "ECE Finals".into(),
                    locator: "uploads/ECE_Finals.png".into(),
                    query: "ece finals".into(),
                },
            )
            .expect("render should succeed");
        assert_eq!(
            reply,
            Reply::Resource {
                message: "Here is the exam timetables for ece finals:".into(),
                locator: "uploads/ECE_Finals.png".into(),
                mime_type: "image/png",
            }
        );
    }

    #[test]
    fn not_found_replies_name_the_category() {
        let classroom = service()
            .render("", RouterOutcome::NotFoundAnswer(Category::ClassroomNumbers))
            .expect("render should succeed");
        assert_eq!(text(classroom), "Sorry, I couldn't find details for that classroom.");

        let pdf = service()
            .render("", RouterOutcome::NotFoundAnswer(Category::Pdfs))
            .expect("render should succeed");
        assert_eq!(text(pdf), "Sorry, I couldn't find the requested pdfs");
    }

    #[test]
    fn unresolved_uses_fallback_verbatim_and_propagates_errors() {
        let reply = service()
            .render("who won?", RouterOutcome::Unresolved)
            .expect("render should succeed");
        assert_eq!(reply.message(), "ask the front office");

        let err = AnswerService::new(FailingFallback)
            .render("who won?", RouterOutcome::Unresolved)
            .expect_err("fallback failure should propagate");
        assert!(err.to_string().contains("model offline"));
        let source = err.source().expect("transport error should be kept");
        assert_eq!(source.to_string(), "connection refused");
    }
}
