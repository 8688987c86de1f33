//! Query router: one raw query in, exactly one outcome out.
//!
//! Precedence, first match wins:
//! 1. "today" together with "event" or "schedule" → today's events.
//! 2. any classroom keyword → classroom lookup.
//! 3. classified category → resource lookup.
//! 4. otherwise unresolved; the caller consults its fallback.

use crate::model::category::Category;
use crate::query::classifier::classify;
use crate::query::matcher::match_resource;
use crate::query::resolvers::{classroom_details, todays_events, Clock, CLASSROOM_KEYWORDS};
use crate::repo::calendar_repo::CalendarRepository;
use crate::repo::classroom_repo::ClassroomRepository;
use crate::repo::resource_repo::ResourceRepository;
use crate::repo::RepoResult;
use log::{debug, info};

/// Result of routing one query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterOutcome {
    /// Today's events; may be empty.
    EventsAnswer(Vec<String>),
    ClassroomAnswer {
        room: Option<String>,
        details: String,
    },
    ResourceAnswer {
        category: Category,
        name: String,
        locator: String,
        /// Residual query the resource was matched against.
        query: String,
    },
    /// Lookup ran but found nothing in this category.
    NotFoundAnswer(Category),
    /// No route applied.
    Unresolved,
}

impl RouterOutcome {
    fn route_name(&self) -> &'static str {
        match self {
            Self::EventsAnswer(_) => "events",
            Self::ClassroomAnswer { .. } => "classroom",
            Self::ResourceAnswer { .. } => "resource",
            Self::NotFoundAnswer(_) => "not_found",
            Self::Unresolved => "unresolved",
        }
    }
}

/// Stateless router over injected stores and clock.
pub struct QueryRouter<R, C, E, K> {
    resources: R,
    classrooms: C,
    calendar: E,
    clock: K,
}

impl<R, C, E, K> QueryRouter<R, C, E, K>
where
    R: ResourceRepository,
    C: ClassroomRepository,
    E: CalendarRepository,
    K: Clock,
{
    pub fn new(resources: R, classrooms: C, calendar: E, clock: K) -> Self {
        Self {
            resources,
            classrooms,
            calendar,
            clock,
        }
    }

    /// Routes `raw_query` to exactly one outcome.
    ///
    /// Only store failures are returned as errors.
    pub fn resolve(&self, raw_query: &str) -> RepoResult<RouterOutcome> {
        let lowered = raw_query.to_lowercase();
        let outcome = self.route(raw_query, &lowered)?;
        info!(
            "event=query_resolve module=router status=ok route={} query_chars={}",
            outcome.route_name(),
            raw_query.chars().count()
        );
        Ok(outcome)
    }

    fn route(&self, raw_query: &str, lowered: &str) -> RepoResult<RouterOutcome> {
        if asks_for_todays_events(lowered) {
            let events = todays_events(&self.calendar, &self.clock)?;
            return Ok(RouterOutcome::EventsAnswer(events));
        }

        if mentions_classroom(lowered) {
            return Ok(match classroom_details(&self.classrooms, raw_query)? {
                Some(hit) => RouterOutcome::ClassroomAnswer {
                    room: hit.room,
                    details: hit.details,
                },
                None => RouterOutcome::NotFoundAnswer(Category::ClassroomNumbers),
            });
        }

        let Some(classification) = classify(raw_query) else {
            return Ok(RouterOutcome::Unresolved);
        };
        debug!(
            "event=query_classify module=router status=ok category={:?} source={:?}",
            classification.category, classification.source
        );

        let found = match_resource(
            &self.resources,
            classification.category,
            &classification.residual,
        )?;
        Ok(match found {
            Some(found) => RouterOutcome::ResourceAnswer {
                category: classification.category,
                name: found.resource.name,
                locator: found.resource.locator,
                query: classification.residual,
            },
            None => RouterOutcome::NotFoundAnswer(classification.category),
        })
    }
}

fn asks_for_todays_events(lowered: &str) -> bool {
    lowered.contains("today") && (lowered.contains("event") || lowered.contains("schedule"))
}

fn mentions_classroom(lowered: &str) -> bool {
    CLASSROOM_KEYWORDS
        .iter()
        .any(|keyword| lowered.contains(keyword))
}
