//! Direct-answer lookups that bypass classification.

use crate::repo::calendar_repo::CalendarRepository;
use crate::repo::classroom_repo::ClassroomRepository;
use crate::repo::RepoResult;
use chrono::NaiveDate;

/// Words stripped from a classroom query before looking for a room token.
pub const CLASSROOM_KEYWORDS: [&str; 3] = ["classroom", "room", "class"];

/// Source of "today" for calendar lookups.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Clock pinned to one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Classroom details found for a query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassroomHit {
    /// Digit-bearing word that matched, if the lookup was by room number.
    pub room: Option<String>,
    pub details: String,
}

/// Events dated today. An empty list means "no events", not a failure.
pub fn todays_events<E, K>(calendar: &E, clock: &K) -> RepoResult<Vec<String>>
where
    E: CalendarRepository + ?Sized,
    K: Clock + ?Sized,
{
    calendar.events_on(clock.today())
}

/// Removes every classroom keyword from the lower-cased query and trims it.
pub fn strip_classroom_keywords(query: &str) -> String {
    let mut stripped = query.to_lowercase();
    for keyword in CLASSROOM_KEYWORDS {
        stripped = stripped.replace(keyword, "");
    }
    stripped.trim().to_string()
}

/// Resolves classroom details from a classroom-style query.
///
/// Digit-bearing words are tried first, in order. If none yields a record,
/// the whole stripped query is tried. A query with nothing left after
/// stripping matches the first stored classroom.
pub fn classroom_details<C: ClassroomRepository + ?Sized>(
    classrooms: &C,
    query: &str,
) -> RepoResult<Option<ClassroomHit>> {
    let stripped = strip_classroom_keywords(query);

    for word in stripped
        .split_whitespace()
        .filter(|word| word.chars().any(|c| c.is_ascii_digit()))
    {
        if let Some(record) = classrooms.find_by_room_fragment(word)? {
            return Ok(Some(ClassroomHit {
                room: Some(word.to_string()),
                details: record.details,
            }));
        }
    }

    Ok(classrooms
        .find_by_room_fragment(&stripped)?
        .map(|record| ClassroomHit {
            room: None,
            details: record.details,
        }))
}

#[cfg(test)]
mod tests {
    use super::strip_classroom_keywords;

    #[test]
    fn strip_removes_keywords_everywhere() {
        assert_eq!(strip_classroom_keywords("Room 204"), "204");
        assert_eq!(strip_classroom_keywords("where is classroom B-12?"), "where is  b-12?");
        assert_eq!(strip_classroom_keywords("class"), "");
    }
}
