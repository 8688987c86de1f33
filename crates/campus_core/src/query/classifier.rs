//! Category classification for free-text queries.
//!
//! Two tiers: an ordered phrase table, then an academic-vocabulary
//! fallback for queries that never name their category.
//!
//! # Invariants
//! - Phrases are tried in table order and the first substring hit wins.
//! - Multi-word phrases precede the single words they contain.

use crate::model::category::Category;

/// Ordered phrase table. Earlier entries take precedence.
pub const CATEGORY_PHRASES: &[(&str, Category)] = &[
    ("exam timetable", Category::ExamTimetables),
    ("exam time table", Category::ExamTimetables),
    ("exam schedule", Category::ExamTimetables),
    ("examination", Category::ExamTimetables),
    ("event schedule", Category::EventSchedules),
    ("class schedule", Category::ClassTimetables),
    ("time table", Category::ClassTimetables),
    ("timetable", Category::ClassTimetables),
    ("working days", Category::WorkingDaysAndHolidays),
    ("holidays", Category::WorkingDaysAndHolidays),
    ("holiday", Category::WorkingDaysAndHolidays),
    ("calendar", Category::WorkingDaysAndHolidays),
    ("classroom", Category::ClassroomNumbers),
    ("schedule", Category::ClassTimetables),
    ("event", Category::EventSchedules),
    ("room", Category::ClassroomNumbers),
    ("class", Category::ClassroomNumbers),
    ("pdf", Category::Pdfs),
];

/// Academic vocabulary, matched anywhere in the query.
const EDUCATIONAL_TERMS: &[&str] = &[
    "semester",
    "sem",
    "year",
    "course",
    "branch",
    "department",
    "cse",
    "it",
    "ece",
    "mech",
    "civil",
];

const EXAM_TERMS: &[&str] = &["exam", "final", "mid", "test"];

/// How a classification was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationSource {
    /// A phrase from [`CATEGORY_PHRASES`] matched.
    Phrase(&'static str),
    /// No phrase matched but the query used academic vocabulary.
    Educational,
}

/// A classified query and the text left over for resource matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    pub residual: String,
    pub source: ClassificationSource,
}

/// Classifies `query`, or returns `None` when it is unclassified.
///
/// Phrase hits yield the lower-cased query with the first occurrence of the
/// phrase removed and trimmed. Fallback hits keep the query untouched.
pub fn classify(query: &str) -> Option<Classification> {
    let lowered = query.to_lowercase();

    if let Some(found) = classify_by_phrase(&lowered) {
        return Some(found);
    }

    if !EDUCATIONAL_TERMS.iter().any(|term| lowered.contains(term)) {
        return None;
    }

    let category = if EXAM_TERMS.iter().any(|term| lowered.contains(term)) {
        Category::ExamTimetables
    } else {
        Category::ClassTimetables
    };

    Some(Classification {
        category,
        residual: query.to_string(),
        source: ClassificationSource::Educational,
    })
}

fn classify_by_phrase(lowered: &str) -> Option<Classification> {
    CATEGORY_PHRASES.iter().find_map(|&(phrase, category)| {
        let start = lowered.find(phrase)?;
        let mut residual = String::with_capacity(lowered.len() - phrase.len());
        residual.push_str(&lowered[..start]);
        residual.push_str(&lowered[start + phrase.len()..]);

        Some(Classification {
            category,
            residual: residual.trim().to_string(),
            source: ClassificationSource::Phrase(phrase),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::{classify, Classification, ClassificationSource, CATEGORY_PHRASES};
    use crate::model::category::Category;

    fn phrase_hit(query: &str) -> Classification {
        classify(query).expect("query should classify")
    }

    #[test]
    fn phrase_match_removes_first_occurrence_and_trims() {
        let found = phrase_hit("Semester 3 Timetable");
        assert_eq!(found.category, Category::ClassTimetables);
        assert_eq!(found.residual, "semester 3");
        assert_eq!(found.source, ClassificationSource::Phrase("timetable"));
    }

    #[test]
    fn residual_keeps_later_occurrences_of_the_phrase() {
        let found = phrase_hit("pdf of the pdf guide");
        assert_eq!(found.category, Category::Pdfs);
        assert_eq!(found.residual, "of the pdf guide");
    }

    #[test]
    fn specific_exam_phrase_beats_generic_schedule() {
        let found = phrase_hit("schedule for the exam timetable of ece");
        assert_eq!(found.category, Category::ExamTimetables);
        assert_eq!(found.residual, "schedule for the  of ece");
    }

    #[test]
    fn event_schedule_beats_generic_event_and_schedule() {
        let found = phrase_hit("annual fest event schedule");
        assert_eq!(found.category, Category::EventSchedules);
        assert_eq!(found.residual, "annual fest");
    }

    #[test]
    fn holidays_is_matched_whole_before_holiday() {
        let found = phrase_hit("list of holidays 2026");
        assert_eq!(found.category, Category::WorkingDaysAndHolidays);
        assert_eq!(found.residual, "list of  2026");
    }

    #[test]
    fn multi_word_phrases_precede_the_words_they_contain() {
        for (index, (phrase, _)) in CATEGORY_PHRASES.iter().enumerate() {
            for (earlier, _) in &CATEGORY_PHRASES[..index] {
                assert!(
                    !phrase.contains(earlier),
                    "`{phrase}` is shadowed by earlier `{earlier}`"
                );
            }
        }
    }

    #[test]
    fn educational_fallback_picks_class_timetables_and_keeps_query() {
        let found = phrase_hit("  CSE 3rd Sem ");
        assert_eq!(found.category, Category::ClassTimetables);
        assert_eq!(found.residual, "  CSE 3rd Sem ");
        assert_eq!(found.source, ClassificationSource::Educational);
    }

    #[test]
    fn educational_fallback_detects_exam_terms() {
        let found = phrase_hit("mech final semester 6");
        assert_eq!(found.category, Category::ExamTimetables);
        assert_eq!(found.source, ClassificationSource::Educational);
    }

    #[test]
    fn educational_terms_match_inside_longer_words() {
        for query in ["btech-cse notes", "cse3 notes", "what is the capital of italy"] {
            let found = phrase_hit(query);
            assert_eq!(found.category, Category::ClassTimetables, "query `{query}`");
            assert_eq!(found.residual, query);
        }
    }

    #[test]
    fn unrelated_queries_are_unclassified() {
        assert_eq!(classify("who won the cricket match"), None);
        assert_eq!(classify(""), None);
    }

    #[test]
    fn classification_is_deterministic() {
        let query = "ECE mid term exam schedule";
        assert_eq!(classify(query), classify(query));
    }
}
