//! Closed category enumeration partitioning stored resources.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Semantic category of a stored resource.
///
/// Serialized and persisted by display label (`"Class Timetables"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "PDFs")]
    Pdfs,
    #[serde(rename = "Class Timetables")]
    ClassTimetables,
    #[serde(rename = "Event Schedules")]
    EventSchedules,
    #[serde(rename = "Exam Timetables")]
    ExamTimetables,
    #[serde(rename = "Classroom Numbers")]
    ClassroomNumbers,
    #[serde(rename = "Working Days & Holidays")]
    WorkingDaysAndHolidays,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Pdfs,
        Category::ClassTimetables,
        Category::EventSchedules,
        Category::ExamTimetables,
        Category::ClassroomNumbers,
        Category::WorkingDaysAndHolidays,
    ];

    /// Human-readable label, also the persisted form.
    pub fn label(self) -> &'static str {
        match self {
            Self::Pdfs => "PDFs",
            Self::ClassTimetables => "Class Timetables",
            Self::EventSchedules => "Event Schedules",
            Self::ExamTimetables => "Exam Timetables",
            Self::ClassroomNumbers => "Classroom Numbers",
            Self::WorkingDaysAndHolidays => "Working Days & Holidays",
        }
    }

    /// Parses a persisted label; `None` for anything outside the enumeration.
    pub fn from_label(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.label() == value)
    }

    /// Whether resources of this category are backed by an uploaded file.
    ///
    /// Classroom numbers and the working-day calendar live in their own
    /// tables instead.
    pub fn holds_files(self) -> bool {
        matches!(
            self,
            Self::Pdfs | Self::ClassTimetables | Self::EventSchedules | Self::ExamTimetables
        )
    }

    /// Lower-case file extensions accepted for uploads in this category.
    pub fn allowed_extensions(self) -> &'static [&'static str] {
        match self {
            Self::ClassTimetables | Self::ExamTimetables => &["jpg", "jpeg", "png", "pdf"],
            Self::Pdfs | Self::EventSchedules => &["pdf"],
            Self::ClassroomNumbers | Self::WorkingDaysAndHolidays => &[],
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
