use serde::{Deserialize, Serialize};

use crate::domain::CourseCode;

/// A course in the catalog.
///
/// Courses are immutable once loaded: the core reads them but never mutates
/// them. Prerequisite (and recommended/corequisite/exclusion) entries are kept
/// as the raw strings supplied by the catalog source; an empty entry means
/// "no requirement" and is skipped during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// The unique course code.
    pub code: CourseCode,
    /// The course title.
    pub title: String,
    /// Free-text course description.
    #[serde(default)]
    pub description: String,
    /// Raw prerequisite entries, in catalog order. May contain empty strings.
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// Courses recommended before taking this one.
    #[serde(default)]
    pub recommended: Vec<String>,
    /// Courses to be taken at the same time.
    #[serde(default)]
    pub corequisites: Vec<String>,
    /// Courses whose content overlaps enough to exclude enrolment.
    #[serde(default)]
    pub exclusions: Vec<String>,
    /// Breadth requirement category (1–5), or 0 when the course satisfies
    /// none.
    #[serde(default)]
    pub breadth: u8,
}

impl Course {
    /// Creates a course with no requirements and an empty description.
    #[must_use]
    pub fn new(code: CourseCode, title: impl Into<String>) -> Self {
        Self {
            code,
            title: title.into(),
            description: String::new(),
            prerequisites: Vec::new(),
            recommended: Vec::new(),
            corequisites: Vec::new(),
            exclusions: Vec::new(),
            breadth: 0,
        }
    }

    /// Sets the prerequisite entries, consuming and returning the course.
    #[must_use]
    pub fn with_prerequisites<I, S>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = entries.into_iter().map(Into::into).collect();
        self
    }

    /// The breadth category this course satisfies, if any.
    #[must_use]
    pub fn breadth_category(&self) -> Option<u8> {
        (1..=5).contains(&self.breadth).then_some(self.breadth)
    }
}
