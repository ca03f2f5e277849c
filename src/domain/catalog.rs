use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Course, CourseCode};

/// The full set of courses known to the system, keyed by course code.
///
/// A catalog is supplied fully populated by an external loader and is
/// read-only for the duration of any evaluation; operations take it as an
/// explicit parameter so every call sees one consistent snapshot. Iteration
/// is in code order, which keeps downstream consumers (notably the graph
/// builder) deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    courses: BTreeMap<CourseCode, Course>,
}

impl Catalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a course, replacing (and returning) any existing course with the
    /// same code. Codes are unique within a catalog.
    pub fn insert(&mut self, course: Course) -> Option<Course> {
        self.courses.insert(course.code.clone(), course)
    }

    /// Looks up a course by code.
    #[must_use]
    pub fn get(&self, code: &CourseCode) -> Option<&Course> {
        self.courses.get(code)
    }

    /// Whether the catalog contains the given code.
    #[must_use]
    pub fn contains(&self, code: &CourseCode) -> bool {
        self.courses.contains_key(code)
    }

    /// The number of courses in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Iterates over all courses in code order.
    pub fn iter(&self) -> impl Iterator<Item = &Course> + '_ {
        self.courses.values()
    }

    /// Iterates over the courses of a single department, in code order.
    pub fn department<'a>(&'a self, department: &'a str) -> impl Iterator<Item = &'a Course> + 'a {
        self.courses
            .values()
            .filter(move |course| course.code.department() == department)
    }
}

impl FromIterator<Course> for Catalog {
    fn from_iter<I: IntoIterator<Item = Course>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for course in iter {
            catalog.insert(course);
        }
        catalog
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Course;
    type IntoIter = std::collections::btree_map::Values<'a, CourseCode, Course>;

    fn into_iter(self) -> Self::IntoIter {
        self.courses.values()
    }
}

/// Error returned when a requested course code is absent from the catalog.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("course {0} not found in the catalog")]
pub struct UnknownCourseError(pub CourseCode);
