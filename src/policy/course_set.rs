//! Category membership for credit clauses.
//!
//! Degree requirements count credits over *categories* of courses ("any
//! 400-level CSC course", "any MAT 300/400-level course except a fixed
//! exclusion set"). [`CourseSet`] is a small composable matcher covering the
//! category shapes the rule tables need, with a [`Display`] rendering used in
//! deficiency reports.
//!
//! [`Display`]: std::fmt::Display

use std::fmt;

use crate::domain::CourseCode;

/// A declarative set of courses, matched by code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseSet {
    /// A literal list of course codes.
    Codes(&'static [&'static str]),
    /// Every course of one department at one level, e.g. all `CSC4xx`.
    Level {
        /// Three-letter department prefix.
        department: &'static str,
        /// Leading digit of the course number.
        level: u8,
    },
    /// Every course at one level, in any department.
    AnyLevel {
        /// Leading digit of the course number.
        level: u8,
    },
    /// Every course of the listed departments, at any level.
    Departments(&'static [&'static str]),
    /// The union of several sets.
    Union(&'static [CourseSet]),
    /// A base set minus an excluded set.
    Except {
        /// The set courses are drawn from.
        base: &'static CourseSet,
        /// Courses removed from the base set.
        excluded: &'static CourseSet,
    },
    /// The complement of a set.
    Not(&'static CourseSet),
}

impl CourseSet {
    /// Whether the given course code belongs to this set.
    #[must_use]
    pub fn contains(&self, code: &CourseCode) -> bool {
        match self {
            Self::Codes(codes) => codes.contains(&code.as_str()),
            Self::Level { department, level } => {
                code.department() == *department && code.level() == *level
            }
            Self::AnyLevel { level } => code.level() == *level,
            Self::Departments(departments) => departments.contains(&code.department()),
            Self::Union(sets) => sets.iter().any(|set| set.contains(code)),
            Self::Except { base, excluded } => base.contains(code) && !excluded.contains(code),
            Self::Not(set) => !set.contains(code),
        }
    }
}

impl fmt::Display for CourseSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Codes(codes) => write!(f, "{}", codes.join(", ")),
            Self::Level { department, level } => {
                write!(f, "any {level}00-level {department} course")
            }
            Self::AnyLevel { level } => write!(f, "any {level}00-level course"),
            Self::Departments(departments) => {
                write!(f, "any {} course", departments.join(" or "))
            }
            Self::Union(sets) => {
                for (i, set) in sets.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{set}")?;
                }
                Ok(())
            }
            Self::Except { base, excluded } => write!(f, "{base} (excluding {excluded})"),
            Self::Not(set) => write!(f, "any course other than {set}"),
        }
    }
}
