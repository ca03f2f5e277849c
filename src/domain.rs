//! Leaf data model: courses, the catalog, students and their transcripts.
//!
//! Everything in this module is either supplied by an external collaborator
//! (the catalog loader, the registration service) or derived on demand from
//! that data. The evaluation layers in [`crate::policy`], [`crate::audit`]
//! and [`crate::graph`] treat it as an immutable snapshot.

/// Course code parsing and comparison.
pub mod code;
pub use code::{CodeError, CourseCode, Session};

mod course;
pub use course::Course;

mod catalog;
pub use catalog::{Catalog, UnknownCourseError};

mod credits;
pub use credits::Credits;

/// Students, transcript records and the derived completion index.
pub mod student;
pub use student::{
    CompletionIndex, CreditWeight, Grade, Record, Student, StudentNumber, PASS_MARK,
};

mod config;
pub use config::Config;
