//! The requirement evaluation engine.
//!
//! Two entry points: per-course prerequisite checks in [`eligibility`], and
//! whole-program requirement evaluation in [`engine`]. Both are pure
//! functions over a catalog/student snapshot.

/// Per-course prerequisite checking.
pub mod eligibility;
pub use eligibility::{check_course_eligibility, eligible_courses, entry_satisfied};

/// Program requirement evaluation and deficiency reporting.
pub mod engine;
pub use engine::{describe_deficiency, evaluate, is_eligible, Deficiency, EvaluationResult};
