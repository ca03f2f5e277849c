//! Static academic policy: equivalence groups, course categories and the
//! program requirement rule tables.
//!
//! Policy is data, not code; the interpreters live in [`crate::audit`].

/// Course-equivalence groups and their satisfaction rules.
pub mod equivalence;
pub use equivalence::{EquivalenceGroup, GroupId, GroupRule, GROUPS};

mod course_set;
pub use course_set::CourseSet;

/// Requirement clauses and the per-program rule tables.
pub mod rules;
pub use rules::{
    requirement_rule, Clause, CreditMinimum, CreditRequirement, DegreeType, InvalidProgramError,
    ProgramId, Req, RequirementRule,
};
