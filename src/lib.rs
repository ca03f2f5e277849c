//! Degree Requirement Auditing
//!
//! Evaluates a student's academic history against a course catalog:
//! per-course prerequisite eligibility, program and focus requirement
//! evaluation with deficiency reports, and a satisfaction-annotated
//! prerequisite dependency graph.

pub mod domain;
pub use domain::{Catalog, Config, Course, CourseCode, Credits, Student};

pub mod policy;
pub use policy::{DegreeType, InvalidProgramError, ProgramId};

pub mod audit;
pub use audit::{check_course_eligibility, evaluate, EvaluationResult};

pub mod graph;
pub use graph::PrerequisiteGraph;
