//! Program requirement evaluation.
//!
//! One generic interpreter walks a program's [`RequirementRule`] and produces
//! an [`EvaluationResult`]. Every clause is evaluated, with no
//! short-circuiting, so a single pass yields the complete deficiency
//! report, and the boolean [`is_eligible`] and textual
//! [`describe_deficiency`] views are projections of the same result.

use std::fmt::Write as _;

use tracing::instrument;

use crate::{
    domain::{CompletionIndex, Credits, Student},
    policy::{
        requirement_rule, Clause, CreditMinimum, CreditRequirement, DegreeType, ProgramId,
    },
};

/// One unmet clause of a requirement rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deficiency {
    /// The clause's category label, e.g. `first-year requirements`.
    pub label: String,
    /// A listing of the course set composing the clause.
    pub courses: String,
    /// The remaining credit shortfall. Zero for gate clauses, and for credit
    /// clauses whose total is met but whose extra minimums are not.
    pub shortfall: Credits,
}

/// The outcome of evaluating a program rule for one student.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationResult {
    /// Whether every clause of the rule is satisfied.
    pub satisfied: bool,
    /// The unmet clauses, in rule order. Empty iff `satisfied`.
    pub deficiencies: Vec<Deficiency>,
}

/// Evaluates a program's requirement rule against a student's transcript.
///
/// Clauses are independent: each is checked against the full ledger, and the
/// result is the conjunction of all of them.
#[instrument(skip(student), fields(student = %student.number(), program = %program, degree = %degree))]
#[must_use]
pub fn evaluate(program: ProgramId, degree: DegreeType, student: &Student) -> EvaluationResult {
    let rule = requirement_rule(program, degree);
    let index = student.completion_index();

    let deficiencies: Vec<Deficiency> = rule
        .clauses
        .iter()
        .filter_map(|clause| clause_deficiency(clause, student, &index))
        .collect();

    let satisfied = deficiencies.is_empty();
    tracing::debug!(satisfied, unmet = deficiencies.len(), "evaluated program rule");
    EvaluationResult {
        satisfied,
        deficiencies,
    }
}

/// Whether the student satisfies every clause of the program rule.
///
/// A thin projection of [`evaluate`].
#[must_use]
pub fn is_eligible(program: ProgramId, degree: DegreeType, student: &Student) -> bool {
    evaluate(program, degree, student).satisfied
}

/// A human-readable summary of the missing requirements.
///
/// A thin projection of [`evaluate`].
#[must_use]
pub fn describe_deficiency(program: ProgramId, degree: DegreeType, student: &Student) -> String {
    evaluate(program, degree, student).to_string()
}

impl std::fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.satisfied {
            return write!(f, "no missing requirements, degree can be obtained");
        }
        let mut text = String::new();
        for (i, deficiency) in self.deficiencies.iter().enumerate() {
            if i > 0 {
                text.push_str("; ");
            }
            if deficiency.shortfall.is_zero() {
                let _ = write!(text, "missing {}: {}", deficiency.label, deficiency.courses);
            } else {
                let _ = write!(
                    text,
                    "missing {} credits from the following group of courses: {}",
                    deficiency.shortfall, deficiency.courses
                );
            }
        }
        write!(f, "{text}")
    }
}

fn clause_deficiency(
    clause: &Clause,
    student: &Student,
    index: &CompletionIndex<'_>,
) -> Option<Deficiency> {
    match clause {
        Clause::Gate {
            label,
            requirements,
        } => {
            if requirements.iter().all(|req| req.is_satisfied(index)) {
                return None;
            }
            let courses = requirements
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            Some(Deficiency {
                label: (*label).to_string(),
                courses,
                shortfall: Credits::ZERO,
            })
        }
        Clause::Credit {
            label,
            requirement,
            minimums,
        } => {
            let earned = category_total(requirement, student);
            let minimums_met = minimums
                .iter()
                .all(|minimum| minimum_met(minimum, requirement, student));
            if earned >= requirement.threshold && minimums_met {
                return None;
            }
            Some(Deficiency {
                label: (*label).to_string(),
                courses: requirement.category.to_string(),
                shortfall: requirement.threshold.saturating_sub(earned),
            })
        }
        Clause::DisjointCredit {
            label,
            first,
            second,
        } => {
            // A course counts toward the first category it matches, so the
            // two totals never share a record.
            let mut first_earned = Credits::ZERO;
            let mut second_earned = Credits::ZERO;
            for record in student.records() {
                if first.category.contains(record.code()) {
                    first_earned += record.weight().credits();
                } else if second.category.contains(record.code()) {
                    second_earned += record.weight().credits();
                }
            }
            if first_earned >= first.threshold && second_earned >= second.threshold {
                return None;
            }
            Some(Deficiency {
                label: (*label).to_string(),
                courses: format!("{}; {}", first.category, second.category),
                shortfall: first.threshold.saturating_sub(first_earned)
                    + second.threshold.saturating_sub(second_earned),
            })
        }
    }
}

/// Sums the credit weights of completed courses matching the category.
///
/// Grades are not consulted here: credit accumulation counts every completed
/// course, while gates and equivalence groups demand passes.
fn category_total(requirement: &CreditRequirement, student: &Student) -> Credits {
    student
        .records()
        .iter()
        .filter(|record| requirement.category.contains(record.code()))
        .map(|record| record.weight().credits())
        .sum()
}

fn minimum_met(
    minimum: &CreditMinimum,
    clause_requirement: &CreditRequirement,
    student: &Student,
) -> bool {
    match minimum {
        CreditMinimum::AtLeastOneOf(set) => student
            .records()
            .iter()
            .any(|record| set.contains(record.code())),
        CreditMinimum::SubTotal(sub) => {
            let earned: Credits = student
                .records()
                .iter()
                .filter(|record| {
                    clause_requirement.category.contains(record.code())
                        && sub.category.contains(record.code())
                })
                .map(|record| record.weight().credits())
                .sum();
            earned >= sub.threshold
        }
    }
}
