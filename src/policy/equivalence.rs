//! Course-equivalence groups.
//!
//! A prerequisite entry such as `MAT223H1` rarely stands alone: the calendar
//! treats a fixed set of alternatives (`MAT221H1` / `MAT223H1` / `MAT240H1`)
//! as one logical requirement. The groups here are static policy data, not derived from
//! the catalog, and each carries the rule for how many
//! of its members satisfy the requirement.

use std::fmt;

use crate::domain::CompletionIndex;

/// Identifies one of the fixed equivalence groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupId {
    /// First-year computer science: `CSC110Y1`+`CSC111H1`, or the older
    /// `CSC108H1`+`CSC148H1`+`CSC165H1` sequence.
    IntroCs,
    /// First-year calculus: `MAT135H1`+`MAT136H1`, or one of
    /// `MAT137Y1`/`MAT157Y1`.
    Calculus,
    /// Linear algebra: any of `MAT221H1`/`MAT223H1`/`MAT240H1`.
    LinearAlgebra,
    /// Multivariable calculus: any of `MAT235Y1`/`MAT237Y1`/`MAT257Y1`.
    MultivariableCalculus,
    /// Probability and statistics: any of
    /// `STA237H1`/`STA247H1`/`STA255H1`/`STA257H1`.
    Statistics,
    /// Theory of computation: either of `CSC236H1`/`CSC240H1`.
    Theory,
    /// Data structures and analysis: either of `CSC263H1`/`CSC265H1`.
    DataStructures,
}

/// The satisfaction rule of an equivalence group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupRule {
    /// Every member is required.
    AllOf(&'static [&'static str]),
    /// At least one member is required.
    AnyOf(&'static [&'static str]),
    /// Either branch satisfies the requirement.
    Either(&'static GroupRule, &'static GroupRule),
}

impl GroupRule {
    /// Applies the rule against a completion index. Members count only when
    /// completed with a passing grade.
    #[must_use]
    pub fn is_satisfied(&self, index: &CompletionIndex<'_>) -> bool {
        match self {
            Self::AllOf(members) => members.iter().all(|code| index.passed(code)),
            Self::AnyOf(members) => members.iter().any(|code| index.passed(code)),
            Self::Either(left, right) => left.is_satisfied(index) || right.is_satisfied(index),
        }
    }

    /// Collects every member course code mentioned by the rule.
    fn collect_members(&self, out: &mut Vec<&'static str>) {
        match self {
            Self::AllOf(members) | Self::AnyOf(members) => out.extend_from_slice(members),
            Self::Either(left, right) => {
                left.collect_members(out);
                right.collect_members(out);
            }
        }
    }
}

impl fmt::Display for GroupRule {
    /// Renders the rule as a human-readable alternative listing, e.g.
    /// `(CSC110Y1 + CSC111H1) / (CSC108H1 + CSC148H1 + CSC165H1)`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::AllOf(members) => write!(f, "{}", members.join(" + ")),
            Self::AnyOf(members) => write!(f, "{}", members.join(" / ")),
            Self::Either(left, right) => {
                let bracket = |f: &mut fmt::Formatter, rule: &Self| match rule {
                    Self::AllOf(members) if members.len() > 1 => write!(f, "({rule})"),
                    _ => write!(f, "{rule}"),
                };
                bracket(f, left)?;
                write!(f, " / ")?;
                bracket(f, right)
            }
        }
    }
}

/// One equivalence group: identifier plus satisfaction rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquivalenceGroup {
    /// The group's canonical identifier.
    pub id: GroupId,
    /// How the group's members satisfy the requirement.
    pub rule: GroupRule,
}

impl EquivalenceGroup {
    /// Whether the group is satisfied under the given completion index.
    #[must_use]
    pub fn is_satisfied(&self, index: &CompletionIndex<'_>) -> bool {
        self.rule.is_satisfied(index)
    }

    /// Every course code that belongs to the group.
    #[must_use]
    pub fn members(&self) -> Vec<&'static str> {
        let mut members = Vec::new();
        self.rule.collect_members(&mut members);
        members
    }

    /// The human-readable alternative listing, used to label graph nodes.
    #[must_use]
    pub fn label(&self) -> String {
        self.rule.to_string()
    }
}

/// The fixed equivalence groups recognised by the system.
pub const GROUPS: &[EquivalenceGroup] = &[
    EquivalenceGroup {
        id: GroupId::IntroCs,
        rule: GroupRule::Either(
            &GroupRule::AllOf(&["CSC110Y1", "CSC111H1"]),
            &GroupRule::AllOf(&["CSC108H1", "CSC148H1", "CSC165H1"]),
        ),
    },
    EquivalenceGroup {
        id: GroupId::Calculus,
        rule: GroupRule::Either(
            &GroupRule::AllOf(&["MAT135H1", "MAT136H1"]),
            &GroupRule::AnyOf(&["MAT137Y1", "MAT157Y1"]),
        ),
    },
    EquivalenceGroup {
        id: GroupId::LinearAlgebra,
        rule: GroupRule::AnyOf(&["MAT221H1", "MAT223H1", "MAT240H1"]),
    },
    EquivalenceGroup {
        id: GroupId::MultivariableCalculus,
        rule: GroupRule::AnyOf(&["MAT235Y1", "MAT237Y1", "MAT257Y1"]),
    },
    EquivalenceGroup {
        id: GroupId::Statistics,
        rule: GroupRule::AnyOf(&["STA237H1", "STA247H1", "STA255H1", "STA257H1"]),
    },
    EquivalenceGroup {
        id: GroupId::Theory,
        rule: GroupRule::AnyOf(&["CSC236H1", "CSC240H1"]),
    },
    EquivalenceGroup {
        id: GroupId::DataStructures,
        rule: GroupRule::AnyOf(&["CSC263H1", "CSC265H1"]),
    },
];

/// Finds the group an individual course code belongs to, if any.
///
/// A code outside every group is a standalone requirement.
#[must_use]
pub fn resolve(code: &str) -> Option<&'static EquivalenceGroup> {
    GROUPS
        .iter()
        .find(|group| group.members().contains(&code))
}

/// Looks up a group by identifier.
#[must_use]
pub fn group(id: GroupId) -> &'static EquivalenceGroup {
    GROUPS
        .iter()
        .find(|group| group.id == id)
        .expect("all group ids are in the table")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CourseCode, CreditWeight, Grade, Record, Student, StudentNumber};
    use non_empty_string::NonEmptyString;

    fn student_with(codes: &[(&str, u8)]) -> Student {
        let mut student = Student::new(
            StudentNumber::new("0000000001").unwrap(),
            NonEmptyString::new("Test Student".to_string()).unwrap(),
        );
        for (code, grade) in codes {
            student.record_completion(Record::new(
                CourseCode::new(*code).unwrap(),
                Grade::new(*grade).unwrap(),
                CreditWeight::Half,
            ));
        }
        student
    }

    #[test]
    fn resolves_members_to_their_group() {
        assert_eq!(resolve("CSC108H1").unwrap().id, GroupId::IntroCs);
        assert_eq!(resolve("MAT157Y1").unwrap().id, GroupId::Calculus);
        assert_eq!(resolve("STA255H1").unwrap().id, GroupId::Statistics);
        assert!(resolve("CSC207H1").is_none());
    }

    #[test]
    fn all_of_branch_requires_every_member() {
        let group = group(GroupId::IntroCs);

        let complete = student_with(&[("CSC108H1", 80), ("CSC148H1", 80), ("CSC165H1", 80)]);
        assert!(group.is_satisfied(&complete.completion_index()));

        let partial = student_with(&[("CSC108H1", 80)]);
        assert!(!group.is_satisfied(&partial.completion_index()));
    }

    #[test]
    fn either_branch_suffices() {
        let group = group(GroupId::Calculus);

        let pair = student_with(&[("MAT135H1", 60), ("MAT136H1", 60)]);
        assert!(group.is_satisfied(&pair.completion_index()));

        let single = student_with(&[("MAT157Y1", 60)]);
        assert!(group.is_satisfied(&single.completion_index()));

        let half_pair = student_with(&[("MAT135H1", 60)]);
        assert!(!group.is_satisfied(&half_pair.completion_index()));
    }

    #[test]
    fn pass_mark_boundary() {
        let group = group(GroupId::LinearAlgebra);
        assert!(group.is_satisfied(&student_with(&[("MAT223H1", 50)]).completion_index()));
        assert!(!group.is_satisfied(&student_with(&[("MAT223H1", 49)]).completion_index()));
    }

    #[test]
    fn adding_a_pass_is_monotonic() {
        let group = group(GroupId::Statistics);
        let mut student = student_with(&[("STA247H1", 70)]);
        assert!(group.is_satisfied(&student.completion_index()));

        student.record_completion(Record::new(
            CourseCode::new("STA257H1").unwrap(),
            Grade::new(90).unwrap(),
            CreditWeight::Half,
        ));
        assert!(group.is_satisfied(&student.completion_index()));
    }

    #[test]
    fn labels_render_alternative_listings() {
        assert_eq!(
            group(GroupId::IntroCs).label(),
            "(CSC110Y1 + CSC111H1) / (CSC108H1 + CSC148H1 + CSC165H1)"
        );
        assert_eq!(
            group(GroupId::Calculus).label(),
            "(MAT135H1 + MAT136H1) / MAT137Y1 / MAT157Y1"
        );
        assert_eq!(
            group(GroupId::Theory).label(),
            "CSC236H1 / CSC240H1"
        );
    }
}
