//! Declarative program requirement rules.
//!
//! Each program (the computer science major/specialist and its focus areas)
//! maps to an ordered list of [`Clause`]s, all of which must hold. The
//! clauses are plain data; one generic interpreter in [`crate::audit`]
//! evaluates them, so the boolean verdict and the deficiency report are
//! always projections of the same policy tables.

use std::{fmt, str::FromStr};

use nonempty::{nonempty, NonEmpty};

use crate::{
    domain::{CompletionIndex, Credits},
    policy::{course_set::CourseSet, equivalence, equivalence::GroupId},
};

/// A single boolean requirement inside a gate clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Req {
    /// A specific course, completed with a passing grade.
    Course(&'static str),
    /// An equivalence group, satisfied per its rule.
    Group(GroupId),
    /// At least one of the nested requirements.
    AnyOf(&'static [Req]),
    /// All of the nested requirements.
    AllOf(&'static [Req]),
}

impl Req {
    /// Whether the requirement holds under the given completion index.
    #[must_use]
    pub fn is_satisfied(&self, index: &CompletionIndex<'_>) -> bool {
        match self {
            Self::Course(code) => index.passed(code),
            Self::Group(id) => equivalence::group(*id).is_satisfied(index),
            Self::AnyOf(reqs) => reqs.iter().any(|req| req.is_satisfied(index)),
            Self::AllOf(reqs) => reqs.iter().all(|req| req.is_satisfied(index)),
        }
    }
}

impl fmt::Display for Req {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn join(f: &mut fmt::Formatter, reqs: &[Req], sep: &str) -> fmt::Result {
            for (i, req) in reqs.iter().enumerate() {
                if i > 0 {
                    write!(f, "{sep}")?;
                }
                match req {
                    Req::AnyOf(_) | Req::AllOf(_) => write!(f, "({req})")?,
                    _ => write!(f, "{req}")?,
                }
            }
            Ok(())
        }

        match self {
            Self::Course(code) => write!(f, "{code}"),
            Self::Group(id) => write!(f, "{}", equivalence::group(*id).label()),
            Self::AnyOf(reqs) => join(f, reqs, " / "),
            Self::AllOf(reqs) => join(f, reqs, " + "),
        }
    }
}

/// A credit total demanded over a category of courses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreditRequirement {
    /// The category courses are counted from.
    pub category: CourseSet,
    /// The cumulative credit weight required.
    pub threshold: Credits,
}

/// An extra condition attached to a credit clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditMinimum {
    /// At least one completed course, anywhere in the ledger, from the set.
    AtLeastOneOf(CourseSet),
    /// A minimum credit sub-total over the clause's category courses that
    /// also belong to the given set.
    SubTotal(CreditRequirement),
}

/// One independently-evaluated clause of a requirement rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
    /// A boolean gate: every requirement must hold.
    Gate {
        /// Category label reported when the gate is unmet.
        label: &'static str,
        /// The requirements, all of which must be satisfied.
        requirements: &'static [Req],
    },
    /// A credit threshold over a course category, with optional extra
    /// minimums.
    Credit {
        /// Category label reported when the clause is unmet.
        label: &'static str,
        /// The category and its credit threshold.
        requirement: CreditRequirement,
        /// Sub-conditions which must also hold.
        minimums: &'static [CreditMinimum],
    },
    /// Two credit thresholds where a course counts only toward the first set
    /// it matches, with no double-counting between them.
    DisjointCredit {
        /// Category label reported when the clause is unmet.
        label: &'static str,
        /// The first (priority) category and threshold.
        first: CreditRequirement,
        /// The second category and threshold, counting only courses not
        /// already counted toward the first.
        second: CreditRequirement,
    },
}

impl Clause {
    /// The clause's category label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Gate { label, .. }
            | Self::Credit { label, .. }
            | Self::DisjointCredit { label, .. } => label,
        }
    }
}

/// A program's full requirement rule: an ordered, non-empty clause list.
///
/// Overall satisfaction is the conjunction of all clauses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequirementRule {
    /// The program the rule belongs to.
    pub program: ProgramId,
    /// The degree type the rule was built for.
    pub degree: DegreeType,
    /// The clauses, in reporting order.
    pub clauses: NonEmpty<Clause>,
}

/// The programs with encoded requirement rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ProgramId {
    /// The computer science program itself (major or specialist).
    ComputerScience,
    /// Scientific computing focus.
    ScientificComputing,
    /// Game design focus.
    GameDesign,
    /// Computer vision focus.
    ComputerVision,
    /// Computational linguistics and natural language processing focus.
    ComputationalLinguistics,
    /// Artificial intelligence focus.
    ArtificialIntelligence,
    /// Web and internet technologies focus.
    WebTechnologies,
    /// Theory of computation focus.
    TheoryOfComputation,
    /// Human-computer interaction focus.
    HumanComputerInteraction,
    /// Computer systems focus.
    ComputerSystems,
}

impl ProgramId {
    /// Every accepted program identifier.
    pub const ALL: [Self; 10] = [
        Self::ComputerScience,
        Self::ScientificComputing,
        Self::GameDesign,
        Self::ComputerVision,
        Self::ComputationalLinguistics,
        Self::ArtificialIntelligence,
        Self::WebTechnologies,
        Self::TheoryOfComputation,
        Self::HumanComputerInteraction,
        Self::ComputerSystems,
    ];

    /// The calendar name of the program.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ComputerScience => "computer science",
            Self::ScientificComputing => "scientific computing",
            Self::GameDesign => "game design",
            Self::ComputerVision => "computer vision",
            Self::ComputationalLinguistics => {
                "computational linguistics and natural language processing"
            }
            Self::ArtificialIntelligence => "artificial intelligence",
            Self::WebTechnologies => "web and internet technologies",
            Self::TheoryOfComputation => "theory of computation",
            Self::HumanComputerInteraction => "human-computer interaction",
            Self::ComputerSystems => "computer systems",
        }
    }
}

impl fmt::Display for ProgramId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ProgramId {
    type Err = InvalidProgramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|program| program.name() == s)
            .ok_or_else(|| InvalidProgramError(s.to_string()))
    }
}

/// The degree variants a program rule can be evaluated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DegreeType {
    /// The major variant.
    Major,
    /// The specialist variant.
    Specialist,
}

impl fmt::Display for DegreeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Major => write!(f, "major"),
            Self::Specialist => write!(f, "specialist"),
        }
    }
}

impl FromStr for DegreeType {
    type Err = InvalidProgramError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(Self::Major),
            "specialist" => Ok(Self::Specialist),
            _ => Err(InvalidProgramError(s.to_string())),
        }
    }
}

/// Error returned for a program or degree identifier outside the fixed
/// accepted set.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown program or degree identifier '{0}'")]
pub struct InvalidProgramError(pub String);

const CSC2: CourseSet = CourseSet::Level {
    department: "CSC",
    level: 2,
};
const CSC3: CourseSet = CourseSet::Level {
    department: "CSC",
    level: 3,
};
const CSC4: CourseSet = CourseSet::Level {
    department: "CSC",
    level: 4,
};
const STA3: CourseSet = CourseSet::Level {
    department: "STA",
    level: 3,
};
const STA4: CourseSet = CourseSet::Level {
    department: "STA",
    level: 4,
};
const MAT4: CourseSet = CourseSet::Level {
    department: "MAT",
    level: 4,
};

/// 300/400-level MAT courses, less the calendar's fixed exclusions.
const LATER_MAT: CourseSet = CourseSet::Except {
    base: &CourseSet::Union(&[
        CourseSet::Level {
            department: "MAT",
            level: 3,
        },
        MAT4,
    ]),
    excluded: &CourseSet::Codes(&["MAT329Y1", "MAT390H1", "MAT391H1"]),
};

const MULTIVARIABLE_CALCULUS: CourseSet = CourseSet::Codes(&["MAT235Y1", "MAT237Y1", "MAT257Y1"]);

/// First-year requirements, shared by the major and specialist rules. The
/// `CSC165H1` slot may also be filled by `CSC240H1`.
const FIRST_YEAR: &[Req] = &[
    Req::AnyOf(&[
        Req::AllOf(&[
            Req::Course("CSC108H1"),
            Req::Course("CSC148H1"),
            Req::AnyOf(&[Req::Course("CSC165H1"), Req::Course("CSC240H1")]),
        ]),
        Req::AllOf(&[Req::Course("CSC110Y1"), Req::Course("CSC111H1")]),
    ]),
    Req::Group(GroupId::Calculus),
];

const MAJOR_SECOND_YEAR: &[Req] = &[
    Req::Course("CSC207H1"),
    Req::Group(GroupId::Theory),
    Req::Course("CSC258H1"),
    Req::Group(GroupId::DataStructures),
    Req::Group(GroupId::Statistics),
];

const MAJOR_LATER_YEARS: Clause = Clause::Credit {
    label: "later-year requirements",
    requirement: CreditRequirement {
        category: CourseSet::Union(&[
            CSC2,
            CSC3,
            CSC4,
            CourseSet::Codes(&[
                "MAT223H1", "MAT240H1", "MAT235Y1", "MAT237Y1", "MAT257Y1", "STA414H1",
            ]),
            LATER_MAT,
        ]),
        threshold: Credits::from_halves(6),
    },
    minimums: &[
        CreditMinimum::AtLeastOneOf(CSC4),
        CreditMinimum::AtLeastOneOf(CourseSet::AnyLevel { level: 4 }),
        CreditMinimum::AtLeastOneOf(CourseSet::Codes(&["MAT223H1", "MAT240H1"])),
        CreditMinimum::AtLeastOneOf(MULTIVARIABLE_CALCULUS),
    ],
};

const SPECIALIST_SECOND_YEAR: &[Req] = &[
    Req::Course("CSC207H1"),
    Req::Course("CSC209H1"),
    Req::Group(GroupId::Theory),
    Req::Course("CSC258H1"),
    Req::Group(GroupId::DataStructures),
    Req::AnyOf(&[Req::Course("MAT223H1"), Req::Course("MAT240H1")]),
    Req::Group(GroupId::Statistics),
];

const SPECIALIST_LATER_YEARS: Clause = Clause::Credit {
    label: "later-year requirements",
    requirement: CreditRequirement {
        category: CourseSet::Union(&[
            CSC3,
            CSC4,
            CourseSet::Codes(&[
                "CSC369H1", "CSC373H1", "MAT224H1", "MAT247H1", "MAT235Y1", "MAT237Y1", "MAT257Y1",
                "STA238H1", "STA248H1", "STA261H1",
            ]),
            STA3,
            STA4,
            LATER_MAT,
        ]),
        threshold: Credits::from_halves(12),
    },
    minimums: &[
        CreditMinimum::AtLeastOneOf(MULTIVARIABLE_CALCULUS),
        CreditMinimum::SubTotal(CreditRequirement {
            category: CSC4,
            threshold: Credits::from_halves(3),
        }),
        CreditMinimum::SubTotal(CreditRequirement {
            category: CourseSet::Not(&CourseSet::Departments(&["MAT", "STA"])),
            threshold: Credits::from_halves(8),
        }),
    ],
};

/// Builds the requirement rule for a program and degree type.
///
/// The focus rules are identical for both degree types; the computer science
/// rule differs between major and specialist.
#[must_use]
pub fn requirement_rule(program: ProgramId, degree: DegreeType) -> RequirementRule {
    let clauses = match (program, degree) {
        (ProgramId::ComputerScience, DegreeType::Major) => nonempty![
            Clause::Gate {
                label: "first-year requirements",
                requirements: FIRST_YEAR,
            },
            Clause::Gate {
                label: "second-year requirements",
                requirements: MAJOR_SECOND_YEAR,
            },
            MAJOR_LATER_YEARS,
        ],
        (ProgramId::ComputerScience, DegreeType::Specialist) => nonempty![
            Clause::Gate {
                label: "first-year requirements",
                requirements: FIRST_YEAR,
            },
            Clause::Gate {
                label: "second-year requirements",
                requirements: SPECIALIST_SECOND_YEAR,
            },
            SPECIALIST_LATER_YEARS,
        ],
        (ProgramId::ScientificComputing, _) => nonempty![
            Clause::Gate {
                label: "multivariable calculus",
                requirements: &[Req::Group(GroupId::MultivariableCalculus)],
            },
            Clause::Credit {
                label: "numerical computation courses",
                requirement: CreditRequirement {
                    category: CourseSet::Codes(&[
                        "CSC336H1", "CSC436H1", "CSC446H1", "CSC456H1", "CSC466H1",
                    ]),
                    threshold: Credits::from_halves(3),
                },
                minimums: &[],
            },
            Clause::Credit {
                label: "applications courses",
                requirement: CreditRequirement {
                    category: CourseSet::Codes(&[
                        "CSC317H1", "CSC320H1", "CSC417H1", "CSC418H1", "CSC419H1", "CSC311H1",
                        "CSC411H1", "CSC343H1", "CSC384H1", "CSC358H1", "CSC457H1", "CSC458H1",
                    ]),
                    threshold: Credits::from_halves(2),
                },
                minimums: &[],
            },
        ],
        (ProgramId::GameDesign, _) => nonempty![Clause::Credit {
            label: "game design courses",
            requirement: CreditRequirement {
                category: CourseSet::Codes(&[
                    "CSC300H1", "CSC301H1", "CSC318H1", "CSC384H1", "CSC317H1", "CSC417H1",
                    "CSC418H1", "CSC419H1", "CSC404H1",
                ]),
                threshold: Credits::from_halves(6),
            },
            minimums: &[],
        }],
        (ProgramId::ComputerVision, _) => nonempty![
            Clause::Credit {
                label: "vision foundations",
                requirement: CreditRequirement {
                    category: CourseSet::Codes(&[
                        "MAT235Y1", "MAT237Y1", "MAT257Y1", "CSC320H1", "CSC336H1", "CSC311H1",
                        "CSC411H1", "CSC420H1",
                    ]),
                    threshold: Credits::from_halves(5),
                },
                minimums: &[],
            },
            Clause::Credit {
                label: "vision electives",
                requirement: CreditRequirement {
                    category: CourseSet::Codes(&[
                        "CSC412H1", "CSC417H1", "CSC317H1", "CSC418H1", "CSC419H1", "CSC2503H",
                    ]),
                    threshold: Credits::from_halves(1),
                },
                minimums: &[],
            },
        ],
        (ProgramId::ComputationalLinguistics, _) => nonempty![
            Clause::Gate {
                label: "core linguistics courses",
                requirements: &[
                    Req::Course("CSC318H1"),
                    Req::Course("CSC401H1"),
                    Req::Course("CSC485H1"),
                ],
            },
            Clause::Credit {
                label: "language processing electives",
                requirement: CreditRequirement {
                    category: CourseSet::Codes(&[
                        "CSC309H1", "CSC413H1", "CSC421H1", "CSC321H1", "CSC311H1", "CSC411H1",
                        "CSC428H1", "CSC486H1",
                    ]),
                    threshold: Credits::from_halves(3),
                },
                minimums: &[],
            },
        ],
        (ProgramId::ArtificialIntelligence, _) => nonempty![
            Clause::Credit {
                label: "mathematical foundations",
                requirement: CreditRequirement {
                    category: CourseSet::Codes(&[
                        "CSC336H1", "MAT235Y1", "MAT237Y1", "MAT257Y1", "MAT224H1", "MAT247H1",
                        "STA238H1", "STA248H1", "STA261H1", "STA302H1", "STA347H1",
                    ]),
                    threshold: Credits::from_halves(2),
                },
                minimums: &[],
            },
            Clause::Credit {
                label: "artificial intelligence electives",
                requirement: CreditRequirement {
                    category: CourseSet::Codes(&[
                        "CSC401H1", "CSC485H1", "CSC320H1", "CSC420H1", "CSC413H1", "CSC421H1",
                        "CSC321H1", "CSC311H1", "CSC411H1", "STA314H1", "CSC412H1", "STA414H1",
                        "CSC304H1", "CSC384H1", "CSC486H1",
                    ]),
                    threshold: Credits::from_halves(5),
                },
                minimums: &[],
            },
        ],
        (ProgramId::WebTechnologies, _) => nonempty![Clause::Credit {
            label: "web and internet technology courses",
            requirement: CreditRequirement {
                category: CourseSet::Codes(&[
                    "STA238H1", "STA248H1", "STA261H1", "CSC309H1", "CSC343H1", "CSC358H1",
                    "CSC457H1", "CSC458H1", "CSC311H1", "CSC411H1", "CSC367H1", "CSC443H1",
                    "CSC469H1",
                ]),
                threshold: Credits::from_halves(7),
            },
            minimums: &[],
        }],
        (ProgramId::TheoryOfComputation, _) => nonempty![
            Clause::Gate {
                label: "calculus and computability",
                requirements: &[
                    Req::AnyOf(&[
                        Req::Course("MAT137Y1"),
                        Req::Course("MAT157Y1"),
                        Req::Course("MAT237Y1"),
                    ]),
                    Req::Course("CSC463H1"),
                ],
            },
            Clause::Credit {
                label: "theory core courses",
                requirement: CreditRequirement {
                    category: CourseSet::Codes(&[
                        "CSC304H1", "CSC336H1", "CSC438H1", "CSC448H1", "CSC473H1", "MAT309H1",
                        "MAT332H1", "MAT344H1",
                    ]),
                    threshold: Credits::from_halves(4),
                },
                minimums: &[],
            },
            Clause::Credit {
                label: "mathematics electives",
                requirement: CreditRequirement {
                    category: CourseSet::Union(&[
                        CourseSet::Codes(&[
                            "MAT224H1", "MAT247H1", "MAT237Y1", "MAT257Y1", "MAT244H1", "MAT267H1",
                            "MAT301H1", "MAT347Y1", "MAT315H1", "MAT327H1", "MAT334H1", "MAT354H1",
                            "MAT335H1", "MAT337H1", "MAT357H1", "STA238H1", "STA248H1", "STA261H1",
                            "STA347H1",
                        ]),
                        MAT4,
                    ]),
                    threshold: Credits::from_halves(4),
                },
                minimums: &[],
            },
        ],
        (ProgramId::HumanComputerInteraction, _) => nonempty![
            Clause::Gate {
                label: "core interaction design courses",
                requirements: &[
                    Req::Course("CSC300H1"),
                    Req::Course("CSC301H1"),
                    Req::Course("CSC318H1"),
                    Req::Course("CSC428H1"),
                ],
            },
            Clause::Credit {
                label: "interaction electives",
                requirement: CreditRequirement {
                    category: CourseSet::Codes(&[
                        "CSC309H1", "CSC320H1", "CSC321H1", "CSC343H1", "CSC384H1", "CSC401H1",
                        "CSC404H1", "CSC418H1", "CSC485H1", "CSC490H1", "CSC491H1",
                    ]),
                    threshold: Credits::from_halves(2),
                },
                minimums: &[],
            },
        ],
        (ProgramId::ComputerSystems, _) => nonempty![
            Clause::Gate {
                label: "core systems courses",
                requirements: &[
                    Req::Course("CSC343H1"),
                    Req::Course("CSC367H1"),
                    Req::Course("CSC469H1"),
                ],
            },
            Clause::DisjointCredit {
                label: "networks and systems electives",
                first: CreditRequirement {
                    category: CourseSet::Codes(&["CSC358H1", "CSC457H1", "CSC443H1", "CSC458H1"]),
                    threshold: Credits::from_halves(2),
                },
                second: CreditRequirement {
                    category: CourseSet::Codes(&[
                        "CSC358H1", "CSC457H1", "CSC458H1", "CSC324H1", "CSC385H1", "CSC488H1",
                    ]),
                    threshold: Credits::from_halves(2),
                },
            },
        ],
    };

    RequirementRule {
        program,
        degree,
        clauses,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_program_names() {
        assert_eq!(
            "computer science".parse::<ProgramId>().unwrap(),
            ProgramId::ComputerScience
        );
        assert_eq!(
            "computational linguistics and natural language processing"
                .parse::<ProgramId>()
                .unwrap(),
            ProgramId::ComputationalLinguistics
        );
        assert_eq!(
            "computer systems".parse::<ProgramId>().unwrap(),
            ProgramId::ComputerSystems
        );

        let err = "underwater basket weaving".parse::<ProgramId>().unwrap_err();
        assert_eq!(err, InvalidProgramError("underwater basket weaving".into()));
    }

    #[test]
    fn parses_degree_types() {
        assert_eq!("major".parse::<DegreeType>().unwrap(), DegreeType::Major);
        assert_eq!(
            "specialist".parse::<DegreeType>().unwrap(),
            DegreeType::Specialist
        );
        assert!("minor".parse::<DegreeType>().is_err());
    }

    #[test]
    fn every_program_has_a_rule() {
        for program in ProgramId::ALL {
            for degree in [DegreeType::Major, DegreeType::Specialist] {
                let rule = requirement_rule(program, degree);
                assert_eq!(rule.program, program);
                assert!(!rule.clauses.is_empty());
            }
        }
    }

    #[test]
    fn major_and_specialist_rules_differ() {
        let major = requirement_rule(ProgramId::ComputerScience, DegreeType::Major);
        let specialist = requirement_rule(ProgramId::ComputerScience, DegreeType::Specialist);
        assert_ne!(major.clauses, specialist.clauses);

        // Focus rules are degree-independent.
        let a = requirement_rule(ProgramId::GameDesign, DegreeType::Major);
        let b = requirement_rule(ProgramId::GameDesign, DegreeType::Specialist);
        assert_eq!(a.clauses, b.clauses);
    }

    #[test]
    fn renders_gate_requirements() {
        assert_eq!(
            FIRST_YEAR[0].to_string(),
            "(CSC108H1 + CSC148H1 + (CSC165H1 / CSC240H1)) / (CSC110Y1 + CSC111H1)"
        );
        assert_eq!(
            Req::Group(GroupId::Theory).to_string(),
            "CSC236H1 / CSC240H1"
        );
    }
}
