//! Per-course prerequisite checking.

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::instrument;

use crate::{
    domain::{Catalog, CompletionIndex, CourseCode, Student, UnknownCourseError},
    policy::equivalence,
};

/// Whether the student satisfies every prerequisite of the given course.
///
/// Prerequisite entries are tested in catalog order and the check
/// short-circuits on the first unmet entry. A course with no prerequisite
/// entries is vacuously open to any student.
///
/// # Errors
///
/// Returns [`UnknownCourseError`] if the code is absent from the catalog.
#[instrument(skip(catalog, student), fields(student = %student.number()))]
pub fn check_course_eligibility(
    catalog: &Catalog,
    code: &CourseCode,
    student: &Student,
) -> Result<bool, UnknownCourseError> {
    let course = catalog
        .get(code)
        .ok_or_else(|| UnknownCourseError(code.clone()))?;
    let index = student.completion_index();

    let eligible = course
        .prerequisites
        .iter()
        .all(|entry| entry_satisfied(entry, &index));
    tracing::debug!(course = %code, eligible, "checked prerequisites");
    Ok(eligible)
}

/// Tests a single raw prerequisite entry against a completion index.
///
/// An entry is satisfied when it is empty (no requirement), when a session
/// variant of the entry's course was passed (department+number comparison,
/// session suffix ignored), or when the entry belongs to an equivalence
/// group that is satisfied as a whole. A standalone code with no passing
/// record and no owning group is unsatisfied.
#[must_use]
pub fn entry_satisfied(entry: &str, index: &CompletionIndex<'_>) -> bool {
    if entry.is_empty() {
        return true;
    }
    if index.passed_variant(entry) {
        return true;
    }
    equivalence::resolve(entry).is_some_and(|group| group.is_satisfied(index))
}

/// All catalog courses the student currently satisfies the prerequisites
/// for, in code order.
///
/// The scan is embarrassingly parallel, so courses are checked with a rayon
/// thread pool.
#[must_use]
pub fn eligible_courses<'a>(catalog: &'a Catalog, student: &Student) -> Vec<&'a CourseCode> {
    let index = student.completion_index();
    let courses: Vec<_> = catalog.iter().collect();

    let mut eligible: Vec<&CourseCode> = courses
        .par_iter()
        .filter(|course| {
            course
                .prerequisites
                .iter()
                .all(|entry| entry_satisfied(entry, &index))
        })
        .map(|course| &course.code)
        .collect();
    eligible.sort();
    eligible
}

#[cfg(test)]
mod tests {
    use non_empty_string::NonEmptyString;

    use super::*;
    use crate::domain::{Course, CreditWeight, Grade, Record, StudentNumber};

    fn catalog() -> Catalog {
        let course = |code: &str, prereqs: &[&str]| {
            Course::new(CourseCode::new(code).unwrap(), code.to_string())
                .with_prerequisites(prereqs.iter().copied())
        };
        [
            course("CSC104H1", &[]),
            course("CSC207H1", &["CSC148H1"]),
            course("CSC236H1", &["CSC148H1", "CSC165H1"]),
            course("CSC263H1", &["CSC236H1", "STA247H1"]),
            course("CSC311H1", &["CSC207H1", "MAT235Y1", ""]),
        ]
        .into_iter()
        .collect()
    }

    fn student_with(codes: &[(&str, u8)]) -> Student {
        let mut student = Student::new(
            StudentNumber::new("1000000001").unwrap(),
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

    fn code(s: &str) -> CourseCode {
        CourseCode::new(s).unwrap()
    }

    #[test]
    fn no_prerequisites_is_vacuously_eligible() {
        let catalog = catalog();
        let student = student_with(&[]);
        assert!(check_course_eligibility(&catalog, &code("CSC104H1"), &student).unwrap());
    }

    #[test]
    fn unknown_course_is_an_error() {
        let catalog = catalog();
        let student = student_with(&[]);
        let err =
            check_course_eligibility(&catalog, &code("XYZ999H1"), &student).unwrap_err();
        assert_eq!(err, UnknownCourseError(code("XYZ999H1")));
    }

    #[test]
    fn group_alternatives_satisfy_a_grouped_entry() {
        let catalog = catalog();

        // CSC236H1 lists CSC148H1 and CSC165H1; both resolve to the intro
        // group, which the older three-course sequence satisfies in full.
        let complete = student_with(&[("CSC108H1", 80), ("CSC148H1", 80), ("CSC165H1", 80)]);
        assert!(check_course_eligibility(&catalog, &code("CSC236H1"), &complete).unwrap());

        // One course of the sequence is not enough for the ALL-of branch.
        let partial = student_with(&[("CSC108H1", 80)]);
        assert!(!check_course_eligibility(&catalog, &code("CSC236H1"), &partial).unwrap());

        // The newer two-course sequence satisfies the same entries.
        let newer = student_with(&[("CSC110Y1", 80), ("CSC111H1", 80)]);
        assert!(check_course_eligibility(&catalog, &code("CSC236H1"), &newer).unwrap());
    }

    #[test]
    fn literal_completion_short_circuits_group_resolution() {
        let catalog = catalog();
        // CSC148H1 passed directly: the entry is satisfied by the stem match
        // even though the rest of its group is missing.
        let student = student_with(&[("CSC148H1", 80)]);
        assert!(check_course_eligibility(&catalog, &code("CSC207H1"), &student).unwrap());
    }

    #[test]
    fn failing_grades_do_not_satisfy() {
        let catalog = catalog();
        let failed = student_with(&[("CSC148H1", 49)]);
        assert!(!check_course_eligibility(&catalog, &code("CSC207H1"), &failed).unwrap());

        let passed = student_with(&[("CSC148H1", 50)]);
        assert!(check_course_eligibility(&catalog, &code("CSC207H1"), &passed).unwrap());
    }

    #[test]
    fn empty_entries_are_skipped() {
        let catalog = catalog();
        // CSC311H1 carries an empty trailing entry; only the real entries
        // gate eligibility.
        let student = student_with(&[("CSC207H1", 70), ("MAT235Y1", 70)]);
        assert!(check_course_eligibility(&catalog, &code("CSC311H1"), &student).unwrap());
    }

    #[test]
    fn standalone_unmet_entry_fails() {
        let catalog = catalog();
        // STA247H1 resolves to the statistics group; with none of the group
        // completed the entry falls through unsatisfied.
        let student = student_with(&[("CSC236H1", 80)]);
        assert!(!check_course_eligibility(&catalog, &code("CSC263H1"), &student).unwrap());
    }

    #[test]
    fn eligible_courses_scans_the_catalog() {
        let catalog = catalog();
        let student = student_with(&[("CSC148H1", 80)]);

        let eligible = eligible_courses(&catalog, &student);
        let codes: Vec<_> = eligible.iter().map(|c| c.as_str()).collect();
        assert_eq!(codes, ["CSC104H1", "CSC207H1"]);
    }
}
