use std::{collections::HashMap, fmt, str::FromStr};

use non_empty_string::NonEmptyString;

use crate::domain::{Catalog, CourseCode, Credits, UnknownCourseError, code::stem_of};

/// The minimum grade that counts as a pass for requirement purposes.
pub const PASS_MARK: u8 = 50;

/// A final grade between 0 and 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Grade(u8);

impl Grade {
    /// Creates a grade.
    ///
    /// # Errors
    ///
    /// Returns [`GradeError`] for values above 100.
    pub const fn new(value: u8) -> Result<Self, GradeError> {
        if value <= 100 {
            Ok(Self(value))
        } else {
            Err(GradeError(value))
        }
    }

    /// The numeric grade.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Whether this grade satisfies a prerequisite (grade ≥ 50).
    #[must_use]
    pub const fn is_passing(self) -> bool {
        self.0 >= PASS_MARK
    }
}

impl TryFrom<u8> for Grade {
    type Error = GradeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned for grades outside 0–100.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid grade {0}: grades range from 0 to 100")]
pub struct GradeError(u8);

/// The credit weight of a completed course: exactly 0.5 or 1.0 FCE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CreditWeight {
    /// 0.5 FCE.
    Half,
    /// 1.0 FCE.
    Full,
}

impl CreditWeight {
    /// The weight as a credit count.
    #[must_use]
    pub const fn credits(self) -> Credits {
        match self {
            Self::Half => Credits::HALF,
            Self::Full => Credits::FULL,
        }
    }
}

/// One entry on a student's transcript: a completed course, the grade
/// achieved, and the credit weight earned.
///
/// Records are created when a completion is registered and never mutated
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    code: CourseCode,
    grade: Grade,
    weight: CreditWeight,
}

impl Record {
    /// Creates a record for a completed course.
    #[must_use]
    pub const fn new(code: CourseCode, grade: Grade, weight: CreditWeight) -> Self {
        Self {
            code,
            grade,
            weight,
        }
    }

    /// The completed course's code.
    #[must_use]
    pub const fn code(&self) -> &CourseCode {
        &self.code
    }

    /// The grade achieved.
    #[must_use]
    pub const fn grade(&self) -> Grade {
        self.grade
    }

    /// The credit weight earned.
    #[must_use]
    pub const fn weight(&self) -> CreditWeight {
        self.weight
    }
}

/// A ten-digit student identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StudentNumber(String);

impl StudentNumber {
    /// Creates a student number from a string of exactly ten ASCII digits.
    ///
    /// # Errors
    ///
    /// Returns [`StudentNumberError`] otherwise.
    pub fn new(value: impl Into<String>) -> Result<Self, StudentNumberError> {
        let value = value.into();
        if value.len() == 10 && value.bytes().all(|b| b.is_ascii_digit()) {
            Ok(Self(value))
        } else {
            Err(StudentNumberError(value))
        }
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for StudentNumber {
    type Err = StudentNumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for StudentNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a student number is not exactly ten digits.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid student number '{0}': expected exactly ten digits")]
pub struct StudentNumberError(String);

/// A student profile: identifier, name, and an append-only academic history.
///
/// Records are appended in chronological order by [`register_completion`]
/// (or [`record_completion`] when the caller has already validated the
/// course). The core never deletes or edits records.
///
/// [`register_completion`]: Student::register_completion
/// [`record_completion`]: Student::record_completion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    number: StudentNumber,
    name: NonEmptyString,
    history: Vec<Record>,
}

impl Student {
    /// Creates a student with an empty academic history.
    #[must_use]
    pub const fn new(number: StudentNumber, name: NonEmptyString) -> Self {
        Self {
            number,
            name,
            history: Vec::new(),
        }
    }

    /// The student's identifier.
    #[must_use]
    pub const fn number(&self) -> &StudentNumber {
        &self.number
    }

    /// The student's name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The academic history, oldest record first.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.history
    }

    /// Appends a record without consulting a catalog.
    pub fn record_completion(&mut self, record: Record) {
        self.history.push(record);
    }

    /// Registers a completed course, validating the code against the catalog.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownCourseError`] if the code is absent from the catalog.
    pub fn register_completion(
        &mut self,
        catalog: &Catalog,
        code: CourseCode,
        grade: Grade,
        weight: CreditWeight,
    ) -> Result<(), UnknownCourseError> {
        if !catalog.contains(&code) {
            return Err(UnknownCourseError(code));
        }
        tracing::debug!(student = %self.number, course = %code, "registered completion");
        self.history.push(Record::new(code, grade, weight));
        Ok(())
    }

    /// The total number of full course equivalents earned so far.
    #[must_use]
    pub fn fce_count(&self) -> Credits {
        self.history
            .iter()
            .map(|record| record.weight().credits())
            .sum()
    }

    /// Builds a lookup index over the current academic history.
    #[must_use]
    pub fn completion_index(&self) -> CompletionIndex<'_> {
        CompletionIndex::from_records(&self.history)
    }
}

/// A lookup from course code to transcript record, derived fresh from a
/// student's history whenever needed.
///
/// The index is a borrow of the ledger, rebuilt per evaluation rather
/// than cached, so repeated evaluations against a growing ledger always see
/// the latest records. If a course appears twice in the history the later
/// record wins.
#[derive(Debug)]
pub struct CompletionIndex<'a> {
    by_code: HashMap<&'a str, &'a Record>,
    by_stem: HashMap<&'a str, &'a Record>,
}

impl<'a> CompletionIndex<'a> {
    fn from_records(records: &'a [Record]) -> Self {
        let mut by_code = HashMap::with_capacity(records.len());
        let mut by_stem = HashMap::with_capacity(records.len());
        for record in records {
            if by_code.insert(record.code().as_str(), record).is_some() {
                tracing::warn!(course = %record.code(), "duplicate transcript entry; keeping the later record");
            }
            by_stem.insert(record.code().stem(), record);
        }
        Self { by_code, by_stem }
    }

    /// The record for an exact course code, if the course was completed.
    #[must_use]
    pub fn record(&self, code: &str) -> Option<&'a Record> {
        self.by_code.get(code).copied()
    }

    /// Whether the exact course code was completed with a passing grade.
    #[must_use]
    pub fn passed(&self, code: &str) -> bool {
        self.record(code)
            .is_some_and(|record| record.grade().is_passing())
    }

    /// Whether any session variant of the given raw code was completed with a
    /// passing grade. Comparison is on the department+number stem, ignoring
    /// the session suffix.
    #[must_use]
    pub fn passed_variant(&self, raw_code: &str) -> bool {
        self.by_stem
            .get(stem_of(raw_code))
            .is_some_and(|record| record.grade().is_passing())
    }

    /// The number of distinct completed courses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Whether the history is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Course;

    fn student() -> Student {
        Student::new(
            StudentNumber::new("1234567890").unwrap(),
            NonEmptyString::new("Avery".to_string()).unwrap(),
        )
    }

    fn record(code: &str, grade: u8) -> Record {
        Record::new(
            CourseCode::new(code).unwrap(),
            Grade::new(grade).unwrap(),
            CreditWeight::Half,
        )
    }

    #[test]
    fn grade_boundaries() {
        assert!(Grade::new(50).unwrap().is_passing());
        assert!(!Grade::new(49).unwrap().is_passing());
        assert!(Grade::new(101).is_err());
    }

    #[test]
    fn student_number_must_be_ten_digits() {
        assert!(StudentNumber::new("1234567890").is_ok());
        assert!(StudentNumber::new("123456789").is_err());
        assert!(StudentNumber::new("123456789X").is_err());
    }

    #[test]
    fn registration_rejects_unknown_courses() {
        let catalog: Catalog = [Course::new(
            CourseCode::new("CSC108H1").unwrap(),
            "Introduction to Programming",
        )]
        .into_iter()
        .collect();

        let mut student = student();
        student
            .register_completion(
                &catalog,
                CourseCode::new("CSC108H1").unwrap(),
                Grade::new(80).unwrap(),
                CreditWeight::Half,
            )
            .unwrap();

        let err = student
            .register_completion(
                &catalog,
                CourseCode::new("ZZZ999H1").unwrap(),
                Grade::new(80).unwrap(),
                CreditWeight::Half,
            )
            .unwrap_err();
        assert_eq!(err.0.as_str(), "ZZZ999H1");
        assert_eq!(student.records().len(), 1);
    }

    #[test]
    fn fce_count_sums_weights() {
        let mut s = student();
        s.record_completion(record("CSC108H1", 80));
        s.record_completion(Record::new(
            CourseCode::new("MAT137Y1").unwrap(),
            Grade::new(70).unwrap(),
            CreditWeight::Full,
        ));
        assert_eq!(s.fce_count(), Credits::from_halves(3));
    }

    #[test]
    fn index_last_writer_wins() {
        let mut s = student();
        s.record_completion(record("CSC108H1", 40));
        s.record_completion(record("CSC108H1", 80));

        let index = s.completion_index();
        assert_eq!(index.len(), 1);
        assert!(index.passed("CSC108H1"));
    }

    #[test]
    fn variant_lookup_ignores_session_suffix() {
        let mut s = student();
        s.record_completion(record("CSC108H1", 80));

        let index = s.completion_index();
        assert!(index.passed_variant("CSC108Y1"));
        assert!(!index.passed_variant("CSC148H1"));
    }
}
