use std::{fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Course codes look like `CSC108H1`: a three-letter department, a three (or,
/// for graduate courses, four) digit number, a session letter, and an
/// optional campus digit.
static CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{3}[0-9]{3,4}[HY][0-9]?$").expect("pattern is valid"));

/// The session length encoded in a course code.
///
/// A half-session (`H`) course is nominally worth 0.5 FCE, a full-session
/// (`Y`) course 1.0 FCE.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Session {
    /// A one-term course (`H` suffix).
    Half,
    /// A two-term course (`Y` suffix).
    Full,
}

/// A validated course code, such as `CSC108H1` or `MAT137Y1`.
///
/// The code is the unique key for a course within a [`Catalog`]. Comparisons
/// that should ignore the session/campus suffix (for example, treating
/// `CSC108H1` and `CSC108Y1` as the same requirement) go through [`stem`].
///
/// [`Catalog`]: crate::domain::Catalog
/// [`stem`]: CourseCode::stem
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CourseCode(String);

impl CourseCode {
    /// Parses a course code from a string.
    ///
    /// # Errors
    ///
    /// Returns [`CodeError`] if the string does not match the
    /// department-number-session shape.
    pub fn new(code: impl Into<String>) -> Result<Self, CodeError> {
        let code = code.into();
        if CODE_PATTERN.is_match(&code) {
            Ok(Self(code))
        } else {
            Err(CodeError(code))
        }
    }

    /// Returns the full code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The three-letter department prefix, e.g. `CSC`.
    #[must_use]
    pub fn department(&self) -> &str {
        &self.0[..3]
    }

    /// The department and number with the session suffix stripped.
    ///
    /// `CSC108H1` and `CSC108Y1` share the stem `CSC108`.
    #[must_use]
    pub fn stem(&self) -> &str {
        stem_of(&self.0)
    }

    /// The leading digit of the course number (the "level": 1–4 for
    /// undergraduate courses).
    #[must_use]
    pub fn level(&self) -> u8 {
        self.0.as_bytes()[3] - b'0'
    }

    /// The session length encoded in the code suffix.
    #[must_use]
    pub fn session(&self) -> Session {
        // The session letter is the first alphabetic character after the
        // department prefix; validation guarantees it exists.
        match self.0.as_bytes()[self.stem().len()] {
            b'Y' => Session::Full,
            _ => Session::Half,
        }
    }
}

/// The department-and-number prefix of a raw (unvalidated) code string.
///
/// Used when comparing prerequisite entries, which are stored as the raw
/// strings found in the catalog and may not parse as a [`CourseCode`].
#[must_use]
pub fn stem_of(code: &str) -> &str {
    let end = code
        .bytes()
        .enumerate()
        .skip(3)
        .find(|(_, b)| b.is_ascii_alphabetic())
        .map_or(code.len(), |(i, _)| i);
    &code[..end]
}

impl TryFrom<String> for CourseCode {
    type Error = CodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for CourseCode {
    type Error = CodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for CourseCode {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl From<CourseCode> for String {
    fn from(code: CourseCode) -> Self {
        code.0
    }
}

impl AsRef<str> for CourseCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a string is not a well-formed course code.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("invalid course code '{0}': expected department, number and session, e.g. 'CSC108H1'")]
pub struct CodeError(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_standard_codes() {
        let code = CourseCode::new("CSC108H1").unwrap();
        assert_eq!(code.department(), "CSC");
        assert_eq!(code.stem(), "CSC108");
        assert_eq!(code.level(), 1);
        assert_eq!(code.session(), Session::Half);

        let code = CourseCode::new("MAT137Y1").unwrap();
        assert_eq!(code.session(), Session::Full);
        assert_eq!(code.level(), 1);
    }

    #[test]
    fn parses_graduate_codes() {
        // Four-digit graduate codes appear in the focus policy tables.
        let code = CourseCode::new("CSC2503H").unwrap();
        assert_eq!(code.stem(), "CSC2503");
        assert_eq!(code.session(), Session::Half);
        assert_eq!(code.level(), 2);
    }

    #[test]
    fn rejects_malformed_codes() {
        for bad in ["", "CSC", "csc108h1", "CSC108", "108CSCH1", "NOT_A_CODE"] {
            assert!(CourseCode::new(bad).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn stem_of_raw_strings() {
        assert_eq!(stem_of("CSC108H1"), "CSC108");
        assert_eq!(stem_of("MAT137Y1"), "MAT137");
        assert_eq!(stem_of("CSC2503H"), "CSC2503");
        // Degenerate input passes through unchanged.
        assert_eq!(stem_of("CSC"), "CSC");
    }

    #[test]
    fn serde_round_trip() {
        let code = CourseCode::new("CSC148H1").unwrap();
        let json = serde_json::to_string(&code).unwrap();
        assert_eq!(json, "\"CSC148H1\"");
        let back: CourseCode = serde_json::from_str(&json).unwrap();
        assert_eq!(back, code);

        let err = serde_json::from_str::<CourseCode>("\"bogus\"");
        assert!(err.is_err());
    }
}
