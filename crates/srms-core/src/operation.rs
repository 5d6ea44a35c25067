//! Bulk operation tags and the headers each one requires

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Tag selecting which required-header set applies to an upload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OperationType {
    /// Student roster import
    ImportStudents,
    /// Exam marks import
    ImportMarks,
    /// Any other caller-defined operation
    Custom(String),
}

impl OperationType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::ImportStudents => "import_students",
            Self::ImportMarks => "import_marks",
            Self::Custom(tag) => tag,
        }
    }
}

// Identity, hashing and ordering all follow the tag
impl PartialEq for OperationType {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for OperationType {}

impl Hash for OperationType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Ord for OperationType {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for OperationType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OperationType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s.to_string()))
    }
}

impl From<String> for OperationType {
    fn from(tag: String) -> Self {
        match tag.trim() {
            "import_students" => Self::ImportStudents,
            "import_marks" => Self::ImportMarks,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<&str> for OperationType {
    fn from(tag: &str) -> Self {
        Self::from(tag.to_string())
    }
}

impl From<OperationType> for String {
    fn from(op: OperationType) -> Self {
        op.as_str().to_string()
    }
}

/// Headers required by the student roster import
pub const STUDENT_HEADERS: &[&str] = &[
    "roll_no",
    "name",
    "email",
    "phone",
    "date_of_birth",
    "department",
    "semester",
    "admission_year",
    "address",
];

/// Headers required by the marks import
pub const MARKS_HEADERS: &[&str] = &[
    "roll_no",
    "subject_code",
    "marks_obtained",
    "total_marks",
    "exam_type",
    "exam_date",
];

/// Mapping from operation tag to its ordered required headers
///
/// Supplied by the caller and passed into validation. `Default` holds the
/// built-in student and marks imports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderRequirements {
    sets: BTreeMap<OperationType, Vec<String>>,
}

impl HeaderRequirements {
    /// A mapping with no operations at all
    pub fn empty() -> Self {
        Self {
            sets: BTreeMap::new(),
        }
    }

    /// Register (or replace) the required headers for `operation`
    pub fn with_operation<I, S>(mut self, operation: OperationType, headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(operation, headers);
        self
    }

    pub fn insert<I, S>(&mut self, operation: OperationType, headers: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sets
            .insert(operation, headers.into_iter().map(Into::into).collect());
    }

    /// Required headers for `operation`; empty when the operation is unknown
    pub fn required(&self, operation: &OperationType) -> &[String] {
        self.sets.get(operation).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, operation: &OperationType) -> bool {
        self.sets.contains_key(operation)
    }

    /// Layer `other` on top of `self`; entries in `other` win
    pub fn merge(&mut self, other: HeaderRequirements) {
        self.sets.extend(other.sets);
    }

    /// Operations sorted by tag, for stable listings
    pub fn operations(&self) -> Vec<&OperationType> {
        self.sets.keys().collect()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl Default for HeaderRequirements {
    fn default() -> Self {
        Self::empty()
            .with_operation(OperationType::ImportStudents, STUDENT_HEADERS.iter().copied())
            .with_operation(OperationType::ImportMarks, MARKS_HEADERS.iter().copied())
    }
}
