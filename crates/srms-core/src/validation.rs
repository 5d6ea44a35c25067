//! Header validation against an operation's required header set

use crate::csv::ParsedCsv;
use crate::operation::{HeaderRequirements, OperationType};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of checking parsed headers against a required set
///
/// Unexpected headers are informational and never affect `valid`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub missing_headers: Vec<String>,
    pub unexpected_headers: Vec<String>,
}

impl ValidationResult {
    /// User-facing issue lines, missing headers first
    pub fn issues(&self) -> Vec<String> {
        self.missing_headers
            .iter()
            .map(|h| format!("Missing required header: {}", h))
            .chain(
                self.unexpected_headers
                    .iter()
                    .map(|h| format!("Unexpected header: {}", h)),
            )
            .collect()
    }

    pub fn has_issues(&self) -> bool {
        !self.missing_headers.is_empty() || !self.unexpected_headers.is_empty()
    }
}

/// Compare `parsed.headers` with the headers `operation` requires.
///
/// An operation with no entry in `requirements` requires nothing, so the
/// result is valid and every header is reported as unexpected.
pub fn validate(
    parsed: &ParsedCsv,
    operation: &OperationType,
    requirements: &HeaderRequirements,
) -> ValidationResult {
    let required = requirements.required(operation);

    let missing_headers: Vec<String> = required
        .iter()
        .filter(|h| !parsed.has_header(h))
        .cloned()
        .collect();

    let unexpected_headers: Vec<String> = parsed
        .headers
        .iter()
        .filter(|h| !required.contains(h))
        .cloned()
        .collect();

    debug!(
        operation = %operation,
        missing = missing_headers.len(),
        unexpected = unexpected_headers.len(),
        "Validated CSV headers"
    );

    ValidationResult {
        valid: missing_headers.is_empty(),
        missing_headers,
        unexpected_headers,
    }
}
