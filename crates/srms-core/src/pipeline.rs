//! Parse, validate and preview in one call

use crate::csv::{self, ParsedCsv};
use crate::error::Result;
use crate::operation::{HeaderRequirements, OperationType};
use crate::preview::{self, PreviewPayload};
use crate::validation::{self, ValidationResult};
use serde::Serialize;

/// Everything the rendering side needs for one selected file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportPreview {
    pub operation: OperationType,
    pub headers: Vec<String>,
    pub validation: ValidationResult,
    pub preview: PreviewPayload,
}

impl ImportPreview {
    pub fn from_parsed(
        parsed: &ParsedCsv,
        operation: &OperationType,
        requirements: &HeaderRequirements,
        limit: usize,
    ) -> Self {
        Self {
            operation: operation.clone(),
            headers: parsed.headers.clone(),
            validation: validation::validate(parsed, operation, requirements),
            preview: preview::preview(parsed, limit),
        }
    }
}

/// Run the whole ingestion preview over already-decoded file text
pub fn inspect(
    text: &str,
    operation: &OperationType,
    requirements: &HeaderRequirements,
    limit: usize,
) -> Result<ImportPreview> {
    let parsed = csv::parse(text)?;
    Ok(ImportPreview::from_parsed(&parsed, operation, requirements, limit))
}
