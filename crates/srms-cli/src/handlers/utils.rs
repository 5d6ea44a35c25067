//! Shared utilities for command handlers

use crate::error::{Error, Result};
use crate::output::OutputWriter;
use srms_core::{format_file_size, HeaderRequirements, OperationType, ParsedCsv, UploadPolicy};
use std::path::Path;
use tracing::{debug, warn};

/// Admit, read and parse a CSV file selected for a bulk operation
pub async fn load_csv(path: &Path, policy: &UploadPolicy, output: &mut OutputWriter) -> Result<ParsedCsv> {
    let metadata = match tokio::fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(e.into()),
    };

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    policy.check(&file_name, metadata.len())?;
    output.info(&format!("{} ({})", file_name, format_file_size(metadata.len())))?;

    let spinner = output.spinner("Reading CSV file...");
    let content = tokio::fs::read_to_string(path).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let content = content.map_err(|e| match e.kind() {
        std::io::ErrorKind::InvalidData => Error::InvalidFormat {
            path: path.to_path_buf(),
            expected: "UTF-8 text".to_string(),
        },
        _ => Error::Io(e),
    })?;
    debug!("File read successfully, {} bytes", content.len());

    Ok(srms_core::parse(&content)?)
}

/// Tell the user when an operation has no configured header set
pub fn warn_if_unknown_operation(
    operation: &OperationType,
    requirements: &HeaderRequirements,
    output: &mut OutputWriter,
) -> Result<()> {
    if !requirements.contains(operation) {
        warn!(operation = %operation, "No required headers configured for operation");
        output.warning(&format!(
            "Operation '{}' has no configured headers; every header will be reported as unexpected",
            operation
        ))?;
    }
    Ok(())
}
