//! Admission checks applied to a selected file before it is read

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Largest accepted upload, 10 MiB
pub const DEFAULT_MAX_BYTES: u64 = 10 * 1024 * 1024;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// Which files may enter the import preview
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadPolicy {
    /// Required file extension, without the dot
    pub extension: String,

    /// Size limit in bytes
    pub max_bytes: u64,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            extension: "csv".to_string(),
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }
}

impl UploadPolicy {
    /// Reject files with the wrong extension or over the size limit
    pub fn check(&self, file_name: &str, size: u64) -> Result<()> {
        let suffix = format!(".{}", self.extension);
        if !file_name.ends_with(&suffix) {
            warn!(file = file_name, "Rejected upload with unsupported extension");
            return Err(Error::UnsupportedFileType {
                file_name: file_name.to_string(),
                expected: self.extension.clone(),
            });
        }

        if size > self.max_bytes {
            warn!(file = file_name, size, limit = self.max_bytes, "Rejected oversized upload");
            return Err(Error::FileTooLarge {
                file_name: file_name.to_string(),
                size,
                limit: self.max_bytes,
            });
        }

        Ok(())
    }
}

/// Render a byte count with base-1024 units, e.g. `1.5 KB`
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scaled = bytes as f64;
    while scaled >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    let fixed = format!("{:.2}", scaled);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}
