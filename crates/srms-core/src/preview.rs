//! Bounded row preview shown before an import is committed

use crate::csv::{ParsedCsv, Row};
use serde::Serialize;

/// Number of rows shown when the caller does not choose a limit
pub const DEFAULT_PREVIEW_LIMIT: usize = 5;

/// First rows of a parsed file plus the totals needed to describe the rest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewPayload {
    pub total_rows: usize,
    pub shown_rows: Vec<Row>,
    pub truncated: bool,
}

impl PreviewPayload {
    /// Rows left out of the preview
    pub fn remaining(&self) -> usize {
        self.total_rows.saturating_sub(self.shown_rows.len())
    }
}

/// Take the first `limit` rows of `parsed`, keeping their order.
///
/// A `limit` of zero shows nothing and marks any non-empty file truncated.
pub fn preview(parsed: &ParsedCsv, limit: usize) -> PreviewPayload {
    let total_rows = parsed.rows.len();
    PreviewPayload {
        total_rows,
        shown_rows: parsed.rows.iter().take(limit).cloned().collect(),
        truncated: total_rows > limit,
    }
}
