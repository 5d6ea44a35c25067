//! Preview command handler

use crate::cli::{OutputFormat, PreviewArgs};
use crate::config::Config;
use crate::error::{Error, ErrorContext, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use srms_core::ImportPreview;
use tracing::{debug, info, instrument, warn};

use super::utils::{load_csv, warn_if_unknown_operation};

/// Handle the preview command
#[instrument(skip(config, output), fields(file = %args.file.display(), operation = %args.operation))]
pub async fn handle_preview(args: PreviewArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("preview_command", &format!("file: {}", args.file.display()));
    info!("Starting CSV preview");

    let limit = args.limit.unwrap_or(config.preview.limit);
    debug!(limit, "Preview limit resolved");

    let requirements = config.header_requirements();
    warn_if_unknown_operation(&args.operation, &requirements, output)?;

    let parsed = load_csv(&args.file, &config.upload, output).await?;
    let report = ImportPreview::from_parsed(&parsed, &args.operation, &requirements, limit);
    info!(
        total_rows = report.preview.total_rows,
        shown = report.preview.shown_rows.len(),
        valid = report.validation.valid,
        "Preview built"
    );

    output.import_preview(&report)?;

    if let Some(path) = &args.output_file {
        let content = match output.format() {
            OutputFormat::Yaml => serde_yaml::to_string(&report)?,
            _ => serde_json::to_string_pretty(&report)?,
        };
        tokio::fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write preview to {}", path.display()))?;
        output.success(&format!("Preview saved to {}", path.display()))?;
    }

    if !report.validation.valid {
        warn!(missing = ?report.validation.missing_headers, "Required headers missing");
        if args.strict {
            return Err(Error::HeadersMissing {
                operation: args.operation.to_string(),
                missing: report.validation.missing_headers,
            });
        }
    }

    Ok(())
}
