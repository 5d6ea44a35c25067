//! Progress command handler

use crate::cli::ProgressArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use srms_core::{track, BulkOperationStatus, StatusSource};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Status documents read from a JSON file that another process keeps updating
pub struct FileStatusSource {
    path: PathBuf,
}

impl FileStatusSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StatusSource for FileStatusSource {
    async fn fetch(&mut self, operation_id: &str) -> srms_core::Result<BulkOperationStatus> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            srms_core::Error::status(
                operation_id,
                format!("cannot read {}: {}", self.path.display(), e),
            )
        })?;
        serde_json::from_str(&content).map_err(|e| {
            srms_core::Error::status(
                operation_id,
                format!("malformed status document {}: {}", self.path.display(), e),
            )
        })
    }
}

/// Handle the progress command
#[instrument(skip(config, output), fields(status_file = %args.status_file.display()))]
pub async fn handle_progress(args: ProgressArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details(
        "progress_command",
        &format!("status_file: {}", args.status_file.display()),
    );

    if !args.status_file.exists() {
        return Err(Error::FileNotFound {
            path: args.status_file.clone(),
        });
    }

    let operation_id = args
        .status_file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "bulk_operation".to_string());
    let mut source = FileStatusSource::new(&args.status_file);

    if !args.watch {
        let status = source.fetch(&operation_id).await?;
        debug!(state = %status.status, "Fetched status once");
        return output.bulk_status(&status);
    }

    let interval = Duration::from_secs(args.interval.unwrap_or(config.progress.interval_secs));
    if interval.is_zero() {
        return Err(Error::invalid_args("--interval must be greater than zero"));
    }
    info!(operation_id = %operation_id, interval_secs = interval.as_secs(), "Watching bulk operation");
    output.info(&format!(
        "Tracking {} every {}s",
        operation_id,
        interval.as_secs()
    ))?;

    let final_status = match output.progress_bar(0, &operation_id) {
        Some(pb) => {
            let status = track(&mut source, &operation_id, interval, |status| {
                pb.set_length(status.total_records);
                pb.set_position(status.processed_records);
                pb.set_message(format!("{} [{}]", operation_id, status.status));
            })
            .await?;
            pb.finish_and_clear();
            output.bulk_status(&status)?;
            status
        }
        None => {
            let mut render_error = None;
            let status = track(&mut source, &operation_id, interval, |status| {
                if render_error.is_none() {
                    render_error = output.bulk_status(status).err();
                }
            })
            .await?;
            if let Some(e) = render_error {
                return Err(e);
            }
            status
        }
    };

    if final_status.has_failures() {
        output.warning(&format!(
            "{} of {} records failed",
            final_status.failed_records, final_status.total_records
        ))?;
    } else {
        output.success(&format!("Bulk operation {}", final_status.status))?;
    }

    Ok(())
}
