//! Validation command handler

use crate::cli::ValidateArgs;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::OutputWriter;
use srms_core::validate;
use tracing::{info, instrument, warn};

use super::utils::{load_csv, warn_if_unknown_operation};

/// Handle the validate command
#[instrument(skip(config, output), fields(file = %args.file.display(), operation = %args.operation))]
pub async fn handle_validate(args: ValidateArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::with_details("validate_command", &format!("file: {}", args.file.display()));
    info!("Starting header validation");
    output.info(&format!(
        "Validating {} for operation {}",
        args.file.display(),
        args.operation
    ))?;

    let requirements = config.header_requirements();
    warn_if_unknown_operation(&args.operation, &requirements, output)?;

    let parsed = load_csv(&args.file, &config.upload, output).await?;
    output.info(&format!(
        "Found {} column(s) and {} record(s)",
        parsed.headers.len(),
        parsed.row_count()
    ))?;

    let result = {
        let _validation_timer = Timer::new("header_validation");
        validate(&parsed, &args.operation, &requirements)
    };

    output.validation_result(&result)?;

    if !result.valid {
        warn!(missing = ?result.missing_headers, "Required headers missing");
        if args.strict {
            return Err(Error::HeadersMissing {
                operation: args.operation.to_string(),
                missing: result.missing_headers,
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use srms_core::OperationType;
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(body: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    fn quiet_output() -> OutputWriter {
        OutputWriter::with_writer(OutputFormat::Json, false, true, Box::new(std::io::sink()))
    }

    #[tokio::test]
    async fn test_missing_headers_warn_by_default() {
        let file = csv_file("roll_no,extra\n1,x\n");
        let args = ValidateArgs {
            file: file.path().to_path_buf(),
            operation: OperationType::ImportMarks,
            strict: false,
        };
        assert!(handle_validate(args, &Config::default(), &mut quiet_output()).await.is_ok());
    }

    #[tokio::test]
    async fn test_missing_headers_fail_when_strict() {
        let file = csv_file("roll_no,extra\n1,x\n");
        let args = ValidateArgs {
            file: file.path().to_path_buf(),
            operation: OperationType::ImportMarks,
            strict: true,
        };
        let err = handle_validate(args, &Config::default(), &mut quiet_output())
            .await
            .unwrap_err();
        match err {
            Error::HeadersMissing { missing, .. } => assert_eq!(missing.len(), 5),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_file_is_rejected() {
        let file = csv_file("");
        let args = ValidateArgs {
            file: file.path().to_path_buf(),
            operation: OperationType::ImportStudents,
            strict: false,
        };
        let err = handle_validate(args, &Config::default(), &mut quiet_output())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Core(srms_core::Error::EmptyInput)));
    }

    #[tokio::test]
    async fn test_wrong_extension_is_rejected() {
        let mut file = Builder::new().suffix(".txt").tempfile().unwrap();
        file.write_all(b"roll_no\n1\n").unwrap();
        let args = ValidateArgs {
            file: file.path().to_path_buf(),
            operation: OperationType::ImportStudents,
            strict: false,
        };
        let err = handle_validate(args, &Config::default(), &mut quiet_output())
            .await
            .unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let args = ValidateArgs {
            file: "/nonexistent/marks.csv".into(),
            operation: OperationType::ImportMarks,
            strict: false,
        };
        let err = handle_validate(args, &Config::default(), &mut quiet_output())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
