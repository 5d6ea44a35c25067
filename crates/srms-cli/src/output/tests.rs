// Tests for output formatting
//
// These drive an OutputWriter into an in-memory buffer and check what a
// user would see for previews, validation results and bulk status.

use super::*;
use srms_core::{inspect, HeaderRequirements, OperationType};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Default)]
struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SharedBuffer {
    fn contents(&self) -> String {
        String::from_utf8(self.0.borrow().clone()).unwrap()
    }
}

fn writer(format: OutputFormat) -> (OutputWriter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let out = OutputWriter::with_writer(format, false, false, Box::new(buffer.clone()));
    (out, buffer)
}

fn marks_report(rows: usize) -> ImportPreview {
    let mut text = String::from("roll_no,subject_code,remarks");
    for i in 0..rows {
        text.push_str(&format!("\nCS{:03},MA101,ok", i));
    }
    inspect(&text, &OperationType::ImportMarks, &HeaderRequirements::default(), 5).unwrap()
}

fn status(state: &str, total: u64, processed: u64, failed: u64) -> BulkOperationStatus {
    BulkOperationStatus {
        status: OperationState::from(state.to_string()),
        total_records: total,
        processed_records: processed,
        failed_records: failed,
    }
}

#[test]
fn test_import_preview_human() {
    let (mut out, buffer) = writer(OutputFormat::Human);
    out.import_preview(&marks_report(8)).unwrap();
    let text = buffer.contents();

    assert!(text.contains("=== CSV Preview (8 records) ==="));
    assert!(text.contains("WARNING: Header validation issues:"));
    assert!(text.contains("  • Missing required header: marks_obtained"));
    assert!(text.contains("  • Unexpected header: remarks"));
    assert!(text.contains("roll_no │ subject_code │ remarks"));
    assert!(text.contains("CS004"));
    assert!(!text.contains("CS005"));
    assert!(text.trim_end().ends_with("... and 3 more records"));
}

#[test]
fn test_import_preview_short_file_has_no_remainder() {
    let (mut out, buffer) = writer(OutputFormat::Human);
    out.import_preview(&marks_report(2)).unwrap();
    assert!(!buffer.contents().contains("more records"));
}

#[test]
fn test_import_preview_json() {
    let (mut out, buffer) = writer(OutputFormat::Json);
    out.import_preview(&marks_report(7)).unwrap();

    let value: serde_json::Value = serde_json::from_str(buffer.contents().trim()).unwrap();
    assert_eq!(value["preview"]["total_rows"], 7);
    assert_eq!(value["preview"]["truncated"], true);
    assert_eq!(value["preview"]["shown_rows"].as_array().unwrap().len(), 5);
    assert_eq!(value["validation"]["valid"], false);
}

#[test]
fn test_import_preview_yaml() {
    let (mut out, buffer) = writer(OutputFormat::Yaml);
    out.import_preview(&marks_report(1)).unwrap();

    let value: serde_yaml::Value = serde_yaml::from_str(&buffer.contents()).unwrap();
    assert_eq!(value["operation"], serde_yaml::Value::from("import_marks"));
}

#[test]
fn test_import_preview_quiet_shows_only_issues() {
    let buffer = SharedBuffer::default();
    let mut out = OutputWriter::with_writer(OutputFormat::Human, false, true, Box::new(buffer.clone()));
    out.import_preview(&marks_report(8)).unwrap();
    let text = buffer.contents();

    assert!(text.contains("Missing required header: marks_obtained"));
    assert!(!text.contains("CSV Preview"));
    assert!(!text.contains("CS000"));
    assert!(!text.contains("more records"));
}

#[test]
fn test_validation_result_human_valid() {
    let (mut out, buffer) = writer(OutputFormat::Human);
    out.validation_result(&ValidationResult {
        valid: true,
        missing_headers: vec![],
        unexpected_headers: vec![],
    })
    .unwrap();
    assert_eq!(buffer.contents(), "✓ All required headers present\n");
}

#[test]
fn test_validation_result_machine_format_skips_messages() {
    let (mut out, buffer) = writer(OutputFormat::JsonPretty);
    out.info("reading file").unwrap();
    out.validation_result(&ValidationResult {
        valid: false,
        missing_headers: vec!["roll_no".to_string()],
        unexpected_headers: vec![],
    })
    .unwrap();

    let value: serde_json::Value = serde_json::from_str(&buffer.contents()).unwrap();
    assert_eq!(value["missing_headers"][0], "roll_no");
}

#[test]
fn test_bulk_status_human() {
    let (mut out, buffer) = writer(OutputFormat::Human);
    out.bulk_status(&status("processing", 10, 4, 1)).unwrap();
    let text = buffer.contents();

    assert!(text.starts_with("[########------------]  40%  4/10 processed  [processing]"));
    assert!(text.contains("  1 failed"));
}

#[test]
fn test_bulk_status_human_empty_operation() {
    let formatted = OutputFormat::Human
        .format_bulk_status(&status("pending", 0, 0, 0))
        .unwrap();
    assert_eq!(formatted, "[--------------------]   0%  0/0 processed  [pending]\n");
}

#[test]
fn test_bulk_status_json() {
    let (mut out, buffer) = writer(OutputFormat::Json);
    out.bulk_status(&status("completed", 3, 3, 0)).unwrap();
    assert_eq!(
        buffer.contents(),
        "{\"status\":\"completed\",\"total_records\":3,\"processed_records\":3,\"failed_records\":0}\n"
    );
}

#[test]
fn test_quiet_suppresses_info_but_not_errors() {
    let buffer = SharedBuffer::default();
    let mut out = OutputWriter::with_writer(OutputFormat::Human, false, true, Box::new(buffer.clone()));
    out.info("hidden").unwrap();
    out.success("hidden").unwrap();
    out.error("shown").unwrap();
    assert_eq!(buffer.contents(), "ERROR: shown\n");
}

#[test]
fn test_no_progress_bars_with_custom_writer() {
    let (out, _) = writer(OutputFormat::Human);
    assert!(out.progress_bar(10, "importing").is_none());
    assert!(out.spinner("reading").is_none());
}
