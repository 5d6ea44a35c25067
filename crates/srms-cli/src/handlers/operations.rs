//! Operations command handler

use crate::config::Config;
use crate::error::Result;
use crate::output::OutputWriter;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Handle the operations command
#[instrument(skip(config, output))]
pub fn handle_operations(config: &Config, output: &mut OutputWriter) -> Result<()> {
    let requirements = config.header_requirements();
    debug!(count = requirements.len(), "Listing bulk operations");

    if !output.is_human() {
        let listing: BTreeMap<String, Vec<String>> = requirements
            .operations()
            .into_iter()
            .map(|op| (op.to_string(), requirements.required(op).to_vec()))
            .collect();
        return output.data(&listing);
    }

    for operation in requirements.operations() {
        output.section(operation.as_str())?;
        for header in requirements.required(operation) {
            output.writeln(&format!("  {}", header))?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;
    use srms_core::OperationType;
    use std::cell::RefCell;
    use std::io::{self, Write};
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Capture(Rc<RefCell<Vec<u8>>>);

    impl Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_json_listing_includes_configured_operations() {
        let mut config = Config::default();
        config
            .operations
            .insert(OperationType::from("import_subjects"), ["subject_code", "name"]);

        let capture = Capture::default();
        let mut output =
            OutputWriter::with_writer(OutputFormat::Json, false, false, Box::new(capture.clone()));
        handle_operations(&config, &mut output).unwrap();

        let text = String::from_utf8(capture.0.borrow().clone()).unwrap();
        let value: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(value["import_marks"].as_array().unwrap().len(), 6);
        assert_eq!(value["import_students"][0], "roll_no");
        assert_eq!(value["import_subjects"][1], "name");
    }

    #[test]
    fn test_human_listing() {
        let capture = Capture::default();
        let mut output =
            OutputWriter::with_writer(OutputFormat::Human, false, false, Box::new(capture.clone()));
        handle_operations(&Config::default(), &mut output).unwrap();

        let text = String::from_utf8(capture.0.borrow().clone()).unwrap();
        let marks = text.find("=== import_marks ===").unwrap();
        let students = text.find("=== import_students ===").unwrap();
        assert!(marks < students);
        assert!(text.contains("  marks_obtained\n"));
    }
}
