use crate::configuration::Settings;
use crate::reporter::error::Error;
use crate::reporter::model::record::TestExecutionRecord;
use crate::reporter::summary::ExecutionSummary;
use chrono::{DateTime, Utc};
use derivative::Derivative;
use kstring::KString;
use liquid::model::Value;
use liquid::Object;
use serde_derive::Serialize;
use std::fs;
use std::path::Path;

mod template;

const DEFAULT_TITLE: &str = "ZenQA API Test Report";

/// Everything the report document embeds, serialized exactly once; the
/// template derives all of its views from this single object.
#[derive(Debug, Serialize, Clone, Builder)]
#[serde(rename_all = "camelCase")]
struct ReportData {
    generated_at: DateTime<Utc>,
    summary: ExecutionSummary,
    tests: Vec<TestExecutionRecord>,
}

impl ReportData {
    fn builder() -> ReportDataBuilder {
        ReportDataBuilder::default()
    }
}

/// Renders a registry snapshot plus its summary into one self-contained
/// HTML file.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct HtmlReporter {
    title: String,
    #[derivative(Debug = "ignore")]
    template: liquid::Template,
}

impl HtmlReporter {
    pub fn new() -> Result<Self, Error> {
        Self::with_title(DEFAULT_TITLE)
    }

    pub fn with_title(title: &str) -> Result<Self, Error> {
        let parser = liquid::ParserBuilder::with_stdlib().build()?;
        let template = parser.parse(template::REPORT_TEMPLATE)?;
        Ok(Self {
            title: title.to_owned(),
            template,
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, Error> {
        Self::with_title(&settings.title)
    }

    /// Renders the report document as a string.
    pub fn render(
        &self,
        summary: &ExecutionSummary,
        records: &[TestExecutionRecord],
    ) -> Result<String, Error> {
        let data = ReportData::builder()
            .generated_at(Utc::now())
            .summary(summary.clone())
            .tests(records.to_vec())
            .build()
            .map_err(Error::Internal)?;
        // Recorded bodies are arbitrary text; escape `</` so a body cannot
        // terminate the <script> block embedding the data.
        let json = serde_json::to_string_pretty(&data)?.replace("</", "<\\/");
        let mut globals = Object::default();
        globals.insert(KString::from_static("title"), Value::scalar(self.title.clone()));
        globals.insert(
            KString::from_static("generated_at"),
            Value::scalar(data.generated_at.to_rfc3339()),
        );
        globals.insert(KString::from_static("data"), Value::scalar(json));
        Ok(self.template.render(&globals)?)
    }

    /// Renders and writes the report. The write is atomic from the caller's
    /// point of view: the document lands at `output` via a temp-file rename,
    /// so a failed write never leaves a partial report behind.
    pub fn write<P: AsRef<Path>>(
        &self,
        summary: &ExecutionSummary,
        records: &[TestExecutionRecord],
        output: P,
    ) -> Result<(), Error> {
        let html = self.render(summary, records)?;
        let output = output.as_ref();
        if let Some(parent) = output.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let temp = output.with_file_name(format!(".{}.tmp", uuid::Uuid::new_v4().to_simple()));
        if let Err(err) = fs::write(&temp, html) {
            let _ = fs::remove_file(&temp);
            return Err(Error::Io(err));
        }
        if let Err(err) = fs::rename(&temp, output) {
            let _ = fs::remove_file(&temp);
            return Err(Error::Io(err));
        }
        info!("HTML report generated: {}", output.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::HtmlReporter;
    use crate::reporter::model::record::TestExecutionRecord;
    use crate::reporter::registry::ExecutionRegistry;
    use crate::reporter::model::method::Method;
    use crate::reporter::model::status::Verdict;
    use crate::reporter::summary::ExecutionSummary;
    use std::fs;
    use std::path::PathBuf;
    use std::time::Duration;

    fn temp_report_dir() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("zenqa-report-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn populated_registry() -> ExecutionRegistry {
        let registry = ExecutionRegistry::new();
        let handle = registry.begin_test("Objects_Get_ReturnsList", "GET /objects smoke");
        registry.record_request_sent(
            &handle,
            Method::Get,
            "/objects",
            Vec::new(),
            Some("{\"page\": 1}".to_owned()),
        );
        registry.record_response_received(
            &handle,
            200,
            "OK",
            vec![("Content-Type".to_owned(), "application/json".to_owned())],
            "[]",
            "application/json",
            Duration::from_millis(15),
        );
        registry.end_test(&handle, Verdict::Passed);
        registry
    }

    #[test]
    fn test_render_with_zero_records_is_well_formed() {
        let reporter = HtmlReporter::new().unwrap();
        let summary = ExecutionSummary::from_records(&[]);
        let html = reporter.render(&summary, &[]).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("</html>"));
        assert!(html.contains("\"totalTests\": 0"));
        assert!(html.contains("\"passRate\": 0.0"));
        assert!(html.contains("ZenQA API Test Report"));
    }

    #[test]
    fn test_render_embeds_recorded_telemetry_once() {
        let records = populated_registry().snapshot();
        let summary = ExecutionSummary::from_records(&records);
        let html = HtmlReporter::with_title("Smoke Report")
            .unwrap()
            .render(&summary, &records)
            .unwrap();

        assert!(html.contains("<title>Smoke Report</title>"));
        assert!(html.contains("\"name\": \"Objects_Get_ReturnsList\""));
        assert!(html.contains("\"statusCode\": 200"));
        assert!(html.contains("\"durationMs\": 15"));
        assert_eq!(html.matches("const reportData =").count(), 1);
    }

    #[test]
    fn test_render_tolerates_running_record_and_raw_bodies() {
        let registry = ExecutionRegistry::new();
        let handle = registry.begin_test("hung", "");
        registry.record_request_sent(
            &handle,
            Method::Post,
            "/objects",
            Vec::new(),
            Some("{not json at all".to_owned()),
        );
        // No response, no end_test: the record renders as still running.
        let records = registry.snapshot();
        let summary = ExecutionSummary::from_records(&records);
        let html = HtmlReporter::new().unwrap().render(&summary, &records).unwrap();

        assert!(html.contains("\"status\": \"running\""));
        assert!(html.contains("{not json at all"));
    }

    #[test]
    fn test_embedded_data_cannot_break_out_of_script_block() {
        let registry = ExecutionRegistry::new();
        let handle = registry.begin_test("hostile", "");
        registry.record_request_sent(
            &handle,
            Method::Post,
            "/objects",
            Vec::new(),
            Some("</script><script>alert(1)".to_owned()),
        );
        registry.end_test(&handle, Verdict::Passed);
        let records = registry.snapshot();
        let summary = ExecutionSummary::from_records(&records);
        let html = HtmlReporter::new().unwrap().render(&summary, &records).unwrap();

        assert!(!html.contains("</script><script>alert(1)"));
        assert!(html.contains("<\\/script>"));
    }

    #[test]
    fn test_write_produces_single_file_without_temp_leftovers() {
        let dir = temp_report_dir();
        let output = dir.join("detailed-test-report.html");
        let records = populated_registry().snapshot();
        let summary = ExecutionSummary::from_records(&records);

        HtmlReporter::new().unwrap().write(&summary, &records, &output).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.starts_with("<!DOCTYPE html>"));
        let entries: Vec<_> = fs::read_dir(&dir).unwrap().collect();
        assert_eq!(entries.len(), 1);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_creates_missing_parent_directories() {
        let dir = temp_report_dir();
        let output = dir.join("reports").join("nested").join("report.html");

        let summary = ExecutionSummary::from_records(&[]);
        let records: Vec<TestExecutionRecord> = Vec::new();
        HtmlReporter::new().unwrap().write(&summary, &records, &output).unwrap();

        assert!(output.exists());
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_failure_surfaces_io_error_and_keeps_registry() {
        let dir = temp_report_dir();
        // A file where a directory is needed makes the write path invalid.
        let blocker = dir.join("blocker");
        fs::write(&blocker, "x").unwrap();
        let output = blocker.join("report.html");

        let registry = populated_registry();
        let result = registry.render(&output);

        assert!(matches!(result, Err(crate::reporter::error::Error::Io(_))));
        assert_eq!(registry.snapshot().len(), 1);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_registry_render_convenience_writes_report() {
        let dir = temp_report_dir();
        let output = dir.join("report.html");
        let registry = populated_registry();

        registry.render(&output).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains("\"passed\": 1"));
        fs::remove_dir_all(&dir).unwrap();
    }
}
