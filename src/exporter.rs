//! The export pipeline: load, extract, render, persist.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    Config, ExportError, Result,
    model::{WorkflowDocument, WorkflowRecord},
    sql,
    utils::{Clock, IdGenerator},
};

/// Outcome of a successful export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub workflow_id: String,
    pub version_id: Uuid,
    pub output_path: PathBuf,
    pub generated_at: DateTime<Utc>,
    pub bytes_written: usize,
}

impl fmt::Display for ExportReport {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "SQL generated for Workflow ID: {}", self.workflow_id)
    }
}

/// Turns a workflow export into a `workflow_entity` restore statement.
///
/// ```rust,ignore
/// use workflow_sql::ExporterBuilder;
///
/// let exporter = ExporterBuilder::new().build()?;
/// let report = exporter.export()?;
/// println!("{}", report);
/// ```
pub struct WorkflowSqlExporter {
    config: Config,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl WorkflowSqlExporter {
    pub fn with_providers(
        config: Config,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            config,
            clock,
            ids,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn load<T: AsRef<Path>>(
        &self,
        path: T,
    ) -> Result<WorkflowDocument> {
        WorkflowDocument::load(path)
    }

    pub fn record(
        &self,
        doc: &WorkflowDocument,
    ) -> Result<WorkflowRecord> {
        WorkflowRecord::from_document(doc, &self.config, self.clock.as_ref(), self.ids.as_ref())
    }

    /// Renders the statement for `doc` without touching the filesystem.
    pub fn render(
        &self,
        doc: &WorkflowDocument,
    ) -> Result<String> {
        let record = self.record(doc)?;
        Ok(sql::render_insert(&record))
    }

    /// Runs the pipeline against the configured input and output paths.
    pub fn export(&self) -> Result<ExportReport> {
        self.export_from(&self.config.input_path, &self.config.output_path)
    }

    /// Runs the pipeline against explicit paths. The output file is only
    /// opened once the input has been loaded and rendered.
    pub fn export_from<I, O>(
        &self,
        input: I,
        output: O,
    ) -> Result<ExportReport>
    where
        I: AsRef<Path>,
        O: AsRef<Path>,
    {
        let doc = self.load(input)?;
        let record = self.record(&doc)?;
        let text = sql::render_insert(&record);
        debug!(workflow_id = %record.id, bytes = text.len(), "rendered insert statement");

        let output = output.as_ref();
        fs::write(output, &text).map_err(|e| ExportError::Io(format!("failed to write {:?}: {}", output, e)))?;
        info!(
            workflow_id = %record.id,
            version_id = %record.version_id,
            output = ?output,
            generated_at = %record.generated_at,
            "workflow sql written"
        );

        Ok(ExportReport {
            workflow_id: record.id,
            version_id: record.version_id,
            output_path: output.to_path_buf(),
            generated_at: record.generated_at,
            bytes_written: text.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::{Value, json};

    use super::*;
    use crate::utils::{FixedClock, FixedIdGenerator};

    fn fixed_exporter(config: Config) -> WorkflowSqlExporter {
        WorkflowSqlExporter::with_providers(
            config,
            Arc::new(FixedClock(Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap())),
            Arc::new(FixedIdGenerator(Uuid::from_u128(0xaaaa_bbbb_cccc_4ddd_8eee_ffff00001111))),
        )
    }

    /// The ten value lines between `VALUES (` and `);`, separators stripped.
    fn value_slots(sql: &str) -> Vec<String> {
        let (_, values) = sql.split_once(") VALUES (\n").unwrap();
        let (values, _) = values.split_once(");").unwrap();
        values.lines().map(|l| l.trim().trim_end_matches(',').to_string()).collect()
    }

    fn unquote(slot: &str) -> Value {
        let inner = slot.strip_prefix('\'').unwrap().strip_suffix('\'').unwrap();
        serde_json::from_str(&inner.replace("''", "'")).unwrap()
    }

    #[test]
    fn test_render_well_formed_document() {
        let input = json!({
            "name": "Ops's report",
            "nodes": [{"name": "Cron", "parameters": {"rule": "0 * * * *"}}, {"name": "Slack", "parameters": {"text": "it's up"}}],
            "connections": {"Cron": {"main": [[{"node": "Slack", "type": "main", "index": 0}]]}},
            "settings": {"saveManualExecutions": true},
            "staticData": {"ignored": true}
        });
        let doc = WorkflowDocument::from_json(&input.to_string()).unwrap();
        let sql = fixed_exporter(Config::default()).render(&doc).unwrap();

        assert_eq!(sql.matches("INSERT INTO workflow_entity").count(), 1);
        let slots = value_slots(&sql);
        assert_eq!(slots.len(), 10);
        assert_eq!(slots[0], "'HealthCheckFinal01'");
        assert_eq!(slots[1], "'Ops''s report'");
        assert_eq!(slots[2], "true");
        assert_eq!(unquote(&slots[3]), input["nodes"]);
        assert_eq!(unquote(&slots[4]), input["connections"]);
        assert_eq!(unquote(&slots[5]), input["settings"]);
        assert_eq!(slots[6], "NULL");
        assert_eq!(slots[7], "NOW()");
        assert_eq!(slots[8], "NOW()");
        assert_eq!(slots[9], "'aaaabbbb-cccc-4ddd-8eee-ffff00001111'");
    }

    #[test]
    fn test_render_empty_document() {
        let sql = fixed_exporter(Config::default()).render(&WorkflowDocument::default()).unwrap();
        let slots = value_slots(&sql);
        assert_eq!(slots[1], "'MAS - Proactive Health Check & Report'");
        assert_eq!(slots[3], "'[]'");
        assert_eq!(slots[4], "'{}'");
        assert_eq!(slots[5], "'{}'");
        assert_eq!(slots[6], "NULL");
    }

    #[test]
    fn test_render_passes_odd_shapes_through() {
        let input = json!({
            "nodes": {"a": 1},
            "connections": null,
            "settings": [],
            "staticData": "kept out"
        });
        let doc = WorkflowDocument::from_json(&input.to_string()).unwrap();
        let sql = fixed_exporter(Config::default()).render(&doc).unwrap();

        let slots = value_slots(&sql);
        assert_eq!(slots[3], r#"'{"a":1}'"#);
        assert_eq!(slots[4], "'null'");
        assert_eq!(slots[5], "'[]'");
        assert_eq!(slots[6], "NULL");
        for (slot, field) in [(3, "nodes"), (4, "connections"), (5, "settings")] {
            assert_eq!(unquote(&slots[slot]), input[field]);
        }
    }

    #[test]
    fn test_render_keeps_exact_numbers() {
        let doc = WorkflowDocument::from_json(r#"{"nodes": [123456789012345678901234567890]}"#).unwrap();
        let sql = fixed_exporter(Config::default()).render(&doc).unwrap();
        assert_eq!(value_slots(&sql)[3], "'[123456789012345678901234567890]'");
    }

    #[test]
    fn test_export_writes_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("workflow.json");
        let output = dir.path().join("restore_workflow.sql");
        fs::write(&input, r#"{"name": "It's a test"}"#).unwrap();
        fs::write(&output, "stale content that is much longer than nothing at all ".repeat(100)).unwrap();

        let config = Config {
            input_path: input,
            output_path: output.clone(),
            ..Config::default()
        };
        let exporter = fixed_exporter(config);
        let report = exporter.export().unwrap();

        let written = fs::read_to_string(&output).unwrap();
        assert!(!written.contains("stale"));
        assert!(written.contains("'It''s a test'"));
        assert_eq!(written, exporter.render(&WorkflowDocument::from_json(r#"{"name": "It's a test"}"#).unwrap()).unwrap());
        assert_eq!(report.bytes_written, written.len());
        assert_eq!(report.output_path, output);
        assert_eq!(report.generated_at, Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 7).unwrap());
        assert_eq!(report.to_string(), "SQL generated for Workflow ID: HealthCheckFinal01");
    }

    #[test]
    fn test_missing_input_leaves_output_alone() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out.sql");
        let exporter = fixed_exporter(Config::default());

        let err = exporter.export_from(dir.path().join("missing.json"), &output).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
        assert!(!output.exists());

        fs::write(&output, "previous").unwrap();
        let bad = dir.path().join("bad.json");
        fs::write(&bad, "{not json").unwrap();
        let err = exporter.export_from(&bad, &output).unwrap_err();
        assert!(matches!(err, ExportError::Parse(_)));
        assert_eq!(fs::read_to_string(&output).unwrap(), "previous");
    }

    #[test]
    fn test_unwritable_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("workflow.json");
        fs::write(&input, "{}").unwrap();

        let err = fixed_exporter(Config::default()).export_from(&input, dir.path().join("no/such/dir/out.sql")).unwrap_err();
        assert!(matches!(err, ExportError::Io(_)));
    }
}
