//! # workflow-sql
//!
//! Converts an n8n workflow JSON export into a single SQL `INSERT` that
//! restores the workflow into n8n's `workflow_entity` table.
//!
//! The pipeline is linear: load the export, project it into a
//! [`WorkflowRecord`], render the statement and write it out.
//!
//! ```rust,ignore
//! use workflow_sql::{Config, ExporterBuilder};
//!
//! let exporter = ExporterBuilder::new().config(Config::default()).build()?;
//! let report = exporter.export()?;
//! println!("{}", report);
//! ```

mod builder;
mod config;
mod error;
mod exporter;
mod model;
pub mod sql;
pub mod utils;

pub use builder::ExporterBuilder;
pub use config::{Config, DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH, DEFAULT_WORKFLOW_ID, DEFAULT_WORKFLOW_NAME};
pub use error::ExportError;
pub use exporter::{ExportReport, WorkflowSqlExporter};
pub use model::*;

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;
