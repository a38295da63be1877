use std::io;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Serializer, Value, ser::Formatter};
use uuid::Uuid;

use crate::{
    Config, ExportError, Result,
    model::WorkflowDocument,
    utils::{Clock, IdGenerator},
};

/// Flattened, SQL-ready projection of a workflow document.
///
/// Built fresh for every export and dropped once rendered. The document's
/// static data is not carried over.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowRecord {
    pub id: String,
    pub name: String,
    pub active: bool,
    /// compact JSON text
    pub nodes: String,
    /// compact JSON text
    pub connections: String,
    /// compact JSON text
    pub settings: String,
    pub version_id: Uuid,
    /// When the record was built. Not part of the row, the database stamps
    /// `createdAt` and `updatedAt` itself.
    pub generated_at: DateTime<Utc>,
}

impl WorkflowRecord {
    pub fn from_document(
        doc: &WorkflowDocument,
        config: &Config,
        clock: &dyn Clock,
        ids: &dyn IdGenerator,
    ) -> Result<Self> {
        Ok(Self {
            id: config.workflow_id.clone(),
            name: doc.name().unwrap_or(config.default_name.as_str()).to_string(),
            active: true,
            nodes: compact(&doc.nodes())?,
            connections: compact(&doc.connections())?,
            settings: compact(&doc.settings())?,
            version_id: ids.version_id(),
            generated_at: clock.now(),
        })
    }
}

/// Compact output with every non-ASCII character written as a `\uXXXX`
/// escape, astral characters as surrogate pairs.
struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W>(
        &mut self,
        writer: &mut W,
        fragment: &str,
    ) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() {
                writer.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

fn compact(value: &Value) -> Result<String> {
    let mut serializer = Serializer::with_formatter(Vec::new(), AsciiFormatter);
    value.serialize(&mut serializer).map_err(|e| ExportError::Render(e.to_string()))?;
    String::from_utf8(serializer.into_inner()).map_err(|e| ExportError::Render(e.to_string()))
}
