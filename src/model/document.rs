use std::{fs, path::Path};

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use tracing::debug;

use crate::{ExportError, Result};

/// The parts of an n8n workflow export this crate reads.
///
/// `nodes`, `connections` and `settings` are opaque: whatever JSON value
/// the export holds, `null` included, is carried through untouched. Only a
/// missing key falls back to `[]` or `{}`. Anything else on the export,
/// `staticData` included, is ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WorkflowDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub nodes: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub connections: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub settings: Option<Value>,
}

/// Only runs for keys that exist, so a JSON `null` becomes `Some(Value::Null)`.
fn present<'de, D>(deserializer: D) -> std::result::Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl WorkflowDocument {
    /// Parses an export. The top level has to be a JSON object.
    pub fn from_json(s: &str) -> Result<Self> {
        let object = serde_json::from_str::<Map<String, Value>>(s)?;
        let document = serde_json::from_value::<WorkflowDocument>(Value::Object(object));
        match document {
            Ok(v) => Ok(v),
            Err(e) => Err(ExportError::Parse(format!("{}", e))),
        }
    }

    /// Reads and parses the export at `path`.
    pub fn load<T: AsRef<Path>>(path: T) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| ExportError::Io(format!("failed to read {:?}: {}", path, e)))?;
        debug!(path = ?path, bytes = text.len(), "loaded workflow document");

        Self::from_json(&text)
    }

    /// The document's name, unless it is missing or empty.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn nodes(&self) -> Value {
        self.nodes.clone().unwrap_or_else(|| Value::Array(Vec::new()))
    }

    pub fn connections(&self) -> Value {
        self.connections.clone().unwrap_or_else(|| Value::Object(Map::new()))
    }

    pub fn settings(&self) -> Value {
        self.settings.clone().unwrap_or_else(|| Value::Object(Map::new()))
    }
}
