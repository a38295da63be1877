//! Rendering of a `WorkflowRecord` into the `workflow_entity` restore statement.
//!
//! Values are inlined as literals. The only escaping performed is doubling
//! single quotes inside quoted literals.

use std::fmt::Write;

use sea_query::Iden;

use crate::model::WorkflowRecord;

/// Column list of n8n's `workflow_entity`, in insert order.
#[derive(Iden, Clone, Copy)]
#[iden = "workflow_entity"]
pub enum WorkflowEntityIden {
    Table,

    Id,
    Name,
    Active,
    Nodes,
    Connections,
    Settings,
    #[iden = "staticData"]
    StaticData,
    #[iden = "createdAt"]
    CreatedAt,
    #[iden = "updatedAt"]
    UpdatedAt,
    #[iden = "versionId"]
    VersionId,
}

pub const COLUMNS: [WorkflowEntityIden; 10] = [
    WorkflowEntityIden::Id,
    WorkflowEntityIden::Name,
    WorkflowEntityIden::Active,
    WorkflowEntityIden::Nodes,
    WorkflowEntityIden::Connections,
    WorkflowEntityIden::Settings,
    WorkflowEntityIden::StaticData,
    WorkflowEntityIden::CreatedAt,
    WorkflowEntityIden::UpdatedAt,
    WorkflowEntityIden::VersionId,
];

const INDENT: &str = "    ";
const NOW: &str = "NOW()";
const NULL: &str = "NULL";

/// Doubles every single quote. Nothing else is touched.
pub fn escape_literal(val: &str) -> String {
    val.replace('\'', "''")
}

fn quoted(val: &str) -> String {
    format!("'{}'", escape_literal(val))
}

/// Renders the single `INSERT INTO workflow_entity` statement for `record`.
pub fn render_insert(record: &WorkflowRecord) -> String {
    let values = [
        quoted(&record.id),
        quoted(&record.name),
        record.active.to_string(),
        quoted(&record.nodes),
        quoted(&record.connections),
        quoted(&record.settings),
        // staticData is never restored
        NULL.to_string(),
        NOW.to_string(),
        NOW.to_string(),
        quoted(&record.version_id.to_string()),
    ];

    let mut sql = String::new();
    sql.push('\n');
    sql.push_str(&format!("INSERT INTO {} (\n", WorkflowEntityIden::Table.to_string()));
    push_list(&mut sql, COLUMNS.iter().map(|col| format!("\"{}\"", col.to_string())));
    sql.push_str(") VALUES (\n");
    push_list(&mut sql, values.into_iter());
    sql.push_str(");\n");
    sql
}

/// One item per line, `, ` after every item except the last.
fn push_list(
    sql: &mut String,
    items: impl ExactSizeIterator<Item = String>,
) {
    let last = items.len().saturating_sub(1);
    for (i, item) in items.enumerate() {
        let sep = if i < last { ", " } else { "" };
        let _ = writeln!(sql, "{INDENT}{item}{sep}");
    }
}
