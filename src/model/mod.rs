mod document;
mod record;

pub use document::WorkflowDocument;
pub use record::WorkflowRecord;
