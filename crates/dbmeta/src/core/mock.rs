//! In-memory session for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{MetaError, Result};

use super::schema::{Column, ColumnTypeDescriptor, Index};
use super::traits::Session;

/// Scripted outcome for one kind of query.
pub enum Reply<T> {
    Rows(Vec<T>),
    Fail(String),
}

impl<T: Clone> Reply<T> {
    fn take(&self, context: &str) -> Result<Vec<T>> {
        match self {
            Reply::Rows(rows) => Ok(rows.clone()),
            Reply::Fail(msg) => Err(MetaError::query(msg, context)),
        }
    }
}

/// Records every call so tests can assert on what was issued.
pub struct MockSession {
    pub db_type: String,
    pub columns: Reply<Column>,
    pub indexes: Reply<Index>,
    pub probe: Reply<ColumnTypeDescriptor>,
    pub calls: Mutex<Vec<String>>,
    pub warnings: Mutex<Vec<String>>,
}

impl MockSession {
    pub fn new(db_type: &str) -> Self {
        Self {
            db_type: db_type.to_string(),
            columns: Reply::Rows(Vec::new()),
            indexes: Reply::Rows(Vec::new()),
            probe: Reply::Rows(Vec::new()),
            calls: Mutex::new(Vec::new()),
            warnings: Mutex::new(Vec::new()),
        }
    }

    pub fn with_columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = Reply::Rows(columns);
        self
    }

    pub fn with_indexes(mut self, indexes: Vec<Index>) -> Self {
        self.indexes = Reply::Rows(indexes);
        self
    }

    pub fn with_probe(mut self, probe: Vec<ColumnTypeDescriptor>) -> Self {
        self.probe = Reply::Rows(probe);
        self
    }

    pub fn failing_columns(mut self, msg: &str) -> Self {
        self.columns = Reply::Fail(msg.to_string());
        self
    }

    pub fn failing_indexes(mut self, msg: &str) -> Self {
        self.indexes = Reply::Fail(msg.to_string());
        self
    }

    pub fn failing_probe(mut self, msg: &str) -> Self {
        self.probe = Reply::Fail(msg.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Session for MockSession {
    fn db_type(&self) -> &str {
        &self.db_type
    }

    async fn query_columns(&self, sql: &str, schema: &str, table: &str) -> Result<Vec<Column>> {
        self.record(format!("columns {}.{} :: {}", schema, table, sql.trim()));
        self.columns.take("columns")
    }

    async fn query_indexes(&self, sql: &str, schema: &str, table: &str) -> Result<Vec<Index>> {
        self.record(format!("indexes {}.{} :: {}", schema, table, sql.trim()));
        self.indexes.take("indexes")
    }

    async fn probe_column_types(&self, sql: &str) -> Result<Vec<ColumnTypeDescriptor>> {
        self.record(format!("probe :: {}", sql));
        self.probe.take("probe")
    }

    fn warn(&self, message: &str, err: &MetaError) {
        self.warnings
            .lock()
            .unwrap()
            .push(format!("{}: {}", message, err));
    }
}
