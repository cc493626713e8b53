//! Column and index metadata types.
//!
//! These are the dialect-independent shapes every provider normalizes its
//! catalog rows into. Code generators consume them directly.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Key role reported for primary-key columns.
pub const PRIMARY_KEY: &str = "PRI";

/// Key role reported for columns covered by a unique key.
pub const UNIQUE_KEY: &str = "UNI";

/// Index name MySQL reserves for the primary key.
pub const PRIMARY_INDEX: &str = "PRIMARY";

/// Column metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name. Join key against [`Index::column_name`].
    pub name: String,

    /// Column comment (empty when the dialect has none).
    pub comment: String,

    /// Raw data type name (e.g., "int", "varchar").
    pub data_type: String,

    /// Whether the column allows NULL.
    pub is_nullable: bool,

    /// Key role (e.g., "PRI", "UNI", "MUL", or empty).
    pub column_key: String,

    /// Full declared type (e.g., "varchar(255)", "int unsigned").
    pub column_type: String,

    /// Default value expression, if any.
    pub default_value: Option<String>,

    /// Extra attributes (e.g., "auto_increment").
    pub extra: String,

    /// Indexes this column participates in, in fetch order.
    #[serde(default)]
    pub indexes: Vec<Index>,
}

impl Column {
    /// Check if the column is part of the primary key.
    pub fn is_primary_key(&self) -> bool {
        self.column_key == PRIMARY_KEY
    }

    /// Check if the column is auto-incremented by the database.
    pub fn is_auto_increment(&self) -> bool {
        self.extra.to_lowercase().contains("auto_increment")
    }

    /// Check if the column is covered by a unique key or unique index.
    pub fn is_unique_key(&self) -> bool {
        self.column_key == UNIQUE_KEY || self.indexes.iter().any(|idx| idx.is_unique())
    }
}

/// Parse an information_schema `IS_NULLABLE` value.
pub fn parse_nullable(value: &str) -> bool {
    value.eq_ignore_ascii_case("YES")
}

/// One column's membership in one named index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Index {
    /// Owning table name.
    pub table_name: String,

    /// Column name.
    pub column_name: String,

    /// Index name.
    pub index_name: String,

    /// 1-based position of the column within the index.
    pub seq_in_index: i32,

    /// True if the index does not enforce uniqueness.
    pub non_unique: bool,
}

impl Index {
    /// Check if the index enforces uniqueness.
    pub fn is_unique(&self) -> bool {
        !self.non_unique
    }

    /// Check if this is the primary key index.
    pub fn is_primary(&self) -> bool {
        self.index_name == PRIMARY_INDEX
    }
}

/// Group index entries by column name, keeping fetch order inside each group.
pub fn group_by_column(indexes: Vec<Index>) -> HashMap<String, Vec<Index>> {
    let mut grouped: HashMap<String, Vec<Index>> = HashMap::new();
    for idx in indexes {
        grouped.entry(idx.column_name.clone()).or_default().push(idx);
    }
    grouped
}

/// Column type as reported by a query result rather than by a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnTypeDescriptor {
    /// Result column name.
    pub name: String,

    /// Type name reported by the database (e.g., "INT4", "VARCHAR").
    pub database_type_name: String,
}

impl ColumnTypeDescriptor {
    pub fn new(name: impl Into<String>, database_type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            database_type_name: database_type_name.into(),
        }
    }
}

/// Overlay probed type names onto catalog columns.
///
/// Columns are matched to descriptors by exact name. Unmatched columns keep
/// their catalog `column_type`; unmatched descriptors are ignored.
pub fn enrich_column_types(
    columns: Vec<Column>,
    descriptors: &[ColumnTypeDescriptor],
) -> Vec<Column> {
    let by_name: HashMap<&str, &str> = descriptors
        .iter()
        .map(|d| (d.name.as_str(), d.database_type_name.as_str()))
        .collect();

    columns
        .into_iter()
        .map(|col| match by_name.get(col.name.as_str()) {
            Some(type_name) => Column {
                column_type: (*type_name).to_string(),
                ..col
            },
            None => col,
        })
        .collect()
}
