//! Minimal typed struct-of-columns table.
//!
//! The DSE index consumes "a tabular collection of rows with named, typed
//! columns" as a capability. This module provides exactly that: typed
//! `Vec<Option<T>>` columns behind a name-indexed schema, with no external
//! dataframe dependency. Read paths are side-effect-free; a constructed
//! table is never mutated.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    /// Structural error: column/row count mismatch, ragged delimited input.
    #[error("Schema error: {0}")]
    Schema(String),
}

/// Tabular field types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Boolean,
    Int64,
    Float64,
    String,
}

/// Field definition for one column.
#[derive(Debug, Clone)]
pub struct FieldInfo {
    pub name: String,
    pub field_type: FieldType,
    pub nullable: bool,
}

/// Schema for a table, with name-based column lookup.
#[derive(Debug, Clone)]
pub struct TableSchema {
    pub fields: Vec<FieldInfo>,
    name_to_index: HashMap<String, usize>,
}

impl TableSchema {
    pub fn new(fields: Vec<FieldInfo>) -> Self {
        let name_to_index = fields
            .iter()
            .enumerate()
            .map(|(i, f)| (f.name.clone(), i))
            .collect();
        Self {
            fields,
            name_to_index,
        }
    }

    #[inline]
    pub fn index_by_name(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    pub fn field_by_name(&self, name: &str) -> Option<&FieldInfo> {
        self.index_by_name(name).map(|i| &self.fields[i])
    }

    #[inline]
    pub fn num_fields(&self) -> usize {
        self.fields.len()
    }
}

/// Column storage: typed arrays with optional values (nullable).
#[derive(Debug, Clone)]
pub enum Column {
    Boolean(Vec<Option<bool>>),
    Int64(Vec<Option<i64>>),
    Float64(Vec<Option<f64>>),
    String(Vec<Option<String>>),
}

impl Column {
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Self::Boolean(v) => v.len(),
            Self::Int64(v) => v.len(),
            Self::Float64(v) => v.len(),
            Self::String(v) => v.len(),
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Boolean(_) => FieldType::Boolean,
            Self::Int64(_) => FieldType::Int64,
            Self::Float64(_) => FieldType::Float64,
            Self::String(_) => FieldType::String,
        }
    }

    /// Check if value at index is null (or out of range).
    #[inline]
    pub fn is_null(&self, idx: usize) -> bool {
        match self {
            Self::Boolean(v) => v.get(idx).map_or(true, |v| v.is_none()),
            Self::Int64(v) => v.get(idx).map_or(true, |v| v.is_none()),
            Self::Float64(v) => v.get(idx).map_or(true, |v| v.is_none()),
            Self::String(v) => v.get(idx).map_or(true, |v| v.is_none()),
        }
    }

    /// Get boolean value at index (returns None if wrong type or null).
    #[inline]
    pub fn get_bool(&self, idx: usize) -> Option<bool> {
        match self {
            Self::Boolean(v) => v.get(idx).and_then(|v| *v),
            _ => None,
        }
    }

    /// Get i64 value at index (returns None if wrong type or null).
    #[inline]
    pub fn get_i64(&self, idx: usize) -> Option<i64> {
        match self {
            Self::Int64(v) => v.get(idx).and_then(|v| *v),
            _ => None,
        }
    }

    /// Get f64 value at index (returns None if wrong type or null).
    #[inline]
    pub fn get_f64(&self, idx: usize) -> Option<f64> {
        match self {
            Self::Float64(v) => v.get(idx).and_then(|v| *v),
            _ => None,
        }
    }

    /// Get string value at index (returns None if wrong type or null).
    #[inline]
    pub fn get_string(&self, idx: usize) -> Option<&str> {
        match self {
            Self::String(v) => v.get(idx).and_then(|v| v.as_deref()),
            _ => None,
        }
    }
}

/// An immutable table: schema plus column data in schema order.
#[derive(Debug, Clone)]
pub struct Table {
    pub schema: TableSchema,
    pub columns: Vec<Column>,
    pub num_rows: usize,
}

impl Table {
    /// Create a new table, verifying column count and uniform row count.
    pub fn new(schema: TableSchema, columns: Vec<Column>) -> Result<Self, TableError> {
        if columns.len() != schema.num_fields() {
            return Err(TableError::Schema(format!(
                "Column count mismatch: schema has {} fields, got {} columns",
                schema.num_fields(),
                columns.len()
            )));
        }

        let num_rows = columns.first().map_or(0, |c| c.len());
        for (i, col) in columns.iter().enumerate() {
            if col.len() != num_rows {
                return Err(TableError::Schema(format!(
                    "Row count mismatch: column {} has {} rows, expected {}",
                    i,
                    col.len(),
                    num_rows
                )));
            }
        }

        Ok(Self {
            schema,
            columns,
            num_rows,
        })
    }

    /// Parse header-first delimited text into an all-string table.
    ///
    /// The first line names the columns; every subsequent non-empty line
    /// must have the same number of fields. This covers the `.cex`-style
    /// pipe-delimited exports DSE tables ship as; the text is already in
    /// memory, no file or network access happens here.
    pub fn from_delimited(text: &str, separator: char) -> Result<Self, TableError> {
        let mut lines = text.lines().filter(|l| !l.trim().is_empty());
        let header = lines
            .next()
            .ok_or_else(|| TableError::Schema("Delimited input has no header line".into()))?;

        let names: Vec<&str> = header.split(separator).collect();
        let mut data: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];

        for (lineno, line) in lines.enumerate() {
            let cells: Vec<&str> = line.split(separator).collect();
            if cells.len() != names.len() {
                return Err(TableError::Schema(format!(
                    "Row {} has {} fields, header has {}",
                    lineno + 2,
                    cells.len(),
                    names.len()
                )));
            }
            for (col, cell) in data.iter_mut().zip(&cells) {
                col.push(Some(cell.to_string()));
            }
        }

        let fields = names
            .iter()
            .map(|name| FieldInfo {
                name: name.to_string(),
                field_type: FieldType::String,
                nullable: false,
            })
            .collect();
        let columns = data.into_iter().map(Column::String).collect();
        Table::new(TableSchema::new(fields), columns)
    }

    /// Get column by name.
    #[inline]
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.schema.index_by_name(name).map(|i| &self.columns[i])
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.num_rows == 0
    }

    /// Iterator over row indices.
    pub fn row_indices(&self) -> impl Iterator<Item = usize> {
        0..self.num_rows
    }
}
