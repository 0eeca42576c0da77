// Column-oriented storage for recorded events

use std::collections::HashMap;

/// A column of typed values.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedColumn {
    U64(Vec<u64>),
    I64(Vec<i64>),
    F64(Vec<f64>),
    Bool(Vec<bool>),
    Str(Vec<String>),
}

impl TypedColumn {
    pub fn len(&self) -> usize {
        match self {
            TypedColumn::U64(v) => v.len(),
            TypedColumn::I64(v) => v.len(),
            TypedColumn::F64(v) => v.len(),
            TypedColumn::Bool(v) => v.len(),
            TypedColumn::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Grow to `len` rows with the column type's zero value
    fn pad_to(&mut self, len: usize) {
        let missing = len.saturating_sub(self.len());
        if missing == 0 {
            return;
        }
        match self {
            TypedColumn::U64(v) => v.resize(len, 0),
            TypedColumn::I64(v) => v.resize(len, 0),
            TypedColumn::F64(v) => v.resize(len, 0.0),
            TypedColumn::Bool(v) => v.resize(len, false),
            TypedColumn::Str(v) => v.resize(len, String::new()),
        }
    }
}

/// One table per event target. Columns appear the first time a field is seen
/// and are back-filled so every column always has `row_count` entries.
#[derive(Debug, Clone, Default)]
pub struct DynamicTable {
    pub columns: HashMap<String, TypedColumn>,
    pub row_count: usize,
}

impl DynamicTable {
    pub(crate) fn pad_columns_to_row_count(&mut self) {
        let rows = self.row_count;
        for col in self.columns.values_mut() {
            col.pad_to(rows);
        }
    }

    /// Column for `name`, created pre-padded with `make` if new
    pub(crate) fn column_mut(
        &mut self,
        name: &str,
        make: impl FnOnce(usize) -> TypedColumn,
    ) -> &mut TypedColumn {
        let rows = self.row_count;
        self.columns
            .entry(name.to_string())
            .or_insert_with(|| make(rows))
    }
}

/// Collection of tables, keyed by tracing target.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub tables: HashMap<String, DynamicTable>,
}

impl Recorder {
    pub fn rows(&self, target: &str) -> usize {
        self.tables.get(target).map(|t| t.row_count).unwrap_or(0)
    }
}
