// Polars conversion and parquet output for recorded tables

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use polars::prelude::*;

use crate::subscriber::{clear, drain, install_subscriber};
use crate::table::{DynamicTable, Recorder, TypedColumn};

impl DynamicTable {
    /// Convert this table to a polars DataFrame.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let mut names: Vec<&String> = self.columns.keys().collect();
        names.sort();

        let columns = names
            .into_iter()
            .map(|name| match &self.columns[name] {
                TypedColumn::U64(v) => Column::new(name.into(), v),
                TypedColumn::I64(v) => Column::new(name.into(), v),
                TypedColumn::F64(v) => Column::new(name.into(), v),
                TypedColumn::Bool(v) => Column::new(name.into(), v),
                TypedColumn::Str(v) => Column::new(name.into(), v),
            })
            .collect();

        DataFrame::new(columns)
    }
}

impl Recorder {
    /// Convert every table to a DataFrame, keyed by target. Tables that fail
    /// to convert are skipped.
    pub fn to_dataframes(&self) -> HashMap<String, DataFrame> {
        self.tables
            .iter()
            .filter_map(|(name, table)| table.to_dataframe().ok().map(|df| (name.clone(), df)))
            .collect()
    }
}

pub fn drain_to_dataframes() -> HashMap<String, DataFrame> {
    drain().to_dataframes()
}

fn io_error(e: std::io::Error) -> PolarsError {
    PolarsError::IO {
        error: e.into(),
        msg: None,
    }
}

/// Write each frame to `{dir}/{name}.parquet`.
pub fn save_parquet(dfs: &mut HashMap<String, DataFrame>, dir: &Path) -> PolarsResult<()> {
    std::fs::create_dir_all(dir).map_err(io_error)?;
    for (name, df) in dfs.iter_mut() {
        let file = std::fs::File::create(dir.join(format!("{name}.parquet"))).map_err(io_error)?;
        ParquetWriter::new(file).finish(df)?;
    }
    Ok(())
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(60)
        .collect()
}

/// Clears recorded data on creation and writes it as parquet on drop.
///
/// Each run lands in `{parent}/{unix_secs}_{name}/` with a `_ready` file
/// written after the last table. Call [`ScopedRecorder::get`] to inspect the
/// frames before the guard goes away.
pub struct ScopedRecorder {
    run_dir: PathBuf,
    run_name: String,
    dfs: Option<HashMap<String, DataFrame>>,
}

impl ScopedRecorder {
    pub fn new(parent: impl Into<PathBuf>, name: &str) -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let run_name = format!("{secs}_{}", sanitize(name));
        clear();
        install_subscriber();
        Self {
            run_dir: parent.into().join(&run_name),
            run_name,
            dfs: None,
        }
    }

    /// Frames recorded so far. The first call drains the recorder.
    pub fn get(&mut self) -> &HashMap<String, DataFrame> {
        self.dfs.get_or_insert_with(drain_to_dataframes)
    }

    pub fn run_name(&self) -> &str {
        &self.run_name
    }

    pub fn run_dir(&self) -> &Path {
        &self.run_dir
    }
}

impl Drop for ScopedRecorder {
    fn drop(&mut self) {
        let mut dfs = self.dfs.take().unwrap_or_else(drain_to_dataframes);
        if dfs.is_empty() {
            return;
        }
        if let Err(e) = save_parquet(&mut dfs, &self.run_dir) {
            eprintln!("ScopedRecorder({}): parquet write failed: {e}", self.run_name);
            return;
        }
        if let Err(e) = std::fs::File::create(self.run_dir.join("_ready")) {
            eprintln!("ScopedRecorder({}): _ready write failed: {e}", self.run_name);
        }
    }
}
