//! Table-oriented telemetry for the town simulation.
//!
//! A [`TableSubscriber`] turns `tracing` events into rows of a per-target
//! [`DynamicTable`] held in a thread-local [`Recorder`]. Recorded tables
//! convert to polars DataFrames, can be written as parquet, and the
//! [`series`] helpers pull day-indexed price and population series out of
//! them.

mod frames;
pub mod series;
mod subscriber;
mod table;

pub use frames::{ScopedRecorder, drain_to_dataframes, save_parquet};
pub use subscriber::{TableSubscriber, clear, drain, install_subscriber};
pub use table::{DynamicTable, Recorder, TypedColumn};
