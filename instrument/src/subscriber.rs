// Tracing subscriber that turns events into table rows

use std::cell::RefCell;
use std::collections::HashSet;

use tracing::field::{Field, Visit};
use tracing::span::{Attributes, Record};
use tracing::subscriber::Interest;
use tracing::{Event, Id, Metadata, Subscriber};

use crate::table::{DynamicTable, Recorder, TypedColumn};

thread_local! {
    pub(crate) static RECORDER: RefCell<Recorder> = RefCell::default();
}

/// Visitor that extracts event fields into table columns.
struct ColumnVisitor<'a> {
    table: &'a mut DynamicTable,
}

impl Visit for ColumnVisitor<'_> {
    fn record_u64(&mut self, field: &Field, value: u64) {
        let col = self
            .table
            .column_mut(field.name(), |rows| TypedColumn::U64(vec![0; rows]));
        if let TypedColumn::U64(v) = col {
            v.push(value);
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        let col = self
            .table
            .column_mut(field.name(), |rows| TypedColumn::I64(vec![0; rows]));
        if let TypedColumn::I64(v) = col {
            v.push(value);
        }
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        let col = self
            .table
            .column_mut(field.name(), |rows| TypedColumn::F64(vec![0.0; rows]));
        if let TypedColumn::F64(v) = col {
            v.push(value);
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        let col = self
            .table
            .column_mut(field.name(), |rows| TypedColumn::Bool(vec![false; rows]));
        if let TypedColumn::Bool(v) = col {
            v.push(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        let col = self.table.column_mut(field.name(), |rows| {
            TypedColumn::Str(vec![String::new(); rows])
        });
        if let TypedColumn::Str(v) = col {
            v.push(value.to_string());
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.record_str(field, &format!("{:?}", value));
    }
}

/// Collects info-level events into per-target tables on the current thread.
///
/// With no target filter every target is recorded; otherwise only the named
/// ones are, which keeps high-volume debug targets out of the tables.
#[derive(Debug, Clone, Default)]
pub struct TableSubscriber {
    targets: Option<HashSet<String>>,
}

impl TableSubscriber {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn only<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            targets: Some(targets.into_iter().map(Into::into).collect()),
        }
    }

    fn wants(&self, target: &str) -> bool {
        self.targets
            .as_ref()
            .is_none_or(|targets| targets.contains(target))
    }
}

impl Subscriber for TableSubscriber {
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        // Filters differ between subscribers, so never cache a verdict
        Interest::sometimes()
    }

    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.is_event()
            && *metadata.level() <= tracing::Level::INFO
            && self.wants(metadata.target())
    }

    fn new_span(&self, _span: &Attributes<'_>) -> Id {
        // Spans are not tracked
        Id::from_u64(1)
    }

    fn record(&self, _span: &Id, _values: &Record<'_>) {}

    fn record_follows_from(&self, _span: &Id, _follows: &Id) {}

    fn event(&self, event: &Event<'_>) {
        let target = event.metadata().target().to_string();

        RECORDER.with(|r| {
            let mut recorder = r.borrow_mut();
            let table = recorder.tables.entry(target).or_default();

            table.pad_columns_to_row_count();
            event.record(&mut ColumnVisitor {
                table: &mut *table,
            });
            table.row_count += 1;
            // Fields absent from this event
            table.pad_columns_to_row_count();
        });
    }

    fn enter(&self, _span: &Id) {}

    fn exit(&self, _span: &Id) {}
}

/// Install a [`TableSubscriber`] recording every target as the global default.
/// Later calls are ignored.
pub fn install_subscriber() {
    let _ = tracing::subscriber::set_global_default(TableSubscriber::all());
}

/// Take all recorded data from this thread, leaving it empty.
pub fn drain() -> Recorder {
    RECORDER.with(|r| std::mem::take(&mut *r.borrow_mut()))
}

/// Clear all recorded data without returning it.
pub fn clear() {
    RECORDER.with(|r| *r.borrow_mut() = Recorder::default());
}
