//! Lifecycle events and the synchronous notification bus.

use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::SystemTime;

use crate::column::ColumnInfo;
use crate::navigation::CellIndex;
use crate::sort::SortDirection;
use crate::validation::{CellError, ValidationContext};
use crate::value::CellValue;

/// One lifecycle notification emitted by the grid.
///
/// This is a closed sum type: every event kind has exactly one payload
/// shape, and every payload carries the time it was produced plus the
/// coordinates and column it concerns.
#[derive(Debug, Clone)]
pub enum GridEvent {
    /// The active sort changed (new column or new direction).
    SortChanged {
        at: SystemTime,
        column: ColumnInfo,
        /// Direction previously active on this column, if it was sorted.
        previous: Option<SortDirection>,
        direction: SortDirection,
    },
    /// The active sort was cleared; display order reverted to the original
    /// collection order.
    SortCleared { at: SystemTime, column: ColumnInfo },
    /// A cell entered edit mode.
    EditingStarted {
        at: SystemTime,
        cell: CellIndex,
        column: ColumnInfo,
    },
    /// An edited cell was committed through the column's save callback.
    EditingSaved {
        at: SystemTime,
        cell: CellIndex,
        column: ColumnInfo,
        value: CellValue,
    },
    /// A cell left edit mode without saving.
    EditingExited {
        at: SystemTime,
        cell: CellIndex,
        column: ColumnInfo,
    },
    /// Validation ran and produced errors.
    ValidationFailed {
        at: SystemTime,
        cell: CellIndex,
        column: ColumnInfo,
        errors: Vec<CellError>,
        context: ValidationContext,
    },
    /// Validation ran cleanly on a cell that previously had errors.
    ValidationSucceeded {
        at: SystemTime,
        cell: CellIndex,
        column: ColumnInfo,
        context: ValidationContext,
    },
    /// The error set of a cell changed (different errors than last run).
    ValidationChanged {
        at: SystemTime,
        cell: CellIndex,
        column: ColumnInfo,
        errors: Vec<CellError>,
        context: ValidationContext,
    },
}

/// Discriminant used for per-kind subscriptions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridEventKind {
    SortChanged,
    SortCleared,
    EditingStarted,
    EditingSaved,
    EditingExited,
    ValidationFailed,
    ValidationSucceeded,
    ValidationChanged,
}

impl GridEvent {
    /// The kind of this event.
    pub fn kind(&self) -> GridEventKind {
        match self {
            GridEvent::SortChanged { .. } => GridEventKind::SortChanged,
            GridEvent::SortCleared { .. } => GridEventKind::SortCleared,
            GridEvent::EditingStarted { .. } => GridEventKind::EditingStarted,
            GridEvent::EditingSaved { .. } => GridEventKind::EditingSaved,
            GridEvent::EditingExited { .. } => GridEventKind::EditingExited,
            GridEvent::ValidationFailed { .. } => GridEventKind::ValidationFailed,
            GridEvent::ValidationSucceeded { .. } => GridEventKind::ValidationSucceeded,
            GridEvent::ValidationChanged { .. } => GridEventKind::ValidationChanged,
        }
    }
}

type Listener = Arc<dyn Fn(&GridEvent) + Send + Sync>;

/// Synchronous, same-process notification bus.
///
/// Delivery is in the order events are produced by the causing action, on
/// the dispatching thread. The bus does not buffer, retry, or persist
/// anything; it is a notification mechanism, not a durable log.
#[derive(Clone, Default)]
pub struct EventBus {
    listeners: Arc<RwLock<Vec<(Option<GridEventKind>, Listener)>>>,
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to one event kind.
    pub fn on(&self, kind: GridEventKind, listener: impl Fn(&GridEvent) + Send + Sync + 'static) {
        if let Ok(mut listeners) = self.listeners.write() {
            listeners.push((Some(kind), Arc::new(listener)));
        }
    }

    /// Subscribe to every event kind.
    pub fn subscribe(&self, listener: impl Fn(&GridEvent) + Send + Sync + 'static) {
        if let Ok(mut listeners) = self.listeners.write() {
            listeners.push((None, Arc::new(listener)));
        }
    }

    /// Deliver one event to all matching listeners, in subscription order.
    pub fn publish(&self, event: &GridEvent) {
        log::trace!("grid event: {:?}", event.kind());
        let listeners = match self.listeners.read() {
            Ok(guard) => guard.clone(),
            Err(_) => return,
        };
        for (kind, listener) in &listeners {
            if kind.is_none() || *kind == Some(event.kind()) {
                listener(event);
            }
        }
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.listeners.read().map(|l| l.len()).unwrap_or(0);
        f.debug_struct("EventBus").field("listeners", &count).finish()
    }
}
