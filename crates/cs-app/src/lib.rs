//! Clipstack application layer
//!
//! The clipboard history engine: content negotiation, single-flight refresh,
//! privacy mode, selection synchronisation with the system clipboard, and the
//! [`ClipboardHistory`] facade that ties them to the persistence and
//! presentation ports.
//!
//! ```text
//! [platform watcher]
//!        ↓  ClipboardChangeHandler
//! ClipboardHistory::refresh
//!        ↓  RefreshGuard → PrivacyGate → ContentResolver
//! SelectionCoordinator::reconcile_external_change
//!        ↓
//! EntryStore (insert / evict)  →  HistoryRepositoryPort, HistoryEventPort
//! ```

pub mod deferred_push;
pub mod engine;
pub mod privacy;
pub mod refresh_guard;
pub mod resolver;
pub mod selection;
pub mod state;

pub use engine::{ClipboardHistory, EntryView, RefreshOutcome};
pub use privacy::PrivacyGate;
pub use refresh_guard::{RefreshGuard, RefreshPermit};
pub use resolver::ContentResolver;
pub use selection::{CycleOutcome, Reconciled, SelectError, SelectionCoordinator};
pub use state::HistoryState;
