//! # cs-core
//!
//! Core domain models and business logic for Clipstack.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! clipboard content and entries, the bounded history store, the selection state
//! and the port traits implemented by the outer layers.

pub mod clipboard;
pub mod config;
pub mod history;
pub mod ids;
pub mod ports;
pub mod selection;

// Re-export commonly used types at the crate root
pub use clipboard::{ClipboardContent, ClipboardEntry, EntryKind, MimeType};
pub use config::{AppConfig, ConfigError, HistoryConfig};
pub use history::{EntryStore, HistoryError, HistoryEvent, InsertOutcome};
pub use ids::EntryId;
pub use selection::{CycleDirection, SelectionState};
