//! Port interfaces for the application layer
//!
//! Ports define the contract between the history engine and the outside
//! world: the system clipboard, persistence and the presentation layer.
//! Implementations live in `cs-platform`, `cs-infra` and the binary, so the
//! engine never depends on a concrete clipboard backend or file format.

mod clipboard;
mod clipboard_change_handler;
mod history_event;
mod history_repository;

pub use clipboard::SystemClipboardPort;
pub use clipboard_change_handler::ClipboardChangeHandler;
pub use history_event::HistoryEventPort;
pub use history_repository::HistoryRepositoryPort;
