//! Platform adapters: the system clipboard behind `SystemClipboardPort`, the
//! change watcher, and the runtime loop that forwards change notifications to
//! the history engine.

pub mod clipboard;
pub mod ipc;
pub mod runtime;

pub use clipboard::LocalClipboard;
pub use ipc::{PlatformCommand, PlatformEvent};
pub use runtime::PlatformRuntime;
