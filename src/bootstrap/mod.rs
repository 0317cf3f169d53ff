pub mod config;
pub mod console;
pub mod run;
pub mod tracing;
pub mod wiring;

pub use config::{load_config, resolve_config, resolve_data_dir};
pub use wiring::build_history;
