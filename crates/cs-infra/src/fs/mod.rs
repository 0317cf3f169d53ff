pub mod app_data_dir;
pub mod atomic;

pub use app_data_dir::{app_config_dir, app_data_dir};
