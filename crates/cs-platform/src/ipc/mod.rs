mod command;
mod event;

pub use command::PlatformCommand;
pub use event::PlatformEvent;
