use tokio::sync::mpsc;

use crate::ipc::{PlatformCommand, PlatformEvent};

/// Notifications carry no data, so extras dropped on a full buffer lose nothing.
pub const EVENT_CHANNEL_CAPACITY: usize = 16;
pub const COMMAND_CHANNEL_CAPACITY: usize = 16;

pub type PlatformEventSender = mpsc::Sender<PlatformEvent>;
pub type PlatformEventReceiver = mpsc::Receiver<PlatformEvent>;

pub type PlatformCommandSender = mpsc::Sender<PlatformCommand>;
pub type PlatformCommandReceiver = mpsc::Receiver<PlatformCommand>;

pub fn event_channel() -> (PlatformEventSender, PlatformEventReceiver) {
    mpsc::channel(EVENT_CHANNEL_CAPACITY)
}

pub fn command_channel() -> (PlatformCommandSender, PlatformCommandReceiver) {
    mpsc::channel(COMMAND_CHANNEL_CAPACITY)
}
