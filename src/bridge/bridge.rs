use crate::traits::HostBridge;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::warn;

/// In-process host bridge backed by an unbounded tokio channel
#[derive(Clone)]
pub struct ChannelBridge {
    tx: UnboundedSender<String>,
}

impl ChannelBridge {
    pub fn new() -> (Self, UnboundedReceiver<String>) {
        let (tx, rx) = unbounded_channel();
        (Self { tx }, rx)
    }
}

impl HostBridge for ChannelBridge {
    fn send_data(&self, data: &str) {
        if self.tx.send(data.to_owned()).is_err() {
            warn!("Host bridge receiver is gone, dropping payload");
        }
    }
}
