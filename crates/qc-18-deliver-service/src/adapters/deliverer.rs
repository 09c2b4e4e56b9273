//! Channel Deliverer Adapter
//!
//! Implements `BlocksDeliverer` by forwarding envelopes to the task that owns
//! the deliver stream.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

use crate::domain::{Envelope, TransportError};
use crate::ports::outbound::BlocksDeliverer;

/// Deliverer backed by an mpsc channel.
///
/// The stream task holds the receiver and writes each envelope to the wire.
/// Once it drops the receiver, sends fail with `TransportError::StreamClosed`.
#[derive(Clone, Debug)]
pub struct ChannelDeliverer {
    tx: mpsc::Sender<Envelope>,
}

impl ChannelDeliverer {
    /// Create a deliverer and the receiver for the stream task.
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<Envelope>) {
        let (tx, rx) = mpsc::channel(buffer.max(1));
        (Self { tx }, rx)
    }

    /// Is the stream task still listening?
    pub fn is_connected(&self) -> bool {
        !self.tx.is_closed()
    }
}

#[async_trait]
impl BlocksDeliverer for ChannelDeliverer {
    async fn send(&self, envelope: Envelope) -> Result<(), TransportError> {
        debug!("[qc-18] Handing {} byte envelope to deliver stream", envelope.payload.len());
        self.tx
            .send(envelope)
            .await
            .map_err(|_| TransportError::StreamClosed)
    }
}
