//! # Inbound Ports
//!
//! API trait defining what the Deliver Service can do.

use async_trait::async_trait;

use super::outbound::LedgerInfo;
use crate::domain::DeliverError;

/// Deliver requester API - inbound port.
///
/// Each call issues exactly one seek request on the current deliver stream,
/// resuming right after the last locally committed block.
#[async_trait]
pub trait DeliverRequesterApi: Send + Sync {
    /// Resume delivery of full blocks.
    async fn request_blocks(&self, ledger: &dyn LedgerInfo) -> Result<(), DeliverError>;

    /// Resume delivery of block headers with signatures.
    async fn request_headers(&self, ledger: &dyn LedgerInfo) -> Result<(), DeliverError>;
}
