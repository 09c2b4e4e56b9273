//! # Blocks Requester
//!
//! Application service issuing the seek request that (re)starts a deliver
//! stream.
//!
//! ## Flow
//!
//! ```text
//! ledger height ──► decide_start ──► build_seek_info ──► sign + TLS bind ──► send
//! ```
//!
//! Each phase runs only if the previous one succeeded; the first failure ends
//! the attempt and nothing later runs.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::algorithms::{
    build_seek_info, create_signed_envelope_with_tls_binding, decide_start, tls_cert_hash,
};
use crate::config::DeliverConfig;
use crate::domain::{
    ChannelId, DeliverError, Envelope, HeaderType, SeekContentType, SeekPosition,
};
use crate::ports::{BlocksDeliverer, DeliverRequesterApi, LedgerInfo, Signer, TlsClient};

/// Blocks Requester - resumes a deliver stream from the local ledger height.
pub struct BlocksRequester<D, S, T>
where
    D: BlocksDeliverer,
    S: Signer,
    T: TlsClient,
{
    /// Channel.
    channel: ChannelId,
    /// Configuration.
    config: DeliverConfig,
    /// Deliver stream.
    client: Arc<D>,
    /// Signing identity.
    signer: Arc<S>,
    /// TLS material of the deliver connection.
    tls: Arc<T>,
}

impl<D, S, T> BlocksRequester<D, S, T>
where
    D: BlocksDeliverer,
    S: Signer,
    T: TlsClient,
{
    /// Create a new requester.
    pub fn new(
        config: DeliverConfig,
        client: Arc<D>,
        signer: Arc<S>,
        tls: Arc<T>,
    ) -> Result<Self, DeliverError> {
        config.validate()?;
        Ok(Self {
            channel: config.channel(),
            config,
            client,
            signer,
            tls,
        })
    }

    /// Channel this requester seeks on.
    pub fn channel(&self) -> &ChannelId {
        &self.channel
    }

    /// Build the signed seek envelope for a given height.
    pub fn seek_envelope(
        &self,
        height: u64,
        content_type: SeekContentType,
    ) -> Result<Envelope, DeliverError> {
        let seek_info = build_seek_info(decide_start(height), content_type);

        let tls_cert_hash = tls_cert_hash(self.config.tls_enabled, self.tls.as_ref());
        debug!(
            "[qc-18] Seek on channel {} TLS-bound: {}",
            self.channel,
            tls_cert_hash.is_some()
        );

        create_signed_envelope_with_tls_binding(
            HeaderType::DeliverSeekInfo,
            &self.channel,
            self.signer.as_ref(),
            &seek_info,
            self.config.msg_version,
            self.config.epoch,
            tls_cert_hash,
        )
        .map_err(|e| {
            warn!("[qc-18] Failed creating seek envelope for channel {}: {}", self.channel, e);
            DeliverError::Signing {
                channel: self.channel.clone(),
                source: e,
            }
        })
    }

    /// Internal: one resumption attempt.
    async fn request(
        &self,
        ledger: &dyn LedgerInfo,
        content_type: SeekContentType,
    ) -> Result<(), DeliverError> {
        let height = ledger.ledger_height().await.map_err(|e| {
            error!(
                "[qc-18] Can't get ledger height for channel {} from committer [{}]",
                self.channel, e
            );
            DeliverError::HeightQuery {
                channel: self.channel.clone(),
                source: e,
            }
        })?;

        match decide_start(height) {
            SeekPosition::Oldest => info!(
                "[qc-18] Starting deliver with oldest block for channel {}",
                self.channel
            ),
            SeekPosition::Specified(n) => info!(
                "[qc-18] Starting deliver with block [{}] for channel {}",
                n, self.channel
            ),
        }

        let envelope = self.seek_envelope(height, content_type)?;

        self.client.send(envelope).await.map_err(|e| {
            warn!("[qc-18] Failed sending seek envelope for channel {}: {}", self.channel, e);
            DeliverError::TransportSend {
                channel: self.channel.clone(),
                source: e,
            }
        })
    }
}

#[async_trait]
impl<D, S, T> DeliverRequesterApi for BlocksRequester<D, S, T>
where
    D: BlocksDeliverer + 'static,
    S: Signer + 'static,
    T: TlsClient + 'static,
{
    async fn request_blocks(&self, ledger: &dyn LedgerInfo) -> Result<(), DeliverError> {
        self.request(ledger, SeekContentType::Block).await
    }

    async fn request_headers(&self, ledger: &dyn LedgerInfo) -> Result<(), DeliverError> {
        self.request(ledger, SeekContentType::HeaderWithSig).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::compute_sha256;
    use crate::domain::{
        EnvelopeError, LedgerError, RequestPhase, SeekBehavior, SignerError, TransportError,
        MAX_SEEK_NUMBER,
    };
    use crate::ports::{MockLedger, MockSigner, RecordingDeliverer};
    use crate::StaticTlsClient;

    type TestRequester = BlocksRequester<RecordingDeliverer, MockSigner, StaticTlsClient>;

    fn create_test_requester(
        config: DeliverConfig,
        signer: MockSigner,
        tls: StaticTlsClient,
    ) -> (TestRequester, Arc<RecordingDeliverer>) {
        let client = Arc::new(RecordingDeliverer::default());
        let requester =
            BlocksRequester::new(config, client.clone(), Arc::new(signer), Arc::new(tls))
                .unwrap();
        (requester, client)
    }

    #[test]
    fn test_requester_rejects_empty_channel() {
        let result = TestRequester::new(
            DeliverConfig::default(),
            Arc::new(RecordingDeliverer::default()),
            Arc::new(MockSigner::default()),
            Arc::new(StaticTlsClient::server_only()),
        );
        assert!(matches!(result, Err(DeliverError::InvalidConfig(_))));
    }

    #[tokio::test]
    async fn test_request_blocks_sends_once() {
        let (requester, client) = create_test_requester(
            DeliverConfig::for_testing(),
            MockSigner::default(),
            StaticTlsClient::server_only(),
        );

        requester
            .request_blocks(&MockLedger::at_height(3))
            .await
            .unwrap();

        assert_eq!(client.send_count(), 1);
        let (payload, info) = client.sent()[0].open().unwrap();
        assert_eq!(info.start, SeekPosition::Specified(3));
        assert_eq!(info.stop, SeekPosition::Specified(MAX_SEEK_NUMBER));
        assert_eq!(info.behavior, SeekBehavior::BlockUntilReady);
        assert_eq!(info.content_type, SeekContentType::Block);
        assert_eq!(
            payload.header.channel_header.channel_id,
            ChannelId::from("testchannel")
        );
    }

    #[tokio::test]
    async fn test_tls_disabled_in_config_skips_binding() {
        let (requester, client) = create_test_requester(
            DeliverConfig::for_testing(),
            MockSigner::default(),
            StaticTlsClient::mutual(b"cert".to_vec()),
        );

        requester
            .request_headers(&MockLedger::at_height(1))
            .await
            .unwrap();

        let (payload, _) = client.sent()[0].open().unwrap();
        assert_eq!(payload.header.channel_header.tls_cert_hash, None);
    }

    #[tokio::test]
    async fn test_tls_binding_with_mutual_tls() {
        let config = DeliverConfig::for_channel("mychannel");
        let (requester, client) = create_test_requester(
            config,
            MockSigner::default(),
            StaticTlsClient::mutual(b"cert".to_vec()),
        );

        requester
            .request_headers(&MockLedger::at_height(1))
            .await
            .unwrap();

        let (payload, _) = client.sent()[0].open().unwrap();
        assert_eq!(
            payload.header.channel_header.tls_cert_hash,
            Some(compute_sha256(b"cert"))
        );
    }

    #[tokio::test]
    async fn test_configured_version_and_epoch_are_carried() {
        let config = DeliverConfig {
            msg_version: 2,
            epoch: 11,
            ..DeliverConfig::for_testing()
        };
        let (requester, client) = create_test_requester(
            config,
            MockSigner::default(),
            StaticTlsClient::server_only(),
        );

        requester
            .request_blocks(&MockLedger::at_height(0))
            .await
            .unwrap();

        let (payload, _) = client.sent()[0].open().unwrap();
        assert_eq!(payload.header.channel_header.version, 2);
        assert_eq!(payload.header.channel_header.epoch, 11);
    }

    #[tokio::test]
    async fn test_signing_failure_sends_nothing() {
        let signer = MockSigner {
            error: Some(SignerError::KeyUnavailable("no key".to_string())),
            ..Default::default()
        };
        let (requester, client) = create_test_requester(
            DeliverConfig::for_testing(),
            signer,
            StaticTlsClient::server_only(),
        );

        let err = requester
            .request_blocks(&MockLedger::at_height(5))
            .await
            .unwrap_err();

        assert_eq!(err.phase(), Some(RequestPhase::Signing));
        assert!(matches!(
            err,
            DeliverError::Signing {
                source: EnvelopeError::Signing(SignerError::KeyUnavailable(_)),
                ..
            }
        ));
        assert_eq!(client.send_count(), 0);
    }

    #[tokio::test]
    async fn test_height_failure_sends_nothing() {
        let (requester, client) = create_test_requester(
            DeliverConfig::for_testing(),
            MockSigner::default(),
            StaticTlsClient::server_only(),
        );
        let ledger = MockLedger::failing(LedgerError::Unavailable("down".to_string()));

        let err = requester.request_headers(&ledger).await.unwrap_err();

        match err {
            DeliverError::HeightQuery { channel, source } => {
                assert_eq!(channel, ChannelId::from("testchannel"));
                assert_eq!(source, LedgerError::Unavailable("down".to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(client.send_count(), 0);
    }

    #[tokio::test]
    async fn test_transport_failure_is_not_retried() {
        let client = Arc::new(RecordingDeliverer::failing(TransportError::StreamClosed));
        let requester = BlocksRequester::new(
            DeliverConfig::for_testing(),
            client.clone(),
            Arc::new(MockSigner::default()),
            Arc::new(StaticTlsClient::server_only()),
        )
        .unwrap();

        let err = requester
            .request_blocks(&MockLedger::at_height(8))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DeliverError::TransportSend {
                source: TransportError::StreamClosed,
                ..
            }
        ));
        assert_eq!(client.send_count(), 1);
    }
}
