//! Loader module for the search connector ingest.
//!
//! Batches envelopes into bulk documents requests and submits them to the
//! search index.

use std::sync::Arc;

use futures::StreamExt;
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, instrument, warn};

use crate::consumer::EnvelopeStream;
use crate::errors::IngestError;
use search_connector_repository::{SealedBatch, SearchIndexProvider, SpooledBatch};
use search_connector_shared::{SourceDocument, SourceSlug};

/// Largest batch the bulk documents endpoint accepts.
pub const MAX_BATCH_SIZE: usize = 100;

/// Configuration for the search loader.
#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Number of documents per bulk request, at most [`MAX_BATCH_SIZE`].
    pub batch_size: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            batch_size: MAX_BATCH_SIZE,
        }
    }
}

/// How an indexing run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexOutcome {
    /// The stream was exhausted and every batch was accepted.
    Completed { documents: usize, batches: usize },
    /// A shutdown signal arrived; the open batch was dropped unsent.
    Cancelled { discarded: usize },
}

enum Flush {
    Sent(usize),
    Interrupted(usize),
}

/// Resolves once a shutdown signal is received.
///
/// A closed channel never resolves: without a sender nobody can cancel.
pub(crate) async fn cancelled(shutdown: &mut broadcast::Receiver<()>) {
    match shutdown.recv().await {
        Ok(()) | Err(RecvError::Lagged(_)) => {}
        Err(RecvError::Closed) => std::future::pending().await,
    }
}

/// Loader that indexes envelope streams into the search engine.
///
/// The loader is responsible for:
/// - Buffering envelopes into a temporary file, one batch at a time
/// - Submitting each full batch before pulling the next envelope
/// - Stopping promptly, without sending the open batch, on shutdown
pub struct SearchLoader {
    provider: Arc<dyn SearchIndexProvider>,
    config: LoaderConfig,
}

impl SearchLoader {
    /// Create a new search loader with the given provider.
    pub fn new(provider: Arc<dyn SearchIndexProvider>) -> Self {
        Self::with_config(provider, LoaderConfig::default())
    }

    /// Create a new search loader with custom configuration.
    ///
    /// A batch size of zero or above [`MAX_BATCH_SIZE`] is clamped into range.
    pub fn with_config(provider: Arc<dyn SearchIndexProvider>, config: LoaderConfig) -> Self {
        let batch_size = config.batch_size.clamp(1, MAX_BATCH_SIZE);
        if batch_size != config.batch_size {
            warn!(
                requested = config.batch_size,
                batch_size, "Batch size out of range, clamping"
            );
        }

        Self {
            provider,
            config: LoaderConfig { batch_size },
        }
    }

    pub fn batch_size(&self) -> usize {
        self.config.batch_size
    }

    /// Index every envelope of `envelopes` under `slug`.
    ///
    /// Batches are submitted strictly one after another. An error from the
    /// stream or the backend aborts the run; batches submitted before it stay
    /// indexed.
    ///
    /// # Arguments
    ///
    /// * `envelopes` - The source's envelope stream
    /// * `slug` - Slug of the source, used in every document
    /// * `shutdown` - Receiver of the process-wide shutdown signal
    ///
    /// # Returns
    ///
    /// * `Ok(IndexOutcome::Completed)` - If the stream was fully indexed
    /// * `Ok(IndexOutcome::Cancelled)` - If a shutdown signal arrived first
    /// * `Err(IngestError)` - On the first upstream or backend failure
    #[instrument(skip(self, envelopes, shutdown), fields(source = %slug))]
    pub async fn index(
        &self,
        mut envelopes: EnvelopeStream,
        slug: &SourceSlug,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<IndexOutcome, IngestError> {
        let mut batch = SpooledBatch::create()?;
        let mut documents = 0usize;
        let mut batches = 0usize;

        loop {
            let next = tokio::select! {
                biased;
                _ = cancelled(&mut shutdown) => {
                    info!(discarded = batch.len(), "Shutdown received, dropping open batch");
                    return Ok(IndexOutcome::Cancelled { discarded: batch.len() });
                }
                next = envelopes.next() => next,
            };

            let envelope = match next {
                Some(Ok(envelope)) => envelope,
                Some(Err(e)) => {
                    error!(error = %e, pending = batch.len(), "Source failed, aborting run");
                    return Err(e);
                }
                None => break,
            };

            batch.push(&SourceDocument::new(&envelope, slug)).await?;

            if batch.len() >= self.config.batch_size {
                let full = std::mem::replace(&mut batch, SpooledBatch::create()?);
                match self.flush(full, &mut shutdown).await? {
                    Flush::Sent(count) => {
                        documents += count;
                        batches += 1;
                    }
                    Flush::Interrupted(discarded) => {
                        return Ok(IndexOutcome::Cancelled { discarded })
                    }
                }
            }
        }

        if !batch.is_empty() {
            match self.flush(batch, &mut shutdown).await? {
                Flush::Sent(count) => {
                    documents += count;
                    batches += 1;
                }
                Flush::Interrupted(discarded) => return Ok(IndexOutcome::Cancelled { discarded }),
            }
        }

        info!(documents, batches, "Indexing completed");
        Ok(IndexOutcome::Completed { documents, batches })
    }

    /// Seal and submit one batch, unless shutdown arrives first.
    async fn flush(
        &self,
        batch: SpooledBatch,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> Result<Flush, IngestError> {
        let count = batch.len();
        let sealed = batch.seal().await?;

        tokio::select! {
            biased;
            _ = cancelled(shutdown) => {
                info!(count, "Shutdown received during transmission");
                Ok(Flush::Interrupted(count))
            }
            result = self.transmit(sealed) => result.map(|()| Flush::Sent(count)),
        }
    }

    async fn transmit(&self, batch: SealedBatch) -> Result<(), IngestError> {
        let count = batch.document_count();
        match self.provider.submit_documents(batch).await {
            Ok(receipt) => {
                debug!(
                    count = receipt.documents,
                    bytes = receipt.bytes,
                    status = receipt.status,
                    "Batch indexed"
                );
                Ok(())
            }
            Err(e) => {
                error!(error = %e, count, "Failed to submit batch");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_stream::stream;
    use async_trait::async_trait;
    use futures::stream::{self, StreamExt};
    use search_connector_repository::{BatchReceipt, SearchIndexError};
    use search_connector_shared::Envelope;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// Mock search provider that records every submitted batch.
    struct RecordingProvider {
        batches: Mutex<Vec<Value>>,
        fail_on_batch: Option<usize>,
    }

    impl RecordingProvider {
        fn new() -> Self {
            Self {
                batches: Mutex::new(Vec::new()),
                fail_on_batch: None,
            }
        }

        fn failing_on(batch: usize) -> Self {
            Self {
                batches: Mutex::new(Vec::new()),
                fail_on_batch: Some(batch),
            }
        }

        fn batch_sizes(&self) -> Vec<usize> {
            self.batches
                .lock()
                .unwrap()
                .iter()
                .map(|batch| batch.as_array().unwrap().len())
                .collect()
        }
    }

    #[async_trait]
    impl SearchIndexProvider for RecordingProvider {
        async fn submit_documents(
            &self,
            batch: SealedBatch,
        ) -> Result<BatchReceipt, SearchIndexError> {
            let documents = batch.document_count();
            let bytes = batch.content_length();
            let body = batch.read_to_string().await?;

            let mut batches = self.batches.lock().unwrap();
            if self.fail_on_batch == Some(batches.len()) {
                return Err(SearchIndexError::transmission(500, documents, "boom"));
            }
            batches.push(serde_json::from_str(&body).unwrap());

            Ok(BatchReceipt {
                documents,
                bytes,
                status: 200,
            })
        }
    }

    fn slug() -> SourceSlug {
        SourceSlug::new("kennisbank").unwrap()
    }

    fn envelopes(count: usize) -> Vec<Envelope> {
        (0..count)
            .map(|i| Envelope::new(format!("kennisbank_{i}"), json!({"n": i})).unwrap())
            .collect()
    }

    fn ok_stream(count: usize) -> EnvelopeStream {
        stream::iter(envelopes(count).into_iter().map(Ok)).boxed()
    }

    #[tokio::test]
    async fn test_batches_of_one_hundred() {
        let provider = Arc::new(RecordingProvider::new());
        let loader = SearchLoader::new(provider.clone());
        let (_tx, rx) = broadcast::channel(1);

        let outcome = loader.index(ok_stream(250), &slug(), rx).await.unwrap();

        assert_eq!(
            outcome,
            IndexOutcome::Completed {
                documents: 250,
                batches: 3
            }
        );
        assert_eq!(provider.batch_sizes(), vec![100, 100, 50]);

        let batches = provider.batches.lock().unwrap();
        assert_eq!(batches[0][0]["id"], "kennisbank_0");
        assert_eq!(batches[0][0]["object_bron"], "kennisbank");
        assert_eq!(batches[0][0]["kennisbank"], json!({"n": 0}));
        assert_eq!(batches[2][49]["id"], "kennisbank_249");
    }

    #[tokio::test]
    async fn test_empty_stream_sends_nothing() {
        let provider = Arc::new(RecordingProvider::new());
        let loader = SearchLoader::new(provider.clone());
        let (_tx, rx) = broadcast::channel(1);

        let outcome = loader.index(ok_stream(0), &slug(), rx).await.unwrap();

        assert_eq!(
            outcome,
            IndexOutcome::Completed {
                documents: 0,
                batches: 0
            }
        );
        assert!(provider.batch_sizes().is_empty());
    }

    #[tokio::test]
    async fn test_cancellation_drops_open_batch() {
        let provider = Arc::new(RecordingProvider::new());
        let loader = SearchLoader::new(provider.clone());
        let (tx, rx) = broadcast::channel(1);

        let pulled = envelopes(30);
        let envelopes: EnvelopeStream = Box::pin(stream! {
            for envelope in pulled {
                yield Ok::<_, IngestError>(envelope);
            }
            let _ = tx.send(());
            futures::future::pending::<()>().await;
        });

        let outcome = loader.index(envelopes, &slug(), rx).await.unwrap();

        assert_eq!(outcome, IndexOutcome::Cancelled { discarded: 30 });
        assert!(provider.batch_sizes().is_empty());
    }

    #[tokio::test]
    async fn test_source_error_aborts_after_full_batches() {
        let provider = Arc::new(RecordingProvider::new());
        let loader = SearchLoader::new(provider.clone());
        let (_tx, rx) = broadcast::channel(1);

        let envelopes = stream::iter(envelopes(150).into_iter().map(Ok))
            .chain(stream::once(async {
                Err(IngestError::fetch_failed("http://objects.test", 500, "down"))
            }))
            .boxed();

        let err = loader.index(envelopes, &slug(), rx).await.unwrap_err();

        assert!(matches!(err, IngestError::FetchFailed { status: 500, .. }));
        assert_eq!(provider.batch_sizes(), vec![100]);
    }

    #[tokio::test]
    async fn test_transmission_failure_propagates() {
        let provider = Arc::new(RecordingProvider::failing_on(1));
        let loader = SearchLoader::new(provider.clone());
        let (_tx, rx) = broadcast::channel(1);

        let err = loader.index(ok_stream(250), &slug(), rx).await.unwrap_err();

        assert!(matches!(
            err,
            IngestError::SinkError(SearchIndexError::TransmissionError { status: 500, .. })
        ));
        assert_eq!(provider.batch_sizes(), vec![100]);
    }

    #[tokio::test]
    async fn test_closed_shutdown_channel_does_not_cancel() {
        let provider = Arc::new(RecordingProvider::new());
        let loader = SearchLoader::new(provider.clone());
        let (tx, rx) = broadcast::channel::<()>(1);
        drop(tx);

        let outcome = loader.index(ok_stream(5), &slug(), rx).await.unwrap();
        assert_eq!(
            outcome,
            IndexOutcome::Completed {
                documents: 5,
                batches: 1
            }
        );
    }

    #[test]
    fn test_batch_size_is_clamped() {
        let provider = Arc::new(RecordingProvider::new());
        let loader = SearchLoader::with_config(provider.clone(), LoaderConfig { batch_size: 500 });
        assert_eq!(loader.batch_size(), MAX_BATCH_SIZE);

        let loader = SearchLoader::with_config(provider, LoaderConfig { batch_size: 0 });
        assert_eq!(loader.batch_size(), 1);
    }
}
