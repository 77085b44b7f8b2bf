//! Orchestrator module for the search connector ingest.
//!
//! Coordinates engine provisioning, the source client and the loader for one
//! run, and owns the process-wide shutdown signal.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::{info, instrument};
use url::Url;

use crate::consumer::SourceClient;
use crate::errors::IngestError;
use crate::loader::{cancelled, IndexOutcome, SearchLoader};
use search_connector_repository::{CrawlerDomainStatus, EngineAdministration};

/// Orchestrator that coordinates a single connector run.
///
/// The orchestrator:
/// - Makes sure the engine and the source's autocomplete fields exist
/// - Drives the source's envelope stream into the loader
/// - Forwards Ctrl-C into the shutdown channel while a sync runs
/// - Registers crawler domains for web sources
pub struct Orchestrator {
    loader: SearchLoader,
    admin: Arc<dyn EngineAdministration>,
    shutdown_tx: broadcast::Sender<()>,
}

impl Orchestrator {
    /// Create a new orchestrator with the given components.
    pub fn new(loader: SearchLoader, admin: Arc<dyn EngineAdministration>) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            loader,
            admin,
            shutdown_tx,
        }
    }

    /// Sync every record of `source` into the engine.
    ///
    /// # Returns
    ///
    /// * `Ok(IndexOutcome::Completed)` - If every envelope was indexed
    /// * `Ok(IndexOutcome::Cancelled)` - If a shutdown signal interrupted the run
    /// * `Err(IngestError)` - On the first provisioning, upstream or backend failure
    #[instrument(skip(self, source), fields(source = %source.slug()))]
    pub async fn sync(&self, source: &dyn SourceClient) -> Result<IndexOutcome, IngestError> {
        let discovery_shutdown = self.shutdown_tx.subscribe();
        let loader_shutdown = self.shutdown_tx.subscribe();

        let signal_forwarder = self.forward_ctrl_c();
        let result = self
            .run_sync(source, discovery_shutdown, loader_shutdown)
            .await;
        signal_forwarder.abort();

        match &result {
            Ok(IndexOutcome::Completed { documents, batches }) => {
                info!(documents, batches, "Sync completed");
            }
            Ok(IndexOutcome::Cancelled { discarded }) => {
                info!(discarded, "Sync cancelled");
            }
            Err(_) => {}
        }
        result
    }

    async fn run_sync(
        &self,
        source: &dyn SourceClient,
        mut discovery_shutdown: broadcast::Receiver<()>,
        loader_shutdown: broadcast::Receiver<()>,
    ) -> Result<IndexOutcome, IngestError> {
        let provisioning = async {
            self.admin.ensure_engine().await?;
            self.admin
                .ensure_text_fields(&source.suggestion_fields())
                .await
        };

        tokio::select! {
            biased;
            _ = cancelled(&mut discovery_shutdown) => {
                info!("Shutdown received during engine provisioning");
                return Ok(IndexOutcome::Cancelled { discarded: 0 });
            }
            provisioned = provisioning => provisioned?,
        }

        let envelopes = tokio::select! {
            biased;
            _ = cancelled(&mut discovery_shutdown) => {
                info!("Shutdown received before indexing started");
                return Ok(IndexOutcome::Cancelled { discarded: 0 });
            }
            envelopes = source.envelopes() => envelopes?,
        };

        self.loader
            .index(envelopes, source.slug(), loader_shutdown)
            .await
    }

    /// Register a web domain with the engine crawler and request a crawl.
    ///
    /// Only the origin of `domain_url` is registered; a domain the crawler
    /// already knows is not an error.
    #[instrument(skip(self))]
    pub async fn crawl_domain(&self, domain_url: &str) -> Result<CrawlerDomainStatus, IngestError> {
        let domain = Url::parse(domain_url)?;
        if !matches!(domain.scheme(), "http" | "https") {
            return Err(IngestError::parse(format!(
                "crawler domains must be http(s) URLs, got {domain_url}"
            )));
        }
        let origin = domain.origin().ascii_serialization();

        self.admin.ensure_engine().await?;
        let status = self.admin.add_crawler_domain(&origin).await?;
        self.admin.request_crawl().await?;

        info!(domain = %origin, status = ?status, "Crawl requested");
        Ok(status)
    }

    fn forward_ctrl_c(&self) -> JoinHandle<()> {
        let shutdown_tx = self.shutdown_tx.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Received shutdown signal");
                let _ = shutdown_tx.send(());
            }
        })
    }

    /// Sender side of the shutdown channel, for callers that cancel runs themselves.
    pub fn shutdown_sender(&self) -> broadcast::Sender<()> {
        self.shutdown_tx.clone()
    }
}
