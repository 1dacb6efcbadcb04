//! Bounded reindex queue in front of a search index
//!
//! Callers enqueue and return immediately; a single worker task drains the
//! queue into the wrapped index. When the queue is full the document is
//! dropped, so the index is eventually consistent at best.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;

use da_core::domain::entities::Driver;
use da_core::errors::DomainError;
use da_core::repositories::DriverSearchRepository;

/// Enqueues driver documents for asynchronous indexing
#[derive(Clone)]
pub struct QueuedSearchIndexer {
    /// `None` when mirroring is disabled
    sender: Option<mpsc::Sender<Driver>>,
}

impl QueuedSearchIndexer {
    /// Create the queue half; feed the receiver to [`run_worker`]
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<Driver>) {
        let (sender, receiver) = mpsc::channel(capacity.max(1));
        (
            Self {
                sender: Some(sender),
            },
            receiver,
        )
    }

    /// Create the queue and spawn its worker on the current runtime
    ///
    /// The worker ends once every clone of the indexer is dropped and the
    /// queue is drained.
    pub fn spawn<S>(index: Arc<S>, capacity: usize) -> (Self, JoinHandle<()>)
    where
        S: DriverSearchRepository + 'static,
    {
        let (indexer, receiver) = Self::new(capacity);
        let handle = tokio::spawn(run_worker(receiver, index));
        (indexer, handle)
    }

    /// Indexer that accepts and discards every document
    pub fn disabled() -> Self {
        Self { sender: None }
    }
}

/// Drain `receiver` into `index` until the queue is closed
pub async fn run_worker<S>(mut receiver: mpsc::Receiver<Driver>, index: Arc<S>)
where
    S: DriverSearchRepository + ?Sized,
{
    tracing::info!(event = "search_worker_started", "Search reindex worker started");

    while let Some(driver) = receiver.recv().await {
        if let Err(e) = index.index(&driver).await {
            tracing::warn!(
                driver_id = %driver.id,
                error = %e,
                event = "search_index_failed",
                "Failed to index driver document"
            );
        }
    }

    tracing::info!(event = "search_worker_stopped", "Search reindex worker stopped");
}

#[async_trait]
impl DriverSearchRepository for QueuedSearchIndexer {
    async fn index(&self, driver: &Driver) -> Result<(), DomainError> {
        let Some(sender) = &self.sender else {
            return Ok(());
        };

        match sender.try_send(driver.clone()) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(dropped)) => {
                tracing::warn!(
                    driver_id = %dropped.id,
                    event = "search_queue_full",
                    "Search reindex queue full, document dropped"
                );
                Ok(())
            }
            Err(TrySendError::Closed(_)) => {
                Err(DomainError::internal("Search reindex worker is not running"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use da_core::repositories::MockDriverSearchRepository;

    fn driver() -> Driver {
        Driver::invite("+14016369040".into(), "482913".into(), Utc::now(), 30)
    }

    #[tokio::test]
    async fn test_worker_indexes_queued_documents() {
        let index = Arc::new(MockDriverSearchRepository::new());
        let (indexer, handle) = QueuedSearchIndexer::spawn(index.clone(), 8);

        let drivers = vec![driver(), driver(), driver()];
        for d in &drivers {
            indexer.index(d).await.unwrap();
        }

        drop(indexer);
        handle.await.unwrap();

        assert_eq!(index.indexed(), drivers);
    }

    #[tokio::test]
    async fn test_dropping_service_flushes_queue() {
        use da_core::repositories::{MockDeviceRepository, MockDriverRepository};
        use da_core::services::verification::{
            InviteDriver, VerificationService, VerificationServiceConfig,
        };

        let index = Arc::new(MockDriverSearchRepository::new());
        let (indexer, handle) = QueuedSearchIndexer::spawn(index.clone(), 8);
        let service = Arc::new(VerificationService::new(
            Arc::new(MockDriverRepository::new()),
            Arc::new(MockDeviceRepository::new()),
            Arc::new(indexer),
            VerificationServiceConfig::default(),
        ));

        let invited = service
            .invite(InviteDriver {
                phone_number: "+14016369040".to_string(),
                ..Default::default()
            })
            .await
            .unwrap();

        let per_worker = service.clone();
        drop(service);
        drop(per_worker);

        tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .expect("worker should stop once the service is dropped")
            .unwrap();
        assert_eq!(index.indexed(), vec![invited]);
    }

    #[tokio::test]
    async fn test_full_queue_drops_without_error() {
        let (indexer, mut receiver) = QueuedSearchIndexer::new(1);
        let first = driver();

        indexer.index(&first).await.unwrap();
        indexer.index(&driver()).await.unwrap();
        drop(indexer);

        assert_eq!(receiver.recv().await, Some(first));
        assert_eq!(receiver.recv().await, None);
    }

    #[tokio::test]
    async fn test_worker_survives_index_failures() {
        let index = Arc::new(MockDriverSearchRepository::failing());
        let (indexer, handle) = QueuedSearchIndexer::spawn(index.clone(), 4);

        indexer.index(&driver()).await.unwrap();
        indexer.index(&driver()).await.unwrap();
        drop(indexer);

        handle.await.unwrap();
        assert!(index.indexed().is_empty());
    }

    #[tokio::test]
    async fn test_closed_queue_reports_error() {
        let (indexer, receiver) = QueuedSearchIndexer::new(4);
        drop(receiver);

        assert!(indexer.index(&driver()).await.is_err());
    }

    #[tokio::test]
    async fn test_disabled_indexer_accepts_everything() {
        let indexer = QueuedSearchIndexer::disabled();
        assert!(indexer.index(&driver()).await.is_ok());
    }
}
