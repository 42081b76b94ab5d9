//! Background worker that applies click increments.
//!
//! Decouples the HTTP redirect from the database write: the resolve path
//! enqueues a [`ClickEvent`] and returns immediately; this worker drains the
//! channel and performs the atomic `click_count + 1` update, retrying
//! transient failures so counts are not lost to a connection blip.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;

/// Runs until the sending side of the channel is dropped.
pub async fn run_click_worker<L: LinkRepository>(
    mut rx: mpsc::Receiver<ClickEvent>,
    link_repository: Arc<L>,
) {
    while let Some(event) = rx.recv().await {
        let strategy = ExponentialBackoff::from_millis(50)
            .max_delay(Duration::from_secs(2))
            .map(jitter)
            .take(3);

        let result = Retry::spawn(strategy, || link_repository.increment_click(event.link_id)).await;

        if let Err(e) = result {
            tracing::error!(link_id = event.link_id, error = %e, "failed to record click");
        }
    }

    tracing::debug!("click worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;

    #[tokio::test]
    async fn test_worker_increments_each_event_once() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_increment_click()
            .withf(|id| *id == 42)
            .times(3)
            .returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(16);
        let worker = tokio::spawn(run_click_worker(rx, Arc::new(mock_repo)));

        for _ in 0..3 {
            tx.send(ClickEvent::new(42)).await.unwrap();
        }
        drop(tx);

        worker.await.unwrap();
    }

    #[tokio::test]
    async fn test_worker_retries_transient_failures() {
        let mut mock_repo = MockLinkRepository::new();
        let mut calls = 0;
        mock_repo
            .expect_increment_click()
            .times(2)
            .returning(move |_| {
                calls += 1;
                if calls == 1 {
                    Err(crate::error::AppError::internal(
                        "Database error",
                        serde_json::json!({}),
                    ))
                } else {
                    Ok(())
                }
            });

        let (tx, rx) = mpsc::channel(16);
        let worker = tokio::spawn(run_click_worker(rx, Arc::new(mock_repo)));

        tx.send(ClickEvent::new(1)).await.unwrap();
        drop(tx);

        worker.await.unwrap();
    }
}
