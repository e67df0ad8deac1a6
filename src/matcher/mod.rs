//! Intake Queue & Matcher Loop (C4, spec.md §4.4): one bounded channel
//! and one dedicated worker per book. The channel is the synchronization
//! boundary — the worker never shares the book with any other writer.

mod request;

pub use request::OrderRequest;

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::book::Book;
use crate::ids::OrderId;
use crate::ledger::Ledger;

/// Everything the matcher's single worker consumes off its intake
/// channel (spec.md §4.4, §9 "the queue is the synchronization").
/// Cancellation is an internal primitive (spec.md §1 Non-goals: no
/// network-exposed cancel) but it still mutates the same `Book` the
/// worker is the sole writer of, so it is enqueued and drained by that
/// same worker rather than called directly on a live book.
enum MatcherMessage {
    Submit(OrderRequest),
    Cancel {
        order_id: OrderId,
        ack: oneshot::Sender<bool>,
    },
}

/// Handle to a running book: the sender half submitters push requests
/// into, plus the worker's `JoinHandle` for clean shutdown.
pub struct MatcherHandle {
    book: Arc<Book>,
    intake: mpsc::Sender<MatcherMessage>,
    worker: JoinHandle<()>,
}

impl MatcherHandle {
    /// Spawn a book's matcher task and return a handle to it.
    ///
    /// `capacity` bounds the intake channel (spec.md §3 `intake`,
    /// default 30 per `ExchangeConfig`); submitters backpressure against
    /// a full channel rather than being dropped.
    pub fn spawn(book: Arc<Book>, ledger: Arc<Ledger>, capacity: usize) -> Self {
        let (tx, mut rx) = mpsc::channel::<MatcherMessage>(capacity);
        let worker_book = Arc::clone(&book);

        let worker = tokio::spawn(async move {
            debug!(asset_id = worker_book.asset_id, "matcher task started");
            while let Some(message) = rx.recv().await {
                match message {
                    MatcherMessage::Submit(request) => {
                        let started = Instant::now();
                        let side = request.side;
                        let order_type = request.order_type;

                        let fills = match order_type {
                            crate::book::OrderType::Market => worker_book.match_market(
                                side,
                                request.shares,
                                request.user_id,
                                &ledger,
                            ),
                            crate::book::OrderType::Limit => worker_book.process_limit(
                                side,
                                request.shares,
                                request.limit_price.unwrap_or(0),
                                request.user_id,
                                &ledger,
                            ),
                        };

                        debug!(
                            asset_id = worker_book.asset_id,
                            side = %side,
                            order_type = ?order_type,
                            shares = request.shares,
                            fills = fills.len(),
                            elapsed_us = started.elapsed().as_micros() as u64,
                            "processed order"
                        );
                    }
                    MatcherMessage::Cancel { order_id, ack } => {
                        let cancelled = worker_book.cancel(order_id);
                        if !cancelled {
                            warn!(
                                asset_id = worker_book.asset_id,
                                order_id, "cancel of unknown order id"
                            );
                        }
                        let _ = ack.send(cancelled);
                    }
                }
            }
            debug!(asset_id = worker_book.asset_id, "matcher task stopped");
        });

        Self {
            book,
            intake: tx,
            worker,
        }
    }

    /// Submit a request for matching. Blocks (async) if the intake is
    /// full — this is the spec's deliberate backpressure, not an error.
    pub async fn submit(&self, request: OrderRequest) -> Result<(), SubmitError> {
        self.intake
            .send(MatcherMessage::Submit(request))
            .await
            .map_err(|_| SubmitError::WorkerGone)
    }

    pub fn book(&self) -> &Arc<Book> {
        &self.book
    }

    /// Cancel a resting order. Enqueued onto the same intake channel as
    /// every `OrderRequest` and drained by the one worker that owns this
    /// book, so it never races an in-flight `match_market`/
    /// `process_limit` on the same book (spec.md §1, §5). Resolves to
    /// `false` if the order id was unknown by the time the worker got to
    /// it — a logged no-op, not an error (spec.md §4.3, §7).
    pub async fn cancel(&self, order_id: OrderId) -> Result<bool, SubmitError> {
        let (ack_tx, ack_rx) = oneshot::channel();
        self.intake
            .send(MatcherMessage::Cancel { order_id, ack: ack_tx })
            .await
            .map_err(|_| SubmitError::WorkerGone)?;
        ack_rx.await.map_err(|_| SubmitError::WorkerGone)
    }

    /// Abort the worker task. Used only at process shutdown.
    pub fn shutdown(&self) {
        self.worker.abort();
    }
}

/// Failure to hand a request to a book's matcher.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("matcher task for this book is no longer running")]
    WorkerGone,
}
