use crate::client::{FetchError, RecommendationSource};
use crate::view::{render, DisplayRegion};
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;

pub const FETCH_FAILED_ALERT: &str = "Failed to fetch stock data. Please try again later.";

/// Interruptive user-facing surface (an alert box, stderr, ...).
pub trait AlertSurface: Send + Sync {
    fn alert(&self, message: &str);
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    Rendered { request_seq: u64, blocks: usize },
    Failed { request_seq: u64, error: FetchError },
    /// A newer click started before this one completed; its result was dropped.
    Superseded { request_seq: u64 },
}

/// The popup: one trigger wired to a source, a display region and an alert surface.
///
/// Clicks may overlap. Each click gets a sequence number and only the most
/// recent click is allowed to touch the region or raise an alert.
pub struct Popup<S, A> {
    source: S,
    alerts: A,
    region: Mutex<DisplayRegion>,
    latest_seq: AtomicU64,
}

impl<S, A> Popup<S, A>
where
    S: RecommendationSource,
    A: AlertSurface,
{
    pub fn new(source: S, alerts: A) -> Self {
        Self {
            source,
            alerts,
            region: Mutex::new(DisplayRegion::new()),
            latest_seq: AtomicU64::new(0),
        }
    }

    pub async fn click(&self) -> ClickOutcome {
        let request_seq = self.latest_seq.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(request_seq, source = %self.source.source_name(), "fetch triggered");

        let result = self.source.fetch_recommendations().await;

        let mut region = self.region.lock().await;
        if self.latest_seq.load(Ordering::SeqCst) != request_seq {
            tracing::debug!(request_seq, "discarding stale fetch result");
            return ClickOutcome::Superseded { request_seq };
        }

        match result {
            Ok(recs) => {
                render(&mut region, &recs);
                tracing::info!(request_seq, count = recs.len(), "rendered recommendations");
                ClickOutcome::Rendered {
                    request_seq,
                    blocks: recs.len(),
                }
            }
            Err(error) => {
                tracing::error!(
                    request_seq,
                    kind = error.kind(),
                    error = %error,
                    "there has been a problem with the fetch operation"
                );
                self.alerts.alert(FETCH_FAILED_ALERT);
                ClickOutcome::Failed { request_seq, error }
            }
        }
    }

    pub async fn snapshot(&self) -> DisplayRegion {
        self.region.lock().await.clone()
    }
}
