// ── Refresh coordination ──
//
// Owns polling cadence, the single-flight fetch gate, failure
// classification, and the last published snapshot. Scheduled and
// manual refreshes both go through `request_refresh`, so they share
// one lane: a refresh requested while another is in flight merges onto
// the active fetch instead of starting a second one.

use std::sync::Arc;

use tokio::sync::{Mutex, broadcast, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use jetbot_api::SmartThingsClient;

use crate::config::JetBotConfig;
use crate::error::RefreshError;
use crate::snapshot::CapabilitySnapshot;

/// Outcome shared by every caller merged onto one in-flight fetch.
pub type RefreshOutcome = Result<Arc<CapabilitySnapshot>, RefreshError>;

/// Coordinates status refreshes for one device.
///
/// Cheaply cloneable via `Arc<CoordinatorInner>`. The snapshot channel
/// is the only shared mutable resource: written once per successful
/// fetch by the flight owner, read-only everywhere else.
#[derive(Clone)]
pub struct RefreshCoordinator {
    inner: Arc<CoordinatorInner>,
}

struct CoordinatorInner {
    client: Arc<SmartThingsClient>,
    config: JetBotConfig,
    /// Single-flight gate: the broadcast sender of the fetch in flight,
    /// if any. Waiters subscribe; the owner clears the gate before
    /// broadcasting so a follow-up request starts a fresh fetch.
    in_flight: Mutex<Option<broadcast::Sender<RefreshOutcome>>>,
    last_snapshot: watch::Sender<Option<Arc<CapabilitySnapshot>>>,
    last_error: Mutex<Option<RefreshError>>,
    cancel: CancellationToken,
}

impl RefreshCoordinator {
    pub fn new(client: Arc<SmartThingsClient>, config: JetBotConfig) -> Self {
        let (last_snapshot, _) = watch::channel(None);

        Self {
            inner: Arc::new(CoordinatorInner {
                client,
                config,
                in_flight: Mutex::new(None),
                last_snapshot,
                last_error: Mutex::new(None),
                cancel: CancellationToken::new(),
            }),
        }
    }

    /// The device this coordinator polls.
    pub fn device_id(&self) -> &str {
        &self.inner.config.device_id
    }

    // ── Refresh ──────────────────────────────────────────────────────

    /// Refresh now, or join the refresh already in flight.
    ///
    /// The fetch runs in its own task, so a caller that stops waiting
    /// abandons only its place in line — the fetch still completes and
    /// updates shared state.
    pub async fn request_refresh(&self) -> RefreshOutcome {
        let mut rx = {
            let mut gate = self.inner.in_flight.lock().await;
            if let Some(tx) = gate.as_ref() {
                debug!("refresh already in flight, joining");
                tx.subscribe()
            } else {
                let (tx, rx) = broadcast::channel(1);
                *gate = Some(tx.clone());
                drop(gate);

                let inner = Arc::clone(&self.inner);
                tokio::spawn(async move {
                    let outcome = inner.run_fetch().await;
                    *inner.in_flight.lock().await = None;
                    let _ = tx.send(outcome);
                });
                rx
            }
        };

        match rx.recv().await {
            Ok(outcome) => outcome,
            // The fetch task can't die without sending, but a closed
            // channel must still surface as a failure, not a panic.
            Err(_) => Err(RefreshError::Failed {
                message: "refresh task dropped before completing".into(),
            }),
        }
    }

    // ── State observation ────────────────────────────────────────────

    /// Most recent snapshot, or `None` before the first successful
    /// refresh. Failed refreshes never clear this.
    pub fn last(&self) -> Option<Arc<CapabilitySnapshot>> {
        self.inner.last_snapshot.borrow().clone()
    }

    /// Subscribe to snapshot updates. Receivers see each successful
    /// refresh exactly once via `changed()`.
    pub fn subscribe(&self) -> watch::Receiver<Option<Arc<CapabilitySnapshot>>> {
        self.inner.last_snapshot.subscribe()
    }

    /// The last classified failure, cleared on success.
    pub async fn last_error(&self) -> Option<RefreshError> {
        self.inner.last_error.lock().await.clone()
    }

    // ── Background polling ───────────────────────────────────────────

    /// Spawn the periodic refresh task, or `None` when polling is
    /// disabled (`refresh_interval_secs == 0`). The task shares the
    /// single-flight lane with manual refreshes.
    pub fn spawn_polling(&self) -> Option<JoinHandle<()>> {
        let interval = self.inner.config.refresh_interval()?;
        let coordinator = self.clone();
        let cancel = self.inner.cancel.clone();

        Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await; // consume the immediate first tick

            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        if let Err(e) = coordinator.request_refresh().await {
                            warn!(error = %e, "periodic refresh failed");
                        }
                    }
                }
            }
        }))
    }

    /// Stop the polling task (if any). In-flight fetches complete.
    pub fn shutdown(&self) {
        self.inner.cancel.cancel();
    }
}

impl CoordinatorInner {
    /// One full fetch cycle: classify, publish, record.
    async fn run_fetch(&self) -> RefreshOutcome {
        match self.fetch_snapshot().await {
            Ok(snapshot) => {
                self.last_snapshot.send_replace(Some(Arc::clone(&snapshot)));
                *self.last_error.lock().await = None;
                debug!(
                    device = %self.config.device_id,
                    components = snapshot.components.len(),
                    "refresh complete"
                );
                Ok(snapshot)
            }
            Err(err) => {
                warn!(device = %self.config.device_id, error = %err, "refresh failed");
                *self.last_error.lock().await = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Status request, then detail request (for the label), combined
    /// into one immutable snapshot.
    async fn fetch_snapshot(&self) -> Result<Arc<CapabilitySnapshot>, RefreshError> {
        let device_id = &self.config.device_id;

        let status = self
            .client
            .device_status(device_id)
            .await
            .map_err(RefreshError::from)?;
        let detail = self
            .client
            .device(device_id)
            .await
            .map_err(RefreshError::from)?;

        Ok(Arc::new(CapabilitySnapshot::from_parts(
            device_id.clone(),
            status,
            Some(&detail),
        )))
    }
}
