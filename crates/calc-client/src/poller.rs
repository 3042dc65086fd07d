//! Repeating background work and the one-request-at-a-time guard.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{self, MissedTickBehavior};

use calc_core::config::OverlapPolicy;

/// A tick loop running on the tokio runtime.
///
/// Fires once immediately and then every `period`. Each tick's future is
/// spawned, so a slow tick never delays the next one and ticks may overlap.
/// Outstanding tick futures belong to the task: stopping it aborts them.
/// After a stall the missed ticks collapse into one and the period restarts.
///
/// Stopped by `stop()` or by dropping the handle.
pub struct PeriodicTask {
    name: &'static str,
    stop_tx: broadcast::Sender<()>,
    handle: Option<JoinHandle<()>>,
}

impl PeriodicTask {
    pub fn spawn<F, Fut>(name: &'static str, period: Duration, mut tick: F) -> Self
    where
        F: FnMut() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (stop_tx, mut stop_rx) = broadcast::channel::<()>(1);

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut in_flight = JoinSet::new();

            tracing::info!(
                task = name,
                interval_ms = period.as_millis() as u64,
                "periodic task starting"
            );

            loop {
                tokio::select! {
                    biased;
                    // Err(Closed) when the handle is dropped.
                    _ = stop_rx.recv() => break,
                    Some(joined) = in_flight.join_next(), if !in_flight.is_empty() => {
                        if let Err(e) = joined {
                            if e.is_panic() {
                                tracing::error!(task = name, error = %e, "tick panicked");
                            }
                        }
                    }
                    _ = interval.tick() => {
                        in_flight.spawn(tick());
                    }
                }
            }

            let aborted = in_flight.len();
            in_flight.shutdown().await;
            tracing::info!(task = name, aborted, "periodic task stopped");
        });

        Self {
            name,
            stop_tx,
            handle: Some(handle),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Stop the loop and wait until it and its outstanding ticks are gone.
    pub async fn stop(mut self) {
        let _ = self.stop_tx.send(());
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::warn!(task = self.name, error = %e, "periodic task ended abnormally");
            }
        }
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        let _ = self.stop_tx.send(());
    }
}

// ── In-flight guard ───────────────────────────────────────────────────────────

/// At most one outstanding request per flow, when the policy asks for it.
#[derive(Clone, Default)]
pub struct InFlightGuard {
    busy: Arc<AtomicBool>,
}

/// Held for the duration of a guarded request; releases the guard on drop.
pub struct InFlightPermit {
    busy: Arc<AtomicBool>,
}

/// Permission to proceed with a request.
pub enum Admission {
    Unguarded,
    Guarded(InFlightPermit),
}

impl InFlightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_acquire(&self) -> Option<InFlightPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlightPermit {
                busy: self.busy.clone(),
            })
    }

    /// `None` means the trigger must be dropped.
    pub fn admit(&self, policy: OverlapPolicy) -> Option<Admission> {
        match policy {
            OverlapPolicy::Allow => Some(Admission::Unguarded),
            OverlapPolicy::SkipWhileInFlight => self.try_acquire().map(Admission::Guarded),
        }
    }
}

impl Drop for InFlightPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
