//! The client flows. Each lives in its own `impl CalcClient` block.

mod expressions;
mod statistics;
mod worker;

use std::sync::Arc;

use calc_core::CalcConfig;

use crate::poller::InFlightGuard;
use crate::transport::Transport;
use crate::view::View;

/// Polling client for one orchestrator. Cheap to clone; clones share the
/// transport, the view and the in-flight guards.
pub struct CalcClient<T: Transport, V: View> {
    transport: Arc<T>,
    view: Arc<V>,
    config: Arc<CalcConfig>,
    task_guard: InFlightGuard,
    stats_guard: InFlightGuard,
}

impl<T: Transport, V: View> CalcClient<T, V> {
    pub fn new(transport: T, view: V, config: CalcConfig) -> Self {
        Self::from_shared(Arc::new(transport), Arc::new(view), config)
    }

    pub fn from_shared(transport: Arc<T>, view: Arc<V>, config: CalcConfig) -> Self {
        Self {
            transport,
            view,
            config: Arc::new(config),
            task_guard: InFlightGuard::new(),
            stats_guard: InFlightGuard::new(),
        }
    }
}

impl<T: Transport, V: View> Clone for CalcClient<T, V> {
    fn clone(&self) -> Self {
        Self {
            transport: self.transport.clone(),
            view: self.view.clone(),
            config: self.config.clone(),
            task_guard: self.task_guard.clone(),
            stats_guard: self.stats_guard.clone(),
        }
    }
}
