//! Idle-timeout watchdog.
//!
//! [`InactivityMonitor`] runs as a background task, periodically checking
//! how long the session has been idle and resetting it once the timeout is
//! exceeded. The selected property survives the reset.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::session::SessionStore;
use crate::timing::{INACTIVITY_CHECK_INTERVAL, INACTIVITY_TIMEOUT};

/// Background service that resets abandoned sessions.
#[derive(Debug, Clone)]
pub struct InactivityMonitor {
    store: SessionStore,
    timeout: Duration,
    check_interval: Duration,
}

impl InactivityMonitor {
    /// Create a monitor with the default timeout and check interval.
    pub fn new(store: SessionStore) -> Self {
        Self::with_timing(store, INACTIVITY_TIMEOUT, INACTIVITY_CHECK_INTERVAL)
    }

    pub fn with_timing(store: SessionStore, timeout: Duration, check_interval: Duration) -> Self {
        Self {
            store,
            timeout,
            check_interval,
        }
    }

    /// Run the watchdog loop until `cancel` fires.
    pub async fn run(&self, cancel: CancellationToken) {
        tracing::debug!(
            timeout_secs = self.timeout.as_secs(),
            check_interval_secs = self.check_interval.as_secs(),
            "Inactivity monitor started",
        );

        let mut interval = tokio::time::interval(self.check_interval);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("Inactivity monitor cancelled");
                    break;
                }
                _ = interval.tick() => {
                    self.check();
                }
            }
        }
    }

    /// Reset the session if it has been idle longer than the timeout.
    ///
    /// Returns whether a reset happened.
    pub fn check(&self) -> bool {
        let idle = self.store.state().idle_for();
        if idle <= self.timeout {
            return false;
        }

        tracing::info!(
            inactive_secs = idle.as_secs(),
            "Inactivity timeout reached, resetting session",
        );
        self.store.reset_session();
        true
    }
}
