//! Timing constants for the kiosk session.

use std::time::Duration;

/// Quiet period before typed search text is committed to the session.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Quiet period before a favorites change is written to storage.
pub const FAVORITES_WRITE_DEBOUNCE: Duration = Duration::from_millis(500);

/// Idle time after which the session is reset.
pub const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(300);

/// How often the inactivity watchdog checks the session.
pub const INACTIVITY_CHECK_INTERVAL: Duration = Duration::from_secs(10);
