//! Kiosk-side session state and the background tasks that follow it.
//!
//! [`session::SessionStore`] is the single shared state container. The
//! debounced search input, favorites persistence and the inactivity
//! watchdog all observe or mutate it through its public actions.

pub mod debounce;
pub mod favorites;
pub mod inactivity;
pub mod search;
pub mod session;
pub mod storage;
pub mod timing;
