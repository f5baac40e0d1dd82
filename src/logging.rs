//! Internal logging setup for Metrum.
//!
//! This module initializes the tracing configuration at startup. The logging
//! behavior is controlled by the `DEBUG_METRUM` environment variable. If
//! `DEBUG_METRUM` is not set or is set to a falsy value ("0", "false", or
//! empty), logging remains disabled; otherwise a DEBUG-level subscriber is
//! installed.

use ctor::ctor;
use tracing::Level;

#[ctor]
fn set_debug_level() {
    // If DEBUG_METRUM is not set or set to a falsy value, leave logging
    // disabled; otherwise initialize a debug-level subscriber.
    if std::env::var("DEBUG_METRUM").map_or(true, |v| v == "0" || v == "false" || v.is_empty()) {
        // Logging macros stay silent without a subscriber.
    } else {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .init();
    }
}
