//! Host clock and process zone access.
//!
//! The zone used for Local representation is resolved per call: a
//! thread-local override wins, then the `TZ` environment variable,
//! then the platform's zone lookup, and finally UTC. Nothing here
//! mutates process state, so zone-sensitive operations stay
//! re-entrant.

use std::cell::RefCell;

#[cfg(feature = "sys")]
use web_time::{SystemTime, UNIX_EPOCH};

thread_local! {
    static LOCAL_ZONE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Overrides the zone used for Local representation on this thread.
pub fn set_local_zone(identifier: impl Into<String>) {
    LOCAL_ZONE.with(|zone| *zone.borrow_mut() = Some(identifier.into()));
}

/// Clears the thread-local zone override.
pub fn clear_local_zone() {
    LOCAL_ZONE.with(|zone| *zone.borrow_mut() = None);
}

/// Returns the IANA identifier of the zone Local representation uses.
pub fn local_zone_id() -> String {
    if let Some(zone) = LOCAL_ZONE.with(|zone| zone.borrow().clone()) {
        return zone;
    }
    if let Ok(tz) = std::env::var("TZ") {
        // POSIX permits a leading colon before the zone name.
        let tz = tz.strip_prefix(':').unwrap_or(&tz);
        if !tz.is_empty() {
            return tz.to_owned();
        }
    }
    #[cfg(feature = "sys")]
    if let Ok(zone) = iana_time_zone::get_timezone() {
        return zone;
    }
    String::from("UTC")
}

/// Returns the current absolute time in seconds from the epoch.
#[cfg(feature = "sys")]
pub(crate) fn epoch_now() -> i64 {
    match SystemTime::now().duration_since(UNIX_EPOCH) {
        Ok(elapsed) => elapsed.as_secs() as i64,
        Err(before_epoch) => -(before_epoch.duration().as_secs() as i64),
    }
}
