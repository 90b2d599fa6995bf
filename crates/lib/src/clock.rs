//! Time provider abstraction
//!
//! Every lock, unlock and save stamps `lastModified`. The [`Clock`] trait lets
//! production code use wall time while tests pin timestamps.
//!
//! # Example
//!
//! ```
//! use notelock::{Clock, SystemClock};
//!
//! let clock = SystemClock;
//! let stamp = clock.now_iso();
//! assert!(stamp.ends_with('Z'));
//! ```

use std::fmt::Debug;

use chrono::{DateTime, SecondsFormat, Utc};

#[cfg(any(test, feature = "testing"))]
use std::sync::Mutex;

/// A time provider for note timestamps.
pub trait Clock: Send + Sync + Debug {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Returns the current time in the `2024-01-31T12:00:00.000Z` form the
    /// extension UI writes for `createdAt`.
    fn now_iso(&self) -> String {
        self.now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

/// Production clock using real system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Test clock that returns a fixed instant until advanced.
///
/// ```
/// use notelock::{Clock, FixedClock};
///
/// let clock = FixedClock::from_millis(1_700_000_000_000);
/// let before = clock.now_iso();
/// assert_eq!(before, clock.now_iso());
///
/// clock.advance_millis(1500);
/// assert_ne!(before, clock.now_iso());
/// ```
#[cfg(any(test, feature = "testing"))]
#[derive(Debug)]
pub struct FixedClock {
    millis: Mutex<i64>,
}

#[cfg(any(test, feature = "testing"))]
impl FixedClock {
    /// Create a clock pinned at the given milliseconds since the Unix epoch.
    pub fn from_millis(millis: i64) -> Self {
        Self {
            millis: Mutex::new(millis),
        }
    }

    /// Move the clock forward.
    pub fn advance_millis(&self, delta: i64) {
        let mut millis = self.millis.lock().unwrap_or_else(|e| e.into_inner());
        *millis += delta;
    }

    /// Current pinned value in milliseconds.
    pub fn millis(&self) -> i64 {
        *self.millis.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(any(test, feature = "testing"))]
impl Default for FixedClock {
    fn default() -> Self {
        // 2024-01-01T00:00:00.000Z
        Self::from_millis(1_704_067_200_000)
    }
}

#[cfg(any(test, feature = "testing"))]
impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.millis()).unwrap_or_default()
    }
}
