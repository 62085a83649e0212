//! # Marker Identity
//!
//! Markers are compared by identity, never by payload. Two hits with the same
//! damage at the same point are still two markers.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_MARKER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique marker identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct MarkerId(u64);

impl MarkerId {
    /// Allocates a fresh identifier. Safe to call from any thread.
    #[inline]
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_MARKER_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw value.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "marker#{}", self.0)
    }
}
