//! Marker store: bounded inbox for producers, mutex-guarded resident set for
//! the render pass.

use std::sync::atomic::{AtomicUsize, Ordering};

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use parking_lot::{Mutex, MutexGuard};

/// Default inbox capacity.
pub const DEFAULT_INBOX_CAPACITY: usize = 1024;

/// Container of active markers.
///
/// `T` is stored by value; identity is whatever `T` carries (see
/// [`MarkerId`](crate::MarkerId)). Insertion order is irrelevant to callers.
///
/// The store is lossy under overflow: the inbox is bounded, and a marker
/// added while it is full is dropped (logged at `warn`) rather than blocking
/// the producer. Size the inbox for the worst burst expected between passes.
pub struct MarkerStore<T> {
    /// Producer end of the inbox, cloned into every sink.
    sender: Sender<T>,
    /// Consumer end, drained at the start of each pass.
    receiver: Receiver<T>,
    /// Markers owned by the render thread.
    resident: Mutex<Vec<T>>,
    /// Resident count as of the end of the last pass.
    resident_count: AtomicUsize,
}

impl<T> MarkerStore<T> {
    /// Creates a store whose inbox holds at most `inbox_capacity` markers
    /// between two passes.
    #[must_use]
    pub fn new(inbox_capacity: usize) -> Self {
        let (sender, receiver) = bounded(inbox_capacity.max(1));
        Self {
            sender,
            receiver,
            resident: Mutex::new(Vec::with_capacity(64)),
            resident_count: AtomicUsize::new(0),
        }
    }

    /// Creates a producer handle (clone freely, send to any thread).
    #[must_use]
    pub fn sink(&self) -> MarkerSink<T> {
        MarkerSink { sender: self.sender.clone() }
    }

    /// Inserts a marker without blocking.
    ///
    /// Safe to call concurrently with a pass. Returns `false` if the inbox is
    /// full and the marker was dropped; it is not retried.
    pub fn add(&self, marker: T) -> bool {
        try_insert(&self.sender, marker)
    }

    /// Starts a lifecycle pass.
    ///
    /// Moves every pending insertion into the resident set and returns the
    /// working set. Must only be called from the render thread; calling it
    /// again while a pass is alive deadlocks.
    pub fn snapshot_for_iteration(&self) -> MarkerPass<'_, T> {
        let mut markers = self.resident.lock();
        markers.extend(self.receiver.try_iter());
        MarkerPass { markers, resident_count: &self.resident_count }
    }

    /// Number of markers, resident plus pending. Never blocks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.resident_count.load(Ordering::Acquire) + self.receiver.len()
    }

    /// Returns true if there are no markers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every marker, resident and pending. Returns how many were dropped.
    ///
    /// Waits for a running pass to finish. Calling it while holding a
    /// [`MarkerPass`] on the same thread deadlocks.
    pub fn clear(&self) -> usize {
        let mut markers = self.resident.lock();
        let dropped = markers.len() + self.receiver.try_iter().count();
        markers.clear();
        self.resident_count.store(0, Ordering::Release);
        dropped
    }
}

impl<T> Default for MarkerStore<T> {
    fn default() -> Self {
        Self::new(DEFAULT_INBOX_CAPACITY)
    }
}

/// Producer handle for a [`MarkerStore`].
pub struct MarkerSink<T> {
    sender: Sender<T>,
}

impl<T> MarkerSink<T> {
    /// Inserts a marker without blocking.
    ///
    /// Returns `false` if the marker was dropped (inbox full, or the store is gone).
    pub fn add(&self, marker: T) -> bool {
        try_insert(&self.sender, marker)
    }
}

impl<T> Clone for MarkerSink<T> {
    fn clone(&self) -> Self {
        Self { sender: self.sender.clone() }
    }
}

#[inline]
fn try_insert<T>(sender: &Sender<T>, marker: T) -> bool {
    match sender.try_send(marker) {
        Ok(()) => true,
        Err(TrySendError::Full(_)) => {
            tracing::warn!(capacity = ?sender.capacity(), "marker inbox full, dropping marker");
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::debug!("marker store dropped, discarding marker");
            false
        }
    }
}

/// Working set for one lifecycle pass.
///
/// Holds the resident set exclusively. Iterate and mark first, then call
/// [`sweep_remove`](Self::sweep_remove), which consumes the pass so no
/// deletion can interleave with iteration.
pub struct MarkerPass<'a, T> {
    markers: MutexGuard<'a, Vec<T>>,
    resident_count: &'a AtomicUsize,
}

impl<T> MarkerPass<'_, T> {
    /// Number of markers in this pass.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Returns true if the pass has nothing to process.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Iterates the working set mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.markers.iter_mut()
    }

    /// Removes every marker for which `predicate` holds and ends the pass.
    ///
    /// Returns the number of markers removed.
    pub fn sweep_remove(mut self, mut predicate: impl FnMut(&T) -> bool) -> usize {
        let before = self.markers.len();
        self.markers.retain(|marker| !predicate(marker));
        before - self.markers.len()
    }
}

impl<T> Drop for MarkerPass<'_, T> {
    fn drop(&mut self) {
        self.resident_count.store(self.markers.len(), Ordering::Release);
    }
}
