//! # Synchronization for Marker Capture
//!
//! ## The Problem
//!
//! ```text
//! Host thread (damage routine):  INSERT markers, at any time
//! Render thread (overlay pass):  ITERATE, MUTATE, then DELETE markers
//!
//! Insert while iterating a plain collection → invalidated iteration
//! ```
//!
//! ## The Solution: Inbox + Resident Set
//!
//! ```text
//! Producers ──try_send──> [ bounded inbox ] ──drain──> [ resident set ]
//!                                                      (render thread only)
//! Frame N:
//!   1. lock resident, drain inbox into it     ─┐
//!   2. iterate + mark                          ├─ one MarkerPass
//!   3. sweep marked                           ─┘
//! ```
//!
//! Producers never touch the resident set, so they never wait on a pass.
//! Anything inserted while a pass runs is picked up by the next one.

mod marker_store;

pub use marker_store::{MarkerPass, MarkerSink, MarkerStore, DEFAULT_INBOX_CAPACITY};
