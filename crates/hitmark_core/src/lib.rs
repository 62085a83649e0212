//! # HITMARK Core
//!
//! Storage for transient overlay markers.
//!
//! ## Threading Rules
//!
//! 1. **Producers only append** - any thread may insert through a [`MarkerSink`]
//! 2. **The render thread owns the resident set** - iteration and sweep happen
//!    on one thread, once per frame, inside a [`MarkerPass`]
//! 3. **No deletion during iteration** - removal is a separate phase that
//!    consumes the pass
//!
//! ## Example
//!
//! ```rust
//! use hitmark_core::MarkerStore;
//!
//! let store = MarkerStore::new(64);
//! let sink = store.sink();
//! std::thread::spawn(move || { sink.add(1_u32); }).join().unwrap();
//!
//! let mut pass = store.snapshot_for_iteration();
//! for value in pass.iter_mut() {
//!     *value += 1;
//! }
//! let removed = pass.sweep_remove(|value| *value > 1);
//! assert_eq!(removed, 1);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod id;
pub mod sync;

pub use id::MarkerId;
pub use sync::{MarkerPass, MarkerSink, MarkerStore, DEFAULT_INBOX_CAPACITY};
