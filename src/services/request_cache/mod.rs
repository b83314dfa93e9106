//! In-flight request coalescing.
//!
//! Concurrent logical requests for the same remote resource collapse into a
//! single underlying network call; every waiter receives the eventual
//! result exactly once, in registration order, and the per-key state is
//! destroyed the instant the epoch completes. Nothing here caches response
//! values, only in-flight intent.

pub mod dispatcher;
pub mod key;
pub mod operation;
pub mod registry;

pub use key::{CacheKey, Operation};
pub use operation::CoalescedRequest;
pub use registry::{CacheStatus, CallbackRegistry, ResponseCallback};
