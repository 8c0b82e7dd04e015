//! Core utilities shared by the API client and the commands
//!
//! - `cache`: TTL response cache bounded by an LRU
//! - `cancel`: cancellation tokens threaded through every fetch
//! - `http`: header and URL helpers

pub mod cache;
pub mod cancel;
pub mod http;

// Re-export commonly used items for convenience
pub use cache::{CacheEntry, CacheStats, ResponseCache};
pub use cancel::CancelToken;
pub use http::{cache_key, default_headers, resolve_url};
