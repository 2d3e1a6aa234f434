//! Offline asset cache.
//!
//! Keeps the static app shell (the recipe document) available offline:
//! network-first fetch with cache fallback, a version-tagged cache
//! directory, and eviction of stale versions on activation.

pub mod assets;

pub use assets::{AssetCache, CacheError};
