//! Shared constants.

/// Cache-control applied to published artifacts and cached import descriptors.
pub const LONG_LIVED_CACHE_CONTROL: &str = "public, max-age=31536000";

/// Cache-control for redirect markers. Redirects must never be stale-cached.
pub const NO_CACHE_CONTROL: &str = "no-cache";
