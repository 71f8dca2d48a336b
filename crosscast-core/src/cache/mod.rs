//! Read-cache layer for the persistent state store
//!
//! The cache is a derived, invalidation-driven view owned by the store; it
//! is never the source of truth. TTL expiry is passive (checked on read by
//! moka), so no background sweeping is needed.

pub mod store_cache;

pub use store_cache::StoreCache;
