//! Service layer
//!
//! The orchestration facade over the store, registry and platform clients.

pub mod credentials;
pub mod relay;

pub use credentials::StoreCredentialResolver;
pub use relay::RelayService;
