pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod platform;
pub mod registry;
pub mod service;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use store::KeyBuilder;
