pub mod account;
pub mod destination;
pub mod relay;

pub use account::Account;
pub use destination::{Destination, Platform};
pub use relay::{
    BroadcastSettings, PlatformStatus, RelayConfig, RelayStatus, RESTART_INTERRUPTED_ERROR,
};
