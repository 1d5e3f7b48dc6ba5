//! Application services for packwatch.

pub mod host;
pub mod poller;

pub use host::HostClient;
pub use poller::Poller;
