// flarelink-api: Async Rust client for the HPE VAN SDN Controller REST API

mod addr;
pub mod auth;
mod client;
pub mod config;
pub mod error;
mod filter;
pub mod models;
mod payload;
pub mod transport;

mod diag;
mod net;
mod of;

pub use auth::{AuthToken, authenticate, authenticate_at, revoke, revoke_at};
pub use client::SdnClient;
pub use config::ControllerConfig;
pub use error::Error;
pub use filter::NodeFilter;
pub use of::MacGroupScope;
pub use payload::{PROTOCOL_VERSION, Payload};
pub use transport::{TlsMode, TransportConfig};
