// kentik-api: Async Rust client for the Kentik REST APIs (portal + device management)

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod devices;
mod labels;
mod plans;
mod sites;

pub use auth::Credentials;
pub use client::{Client, Region};
pub use error::Error;
pub use transport::TransportConfig;
