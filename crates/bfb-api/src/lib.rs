// bfb-api: async client for the BFB supply portal backend.
//
// One generic `request` entry point plus typed wrappers per backend route.
// Every transport or HTTP failure collapses into `Error::Request`.

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

mod inventory;
mod orders;
mod reference;
mod sites;

pub use client::PortalClient;
pub use error::Error;
pub use models::*;
pub use reqwest::Method;
pub use transport::TransportConfig;

/// Base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api";
