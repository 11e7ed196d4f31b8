//! Transport layer for the provider client.

pub mod http;

pub use http::HttpTransport;
