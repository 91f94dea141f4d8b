//! Gateway transport: wire protocol envelopes and the HTTP client.

pub mod http;
pub mod protocol;

pub use http::HttpGateway;
