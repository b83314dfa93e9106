//! HTTP transport adapter built on reqwest.

pub mod client;
pub mod retry;

pub use client::ReqwestTransport;
pub use retry::RetryPolicy;
