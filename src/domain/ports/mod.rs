//! Port trait definitions (Hexagonal Architecture)
//!
//! The service layer talks to the network exclusively through the
//! [`HttpTransport`] port, which infrastructure adapters implement.

pub mod transport;

pub use transport::{HttpResponse, HttpTransport, TransportError};
