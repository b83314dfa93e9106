//! Domain layer for the purchases backend client
//!
//! This module contains payload models, configuration, the error taxonomy,
//! and the transport port the service layer depends on.

pub mod error;
pub mod models;
pub mod ports;

pub use error::{BackendError, UNKNOWN_BACKEND_ERROR_CODE};
