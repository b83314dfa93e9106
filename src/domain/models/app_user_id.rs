//! Validated app user identifier.
//!
//! Every request the backend layer performs is scoped to a single app user.
//! The raw identifier comes from the host application and is untrusted: it
//! must be rejected up front when blank, and escaped before it is embedded
//! in a request path.

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use thiserror::Error;

/// Characters that cannot appear verbatim in a URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'#')
    .add(b'?')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%')
    .add(b'\\');

/// Errors produced while validating a raw app user identifier
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppUserIdError {
    /// The identifier was empty or contained only whitespace
    #[error("app user id is empty or whitespace-only")]
    Blank,
}

/// A validated app user identifier.
///
/// Construction fails deterministically on blank input; a constructed value
/// is always usable both as a cache-key scope and, via
/// [`path_segment`](Self::path_segment), as a URL path component.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AppUserId(String);

impl AppUserId {
    /// Validate a raw identifier supplied by the host application.
    pub fn new(raw: impl Into<String>) -> Result<Self, AppUserIdError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(AppUserIdError::Blank);
        }
        Ok(Self(raw))
    }

    /// The identifier exactly as the host application supplied it.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The identifier percent-encoded for use as a single path segment.
    pub fn path_segment(&self) -> String {
        utf8_percent_encode(&self.0, PATH_SEGMENT).to_string()
    }
}

impl std::fmt::Display for AppUserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
