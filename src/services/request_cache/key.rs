//! Identity of a logical backend request.

use std::fmt;

use crate::domain::models::AppUserId;

/// The backend operations that participate in request coalescing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Fetch the offerings configured for an app user
    GetOfferings,
    /// Fetch the subscriber record for an app user
    GetCustomerInfo,
}

impl Operation {
    /// Short name used in log output.
    pub fn name(self) -> &'static str {
        match self {
            Self::GetOfferings => "get_offerings",
            Self::GetCustomerInfo => "get_customer_info",
        }
    }
}

/// Identity of a logical request: operation, user scope, and optional
/// request parameters. Two requests are the same iff their keys are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    operation: Operation,
    scope: String,
    params: Option<String>,
}

impl CacheKey {
    /// Key for a parameterless operation scoped to one app user.
    pub fn new(operation: Operation, app_user_id: &AppUserId) -> Self {
        Self {
            operation,
            scope: app_user_id.as_str().to_owned(),
            params: None,
        }
    }

    /// Key carrying request-specific parameters in addition to the scope.
    pub fn with_params(
        operation: Operation,
        app_user_id: &AppUserId,
        params: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            scope: app_user_id.as_str().to_owned(),
            params: Some(params.into()),
        }
    }

    /// The operation this key identifies.
    pub fn operation(&self) -> Operation {
        self.operation
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.params {
            Some(params) => write!(f, "{}/{}/{}", self.operation.name(), self.scope, params),
            None => write!(f, "{}/{}", self.operation.name(), self.scope),
        }
    }
}
