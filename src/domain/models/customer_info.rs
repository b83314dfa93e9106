//! Subscriber (customer info) payload returned by the purchases backend.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Response body of the subscriber endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerInfoResponse {
    /// Server time at which this snapshot was produced
    pub request_date: DateTime<Utc>,

    /// The subscriber record itself
    pub subscriber: Subscriber,
}

/// A subscriber as known to the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscriber {
    /// The app user id this subscriber was first created under
    pub original_app_user_id: String,

    /// When the backend first saw this subscriber
    pub first_seen: DateTime<Utc>,

    /// Entitlements keyed by entitlement identifier
    #[serde(default)]
    pub entitlements: HashMap<String, Entitlement>,
}

/// A single entitlement granted to a subscriber
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entitlement {
    /// Store product that unlocked this entitlement
    pub product_identifier: String,

    /// When the unlocking purchase was made
    pub purchase_date: DateTime<Utc>,

    /// Expiry, absent for lifetime entitlements
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_date: Option<DateTime<Utc>>,
}
