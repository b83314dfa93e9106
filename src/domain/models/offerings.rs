//! Offerings payload returned by the purchases backend.

use serde::{Deserialize, Serialize};

/// Response body of the offerings endpoint.
///
/// The `offerings` field is required; a success response without it fails
/// shape validation and is surfaced as an unexpected-response error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfferingsResponse {
    /// Identifier of the offering the backend currently recommends
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_offering_id: Option<String>,

    /// All offerings configured for this app
    pub offerings: Vec<Offering>,
}

/// A named group of packages presented to the user together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offering {
    /// Stable identifier (e.g., "default", "holiday_sale")
    pub identifier: String,

    /// Human-readable description configured on the backend
    pub description: String,

    /// Purchasable packages within this offering
    #[serde(default)]
    pub packages: Vec<Package>,
}

/// A single purchasable package within an offering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    /// Package identifier (e.g., "$rc_monthly")
    pub identifier: String,

    /// Store product this package maps to
    pub platform_product_identifier: String,
}
