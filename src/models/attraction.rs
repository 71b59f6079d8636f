use serde::{Deserialize, Serialize};

// Normalization bounds applied to model-generated attraction data.
pub const MIN_RATING: f64 = 3.0;
pub const MAX_RATING: f64 = 5.0;
pub const MIN_DURATION_MINUTES: i64 = 30;
pub const MAX_DURATION_MINUTES: i64 = 480;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// A point-of-interest candidate for a visit. Immutable once produced by the
/// attraction source for a given planning request.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attraction {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub rating: f64,
    pub coordinates: Coordinates,
    /// Typical visit duration in minutes.
    pub estimated_duration: i64,
    /// Entry fee in the local currency unit, 0 for free attractions.
    #[serde(default)]
    pub entry_fee: f64,
}
