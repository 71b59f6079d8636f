use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime as BsonDateTime;
use serde::{Deserialize, Serialize};

use crate::models::attraction::Attraction;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransportMode {
    Walking,
    AutoRickshaw,
    Taxi,
    PublicTransport,
}

/// Travel segment between two consecutive scheduled visits.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TransportLeg {
    pub mode: TransportMode,
    /// Travel time in minutes.
    pub duration: i64,
    /// Distance in meters.
    pub distance: i64,
    pub cost: f64,
}

/// An attraction placed at a concrete start/end time within an itinerary.
/// Created only by the trip planner; never mutated after the build.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledVisit {
    pub id: String,
    pub attraction: Attraction,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Present on every visit except the last one in the itinerary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_to_next: Option<TransportLeg>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub user_id: ObjectId,
    pub location: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    /// Visiting order; start/end timestamps are non-decreasing across the list.
    pub visits: Vec<ScheduledVisit>,
    pub total_cost: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
    /// Native BSON date: the store sorts on this field, and string-encoded
    /// timestamps would compare lexicographically.
    pub created_at: Option<BsonDateTime>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanTripRequest {
    pub start_date: String,
    pub end_date: String,
    pub location: String,
}

#[derive(Debug, Serialize)]
pub struct TripPlanResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itinerary: Option<Itinerary>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl TripPlanResponse {
    pub fn failure(message: &str) -> Self {
        Self {
            success: false,
            itinerary: None,
            message: Some(message.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TripListResponse {
    pub success: bool,
    pub itineraries: Vec<Itinerary>,
}
