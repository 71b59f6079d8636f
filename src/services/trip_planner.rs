use chrono::{DateTime, Duration, Utc};

use crate::models::attraction::Attraction;
use crate::models::trip::{ScheduledVisit, TransportLeg, TransportMode};

const DEFAULT_TRANSIT_BUFFER_MINUTES: i64 = 30;
const DEFAULT_TRANSPORT_DISTANCE_METERS: i64 = 1000;
const DEFAULT_TRANSPORT_COST: f64 = 0.0;
const DEFAULT_MEAL_COST: f64 = 300.0;
const VISITS_PER_DAY_ESTIMATE: usize = 4;
const MEALS_PER_DAY: f64 = 2.0;

/// Locale-specific planning constants. The planner itself carries no literals
/// so the same logic can serve other currencies or transport pricing.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Fixed time allowance between consecutive visits, in minutes.
    pub transit_buffer_minutes: i64,
    pub default_transport_mode: TransportMode,
    pub default_transport_distance_meters: i64,
    pub default_transport_cost: f64,
    /// Per-meal cost in the local currency unit.
    pub meal_cost: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            transit_buffer_minutes: DEFAULT_TRANSIT_BUFFER_MINUTES,
            default_transport_mode: TransportMode::Walking,
            default_transport_distance_meters: DEFAULT_TRANSPORT_DISTANCE_METERS,
            default_transport_cost: DEFAULT_TRANSPORT_COST,
            meal_cost: DEFAULT_MEAL_COST,
        }
    }
}

/// Packs attractions into the [start, end] window, greedy first-fit in input
/// order. The first visit starts exactly at `start` with no buffer before it;
/// every later candidate must also pay the transit buffer. The first candidate
/// that does not fit ends the schedule — later, smaller attractions are not
/// pulled forward.
///
/// Caller guarantees `start < end`. An empty result is a valid schedule, not
/// an error. Minute arithmetic floors the millisecond difference uniformly.
pub fn build_schedule(
    attractions: &[Attraction],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    config: &PlannerConfig,
) -> Vec<ScheduledVisit> {
    let mut remaining = (end - start).num_minutes();
    let mut cursor = start;
    let mut visits: Vec<ScheduledVisit> = Vec::new();

    for (index, attraction) in attractions.iter().enumerate() {
        let buffer = if index > 0 {
            config.transit_buffer_minutes
        } else {
            0
        };
        let time_needed = attraction.estimated_duration + buffer;
        if time_needed > remaining {
            break;
        }

        // The previous visit only gets a transport leg once a successor is
        // actually emitted, so the last scheduled visit never carries one.
        if let Some(previous) = visits.last_mut() {
            previous.transport_to_next = Some(default_transport_leg(config));
        }

        let end_time = cursor + Duration::minutes(attraction.estimated_duration);
        visits.push(ScheduledVisit {
            id: format!("visit_{}_{}", index, attraction.id),
            attraction: attraction.clone(),
            start_time: cursor,
            end_time,
            transport_to_next: None,
        });

        cursor = end_time + Duration::minutes(config.transit_buffer_minutes);
        remaining -= time_needed;
    }

    visits
}

fn default_transport_leg(config: &PlannerConfig) -> TransportLeg {
    TransportLeg {
        mode: config.default_transport_mode,
        duration: config.transit_buffer_minutes,
        distance: config.default_transport_distance_meters,
        cost: config.default_transport_cost,
    }
}

/// Sums entry fees and transport costs, plus a meal allowance of two meals per
/// estimated day. Days are estimated from the visit count alone
/// (`ceil(count / 4)`), not from the calendar span of the schedule.
pub fn estimate_total_cost(visits: &[ScheduledVisit], config: &PlannerConfig) -> f64 {
    let mut total = 0.0;

    for visit in visits {
        total += visit.attraction.entry_fee;
        if let Some(leg) = &visit.transport_to_next {
            total += leg.cost;
        }
    }

    let days = visits.len().div_ceil(VISITS_PER_DAY_ESTIMATE);
    total + days as f64 * MEALS_PER_DAY * config.meal_cost
}
