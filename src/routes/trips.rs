use actix_web::{web, HttpResponse, Responder};
use bson::oid::ObjectId;
use chrono::{DateTime, Utc};
use mongodb::Client;
use std::sync::Arc;

use crate::db::trip_store::TripStore;
use crate::middleware::auth::Claims;
use crate::models::trip::{Itinerary, PlanTripRequest, TripListResponse, TripPlanResponse};
use crate::services::fallback_attractions::fallback_attractions;
use crate::services::gemini_service::{GeminiService, DEFAULT_MAX_ATTRACTIONS};
use crate::services::trip_planner::{build_schedule, estimate_total_cost, PlannerConfig};

/*
    POST /api/trips/plan
*/
pub async fn plan_trip(
    claims: web::ReqData<Claims>,
    data: web::Data<Arc<Client>>,
    input: web::Json<PlanTripRequest>,
) -> impl Responder {
    let input = input.into_inner();

    if input.location.trim().is_empty()
        || input.start_date.trim().is_empty()
        || input.end_date.trim().is_empty()
    {
        return HttpResponse::BadRequest().json(TripPlanResponse::failure(
            "Start date, end date, and location are required",
        ));
    }

    let start = match parse_timestamp(&input.start_date) {
        Some(start) => start,
        None => {
            return HttpResponse::BadRequest()
                .json(TripPlanResponse::failure("Invalid start date"))
        }
    };
    let end = match parse_timestamp(&input.end_date) {
        Some(end) => end,
        None => {
            return HttpResponse::BadRequest().json(TripPlanResponse::failure("Invalid end date"))
        }
    };
    if start >= end {
        return HttpResponse::BadRequest()
            .json(TripPlanResponse::failure("End date must be after start date"));
    }

    let user_id = match ObjectId::parse_str(&claims.user_id) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(TripPlanResponse::failure("Invalid user ID"))
        }
    };

    // A single fetch attempt; any failure substitutes the static table and is
    // never surfaced to the caller.
    let attractions = fetch_attractions(&input.location).await;

    if attractions.is_empty() {
        return HttpResponse::NotFound().json(TripPlanResponse::failure(
            "No attractions found near the specified location",
        ));
    }

    // An empty schedule from a non-empty attraction list is still a success:
    // nothing fit the window, which is a valid plan with zero stops.
    let config = PlannerConfig::default();
    let visits = build_schedule(&attractions, start, end, &config);
    let total_cost = estimate_total_cost(&visits, &config);

    let mut itinerary = Itinerary {
        id: None,
        user_id,
        location: input.location,
        start_date: start,
        end_date: end,
        visits,
        total_cost,
        favorite: None,
        created_at: Some(bson::DateTime::now()),
    };

    let store = TripStore::new(data.get_ref().clone());
    match store.insert(&itinerary).await {
        Ok(id) => {
            itinerary.id = Some(id);
            HttpResponse::Ok().json(TripPlanResponse {
                success: true,
                itinerary: Some(itinerary),
                message: Some("Trip planned successfully".to_string()),
            })
        }
        Err(err) => {
            log::error!("Failed to store itinerary: {:?}", err);
            HttpResponse::InternalServerError()
                .json(TripPlanResponse::failure("Failed to save itinerary"))
        }
    }
}

/*
    GET /api/trips
*/
pub async fn list_trips(claims: web::ReqData<Claims>, data: web::Data<Arc<Client>>) -> impl Responder {
    let user_id = match ObjectId::parse_str(&claims.user_id) {
        Ok(id) => id,
        Err(_) => {
            return HttpResponse::BadRequest().json(TripPlanResponse::failure("Invalid user ID"))
        }
    };

    let store = TripStore::new(data.get_ref().clone());
    match store.list_for_user(user_id).await {
        Ok(itineraries) => HttpResponse::Ok().json(TripListResponse {
            success: true,
            itineraries,
        }),
        Err(err) => {
            log::error!("Failed to list itineraries: {:?}", err);
            HttpResponse::InternalServerError()
                .json(TripPlanResponse::failure("Failed to retrieve itineraries"))
        }
    }
}

/*
    GET /api/trips/{id}
*/
pub async fn get_trip(
    claims: web::ReqData<Claims>,
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
) -> impl Responder {
    let (id, user_id) = match parse_ids(&path.into_inner(), &claims.user_id) {
        Ok(ids) => ids,
        Err(response) => return response,
    };

    let store = TripStore::new(data.get_ref().clone());
    match store.find_for_user(id, user_id).await {
        Ok(Some(itinerary)) => HttpResponse::Ok().json(TripPlanResponse {
            success: true,
            itinerary: Some(itinerary),
            message: None,
        }),
        Ok(None) => {
            HttpResponse::NotFound().json(TripPlanResponse::failure("Itinerary not found"))
        }
        Err(err) => {
            log::error!("Failed to retrieve itinerary: {:?}", err);
            HttpResponse::InternalServerError()
                .json(TripPlanResponse::failure("Failed to retrieve itinerary"))
        }
    }
}

/*
    DELETE /api/trips/{id}
*/
pub async fn delete_trip(
    claims: web::ReqData<Claims>,
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
) -> impl Responder {
    let (id, user_id) = match parse_ids(&path.into_inner(), &claims.user_id) {
        Ok(ids) => ids,
        Err(response) => return response,
    };

    let store = TripStore::new(data.get_ref().clone());
    match store.delete_for_user(id, user_id).await {
        Ok(true) => HttpResponse::Ok().json(TripPlanResponse {
            success: true,
            itinerary: None,
            message: Some("Itinerary deleted".to_string()),
        }),
        Ok(false) => {
            HttpResponse::NotFound().json(TripPlanResponse::failure("Itinerary not found"))
        }
        Err(err) => {
            log::error!("Failed to delete itinerary: {:?}", err);
            HttpResponse::InternalServerError()
                .json(TripPlanResponse::failure("Failed to delete itinerary"))
        }
    }
}

/*
    PUT /api/trips/{id}/favorite

    The favorite flag is the only field that may change after an itinerary is
    stored; the visit sequence and total cost are immutable.
*/
pub async fn toggle_favorite(
    claims: web::ReqData<Claims>,
    data: web::Data<Arc<Client>>,
    path: web::Path<String>,
) -> impl Responder {
    let (id, user_id) = match parse_ids(&path.into_inner(), &claims.user_id) {
        Ok(ids) => ids,
        Err(response) => return response,
    };

    let store = TripStore::new(data.get_ref().clone());

    let favorite = match store.find_for_user(id, user_id).await {
        Ok(Some(itinerary)) => !itinerary.favorite.unwrap_or(false),
        Ok(None) => {
            return HttpResponse::NotFound()
                .json(TripPlanResponse::failure("Itinerary not found"))
        }
        Err(err) => {
            log::error!("Failed to retrieve itinerary: {:?}", err);
            return HttpResponse::InternalServerError()
                .json(TripPlanResponse::failure("Failed to update favorite"));
        }
    };

    match store.set_favorite(id, user_id, favorite).await {
        Ok(true) => HttpResponse::Ok().json(TripPlanResponse {
            success: true,
            itinerary: None,
            message: Some(if favorite {
                "Itinerary added to favorites".to_string()
            } else {
                "Itinerary removed from favorites".to_string()
            }),
        }),
        Ok(false) => {
            HttpResponse::NotFound().json(TripPlanResponse::failure("Itinerary not found"))
        }
        Err(err) => {
            log::error!("Failed to update favorite: {:?}", err);
            HttpResponse::InternalServerError()
                .json(TripPlanResponse::failure("Failed to update favorite"))
        }
    }
}

async fn fetch_attractions(location: &str) -> Vec<crate::models::attraction::Attraction> {
    match GeminiService::new() {
        Ok(service) => match service
            .fetch_attractions(location, DEFAULT_MAX_ATTRACTIONS)
            .await
        {
            // A successful but empty response is "no attractions found", not
            // a fetch failure; the fallback only covers failures.
            Ok(attractions) => attractions,
            Err(err) => {
                log::warn!("Attraction fetch failed for {}: {}, using fallback", location, err);
                fallback_attractions(location)
            }
        },
        Err(err) => {
            log::warn!("Gemini unavailable: {}, using fallback", err);
            fallback_attractions(location)
        }
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_ids(path_id: &str, claims_user_id: &str) -> Result<(ObjectId, ObjectId), HttpResponse> {
    let id = ObjectId::parse_str(path_id)
        .map_err(|_| HttpResponse::BadRequest().json(TripPlanResponse::failure("Invalid ID")))?;
    let user_id = ObjectId::parse_str(claims_user_id).map_err(|_| {
        HttpResponse::BadRequest().json(TripPlanResponse::failure("Invalid user ID"))
    })?;
    Ok((id, user_id))
}
