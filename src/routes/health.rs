use actix_web::{web, HttpResponse, Responder};
use mongodb::{bson::doc, Client};
use serde::Serialize;
use std::collections::HashMap;
use std::env;
use std::sync::Arc;

#[derive(Serialize)]
struct HealthStatus {
    status: String,
    services: HashMap<String, ServiceStatus>,
    environment: String,
    version: String,
}

#[derive(Serialize, Clone)]
struct ServiceStatus {
    status: String,
    details: Option<String>,
}

pub async fn health_check(client: web::Data<Arc<Client>>) -> impl Responder {
    let mut health = HealthStatus {
        status: "ok".to_string(),
        services: HashMap::new(),
        environment: env::var("RUST_ENV").unwrap_or("development".to_string()),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    let mongo_result = check_mongodb(&client).await;
    health
        .services
        .insert("mongodb".to_string(), mongo_result.clone());

    let gemini_result = check_gemini_api();
    health
        .services
        .insert("gemini".to_string(), gemini_result.clone());

    let auth_result = check_auth_secret();
    health
        .services
        .insert("auth".to_string(), auth_result.clone());

    if mongo_result.status != "ok" || gemini_result.status != "ok" || auth_result.status != "ok" {
        health.status = "degraded".to_string();
    }

    HttpResponse::Ok().json(health)
}

async fn check_mongodb(client: &web::Data<Arc<Client>>) -> ServiceStatus {
    match client
        .database("WeekendWanderer")
        .run_command(doc! {"ping": 1})
        .await
    {
        Ok(_) => ServiceStatus {
            status: "ok".to_string(),
            details: Some("Connected successfully to MongoDB".to_string()),
        },
        Err(e) => {
            log::error!("MongoDB health check failed: {}", e);

            ServiceStatus {
                status: "error".to_string(),
                details: Some(format!("Failed to connect: {}", e)),
            }
        }
    }
}

// Key existence only; an actual generation call would burn quota per probe.
fn check_gemini_api() -> ServiceStatus {
    match env::var("GEMINI_API_KEY") {
        Ok(key) => ServiceStatus {
            status: "ok".to_string(),
            details: Some(format!("Gemini API key configured ({})", mask_key(&key))),
        },
        Err(_) => ServiceStatus {
            status: "error".to_string(),
            details: Some(
                "GEMINI_API_KEY not configured; attraction fetch will use the fallback table"
                    .to_string(),
            ),
        },
    }
}

// Char-based so keys containing multibyte characters cannot split a UTF-8
// sequence mid-boundary.
fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() > 8 {
        format!(
            "{}***{}",
            chars[..4].iter().collect::<String>(),
            chars[chars.len() - 4..].iter().collect::<String>()
        )
    } else {
        "***".to_string()
    }
}

fn check_auth_secret() -> ServiceStatus {
    match env::var("JWT_SECRET") {
        Ok(_) => ServiceStatus {
            status: "ok".to_string(),
            details: Some("JWT secret configured".to_string()),
        },
        Err(_) => ServiceStatus {
            status: "error".to_string(),
            details: Some("JWT_SECRET not configured".to_string()),
        },
    }
}
