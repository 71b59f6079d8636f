use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::error::Error;
use std::fmt;
use std::time::Duration;
use tokio::time::timeout;
use uuid::Uuid;

use crate::models::attraction::{
    Attraction, Coordinates, MAX_DURATION_MINUTES, MAX_RATING, MIN_DURATION_MINUTES, MIN_RATING,
};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const GEMINI_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_MAX_ATTRACTIONS: usize = 5;

/// One bounded attempt per planning request; an elapsed deadline counts as a
/// fetch failure and sends the caller to the fallback table.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug)]
pub enum GeminiError {
    EnvironmentError(String),
    HttpError(reqwest::Error),
    ResponseError(String),
    Timeout,
}

impl fmt::Display for GeminiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeminiError::EnvironmentError(msg) => write!(f, "Environment error: {}", msg),
            GeminiError::HttpError(err) => write!(f, "HTTP error: {}", err),
            GeminiError::ResponseError(msg) => write!(f, "Response error: {}", msg),
            GeminiError::Timeout => write!(f, "Request timed out"),
        }
    }
}

impl Error for GeminiError {}

impl From<reqwest::Error> for GeminiError {
    fn from(err: reqwest::Error) -> Self {
        GeminiError::HttpError(err)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// Attraction fields as the model returns them, before normalization. Every
/// field is optional so a partially malformed entry still yields a usable
/// attraction with defaults.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAttraction {
    name: Option<String>,
    description: Option<String>,
    category: Option<String>,
    rating: Option<f64>,
    coordinates: Option<RawCoordinates>,
    estimated_duration: Option<i64>,
    entry_fee: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawCoordinates {
    lat: Option<f64>,
    lng: Option<f64>,
}

/// One-shot client for the Gemini `generateContent` endpoint. A single
/// attempt per planning request; any failure is returned to the caller, which
/// falls back to the static attraction table.
#[derive(Clone)]
pub struct GeminiService {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiService {
    pub fn new() -> Result<Self, GeminiError> {
        let api_key = env::var("GEMINI_API_KEY")
            .map_err(|_| GeminiError::EnvironmentError("GEMINI_API_KEY not set".to_string()))?;

        Ok(Self {
            client: Client::new(),
            api_key,
            base_url: GEMINI_API_BASE.to_string(),
            timeout: REQUEST_TIMEOUT,
        })
    }

    pub async fn fetch_attractions(
        &self,
        location: &str,
        max_attractions: usize,
    ) -> Result<Vec<Attraction>, GeminiError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(location, max_attractions),
                }],
            }],
        };

        let url = format!(
            "{}/{}:generateContent?key={}",
            self.base_url, GEMINI_MODEL, self.api_key
        );

        let body: GenerateContentResponse = timeout(self.timeout, async {
            let response = self
                .client
                .post(&url)
                .json(&request)
                .send()
                .await?
                .error_for_status()?;

            response.json::<GenerateContentResponse>().await
        })
        .await
        .map_err(|_| GeminiError::Timeout)??;

        let text = body
            .candidates
            .and_then(|mut candidates| {
                if candidates.is_empty() {
                    None
                } else {
                    candidates.remove(0).content.parts.into_iter().next()
                }
            })
            .map(|part| part.text)
            .ok_or_else(|| {
                GeminiError::ResponseError("No candidate text in Gemini response".to_string())
            })?;

        log::debug!("Gemini response for {}: {:.200}", location, text);

        parse_attractions(&text)
    }
}

fn build_prompt(location: &str, max_attractions: usize) -> String {
    format!(
        r#"Generate a JSON array of {max} real tourist attractions in {location}, India.

Format (return ONLY this JSON, no other text):
[
  {{
    "name": "Marina Beach",
    "description": "Second longest urban beach in the world, perfect for evening walks",
    "category": "Beach",
    "rating": 4.3,
    "estimatedDuration": 120,
    "entryFee": 0,
    "coordinates": {{"lat": 13.0515, "lng": 80.2825}}
  }}
]

Requirements:
- REAL places in {location}, India only
- Entry fees in Indian Rupees
- Duration in minutes (60-240)
- Include temples, monuments, parks, museums
- Accurate coordinates for the city"#,
        max = max_attractions,
        location = location
    )
}

/// Parses the model output into normalized attractions. Tolerates the
/// markdown code fences Gemini often wraps JSON in.
fn parse_attractions(text: &str) -> Result<Vec<Attraction>, GeminiError> {
    let clean = strip_code_fences(text);

    let raw: Vec<RawAttraction> = serde_json::from_str(clean)
        .map_err(|err| GeminiError::ResponseError(format!("Invalid attraction JSON: {}", err)))?;

    Ok(raw.into_iter().map(normalize_attraction).collect())
}

fn strip_code_fences(text: &str) -> &str {
    let mut clean = text.trim();
    if let Some(rest) = clean.strip_prefix("```json") {
        clean = rest;
    } else if let Some(rest) = clean.strip_prefix("```") {
        clean = rest;
    }
    if let Some(rest) = clean.trim_end().strip_suffix("```") {
        clean = rest;
    }
    clean.trim()
}

fn normalize_attraction(raw: RawAttraction) -> Attraction {
    let coordinates = raw
        .coordinates
        .map(|c| Coordinates {
            lat: c.lat.unwrap_or(0.0),
            lng: c.lng.unwrap_or(0.0),
        })
        .unwrap_or(Coordinates { lat: 0.0, lng: 0.0 });

    Attraction {
        id: format!("gemini_{}", Uuid::new_v4()),
        name: raw.name.unwrap_or_else(|| "Unknown Attraction".to_string()),
        description: raw
            .description
            .unwrap_or_else(|| "No description available".to_string()),
        category: raw.category.unwrap_or_else(|| "Landmark".to_string()),
        rating: raw.rating.unwrap_or(4.0).clamp(MIN_RATING, MAX_RATING),
        coordinates,
        estimated_duration: raw
            .estimated_duration
            .unwrap_or(90)
            .clamp(MIN_DURATION_MINUTES, MAX_DURATION_MINUTES),
        entry_fee: raw.entry_fee.unwrap_or(0.0).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fenced_json_response() {
        let text = "```json\n[{\"name\": \"Red Fort\", \"description\": \"Mughal fortress\", \"category\": \"Fort\", \"rating\": 4.6, \"estimatedDuration\": 150, \"entryFee\": 50, \"coordinates\": {\"lat\": 28.6562, \"lng\": 77.2410}}]\n```";

        let attractions = parse_attractions(text).unwrap();

        assert_eq!(attractions.len(), 1);
        assert_eq!(attractions[0].name, "Red Fort");
        assert_eq!(attractions[0].entry_fee, 50.0);
        assert!(attractions[0].id.starts_with("gemini_"));
    }

    #[test]
    fn parses_bare_json_response() {
        let text = r#"[{"name": "India Gate", "category": "Monument", "rating": 4.5}]"#;

        let attractions = parse_attractions(text).unwrap();

        assert_eq!(attractions[0].name, "India Gate");
        assert_eq!(attractions[0].description, "No description available");
    }

    #[test]
    fn clamps_out_of_range_fields() {
        let text = r#"[{"name": "X", "rating": 9.9, "estimatedDuration": 1000, "entryFee": -20}]"#;

        let attractions = parse_attractions(text).unwrap();

        assert_eq!(attractions[0].rating, 5.0);
        assert_eq!(attractions[0].estimated_duration, 480);
        assert_eq!(attractions[0].entry_fee, 0.0);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let text = r#"[{}]"#;

        let attractions = parse_attractions(text).unwrap();

        assert_eq!(attractions[0].name, "Unknown Attraction");
        assert_eq!(attractions[0].category, "Landmark");
        assert_eq!(attractions[0].rating, 4.0);
        assert_eq!(attractions[0].estimated_duration, 90);
    }

    #[test]
    fn rejects_non_json_response() {
        assert!(parse_attractions("I could not find any attractions.").is_err());
    }

    #[actix_rt::test]
    async fn fetch_times_out_when_endpoint_never_responds() {
        // Bound but never accepted: the connection sits in the listen backlog
        // and the request never gets a response.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let service = GeminiService {
            client: Client::new(),
            api_key: "test-key".to_string(),
            base_url: format!("http://{}", addr),
            timeout: Duration::from_millis(250),
        };

        let result = service.fetch_attractions("Mumbai", 5).await;
        assert!(matches!(result, Err(GeminiError::Timeout)));
    }
}
