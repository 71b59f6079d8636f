use crate::models::attraction::{Attraction, Coordinates};

/// Keyword table mapping normalized city keys to the substrings that select
/// them. First match wins; anything unmatched gets the generic entry.
const CITY_KEYWORDS: &[(&str, &[&str])] = &[
    ("chennai", &["chennai", "madras"]),
    ("mumbai", &["mumbai", "bombay"]),
    ("delhi", &["delhi", "new delhi"]),
];

/// Static attraction data substituted when the live attraction source fails.
/// Lookup is case-insensitive substring matching against the keyword table;
/// unknown locations get a generic pair of attractions.
pub fn fallback_attractions(location: &str) -> Vec<Attraction> {
    let normalized = location.trim().to_lowercase();

    let city = CITY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| normalized.contains(k)))
        .map(|(city, _)| *city);

    match city {
        Some("chennai") => chennai_attractions(),
        Some("mumbai") => mumbai_attractions(),
        Some("delhi") => delhi_attractions(),
        _ => generic_attractions(),
    }
}

fn entry(
    id: &str,
    name: &str,
    description: &str,
    category: &str,
    rating: f64,
    lat: f64,
    lng: f64,
    estimated_duration: i64,
    entry_fee: f64,
) -> Attraction {
    Attraction {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        rating,
        coordinates: Coordinates { lat, lng },
        estimated_duration,
        entry_fee,
    }
}

fn chennai_attractions() -> Vec<Attraction> {
    vec![
        entry(
            "fallback_chennai_1",
            "Marina Beach",
            "World's second longest urban beach perfect for evening walks and street food",
            "Beach",
            4.3,
            13.0515,
            80.2825,
            120,
            0.0,
        ),
        entry(
            "fallback_chennai_2",
            "Kapaleeshwarar Temple",
            "Ancient Dravidian temple dedicated to Lord Shiva with stunning architecture",
            "Temple",
            4.5,
            13.0339,
            80.2619,
            90,
            0.0,
        ),
        entry(
            "fallback_chennai_3",
            "Fort St. George",
            "Historic British fort and museum showcasing colonial heritage",
            "Monument",
            4.1,
            13.0858,
            80.2836,
            120,
            30.0,
        ),
    ]
}

fn mumbai_attractions() -> Vec<Attraction> {
    vec![
        entry(
            "fallback_mumbai_1",
            "Gateway of India",
            "Iconic monument overlooking the Arabian Sea and symbol of Mumbai",
            "Monument",
            4.4,
            18.9220,
            72.8347,
            90,
            0.0,
        ),
        entry(
            "fallback_mumbai_2",
            "Marine Drive",
            "Queen's Necklace - beautiful coastline perfect for evening walks",
            "Beach",
            4.3,
            18.9439,
            72.8236,
            120,
            0.0,
        ),
    ]
}

fn delhi_attractions() -> Vec<Attraction> {
    vec![
        entry(
            "fallback_delhi_1",
            "Red Fort",
            "Magnificent Mughal fortress and UNESCO World Heritage Site",
            "Fort",
            4.6,
            28.6562,
            77.2410,
            150,
            50.0,
        ),
        entry(
            "fallback_delhi_2",
            "India Gate",
            "War memorial and iconic landmark in the heart of New Delhi",
            "Monument",
            4.5,
            28.6129,
            77.2295,
            90,
            0.0,
        ),
    ]
}

// Generic entries use the geographic center of India.
fn generic_attractions() -> Vec<Attraction> {
    vec![
        entry(
            "fallback_generic_1",
            "Local Temple",
            "Beautiful temple showcasing regional architecture and culture",
            "Temple",
            4.2,
            20.5937,
            78.9629,
            90,
            0.0,
        ),
        entry(
            "fallback_generic_2",
            "City Market",
            "Bustling local market perfect for shopping and street food",
            "Market",
            4.0,
            20.5937,
            78.9629,
            120,
            0.0,
        ),
    ]
}
