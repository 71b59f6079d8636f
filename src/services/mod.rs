pub mod fallback_attractions;
pub mod gemini_service;
pub mod trip_planner;
