// src/protocol/request.rs

use std::fmt;

const PREFIX: &str = "Plan for";
const SEPARATOR: &str = "with weather:";
const UNKNOWN_WEATHER: &str = "Unknown weather conditions";

/// What the planning agent needs to suggest activities.
///
/// On the wire this is a single line of text,
/// `Plan for {location} with weather: {weather_context}`, which is what an
/// unmodified planning agent expects. `Display` writes it and [`parse`]
/// reads it back.
///
/// [`parse`]: PlanningRequest::parse
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanningRequest {
    pub location: String,
    pub weather_context: String,
}

impl PlanningRequest {
    pub fn new(location: impl Into<String>, weather_context: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            weather_context: weather_context.into(),
        }
    }

    /// Splits at the first `with weather:`. Text without the separator is
    /// taken as a bare location.
    pub fn parse(text: &str) -> Self {
        match text.split_once(SEPARATOR) {
            Some((head, weather)) => {
                let head = head.trim();
                let location = head.strip_prefix(PREFIX).unwrap_or(head);
                Self::new(location.trim(), weather.trim())
            }
            None => Self::new(text.trim(), UNKNOWN_WEATHER),
        }
    }
}

impl fmt::Display for PlanningRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{PREFIX} {} {SEPARATOR} {}", self.location, self.weather_context)
    }
}
