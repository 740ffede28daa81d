// src/protocol/parse.rs

//! Turns agent reply text back into structured values.

use crate::error::ServiceError;
use crate::model::{Activity, ActivityPlan, WeatherReport};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;

static LOCATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*Weather in (.+?):[ \t\r]*$").expect("valid regex"));
static TEMPERATURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Temperature:\s*(-?\d+(?:\.\d+)?)\s*°?C").expect("valid regex")
});
static CONDITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)Condition:[ \t]*(.+?)[ \t\r]*$").expect("valid regex"));
static HUMIDITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Humidity:\s*(\d{1,3})\s*%").expect("valid regex"));
static NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("valid regex"));

const SUGGESTIONS_HEADER: &str = "🎯 Activity Suggestions for";
const FALLBACK_TITLE: &str = "📋 Suggested Activities";

fn capture<'t>(re: &Regex, text: &'t str, field: &str) -> Result<&'t str, ServiceError> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or_else(|| ServiceError::malformed(format!("weather reply missing {field}")))
}

pub fn parse_weather(text: &str) -> Result<WeatherReport, ServiceError> {
    let location = capture(&LOCATION, text, "location")?;
    let temperature = capture(&TEMPERATURE, text, "temperature")?;
    let condition = capture(&CONDITION, text, "condition")?;
    let humidity = capture(&HUMIDITY, text, "humidity")?;

    let temperature_c = temperature
        .parse::<f64>()
        .map_err(|e| ServiceError::malformed(format!("bad temperature {temperature:?}: {e}")))?;
    let humidity_pct = humidity
        .parse::<u8>()
        .ok()
        .filter(|h| *h <= 100)
        .ok_or_else(|| ServiceError::malformed(format!("bad humidity {humidity:?}")))?;

    Ok(WeatherReport::new(location.trim(), temperature_c, condition, humidity_pct))
}

/// Readings in agent metadata come either as bare numbers or as text with
/// the unit attached (`"28°C"`, `"75%"`).
#[derive(Deserialize)]
#[serde(untagged)]
enum Reading {
    Number(f64),
    Text(String),
}

impl Reading {
    fn value(&self) -> Option<f64> {
        match self {
            Reading::Number(n) => Some(*n),
            Reading::Text(text) => NUMBER.find(text)?.as_str().parse().ok(),
        }
    }
}

#[derive(Deserialize)]
struct WeatherMetadata {
    location: String,
    temperature: Reading,
    condition: String,
    humidity: Reading,
}

/// Structured weather from reply metadata; `None` if any field is missing
/// or out of range.
pub fn weather_from_metadata(metadata: &Value) -> Option<WeatherReport> {
    let meta = WeatherMetadata::deserialize(metadata).ok()?;
    let temperature_c = meta.temperature.value()?;
    let humidity = meta.humidity.value()?.round();
    if !(0.0..=100.0).contains(&humidity) {
        return None;
    }

    Some(WeatherReport::new(
        meta.location.trim(),
        temperature_c,
        meta.condition.trim(),
        humidity as u8,
    ))
}

/// A line is a title iff it holds at least one non-ASCII character
/// (the agent prefixes every title with an emoji).
pub fn is_title_line(line: &str) -> bool {
    !line.is_ascii()
}

/// Segments free text into activities using [`is_title_line`].
pub fn parse_activities(text: &str) -> Result<ActivityPlan, ServiceError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::malformed("empty activity reply"));
    }

    let mut lines = trimmed
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .peekable();

    if lines
        .peek()
        .is_some_and(|first| first.starts_with(SUGGESTIONS_HEADER) && first.ends_with(':'))
    {
        lines.next();
    }

    let mut activities: Vec<Activity> = Vec::new();
    for line in lines {
        if is_title_line(line) {
            activities.push(Activity::new(line, ""));
        } else if let Some(current) = activities.last_mut() {
            if !current.description.is_empty() {
                current.description.push(' ');
            }
            current.description.push_str(line);
        }
    }

    if activities.is_empty() {
        activities.push(Activity::new(FALLBACK_TITLE, trimmed));
    }

    Ok(ActivityPlan::new(activities))
}
