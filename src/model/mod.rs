// src/model/mod.rs

use crate::error::StageError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current conditions for one location, as reported by the weather agent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: String,
    pub temperature_c: f64,
    pub condition: String,
    pub humidity_pct: u8,
}

impl WeatherReport {
    pub fn new(
        location: impl Into<String>,
        temperature_c: f64,
        condition: impl Into<String>,
        humidity_pct: u8,
    ) -> Self {
        Self {
            location: location.into(),
            temperature_c,
            condition: condition.into(),
            humidity_pct,
        }
    }

    pub fn summary(&self) -> String {
        format!("{}, {}°C", self.condition, self.temperature_c)
    }
}

/// The multi-line text the weather agent speaks. The planner receives this
/// verbatim as its weather context.
impl fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Weather in {}:", self.location)?;
        writeln!(f, "🌡️ Temperature: {}°C", self.temperature_c)?;
        writeln!(f, "☁️ Condition: {}", self.condition)?;
        write!(f, "💧 Humidity: {}%", self.humidity_pct)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl Activity {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityPlan {
    pub activities: Vec<Activity>,
}

impl ActivityPlan {
    pub fn new(activities: Vec<Activity>) -> Self {
        Self { activities }
    }

    pub fn count(&self) -> usize {
        self.activities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

/// The two sequential remote calls of a trip.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Weather,
    Planning,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Weather => f.write_str("weather"),
            Stage::Planning => f.write_str("planning"),
        }
    }
}

/// Outcome of planning one location. Only the orchestrator fills it in;
/// callers get a read-only view.
#[derive(Clone, Debug, PartialEq)]
pub struct TripResult {
    location: String,
    weather: Option<WeatherReport>,
    activities: Option<ActivityPlan>,
    errors: Vec<String>,
}

impl TripResult {
    pub(crate) fn new(location: &str) -> Self {
        Self {
            location: location.to_string(),
            weather: None,
            activities: None,
            errors: Vec::new(),
        }
    }

    pub(crate) fn set_weather(&mut self, weather: WeatherReport) {
        self.weather = Some(weather);
    }

    pub(crate) fn set_activities(&mut self, activities: ActivityPlan) {
        self.activities = Some(activities);
    }

    pub(crate) fn record_failure(&mut self, stage: Stage, err: &StageError) {
        self.errors.push(format!("{stage} stage failed: {err}"));
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn weather(&self) -> Option<&WeatherReport> {
        self.weather.as_ref()
    }

    pub fn activities(&self) -> Option<&ActivityPlan> {
        self.activities.as_ref()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// True iff both stages produced a value and nothing was recorded as failed.
    pub fn is_success(&self) -> bool {
        self.weather.is_some() && self.activities.is_some() && self.errors.is_empty()
    }
}
