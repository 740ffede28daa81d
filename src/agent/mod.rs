// src/agent/mod.rs

pub mod planning;
pub mod weather;

pub use planning::PlanningAgentClient;
pub use weather::WeatherAgentClient;

use crate::error::ServiceError;
use crate::model::{ActivityPlan, WeatherReport};
use async_trait::async_trait;

/// Looks up current weather for a location.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn get_weather(&self, location: &str) -> Result<WeatherReport, ServiceError>;
}

/// Suggests activities for a location given a textual weather context.
#[async_trait]
pub trait ActivityPlanner: Send + Sync {
    async fn get_activities(
        &self,
        location: &str,
        weather_context: &str,
    ) -> Result<ActivityPlan, ServiceError>;
}
