// src/orchestrator/mod.rs

use crate::agent::{ActivityPlanner, WeatherProvider};
use crate::config::Settings;
use crate::error::{ServiceError, StageError};
use crate::model::{Stage, TripResult};
use crate::retry::RetryPolicy;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Runs the weather stage, then the planning stage, for one location.
pub struct TripOrchestrator {
    weather: Arc<dyn WeatherProvider>,
    planner: Arc<dyn ActivityPlanner>,
    retry: RetryPolicy,
    stage_timeout: Duration,
}

impl TripOrchestrator {
    pub fn new(
        weather: Arc<dyn WeatherProvider>,
        planner: Arc<dyn ActivityPlanner>,
        retry: RetryPolicy,
        stage_timeout: Duration,
    ) -> Self {
        Self {
            weather,
            planner,
            retry,
            stage_timeout,
        }
    }

    pub fn from_settings(
        weather: Arc<dyn WeatherProvider>,
        planner: Arc<dyn ActivityPlanner>,
        settings: &Settings,
    ) -> Self {
        Self::new(
            weather,
            planner,
            RetryPolicy::new(settings.retry),
            settings.stage_timeout,
        )
    }

    /// Never fails: every stage error ends up in the returned result. A
    /// weather failure skips the planning stage.
    pub async fn plan_trip(&self, location: &str) -> TripResult {
        info!(location, "🚀 starting trip planning");
        let mut result = TripResult::new(location);

        let weather = match self
            .run_stage(Stage::Weather, location, move || self.weather.get_weather(location))
            .await
        {
            Ok(weather) => weather,
            Err(err) => {
                result.record_failure(Stage::Weather, &err);
                return result;
            }
        };
        info!(location, weather = %weather.summary(), "✅ weather received");

        let weather_context = weather.to_string();
        result.set_weather(weather);

        let context = weather_context.as_str();
        match self
            .run_stage(Stage::Planning, location, move || {
                self.planner.get_activities(location, context)
            })
            .await
        {
            Ok(plan) => {
                info!(location, count = plan.count(), "✅ activities received");
                result.set_activities(plan);
            }
            Err(err) => result.record_failure(Stage::Planning, &err),
        }

        result
    }

    async fn run_stage<T, F, Fut>(
        &self,
        stage: Stage,
        location: &str,
        operation: F,
    ) -> Result<T, StageError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ServiceError>>,
    {
        let outcome = tokio::time::timeout(self.stage_timeout, self.retry.execute(operation)).await;

        let err = match outcome {
            Ok(Ok(value)) => return Ok(value),
            Ok(Err(source)) => StageError::Exhausted {
                attempts: self.retry.max_retries(),
                source,
            },
            Err(_) => StageError::TimedOut(self.stage_timeout),
        };
        error!(location, %stage, error = %err, "❌ stage failed");
        Err(err)
    }
}
