// src/agent/weather.rs

use crate::agent::WeatherProvider;
use crate::error::ServiceError;
use crate::model::WeatherReport;
use crate::protocol::parse::{parse_weather, weather_from_metadata};
use crate::protocol::{AgentClient, Message};
use async_trait::async_trait;
use tracing::debug;

/// Remote weather agent. The request text is the bare location.
pub struct WeatherAgentClient {
    client: AgentClient,
}

impl WeatherAgentClient {
    pub fn new(client: AgentClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl WeatherProvider for WeatherAgentClient {
    async fn get_weather(&self, location: &str) -> Result<WeatherReport, ServiceError> {
        let reply = self.client.send(location).await?;
        weather_from_reply(&reply)
    }
}

fn weather_from_reply(reply: &Message) -> Result<WeatherReport, ServiceError> {
    if let Some(metadata) = &reply.metadata {
        match weather_from_metadata(metadata) {
            Some(report) => return Ok(report),
            None => debug!("unusable weather metadata, parsing reply text"),
        }
    }
    parse_weather(reply.text())
}
