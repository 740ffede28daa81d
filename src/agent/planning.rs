// src/agent/planning.rs

use crate::agent::ActivityPlanner;
use crate::error::ServiceError;
use crate::model::ActivityPlan;
use crate::protocol::parse::parse_activities;
use crate::protocol::{AgentClient, Message, PlanningRequest};
use async_trait::async_trait;
use tracing::debug;

pub struct PlanningAgentClient {
    client: AgentClient,
}

impl PlanningAgentClient {
    pub fn new(client: AgentClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ActivityPlanner for PlanningAgentClient {
    async fn get_activities(
        &self,
        location: &str,
        weather_context: &str,
    ) -> Result<ActivityPlan, ServiceError> {
        let request = PlanningRequest::new(location, weather_context);
        let reply = self.client.send(&request.to_string()).await?;
        plan_from_reply(&reply)
    }
}

/// Structured metadata wins over the reply text when the agent sends it.
fn plan_from_reply(reply: &Message) -> Result<ActivityPlan, ServiceError> {
    if let Some(metadata) = &reply.metadata {
        match serde_json::from_value::<ActivityPlan>(metadata.clone()) {
            Ok(plan) if !plan.is_empty() => return Ok(plan),
            Ok(_) => debug!("metadata has no activities, parsing reply text"),
            Err(e) => debug!(error = %e, "unusable metadata, parsing reply text"),
        }
    }
    parse_activities(reply.text())
}
