use clap::Parser;
use std::sync::Arc;
use trip_coordinator::agent::{PlanningAgentClient, WeatherAgentClient};
use trip_coordinator::config::Settings;
use trip_coordinator::logging;
use trip_coordinator::orchestrator::TripOrchestrator;
use trip_coordinator::protocol::AgentClient;
use trip_coordinator::runner::{TripRunner, locations_or_default};

#[derive(Parser)]
#[command(name = "trip-coordinator")]
#[command(about = "Plans trips by asking the weather and planning agents in turn.")]
struct CommandLine {
    /// Locations to plan for (defaults to Da Nang, Hanoi, Ho Chi Minh)
    locations: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLine::parse();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(err) => {
            logging::init("info");
            tracing::error!(error = %err, "❌ invalid configuration");
            return Err(err.into());
        }
    };
    logging::init(&settings.log_level);

    tracing::info!(
        weather = %settings.weather_agent_url,
        planning = %settings.planning_agent_url,
        "🎯 travel coordinator starting"
    );

    let weather = WeatherAgentClient::new(AgentClient::new(&settings.weather_agent_url));
    let planner = PlanningAgentClient::new(AgentClient::new(&settings.planning_agent_url));
    let orchestrator = TripOrchestrator::from_settings(Arc::new(weather), Arc::new(planner), &settings);

    let locations = locations_or_default(cli.locations);
    let runner = TripRunner::new(&orchestrator, settings.pause_between_trips);

    let shutdown = async {
        if tokio::signal::ctrl_c().await.is_err() {
            // No signal handler; run to completion.
            std::future::pending::<()>().await;
        }
    };

    let mut stdout = std::io::stdout();
    let batch = match runner.run_until(&locations, &mut stdout, shutdown).await {
        Ok(batch) => batch,
        Err(err) => {
            tracing::error!(error = %err, "❌ fatal error writing trip reports");
            return Err(err.into());
        }
    };
    if batch.interrupted {
        tracing::info!("🛑 coordinator stopped by user");
    }

    Ok(())
}
