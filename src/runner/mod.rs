// src/runner/mod.rs

use crate::model::TripResult;
use crate::orchestrator::TripOrchestrator;
use crate::report::format_result;
use crate::retry::{Sleeper, TokioSleeper};
use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

pub const DEFAULT_LOCATIONS: [&str; 3] = ["Da Nang", "Hanoi", "Ho Chi Minh"];

/// Falls back to [`DEFAULT_LOCATIONS`] when no location was given.
pub fn locations_or_default(given: Vec<String>) -> Vec<String> {
    if given.is_empty() {
        DEFAULT_LOCATIONS.iter().map(|l| l.to_string()).collect()
    } else {
        given
    }
}

/// Plans a batch of locations one after another, pausing between them.
pub struct TripRunner<'a> {
    orchestrator: &'a TripOrchestrator,
    pause: Duration,
    sleeper: Arc<dyn Sleeper>,
}

impl<'a> TripRunner<'a> {
    pub fn new(orchestrator: &'a TripOrchestrator, pause: Duration) -> Self {
        Self::with_sleeper(orchestrator, pause, Arc::new(TokioSleeper))
    }

    pub fn with_sleeper(
        orchestrator: &'a TripOrchestrator,
        pause: Duration,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            orchestrator,
            pause,
            sleeper,
        }
    }

    /// Writes one report per location to `out`, in input order. A failed
    /// trip never stops the batch; only a failing writer does.
    pub async fn run<W: Write>(&self, locations: &[String], out: &mut W) -> io::Result<Vec<TripResult>> {
        let batch = self.run_until(locations, out, std::future::pending()).await?;
        Ok(batch.results)
    }

    /// Like [`TripRunner::run`], but stops as soon as `shutdown` resolves.
    /// The trip in flight is dropped without a report; finished reports stay
    /// written.
    pub async fn run_until<W, S>(&self, locations: &[String], out: &mut W, shutdown: S) -> io::Result<BatchReport>
    where
        W: Write,
        S: Future<Output = ()>,
    {
        info!(count = locations.len(), "📋 planning trips for: {}", locations.join(", "));
        tokio::pin!(shutdown);

        let mut results = Vec::with_capacity(locations.len());
        for (i, location) in locations.iter().enumerate() {
            let result = tokio::select! {
                biased;
                _ = &mut shutdown => return Ok(interrupted(results, locations.len())),
                result = self.orchestrator.plan_trip(location) => result,
            };
            if !result.is_success() {
                error!(location = %location, errors = ?result.errors(), "❌ failed to plan trip");
            }

            writeln!(out, "{}", format_result(&result))?;
            out.flush()?;
            results.push(result);

            if i + 1 < locations.len() && !self.pause.is_zero() {
                tokio::select! {
                    biased;
                    _ = &mut shutdown => return Ok(interrupted(results, locations.len())),
                    _ = self.sleeper.sleep(self.pause) => {}
                }
            }
        }

        let failed = results.iter().filter(|r| !r.is_success()).count();
        info!(planned = results.len() - failed, failed, "✅ all trips processed");
        Ok(BatchReport {
            results,
            interrupted: false,
        })
    }
}

/// Outcome of [`TripRunner::run_until`].
#[derive(Debug)]
pub struct BatchReport {
    pub results: Vec<TripResult>,
    /// Set when shutdown arrived before every location was planned.
    pub interrupted: bool,
}

fn interrupted(results: Vec<TripResult>, total: usize) -> BatchReport {
    info!(completed = results.len(), remaining = total - results.len(), "🛑 batch interrupted");
    BatchReport {
        results,
        interrupted: true,
    }
}
