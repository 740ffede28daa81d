#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::oneshot;
use trip_coordinator::agent::{ActivityPlanner, WeatherProvider};
use trip_coordinator::error::ServiceError;
use trip_coordinator::model::{Activity, ActivityPlan, WeatherReport};
use trip_coordinator::retry::{RetryConfig, Sleeper};

pub fn retry_config(max_retries: u32) -> RetryConfig {
    RetryConfig {
        max_retries,
        base_delay: Duration::from_millis(100),
        max_delay: Duration::from_secs(5),
    }
}

pub fn da_nang() -> WeatherReport {
    WeatherReport::new("Da Nang", 28.0, "Sunny", 75)
}

pub fn beach_day() -> ActivityPlan {
    ActivityPlan::new(vec![Activity::new("🏖️ Beach Day", "Enjoy the sunny weather.")])
}

pub fn outage() -> ServiceError {
    ServiceError::Network("connection refused".into())
}

/// Hands out scripted replies per location; once a script runs dry the
/// fallback is repeated.
pub struct ScriptedWeather {
    scripts: Mutex<HashMap<String, VecDeque<Result<WeatherReport, ServiceError>>>>,
    fallback: Result<WeatherReport, ServiceError>,
    calls: AtomicUsize,
}

impl ScriptedWeather {
    pub fn always(reply: Result<WeatherReport, ServiceError>) -> Self {
        Self {
            scripts: Mutex::new(HashMap::new()),
            fallback: reply,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn script(self, location: &str, replies: Vec<Result<WeatherReport, ServiceError>>) -> Self {
        self.scripts
            .lock()
            .unwrap()
            .insert(location.to_string(), replies.into());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherProvider for ScriptedWeather {
    async fn get_weather(&self, location: &str) -> Result<WeatherReport, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let scripted = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(location)
            .and_then(|queue| queue.pop_front());
        scripted.unwrap_or_else(|| self.fallback.clone())
    }
}

pub struct ScriptedPlanner {
    replies: Mutex<VecDeque<Result<ActivityPlan, ServiceError>>>,
    fallback: Result<ActivityPlan, ServiceError>,
    requests: Mutex<Vec<(String, String)>>,
}

impl ScriptedPlanner {
    pub fn always(reply: Result<ActivityPlan, ServiceError>) -> Self {
        Self::scripted(vec![], reply)
    }

    pub fn scripted(
        replies: Vec<Result<ActivityPlan, ServiceError>>,
        fallback: Result<ActivityPlan, ServiceError>,
    ) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            fallback,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<(String, String)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl ActivityPlanner for ScriptedPlanner {
    async fn get_activities(
        &self,
        location: &str,
        weather_context: &str,
    ) -> Result<ActivityPlan, ServiceError> {
        self.requests
            .lock()
            .unwrap()
            .push((location.to_string(), weather_context.to_string()));
        let scripted = self.replies.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| self.fallback.clone())
    }
}

/// Never returns.
pub struct StuckWeather;

#[async_trait]
impl WeatherProvider for StuckWeather {
    async fn get_weather(&self, _location: &str) -> Result<WeatherReport, ServiceError> {
        std::future::pending().await
    }
}

#[derive(Default)]
pub struct RecordingSleeper {
    delays: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.delays.lock().unwrap().push(duration);
    }
}

/// Fires its signal on the first pause, then never wakes up.
pub struct SignalingSleeper {
    signal: Mutex<Option<oneshot::Sender<()>>>,
}

impl SignalingSleeper {
    pub fn new() -> (Self, oneshot::Receiver<()>) {
        let (tx, rx) = oneshot::channel();
        (Self { signal: Mutex::new(Some(tx)) }, rx)
    }
}

#[async_trait]
impl Sleeper for SignalingSleeper {
    async fn sleep(&self, _duration: Duration) {
        if let Some(tx) = self.signal.lock().unwrap().take() {
            let _ = tx.send(());
        }
        std::future::pending().await
    }
}
