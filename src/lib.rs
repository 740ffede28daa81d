pub mod agent;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod orchestrator;
pub mod protocol;
pub mod report;
pub mod retry;
pub mod runner;
