//! Synthetic analytics for the DateMate dashboard: a seeded mock-metrics
//! generator, a process-lifetime snapshot cache and Markdown/CSV/JSON
//! renderers for the `datemate-dashboard` binary.

pub mod cache;
pub mod config;
pub mod error;
pub mod export;
pub mod filters;
pub mod generator;
pub mod logging;
pub mod models;
pub mod report;
