//! Scoring and recommendation engine for the ESG readiness self-assessment,
//! plus the service scaffolding that exposes it over HTTP.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
