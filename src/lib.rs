//! Tracks money contributed toward a fixed fundraising goal.
//!
//! One contract (list, create, partially update, delete contributors) is
//! served two ways: a long-running actix-web server and a
//! one-request-per-invocation function host. Both go through
//! [`services::contributions::ContributionService`].

pub mod client;
pub mod config;
pub mod database;
pub mod functions;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod repository;
pub mod requests;
pub mod routes;
pub mod services;
pub mod telemetry;
pub mod utils;
