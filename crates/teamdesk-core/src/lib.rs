//! Core library for teamdesk - school team and event administration.
//!
//! Provides the REST client for the school administration API, the team,
//! student and event models, list search/sort helpers, and the participant
//! roster reconciler used when enrolling students in an event.

pub mod api;
pub mod config;
pub mod lists;
pub mod models;
pub mod roster;
pub mod utils;

pub use api::{ApiClient, ApiError};
pub use config::Config;
pub use roster::{ParticipantReconciler, ReconcileError};
