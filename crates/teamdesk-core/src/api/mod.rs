//! REST API client module for the school administration backend.
//!
//! This module provides the `ApiClient` for fetching teams, students and
//! events and for submitting event enrollments. Error responses are decoded
//! once here into `ApiError`; callers never inspect raw bodies.

pub mod client;
pub mod error;

pub use client::{ApiClient, ApiResult, DEFAULT_API_BASE_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
pub use error::ApiError;
