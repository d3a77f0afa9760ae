//! Domain DTOs for the country API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently;
//! the integration tests catch any drift between the two crates.

use serde::{Deserialize, Serialize};

/// A country as stored by the server. The id is always server-assigned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Country {
    pub id: i32,
    pub name: String,
    pub code: String,
}

/// Request payload for both create and update. Never carries an id: the
/// target of an update travels in the path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CountryInput {
    pub name: String,
    pub code: String,
}

/// Structured error body the server may attach to a failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
