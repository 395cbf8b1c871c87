//! Request identity for correlating resolver logs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies the request a snapshot was captured for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestIdentity {
    /// The unique ID for this request.
    pub request_id: Uuid,
    /// When the snapshot was captured.
    pub captured_at: DateTime<Utc>,
}

impl Default for RequestIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestIdentity {
    /// Creates a new identity with a generated request ID.
    #[must_use]
    pub fn new() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            captured_at: Utc::now(),
        }
    }

    /// Creates an identity with a specific request ID.
    #[must_use]
    pub fn with_request_id(request_id: Uuid) -> Self {
        Self {
            request_id,
            captured_at: Utc::now(),
        }
    }
}
