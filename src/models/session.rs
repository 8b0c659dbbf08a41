use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents an admin session.
///
/// Stored in Redis under `session:{session_id}` with a TTL matching
/// `expires_at`; the cookie only ever carries the opaque session id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// The ID of the admin this session belongs to.
    pub admin_id: Uuid,
    /// The timestamp when the session was created.
    pub created_at: DateTime<Utc>,
    /// The timestamp when the session expires.
    pub expires_at: DateTime<Utc>,
}
