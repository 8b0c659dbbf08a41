use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Represents an administrator account.
#[derive(Clone, Debug)]
pub struct Admin {
    /// The unique identifier for the admin.
    pub id: Uuid,
    /// The admin's email address.
    pub email: String,
    /// The admin's Argon2id password hash.
    pub password: String,
    /// The timestamp when the account was created.
    pub created_at: DateTime<Utc>,
}
