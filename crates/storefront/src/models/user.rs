//! User domain types.
//!
//! These types represent validated domain objects separate from database row
//! types. Password hashes never leave the db layer except through the auth
//! service.

use chrono::{DateTime, Utc};
use serde::Serialize;

use greengrocer_core::{Email, UserId};

/// A storefront customer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// User's email address.
    pub email: Email,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Default delivery address.
    pub address: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}
