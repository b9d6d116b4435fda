//! Admin user domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use greengrocer_core::{AdminUserId, Email};

/// A back-office operator account.
///
/// Lives in the `admin` schema, entirely apart from customers. Orders never
/// reference an admin.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    /// Unique admin ID.
    pub id: AdminUserId,
    /// Display name.
    pub name: String,
    /// Admin's email address.
    pub email: Email,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
