//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL with its permanent and active codes.
///
/// `auto_code` is assigned at creation and never changes; it remains a valid
/// fallback identifier even after the owner renames the active code.
/// `active_code` is the code resolution uses and starts out equal to
/// `auto_code`.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub destination_url: String,
    pub auto_code: String,
    pub active_code: String,
    pub owner_id: Option<i64>,
    pub click_count: i64,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Returns true if `requester` owns this link.
    ///
    /// Anonymous links have no owner and are owned by nobody; an anonymous
    /// requester owns nothing.
    pub fn is_owned_by(&self, requester: Option<i64>) -> bool {
        matches!((self.owner_id, requester), (Some(o), Some(r)) if o == r)
    }

    /// Returns true if `code` is one of this link's own codes.
    pub fn has_code(&self, code: &str) -> bool {
        self.auto_code == code || self.active_code == code
    }
}

/// Input data for creating a new link.
///
/// The store sets `auto_code = active_code = code` on insert.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub destination_url: String,
    pub code: String,
    pub owner_id: Option<i64>,
}
