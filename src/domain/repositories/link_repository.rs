//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the link store.
///
/// Every operation is individually atomic; no caller-side transaction spans
/// multiple calls. Uniqueness of the code namespace (`auto_code` and
/// `active_code` together) is enforced by the storage layer itself, so the
/// registry's pre-checks are an optimization, never the guard.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Returns true if `code` equals any link's `auto_code` or `active_code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn exists_code(&self, code: &str) -> Result<bool, AppError>;

    /// Creates a link with `auto_code = active_code = new_link.code`.
    ///
    /// The uniqueness check and the write happen in a single atomic statement:
    /// of two racing inserts of the same code, at most one succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code collides with any existing
    /// `auto_code` or `active_code`. Returns [`AppError::Internal`] on
    /// database errors.
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Looks up a link by its active code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_active_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Looks up a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, AppError>;

    /// Lists all links owned by `owner_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError>;

    /// Changes a link's `active_code`; the `auto_code` is never touched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has `link_id`.
    /// Returns [`AppError::Conflict`] if `new_code` collides with another
    /// link's `auto_code` or `active_code`.
    /// Returns [`AppError::Internal`] on database errors.
    async fn rename_active_code(&self, link_id: i64, new_code: &str) -> Result<(), AppError>;

    /// Atomically adds 1 to a link's click counter.
    ///
    /// The increment is a single `+ 1` at the storage layer, so concurrent
    /// resolutions of the same code never lose updates.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has `link_id`.
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_click(&self, link_id: i64) -> Result<(), AppError>;
}
