//! Link registry: code allocation, resolution, and rename.
//!
//! This is the orchestration core of the service. It owns no state beyond the
//! injected link store and the click channel, and it is safe to call from any
//! number of concurrent request handlers: every uniqueness guarantee rests on
//! the store's atomic operations, never on the registry's pre-checks.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::mpsc;

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, validate_custom_code};
use crate::utils::url_validator::validate_url;

/// Retry budget for automatic allocation. With a 62^7 candidate space this is
/// a defensive guard, not something normal operation reaches.
const MAX_ATTEMPTS: usize = 20;

/// Orchestrates link allocation, resolution, and rename over a [`LinkRepository`].
pub struct RegistryService<L: LinkRepository> {
    link_repository: Arc<L>,
    click_tx: mpsc::Sender<ClickEvent>,
}

impl<L: LinkRepository> RegistryService<L> {
    /// Creates a new registry over the given store and click channel.
    pub fn new(link_repository: Arc<L>, click_tx: mpsc::Sender<ClickEvent>) -> Self {
        Self {
            link_repository,
            click_tx,
        }
    }

    /// Allocates a link with a generated code.
    ///
    /// Generates candidates until one inserts cleanly. The `exists_code`
    /// pre-check only avoids doomed inserts; losing an insert race surfaces as
    /// [`AppError::Conflict`] from the store and triggers a fresh candidate.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `destination_url` is not an
    /// absolute HTTP(S) URL. Returns [`AppError::Exhausted`] if no free code
    /// is found within the retry budget.
    pub async fn allocate_auto(
        &self,
        destination_url: String,
        owner_id: Option<i64>,
    ) -> Result<Link, AppError> {
        validate_url(&destination_url).map_err(|e| {
            AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
        })?;

        for _ in 0..MAX_ATTEMPTS {
            let code = generate_code();

            if self.link_repository.exists_code(&code).await? {
                continue;
            }

            match self
                .link_repository
                .insert(NewLink {
                    destination_url: destination_url.clone(),
                    code,
                    owner_id,
                })
                .await
            {
                Ok(link) => return Ok(link),
                // Lost the race for this candidate; try another.
                Err(AppError::Conflict { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        tracing::warn!(
            attempts = MAX_ATTEMPTS,
            "code allocation exhausted retry budget"
        );
        Err(AppError::exhausted(
            "Failed to allocate a unique code",
            json!({ "attempts": MAX_ATTEMPTS }),
        ))
    }

    /// Allocates a link with a caller-chosen code.
    ///
    /// Unlike [`Self::allocate_auto`], a lost insert race is surfaced rather
    /// than retried: the caller chose this exact code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a bad URL or a non-alphanumeric
    /// code, and [`AppError::Conflict`] if the code is taken.
    pub async fn allocate_custom(
        &self,
        destination_url: String,
        custom_code: String,
        owner_id: Option<i64>,
    ) -> Result<Link, AppError> {
        validate_url(&destination_url).map_err(|e| {
            AppError::bad_request("Invalid URL", json!({ "reason": e.to_string() }))
        })?;
        validate_custom_code(&custom_code)?;

        if self.link_repository.exists_code(&custom_code).await? {
            return Err(AppError::conflict(
                "code already exists",
                json!({ "code": custom_code }),
            ));
        }

        self.link_repository
            .insert(NewLink {
                destination_url,
                code: custom_code,
                owner_id,
            })
            .await
    }

    /// Returns true if `code` collides with no existing auto or active code.
    ///
    /// Read-only; a positive answer is advisory and may be stale by the time
    /// the caller allocates.
    pub async fn check_availability(&self, code: &str) -> Result<bool, AppError> {
        Ok(!self.link_repository.exists_code(code).await?)
    }

    /// Resolves an active code to its link, counting the click.
    ///
    /// The click increment is enqueued for the background worker: exactly one
    /// event per successful resolution, and a full queue or worker failure
    /// never delays or fails the redirect.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has `code` as its active code.
    pub async fn resolve(&self, code: &str) -> Result<Link, AppError> {
        let link = self.get_by_active_code(code).await?;

        if self.click_tx.try_send(ClickEvent::new(link.id)).is_err() {
            tracing::warn!(link_id = link.id, "click queue full, dropping click");
        }

        Ok(link)
    }

    /// Looks up a link by active code without counting a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if absent.
    pub async fn get_by_active_code(&self, code: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_active_code(code)
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "code": code })))
    }

    /// Fetches a link for editing, enforcing ownership.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if absent and [`AppError::Forbidden`]
    /// if `requester` does not own the link.
    pub async fn get_owned(&self, link_id: i64, requester: Option<i64>) -> Result<Link, AppError> {
        let link = self
            .link_repository
            .find_by_id(link_id)
            .await?
            .ok_or_else(|| AppError::not_found("Link not found", json!({ "id": link_id })))?;

        if !link.is_owned_by(requester) {
            return Err(AppError::forbidden(
                "You do not own this link",
                json!({ "id": link_id }),
            ));
        }

        Ok(link)
    }

    /// Lists all links owned by an account, newest first.
    pub async fn list_for_owner(&self, owner_id: i64) -> Result<Vec<Link>, AppError> {
        self.link_repository.list_by_owner(owner_id).await
    }

    /// Renames a link's active code.
    ///
    /// Only the owner may rename; anonymous links cannot be renamed. Renaming
    /// to the link's own current active code or its permanent auto code is an
    /// idempotent no-op. The auto code itself is never changed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for an unknown id, [`AppError::Forbidden`]
    /// for a non-owner, [`AppError::Validation`] for a malformed code, and
    /// [`AppError::Conflict`] if the code is taken by another link.
    pub async fn rename(
        &self,
        link_id: i64,
        requester: Option<i64>,
        new_code: &str,
    ) -> Result<(), AppError> {
        let link = self.get_owned(link_id, requester).await?;

        validate_custom_code(new_code)?;

        if link.has_code(new_code) {
            return Ok(());
        }

        self.link_repository
            .rename_active_code(link_id, new_code)
            .await
    }
}
