//! Account registration, login, and session tokens.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::{Account, NewAccount};
use crate::domain::repositories::AccountRepository;
use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Length in bytes of the per-account password salt.
const SALT_LENGTH: usize = 16;

/// Service for user accounts and browser sessions.
///
/// Passwords are hashed with HMAC-SHA256 keyed by the server secret over a
/// per-account random salt, stored as `hex(salt)$hex(mac)`. Session tokens are
/// the account id signed with the same secret, so a database leak alone lets
/// an attacker neither verify passwords nor forge sessions.
pub struct AccountService<R: AccountRepository> {
    repository: Arc<R>,
    secret: String,
}

impl<R: AccountRepository> AccountService<R> {
    /// Creates a new account service.
    ///
    /// `secret` must stay stable across restarts or existing password hashes
    /// and sessions become unverifiable.
    pub fn new(repository: Arc<R>, secret: String) -> Self {
        Self { repository, secret }
    }

    fn mac(&self, data: &[u8]) -> HmacSha256 {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(data);
        mac
    }

    fn hash_password(&self, password: &str) -> String {
        let mut salt = [0u8; SALT_LENGTH];
        getrandom::fill(&mut salt).expect("Failed to generate random salt");

        let mut mac = self.mac(&salt);
        mac.update(password.as_bytes());

        format!(
            "{}${}",
            hex::encode(salt),
            hex::encode(mac.finalize().into_bytes())
        )
    }

    fn verify_password(&self, password: &str, stored: &str) -> bool {
        let Some((salt_hex, mac_hex)) = stored.split_once('$') else {
            return false;
        };
        let (Ok(salt), Ok(expected)) = (hex::decode(salt_hex), hex::decode(mac_hex)) else {
            return false;
        };

        let mut mac = self.mac(&salt);
        mac.update(password.as_bytes());
        mac.verify_slice(&expected).is_ok()
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the email is already registered.
    pub async fn register(&self, email: String, password: String) -> Result<Account, AppError> {
        if self.repository.find_by_email(&email).await?.is_some() {
            return Err(AppError::conflict(
                "user already registered",
                json!({ "email": email }),
            ));
        }

        let password_hash = self.hash_password(&password);

        self.repository
            .create(NewAccount {
                email,
                password_hash,
            })
            .await
    }

    /// Authenticates by email and password.
    ///
    /// Unknown email and wrong password produce the same error so the login
    /// form does not leak which emails are registered.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on bad credentials.
    pub async fn login(&self, email: &str, password: &str) -> Result<Account, AppError> {
        let account = self.repository.find_by_email(email).await?.ok_or_else(|| {
            AppError::unauthorized("wrong email or password", json!({}))
        })?;

        if !self.verify_password(password, &account.password_hash) {
            return Err(AppError::unauthorized("wrong email or password", json!({})));
        }

        Ok(account)
    }

    /// Issues a signed session token for an account.
    ///
    /// Format: `{id}.{hex MAC}`.
    pub fn session_token(&self, account_id: i64) -> String {
        let mac = self.mac(format!("session:{account_id}").as_bytes());
        format!("{}.{}", account_id, hex::encode(mac.finalize().into_bytes()))
    }

    /// Verifies a session token, returning the account id when valid.
    pub fn verify_session(&self, token: &str) -> Option<i64> {
        let (id_part, sig_hex) = token.split_once('.')?;
        let account_id: i64 = id_part.parse().ok()?;
        let signature = hex::decode(sig_hex).ok()?;

        let mac = self.mac(format!("session:{account_id}").as_bytes());
        mac.verify_slice(&signature).ok()?;

        Some(account_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockAccountRepository;
    use chrono::Utc;

    fn test_service(mock_repo: MockAccountRepository) -> AccountService<MockAccountRepository> {
        AccountService::new(Arc::new(mock_repo), "test-secret".to_string())
    }

    fn test_account(id: i64, email: &str, password_hash: &str) -> Account {
        Account {
            id,
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password() {
        let mut mock_repo = MockAccountRepository::new();

        mock_repo
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_create()
            .withf(|new_account| {
                new_account.email == "a@example.com"
                    && new_account.password_hash != "hunter22"
                    && new_account.password_hash.contains('$')
            })
            .times(1)
            .returning(|new_account| Ok(test_account(1, &new_account.email, &new_account.password_hash)));

        let service = test_service(mock_repo);
        let account = service
            .register("a@example.com".to_string(), "hunter22".to_string())
            .await
            .unwrap();

        assert_eq!(account.email, "a@example.com");
    }

    #[tokio::test]
    async fn test_register_duplicate_email_conflicts() {
        let mut mock_repo = MockAccountRepository::new();

        mock_repo
            .expect_find_by_email()
            .times(1)
            .returning(|email| Ok(Some(test_account(1, email, "x$y"))));
        mock_repo.expect_create().times(0);

        let service = test_service(mock_repo);
        let result = service
            .register("a@example.com".to_string(), "hunter22".to_string())
            .await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_login_roundtrip() {
        let mock_repo = MockAccountRepository::new();
        let service = test_service(mock_repo);

        let hash = service.hash_password("hunter22");

        let mut mock_repo = MockAccountRepository::new();
        let stored = hash.clone();
        mock_repo
            .expect_find_by_email()
            .returning(move |email| Ok(Some(test_account(3, email, &stored))));

        let service = test_service(mock_repo);

        let account = service.login("a@example.com", "hunter22").await.unwrap();
        assert_eq!(account.id, 3);

        let result = service.login("a@example.com", "wrong").await;
        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_login_unknown_email_unauthorized() {
        let mut mock_repo = MockAccountRepository::new();
        mock_repo.expect_find_by_email().returning(|_| Ok(None));

        let service = test_service(mock_repo);
        let result = service.login("nobody@example.com", "pw").await;

        assert!(matches!(result.unwrap_err(), AppError::Unauthorized { .. }));
    }

    #[test]
    fn test_password_hashes_are_salted() {
        let service = test_service(MockAccountRepository::new());

        let first = service.hash_password("same-password");
        let second = service.hash_password("same-password");

        assert_ne!(first, second);
        assert!(service.verify_password("same-password", &first));
        assert!(service.verify_password("same-password", &second));
    }

    #[test]
    fn test_verify_password_rejects_garbage_hash() {
        let service = test_service(MockAccountRepository::new());

        assert!(!service.verify_password("pw", "no-dollar-sign"));
        assert!(!service.verify_password("pw", "nothex$nothex"));
    }

    #[test]
    fn test_session_token_roundtrip() {
        let service = test_service(MockAccountRepository::new());

        let token = service.session_token(42);
        assert_eq!(service.verify_session(&token), Some(42));
    }

    #[test]
    fn test_tampered_session_rejected() {
        let service = test_service(MockAccountRepository::new());

        let token = service.session_token(42);
        let forged = token.replacen("42", "43", 1);

        assert_eq!(service.verify_session(&forged), None);
        assert_eq!(service.verify_session("junk"), None);
        assert_eq!(service.verify_session("1.deadbeef"), None);
    }

    #[test]
    fn test_session_secret_matters() {
        let service = test_service(MockAccountRepository::new());
        let other = AccountService::new(
            Arc::new(MockAccountRepository::new()),
            "other-secret".to_string(),
        );

        let token = service.session_token(42);
        assert_eq!(other.verify_session(&token), None);
    }
}
