//! Web middleware.

pub mod web_auth;
