//! Web layer: server-rendered HTML pages and session middleware.

pub mod handlers;
pub mod middleware;
