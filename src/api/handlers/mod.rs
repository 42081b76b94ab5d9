//! HTTP handlers for the JSON API and redirect.

pub mod health;
pub mod redirect;
pub mod shorten;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::api_handler;
