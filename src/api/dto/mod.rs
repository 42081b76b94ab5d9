//! API request/response DTOs.

pub mod health;
pub mod shorten;
