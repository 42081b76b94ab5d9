//! API layer: JSON endpoint, redirect, health, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
