//! Core business entities.

pub mod account;
pub mod link;

pub use account::{Account, NewAccount};
pub use link::{Link, NewLink};
