//! Application services orchestrating domain operations.

pub mod account_service;
pub mod registry_service;

pub use account_service::AccountService;
pub use registry_service::RegistryService;
