//! HTML page handlers.

pub mod dashboard;
pub mod index;
pub mod login;
pub mod register;
pub mod update;

pub use dashboard::dashboard_handler;
pub use index::{index_page, shorten_handler};
pub use login::{login_handler, login_page, logout_handler};
pub use register::{register_handler, register_page};
pub use update::{edit_link_handler, rename_handler};
