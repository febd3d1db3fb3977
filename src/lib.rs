//! items-server: HTTP CRUD service for DevOps items
//!
//! Exposes a small JSON API over a SQLite-backed item store:
//! list, create, update, and delete, plus two static greeting routes.

pub mod db;
pub mod error;
pub mod extract;
pub mod models;
pub mod routes;
pub mod server;

pub use db::Database;
pub use error::{ServerError, ServerResult};
pub use server::{create_router, run_server, ServerArgs};
