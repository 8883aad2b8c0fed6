//! # Status Check Persistence
//!
//! Stores the client pings recorded through `/api/status`. This is the only
//! mutable state in the service; the valuation reports never touch it.
//!
//! ## Architectural Principles
//!
//! - **Layer 3 Adapter:** The web server only sees the `StatusCheckStore` trait.
//!   PostgreSQL (`PgStatusCheckStore`) is used when `DATABASE_URL` is configured and an
//!   in-process store (`InMemoryStatusCheckStore`) otherwise.
//! - **Asynchronous & Pooled:** All operations are asynchronous, and the
//!   PostgreSQL store uses a connection pool (`PgPool`).
//!
//! ## Public API
//!
//! - `connect` / `run_migrations`: open the pool and create the `status_checks` table.
//! - `StatusCheck`, `StatusCheckCreate`: the stored record and its request body.
//! - `DbError`: the specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod memory;
pub mod repository;
pub mod store;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use memory::InMemoryStatusCheckStore;
pub use repository::PgStatusCheckStore;
pub use store::{STATUS_LIST_LIMIT, StatusCheck, StatusCheckCreate, StatusCheckStore};
