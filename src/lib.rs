//! Personal content organizer library
//!
//! This library provides the client-side content store: groups of
//! heterogeneous content items (notes, links, images, todo lists), JSON
//! persistence with back-fill migration, access statistics, and the derived
//! view computation every screen consumes.

mod cli;
mod config;
mod errors;
mod gateway;
mod helper;
mod migrate;
mod storage;
mod store;
mod types;
mod view;

// Re-export key components
pub use cli::*;
pub use config::*;
pub use errors::*;
pub use gateway::*;
pub use helper::*;
pub use storage::*;
pub use store::*;
pub use types::*;
pub use view::*;

pub use migrate::{migrate_raw, migrate_value};
