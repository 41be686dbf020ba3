//! Domain models for the book catalog.
//!
//! This module contains the book record, the collection that owns records,
//! and the configuration used by the menu.

/// Book record and identifier types.
pub mod book;
pub use book::{Book, BookId};

/// The ordered record container.
pub mod collection;
pub use collection::{BookCollection, CatalogError};

mod config;
pub use config::{ColorChoice, Config, ConfigError};
