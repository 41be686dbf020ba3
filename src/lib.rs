//! In-memory Book Catalog
//!
//! Book records are held in an ordered collection, most recently added first.

pub mod domain;
pub use domain::{Book, BookCollection, BookId, CatalogError, ColorChoice, Config, ConfigError};
