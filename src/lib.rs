// Declare all our modules
mod client;
mod config;
mod error;
mod models;
pub mod parsers;

// Publicly export the parts of our library that users will need
pub use client::{DirectoryClient, SearchResponse};
pub use config::{DEFAULT_DIRECTORY_URL, DEFAULT_REVEAL_URL, DirectoryConfig};
pub use error::{DirectoryError, Result};
pub use models::*;
