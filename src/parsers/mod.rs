pub mod record;
pub mod reveal;

use crate::error::{DirectoryError, Result};
use scraper::Selector;

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| DirectoryError::ParsingError(format!("bad selector '{}': {}", css, e)))
}
