use crate::error::{DirectoryError, Result};
use scraper::Html;

use super::selector;

/// Reads the address out of the reveal endpoint's response, which is a bare
/// fragment holding one `mailto:` anchor.
pub fn parse_revealed_email(html: &str) -> Result<String> {
    let fragment = Html::parse_fragment(html);

    let email = fragment
        .select(&selector("a")?)
        .next()
        .ok_or(DirectoryError::EmailUnresolved)?
        .text()
        .collect::<String>();

    let email = email.trim();
    if email.is_empty() {
        return Err(DirectoryError::EmailUnresolved);
    }

    Ok(email.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_text_is_the_email() {
        let html = r#"<a href="mailto:jdoe@example.edu">jdoe@example.edu</a>"#;
        assert_eq!(parse_revealed_email(html).unwrap(), "jdoe@example.edu");
    }

    #[test]
    fn surrounding_whitespace_is_dropped() {
        let html = "<span>\n  <a href=\"mailto:x@example.edu\"> x@example.edu </a>\n</span>";
        assert_eq!(parse_revealed_email(html).unwrap(), "x@example.edu");
    }

    #[test]
    fn missing_anchor_is_unresolved() {
        assert!(matches!(
            parse_revealed_email(""),
            Err(DirectoryError::EmailUnresolved)
        ));
        assert!(matches!(
            parse_revealed_email("<p>Session expired</p>"),
            Err(DirectoryError::EmailUnresolved)
        ));
    }

    #[test]
    fn empty_anchor_is_unresolved() {
        assert!(matches!(
            parse_revealed_email("<a href=\"mailto:\"></a>"),
            Err(DirectoryError::EmailUnresolved)
        ));
    }
}
