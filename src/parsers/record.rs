use crate::error::{DirectoryError, Result};
use crate::models::RevealId;
use scraper::{ElementRef, Html};

use super::selector;

/// Alert box the directory renders when nobody matched.
const NO_RESULTS: &str = "div.alert";
const FULL_NAME: &str = "h5.fullname.firstEntry";
/// Label span; the text node right after it reads "<classification>, <major>".
const CLASSIFICATION_ANCHOR: &str = "span.keepHeight";
/// Link the reveal script binds to, keyed by its `id`.
const EMAIL_REVEAL: &str = ".showEmail[id]";

/// How many sibling hops separate the classification anchor from the school
/// text: the classification/major text, a `<br>`, then the school text.
const SCHOOL_SIBLING_OFFSET: usize = 3;

/// Fields pulled off a results page before the email has been resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub name: String,
    pub classification: String,
    pub major: String,
    pub school: String,
    pub reveal_id: Option<RevealId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchPage {
    NotFound,
    Found(Listing),
}

/// Parses a directory results page.
///
/// A page carrying the no-results alert is `NotFound` and nothing else on it
/// is looked at. Otherwise every field must be where the layout puts it.
pub fn parse_search_page(html: &str) -> Result<SearchPage> {
    let document = Html::parse_document(html);

    if document.select(&selector(NO_RESULTS)?).next().is_some() {
        return Ok(SearchPage::NotFound);
    }

    let name = document
        .select(&selector(FULL_NAME)?)
        .next()
        .ok_or_else(|| layout("full name heading"))?
        .text()
        .collect::<String>();

    let anchor = document
        .select(&selector(CLASSIFICATION_ANCHOR)?)
        .next()
        .ok_or_else(|| layout("classification label"))?;

    let combined = sibling_text(anchor, 1).ok_or_else(|| layout("classification text"))?;
    let (classification, major) = split_classification(combined)?;
    let school = school_text(anchor)?;

    let reveal_id = match document.select(&selector(EMAIL_REVEAL)?).next() {
        Some(link) => {
            let id = link.value().attr("id").unwrap_or_default();
            if id.is_empty() {
                return Err(layout("email reveal id"));
            }
            Some(RevealId::new(id))
        }
        None => None,
    };

    Ok(SearchPage::Found(Listing {
        name,
        classification,
        major,
        school,
        reveal_id,
    }))
}

/// Splits "Junior, Computer Science" on the first comma. The major keeps any
/// later commas ("Arts, Technology, and Emerging Communication").
pub fn split_classification(text: &str) -> Result<(String, String)> {
    let (classification, major) = text
        .split_once(',')
        .ok_or_else(|| layout(&format!("no comma in classification text {:?}", text)))?;
    Ok((classification.to_string(), major.trim().to_string()))
}

/// The school is not wrapped in any element of its own. It is the text node
/// exactly `SCHOOL_SIBLING_OFFSET` siblings after the classification label, so
/// any change to the markup between them lands here.
fn school_text(anchor: ElementRef<'_>) -> Result<String> {
    sibling_text(anchor, SCHOOL_SIBLING_OFFSET)
        .map(str::to_string)
        .ok_or_else(|| layout("school text"))
}

/// Text of the node `hops` siblings after `from`, if that node is text.
fn sibling_text(from: ElementRef<'_>, hops: usize) -> Option<&str> {
    let mut node = *from;
    for _ in 0..hops {
        node = node.next_sibling()?;
    }
    node.value().as_text().map(|t| &**t)
}

fn layout(what: &str) -> DirectoryError {
    tracing::warn!("directory page layout mismatch: {}", what);
    DirectoryError::UnexpectedLayout(what.to_string())
}
