use crate::error::{DirectoryError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which directory field a search string is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKind {
    Email,
    DisplayName,
    TelephoneNumber,
}

impl SearchKind {
    pub const ALL: [SearchKind; 3] = [
        SearchKind::Email,
        SearchKind::DisplayName,
        SearchKind::TelephoneNumber,
    ];

    /// The value sent as the `dirType` request parameter.
    pub fn as_wire_str(self) -> &'static str {
        match self {
            SearchKind::Email => "email",
            SearchKind::DisplayName => "displayname",
            SearchKind::TelephoneNumber => "telephonenumber",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire_str())
    }
}

impl FromStr for SearchKind {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self> {
        SearchKind::ALL
            .into_iter()
            .find(|kind| kind.as_wire_str() == s)
            .ok_or_else(|| DirectoryError::InvalidSearchKind(s.to_string()))
    }
}

/// A single directory lookup: what to search for and which field to match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    kind: SearchKind,
    text: String,
}

impl Query {
    /// Builds a query. The text is passed to the server untouched; only blank
    /// strings are rejected here.
    pub fn new(kind: SearchKind, text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(DirectoryError::EmptyQuery);
        }
        Ok(Self { kind, text })
    }

    pub fn kind(&self) -> SearchKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A person as listed in the directory.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DirectoryRecord {
    /// Full name exactly as shown in the listing heading.
    pub name: String,
    /// Resolved address, `None` when the listing has no reveal link or
    /// resolution was turned off.
    pub email: Option<String>,
    /// e.g. "Junior", "Staff".
    pub classification: String,
    /// e.g. "Computer Science".
    pub major: String,
    pub school: String,
}

/// Result of a lookup that reached the directory and got a readable page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "record", rename_all = "snake_case")]
pub enum LookupOutcome {
    Found(DirectoryRecord),
    NotFound,
}

impl LookupOutcome {
    pub fn into_record(self) -> Option<DirectoryRecord> {
        match self {
            LookupOutcome::Found(record) => Some(record),
            LookupOutcome::NotFound => None,
        }
    }
}

/// Opaque identifier the results page attaches to its email reveal link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealId(String);

impl RevealId {
    pub(crate) fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Cookies set by the directory search response.
///
/// The reveal endpoint only answers with an address when it sees the cookies
/// from the search that produced the reveal id. A token is created from one
/// search response and is deliberately not `Clone`.
#[derive(Debug, PartialEq, Eq)]
pub struct SessionToken {
    cookies: Vec<(String, String)>,
}

impl SessionToken {
    pub(crate) fn from_pairs(cookies: Vec<(String, String)>) -> Self {
        Self { cookies }
    }

    pub(crate) fn from_response(response: &reqwest::Response) -> Self {
        Self::from_pairs(
            response
                .cookies()
                .map(|c| (c.name().to_string(), c.value().to_string()))
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Value of a single cookie, if the server set it.
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Renders the token as a `Cookie` request header value.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_kinds_map_to_wire_strings() {
        assert_eq!(SearchKind::Email.as_wire_str(), "email");
        assert_eq!(SearchKind::DisplayName.as_wire_str(), "displayname");
        assert_eq!(SearchKind::TelephoneNumber.as_wire_str(), "telephonenumber");
    }

    #[test]
    fn wire_strings_parse_back_to_their_kind() {
        for kind in SearchKind::ALL {
            assert_eq!(kind.as_wire_str().parse::<SearchKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kinds_are_rejected() {
        for bad in ["", "Email", "name", "phone", "display_name", " email"] {
            let err = bad.parse::<SearchKind>().unwrap_err();
            assert!(matches!(err, DirectoryError::InvalidSearchKind(ref s) if s == bad));
        }
    }

    #[test]
    fn search_kind_serializes_as_wire_string() {
        let json = serde_json::to_string(&SearchKind::TelephoneNumber).unwrap();
        assert_eq!(json, "\"telephonenumber\"");
    }

    #[test]
    fn blank_query_is_rejected() {
        assert!(matches!(
            Query::new(SearchKind::Email, "   "),
            Err(DirectoryError::EmptyQuery)
        ));
        assert!(matches!(
            Query::new(SearchKind::Email, ""),
            Err(DirectoryError::EmptyQuery)
        ));
    }

    #[test]
    fn query_text_is_not_normalized() {
        let query = Query::new(SearchKind::DisplayName, " Jane Doe ").unwrap();
        assert_eq!(query.text(), " Jane Doe ");
        assert_eq!(query.kind(), SearchKind::DisplayName);
    }

    #[test]
    fn session_token_renders_cookie_header() {
        let token = SessionToken::from_pairs(vec![
            ("PHPSESSID".to_string(), "abc".to_string()),
            ("lb".to_string(), "node2".to_string()),
        ]);
        assert_eq!(token.cookie_header().as_deref(), Some("PHPSESSID=abc; lb=node2"));
        assert_eq!(token.cookie("lb"), Some("node2"));
        assert!(SessionToken::from_pairs(Vec::new()).cookie_header().is_none());
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(LookupOutcome::NotFound).unwrap();
        assert_eq!(json["status"], "not_found");
    }
}
