use crate::config::DirectoryConfig;
use crate::error::{DirectoryError, Result};
use crate::models::{DirectoryRecord, LookupOutcome, Query, RevealId, SearchKind, SessionToken};
use crate::parsers;
use crate::parsers::record::SearchPage;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue, USER_AGENT};
use tracing::{debug, info};

/// Body of a directory search plus the cookies the server set while answering it.
#[derive(Debug)]
pub struct SearchResponse {
    pub body: String,
    pub session: SessionToken,
}

pub struct DirectoryClient {
    client: reqwest::Client,
    config: DirectoryConfig,
}

impl DirectoryClient {
    pub fn new() -> Result<Self> {
        Self::with_config(DirectoryConfig::default())
    }

    pub fn with_config(config: DirectoryConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| DirectoryError::Config(format!("invalid user agent: {}", e)))?,
        );

        // No cookie store on the client: each lookup carries its own cookies in
        // a SessionToken so nothing leaks from one query into the next.
        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    /// Runs one directory search and hands back the raw page with its session.
    pub async fn search(&self, query: &Query) -> Result<SearchResponse> {
        debug!(kind = %query.kind(), search = query.text(), "querying directory");

        let response = self
            .client
            .get(&self.config.directory_url)
            .query(&[("dirType", query.kind().as_wire_str()), ("dirSearch", query.text())])
            .send()
            .await?
            .error_for_status()?;

        let session = SessionToken::from_response(&response);
        let body = response.text().await?;

        Ok(SearchResponse { body, session })
    }

    /// Asks the reveal endpoint for the address behind `id`.
    ///
    /// `session` must be the token from the search whose page produced `id`;
    /// the endpoint returns an empty fragment for any other session.
    pub async fn reveal_email(&self, id: &RevealId, session: &SessionToken) -> Result<String> {
        debug!(reveal_id = id.as_str(), cookies = !session.is_empty(), "revealing email");

        let mut request = self
            .client
            .get(&self.config.reveal_url)
            .query(&[("f", id.as_str())]);

        if let Some(cookies) = session.cookie_header() {
            let value = HeaderValue::from_str(&cookies)
                .map_err(|e| DirectoryError::ParsingError(format!("unusable session cookie: {}", e)))?;
            request = request.header(COOKIE, value);
        }

        let response = request.send().await?.error_for_status()?;
        let html_content = response.text().await?;
        parsers::reveal::parse_revealed_email(&html_content)
    }

    /// Looks a person up and assembles their record.
    ///
    /// A missing reveal anchor fails the whole lookup with `EmailUnresolved`.
    pub async fn lookup(&self, kind: SearchKind, text: &str) -> Result<LookupOutcome> {
        let query = Query::new(kind, text)?;
        self.lookup_query(&query).await
    }

    pub async fn lookup_query(&self, query: &Query) -> Result<LookupOutcome> {
        // --- STEP 1: Directory search ---
        let SearchResponse { body, session } = self.search(query).await?;

        // --- STEP 2: Parse the listing ---
        let listing = match parsers::record::parse_search_page(&body)? {
            SearchPage::NotFound => {
                info!(kind = %query.kind(), search = query.text(), "no directory match");
                return Ok(LookupOutcome::NotFound);
            }
            SearchPage::Found(listing) => listing,
        };

        // --- STEP 3: Resolve the hidden email with the same session ---
        let email = match (&listing.reveal_id, self.config.resolve_email) {
            (Some(id), true) => Some(self.reveal_email(id, &session).await?),
            _ => None,
        };

        info!(kind = %query.kind(), search = query.text(), name = %listing.name, "directory match");

        Ok(LookupOutcome::Found(DirectoryRecord {
            name: listing.name,
            email,
            classification: listing.classification,
            major: listing.major,
            school: listing.school,
        }))
    }

    /// Same as `lookup(SearchKind::Email, email)`.
    pub async fn find_by_email(&self, email: &str) -> Result<LookupOutcome> {
        self.lookup(SearchKind::Email, email).await
    }
}
