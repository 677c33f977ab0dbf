#![allow(dead_code)]

use utd_directory::{DirectoryClient, DirectoryConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const SEARCH_PATH: &str = "/directory/includes/directories.class.php";
pub const REVEAL_PATH: &str = "/directory/includes/email.php";

pub const FOUND_PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<div id="dirResults">
<h5 class="fullname firstEntry">Jane Doe</h5>
<p><span class="keepHeight">Student</span>Junior, Computer Science<br>Erik Jonsson School of Engineering and Computer Science</p>
<a href="javascript:void(0)" class="showEmail" id="abc123">Click to show email</a>
</div>
</body></html>"#;

pub const NOT_FOUND_PAGE: &str = r#"<!DOCTYPE html>
<html><body>
<div class="alert alert-danger">No results were found for your search.</div>
</body></html>"#;

pub const REVEAL_FRAGMENT: &str = r#"<a href="mailto:jdoe@example.edu">jdoe@example.edu</a>"#;

/// Found page with the reveal link removed.
pub fn found_page_without_reveal() -> String {
    FOUND_PAGE.replace(
        r#"<a href="javascript:void(0)" class="showEmail" id="abc123">Click to show email</a>"#,
        "",
    )
}

pub fn config_for(server: &MockServer) -> DirectoryConfig {
    DirectoryConfig {
        directory_url: format!("{}{}", server.uri(), SEARCH_PATH),
        reveal_url: format!("{}{}", server.uri(), REVEAL_PATH),
        ..Default::default()
    }
}

pub fn client_for(server: &MockServer) -> DirectoryClient {
    DirectoryClient::with_config(config_for(server)).unwrap()
}

pub fn html(body: impl Into<String>) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "text/html; charset=UTF-8")
        .set_body_string(body.into())
}

/// Reveal responses for requests that did not match a more specific mock:
/// the real endpoint answers an unknown session with an empty body.
pub async fn mount_reveal_fallback(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(REVEAL_PATH))
        .respond_with(html(""))
        .with_priority(10)
        .mount(server)
        .await;
}
