// src/page/http.rs
// =============================================================================
// This module fetches pages over HTTP.
//
// Key functionality:
// - One GET request per URL, no retries
// - Fixed timeout (10 seconds by default)
// - Browser-like headers, so trivial bot filters don't turn us away
// - 200-399 is success; redirects are followed by reqwest itself
// - Every failure becomes a typed FetchError that carries the URL
// - A successful fetch reports where the body really came from, since a
//   redirect (/docs -> /docs/, http -> https) changes how its links resolve
//
// The Fetcher trait is the seam between the crawl loop and the network.
// The crawler only ever talks to `dyn Fetcher`-like generics, so tests can
// hand it an in-memory site instead of a real one.
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::Client;
use thiserror::Error;

use super::url::PageUrl;

/// The User-Agent of a common desktop browser.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

// Why a fetch failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FailureKind {
    #[error("request timed out")]
    Timeout,
    #[error("HTTP {0}")]
    HttpStatus(u16),
    #[error("too many redirects")]
    TooManyRedirects,
    #[error("network error: {0}")]
    Network(String),
    #[error("could not read response body: {0}")]
    Body(String),
}

/// A failed fetch. The crawler logs it and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to fetch {url}: {kind}")]
pub struct FetchError {
    pub url: String,
    pub kind: FailureKind,
}

impl FetchError {
    pub fn new(url: &PageUrl, kind: FailureKind) -> Self {
        Self {
            url: url.to_string(),
            kind,
        }
    }
}

/// Knobs for [`HttpFetcher`].
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub timeout: Duration,
    pub redirect_limit: usize,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            redirect_limit: 10,
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}

/// A page body and the URL it was served from after redirects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub final_url: PageUrl,
    pub html: String,
}

/// Anything that can turn a URL into an HTML body.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &PageUrl) -> Result<FetchedPage, FetchError>;
}

/// The real fetcher, backed by a single reqwest client.
///
/// Reusing one client keeps connections alive between pages on the same
/// host.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = Client::builder()
            .timeout(settings.timeout)
            .redirect(reqwest::redirect::Policy::limited(settings.redirect_limit))
            .user_agent(settings.user_agent)
            .default_headers(headers)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &PageUrl) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url.as_url().clone())
            .send()
            .await
            .map_err(|e| FetchError::new(url, categorize_error(&e)))?;

        // 2xx, plus any 3xx that reqwest handed back without following
        let status = response.status();
        if !(status.is_success() || status.is_redirection()) {
            return Err(FetchError::new(url, FailureKind::HttpStatus(status.as_u16())));
        }

        // reqwest only follows http(s) redirects, so this parse can only
        // fail on something exotic; fall back to the requested URL then
        let final_url = PageUrl::parse(response.url().as_str()).unwrap_or_else(|_| url.clone());

        let html = response.text().await.map_err(|e| {
            let kind = if e.is_timeout() {
                FailureKind::Timeout
            } else {
                FailureKind::Body(e.to_string())
            };
            FetchError::new(url, kind)
        })?;

        Ok(FetchedPage { final_url, html })
    }
}

// Maps reqwest's error into our smaller set of failure kinds
fn categorize_error(error: &reqwest::Error) -> FailureKind {
    if error.is_timeout() {
        FailureKind::Timeout
    } else if error.is_redirect() {
        FailureKind::TooManyRedirects
    } else {
        FailureKind::Network(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn page(server: &MockServer, p: &str) -> PageUrl {
        PageUrl::parse(&format!("{}{}", server.uri(), p)).unwrap()
    }

    fn fetcher() -> HttpFetcher {
        HttpFetcher::new(FetchSettings::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doc"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
            .mount(&server)
            .await;

        let doc = page(&server, "/doc");
        let fetched = fetcher().fetch(&doc).await.unwrap();
        assert_eq!(fetched.html, "<html>ok</html>");
        assert_eq!(fetched.final_url, doc);
    }

    #[tokio::test]
    async fn test_fetch_sends_browser_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/headers"))
            .respond_with(ResponseTemplate::new(200).set_body_string("hello"))
            .mount(&server)
            .await;

        fetcher().fetch(&page(&server, "/headers")).await.unwrap();

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let user_agent = requests[0].headers.get("user-agent").unwrap();
        assert_eq!(user_agent.to_str().unwrap(), BROWSER_USER_AGENT);
        assert!(requests[0].headers.get("accept").is_some());
    }

    #[tokio::test]
    async fn test_fetch_follows_redirects() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/old"))
            .respond_with(ResponseTemplate::new(301).insert_header("Location", "/new"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/new"))
            .respond_with(ResponseTemplate::new(200).set_body_string("moved here"))
            .mount(&server)
            .await;

        let fetched = fetcher().fetch(&page(&server, "/old")).await.unwrap();
        assert_eq!(fetched.html, "moved here");
        assert_eq!(fetched.final_url, page(&server, "/new"));
    }

    #[tokio::test]
    async fn test_fetch_fails_on_client_and_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/broken"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let missing = page(&server, "/missing");
        let err = fetcher().fetch(&missing).await.unwrap_err();
        assert_eq!(err.kind, FailureKind::HttpStatus(404));
        assert_eq!(err.url, missing.to_string());

        let err = fetcher().fetch(&page(&server, "/broken")).await.unwrap_err();
        assert_eq!(err.kind, FailureKind::HttpStatus(500));
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_delay(Duration::from_millis(500))
                    .set_body_string("slow"),
            )
            .mount(&server)
            .await;

        let fetcher = HttpFetcher::new(FetchSettings {
            timeout: Duration::from_millis(50),
            ..FetchSettings::default()
        })
        .unwrap();

        let err = fetcher.fetch(&page(&server, "/slow")).await.unwrap_err();
        assert_eq!(err.kind, FailureKind::Timeout);
    }

    #[tokio::test]
    async fn test_fetch_connection_refused_is_network_error() {
        // Port 9 (discard) on localhost is about as closed as it gets
        let url = PageUrl::parse("http://127.0.0.1:9/").unwrap();
        let err = fetcher().fetch(&url).await.unwrap_err();
        assert!(matches!(err.kind, FailureKind::Network(_) | FailureKind::Timeout));
    }

    #[test]
    fn test_fetch_error_message_names_url() {
        let url = PageUrl::parse("https://example.com/x").unwrap();
        let err = FetchError::new(&url, FailureKind::HttpStatus(503));
        assert_eq!(err.to_string(), "failed to fetch https://example.com/x: HTTP 503");
    }
}
