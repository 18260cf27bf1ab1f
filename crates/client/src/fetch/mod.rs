//! HTTP fetchers for the dictionary site.
//!
//! ### Fetchers
//! - **word page**: 404 is a confirmed absence, any other error status fails.
//!   Refused connections surface as `Error::ConnectionFailed`.
//! - **search page**: the body is returned whatever the status.
//! - **autocomplete**: a non-success status is treated as "no suggestions".
//! - **home page**: fetched uncached for the word of the day.
//!
//! Requests are issued one at a time; there are no retries.

pub mod url;

use std::time::Duration;

use async_trait::async_trait;
use duden_core::{AppConfig, Error, FetchOutcome};
use reqwest::{Client, StatusCode, Url};

pub use self::url::{Endpoints, UrlError, canonicalize_base};

/// Source of raw dictionary responses.
///
/// Implemented by [`FetchClient`] over HTTP. Each method performs a single
/// live request; caching is layered on top by the caller.
#[async_trait]
pub trait DictionarySource: Send + Sync {
    /// Entry page markup for `word`.
    async fn word_page(&self, word: &str) -> FetchOutcome;

    /// Search result page markup for `term`.
    async fn search_page(&self, term: &str) -> FetchOutcome;

    /// Autocomplete JSON for `term`.
    async fn autocomplete(&self, term: &str) -> FetchOutcome;

    /// Home page markup.
    async fn home_page(&self) -> FetchOutcome;
}

/// Configuration for the fetch client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Base URL of the dictionary site (default: "https://www.duden.de")
    pub base_url: String,

    /// User agent string (default: "duden/0.1")
    pub user_agent: String,

    /// Request timeout (default: none)
    pub timeout: Option<Duration>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { base_url: "https://www.duden.de".to_string(), user_agent: "duden/0.1".to_string(), timeout: None }
    }
}

impl From<&AppConfig> for FetchConfig {
    fn from(config: &AppConfig) -> Self {
        Self { base_url: config.base_url.clone(), user_agent: config.user_agent.clone(), timeout: config.timeout() }
    }
}

/// Status and body of a completed request.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// The URL requested
    pub url: Url,
    /// HTTP status code
    pub status: StatusCode,
    /// Response body decoded as text
    pub body: String,
}

/// Map a word page response: 404 is absence, other error statuses fail.
pub fn word_page_outcome(response: HttpResponse) -> FetchOutcome {
    let status = response.status;
    if status == StatusCode::NOT_FOUND {
        return FetchOutcome::Absent;
    }
    if status.is_client_error() || status.is_server_error() {
        return FetchOutcome::Failed(Error::HttpStatus { status: status.as_u16(), url: response.url.to_string() });
    }
    FetchOutcome::Present(response.body)
}

/// Map a search page response. The status is not inspected.
pub fn search_page_outcome(response: HttpResponse) -> FetchOutcome {
    FetchOutcome::Present(response.body)
}

/// Map an autocomplete response: anything but success means no suggestions.
pub fn autocomplete_outcome(response: HttpResponse) -> FetchOutcome {
    if response.status.is_success() {
        FetchOutcome::Present(response.body)
    } else {
        tracing::debug!(status = response.status.as_u16(), url = %response.url, "autocomplete unavailable");
        FetchOutcome::Absent
    }
}

/// Transport error as seen by the word page fetcher.
fn word_transport_error(err: &reqwest::Error) -> Error {
    if err.is_connect() { Error::ConnectionFailed(err.to_string()) } else { network_error(err) }
}

fn network_error(err: &reqwest::Error) -> Error {
    Error::Network(err.to_string())
}

/// HTTP client for the dictionary site.
#[derive(Debug, Clone)]
pub struct FetchClient {
    http: Client,
    endpoints: Endpoints,
}

impl FetchClient {
    /// Create a new fetch client with the given configuration.
    pub fn new(config: &FetchConfig) -> Result<Self, Error> {
        let endpoints = Endpoints::new(&config.base_url).map_err(|e| Error::InvalidUrl(e.to_string()))?;

        let mut builder = Client::builder()
            .user_agent(&config.user_agent)
            .use_rustls_tls()
            .gzip(true)
            .brotli(true)
            .deflate(true);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| Error::Client(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, endpoints })
    }

    /// Perform a GET and read the body as text.
    pub async fn get(&self, url: Url) -> Result<HttpResponse, reqwest::Error> {
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(%url, status = status.as_u16(), bytes = body.len(), "fetched");

        Ok(HttpResponse { url, status, body })
    }
}

#[async_trait]
impl DictionarySource for FetchClient {
    async fn word_page(&self, word: &str) -> FetchOutcome {
        match self.get(self.endpoints.word(word)).await {
            Ok(response) => word_page_outcome(response),
            Err(e) => FetchOutcome::Failed(word_transport_error(&e)),
        }
    }

    async fn search_page(&self, term: &str) -> FetchOutcome {
        match self.get(self.endpoints.search(term)).await {
            Ok(response) => search_page_outcome(response),
            Err(e) => FetchOutcome::Failed(network_error(&e)),
        }
    }

    async fn autocomplete(&self, term: &str) -> FetchOutcome {
        match self.get(self.endpoints.autocomplete(term)).await {
            Ok(response) => autocomplete_outcome(response),
            Err(e) => FetchOutcome::Failed(network_error(&e)),
        }
    }

    async fn home_page(&self) -> FetchOutcome {
        match self.get(self.endpoints.home()).await {
            Ok(response) => FetchOutcome::Present(response.body),
            Err(e) => FetchOutcome::Failed(network_error(&e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            url: Url::parse("https://www.duden.de/rechtschreibung/Haus").unwrap(),
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
        }
    }

    /// Serve every incoming request with the same canned status and body.
    async fn serve(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let Ok((mut socket, _)) = listener.accept().await else { break };
                let mut request: Vec<u8> = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => break,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let reply = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(reply.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{addr}")
    }

    fn client(base_url: String) -> FetchClient {
        FetchClient::new(&FetchConfig { base_url, ..Default::default() }).unwrap()
    }

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.base_url, "https://www.duden.de");
        assert_eq!(config.user_agent, "duden/0.1");
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn test_fetch_config_from_app_config() {
        let app = AppConfig { timeout_ms: Some(1500), user_agent: "test-agent".into(), ..Default::default() };
        let config = FetchConfig::from(&app);
        assert_eq!(config.timeout, Some(Duration::from_millis(1500)));
        assert_eq!(config.user_agent, "test-agent");
    }

    #[test]
    fn test_fetch_client_rejects_bad_base_url() {
        let result = FetchClient::new(&FetchConfig { base_url: "ftp://duden.de".into(), ..Default::default() });
        assert!(matches!(result, Err(Error::InvalidUrl(_))));
    }

    #[test]
    fn test_word_page_status_mapping() {
        assert!(word_page_outcome(response(200, "<html/>")).is_present());
        assert!(word_page_outcome(response(404, "not found")).is_absent());
        assert!(matches!(
            word_page_outcome(response(500, "boom")),
            FetchOutcome::Failed(Error::HttpStatus { status: 500, .. })
        ));
        assert!(matches!(
            word_page_outcome(response(403, "no")),
            FetchOutcome::Failed(Error::HttpStatus { status: 403, .. })
        ));
    }

    #[test]
    fn test_search_page_ignores_status() {
        let outcome = search_page_outcome(response(503, "<html>maintenance</html>"));
        assert_eq!(outcome.into_result().unwrap(), Some("<html>maintenance</html>".to_string()));
    }

    #[test]
    fn test_autocomplete_error_status_is_absent() {
        assert!(autocomplete_outcome(response(200, "[]")).is_present());
        assert!(autocomplete_outcome(response(500, "error")).is_absent());
        assert!(autocomplete_outcome(response(404, "")).is_absent());
    }

    #[tokio::test]
    async fn test_word_page_over_http() {
        let base = serve("200 OK", "<h1>Haus</h1>").await;
        let outcome = client(base).word_page("Haus").await;
        assert_eq!(outcome.into_result().unwrap(), Some("<h1>Haus</h1>".to_string()));
    }

    #[tokio::test]
    async fn test_word_page_not_found_over_http() {
        let base = serve("404 Not Found", "gone").await;
        assert!(client(base).word_page("Gibtsnicht").await.is_absent());
    }

    #[tokio::test]
    async fn test_search_page_error_status_over_http() {
        let base = serve("500 Internal Server Error", "<p>oops</p>").await;
        let outcome = client(base).search_page("Haus").await;
        assert_eq!(outcome.into_result().unwrap(), Some("<p>oops</p>".to_string()));
    }

    #[tokio::test]
    async fn test_autocomplete_error_status_over_http() {
        let base = serve("502 Bad Gateway", "").await;
        assert!(client(base).autocomplete("Hau").await.is_absent());
    }

    #[tokio::test]
    async fn test_connection_refused_translation_is_word_page_only() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = client(format!("http://{addr}"));

        let word = client.word_page("Haus").await;
        assert!(matches!(word, FetchOutcome::Failed(Error::ConnectionFailed(_))));

        let search = client.search_page("Haus").await;
        assert!(matches!(search, FetchOutcome::Failed(Error::Network(_))));

        let autocomplete = client.autocomplete("Hau").await;
        assert!(matches!(autocomplete, FetchOutcome::Failed(Error::Network(_))));
    }
}
