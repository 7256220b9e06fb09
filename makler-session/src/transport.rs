use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{self, HeaderMap, HeaderName, HeaderValue};

use makler_core::MaklerError;

pub use reqwest::Method;

/// Ceiling for every outbound HTTP call; elapsing it is a transport failure.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

/// Desktop-browser User-Agent the brokerage sites expect.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 6.1; WOW64; Trident/7.0; rv:11.0) like Gecko";

/// The standard outbound header set carried on every request.
#[must_use]
pub fn standard_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(header::ACCEPT, HeaderValue::from_static("*/*"));
    headers.insert(
        header::ACCEPT_ENCODING,
        HeaderValue::from_static("gzip,deflate"),
    );
    headers.insert(
        HeaderName::from_static("x-requested-with"),
        HeaderValue::from_static("XMLHttpRequest"),
    );
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("zh-CN,zh;q=0.8"),
    );
    headers
}

/// Extra request parameters accepted by [`Transport::issue`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Query-string pairs appended to the URL.
    pub query: Vec<(String, String)>,
    /// Form-encoded body pairs; an empty vec sends no body.
    pub form: Vec<(String, String)>,
}

impl RequestOptions {
    /// Empty options; most GETs need nothing else.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one query pair.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append one form pair.
    #[must_use]
    pub fn form(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.form.push((key.into(), value.into()));
        self
    }
}

/// A decoded HTTP response as seen through the transport facade.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, decoded GBK-tolerantly into UTF-8.
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The narrow HTTP surface a session exposes to adapters.
///
/// Deliberately *not* a transparent wrapper around a full HTTP client:
/// only `issue` (and the `get`/`post` conveniences on [`crate::Session`])
/// exist, so an adapter cannot reach capabilities the session does not
/// mean to grant.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one HTTP call. Non-2xx statuses are returned, not raised;
    /// the session layer decides what a failed status means.
    async fn issue(
        &self,
        method: Method,
        url: &str,
        opts: &RequestOptions,
    ) -> Result<HttpResponse, MaklerError>;
}

/// Default transport: a `reqwest` client with the standard headers, a
/// cookie store for login cookies, and the request-timeout ceiling.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Build the default client.
    ///
    /// # Errors
    /// `Transport` when the underlying client cannot be constructed.
    pub fn new() -> Result<Self, MaklerError> {
        let client = reqwest::Client::builder()
            .default_headers(standard_headers())
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| MaklerError::transport(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap a caller-configured client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn issue(
        &self,
        method: Method,
        url: &str,
        opts: &RequestOptions,
    ) -> Result<HttpResponse, MaklerError> {
        let mut req = self.client.request(method, url);
        if !opts.query.is_empty() {
            req = req.query(&opts.query);
        }
        if !opts.form.is_empty() {
            req = req.form(&opts.form);
        }
        let resp = req
            .send()
            .await
            .map_err(|e| MaklerError::transport(e.to_string()))?;
        let status = resp.status().as_u16();
        let body = resp
            .text_with_charset("gbk")
            .await
            .map_err(|e| MaklerError::transport(e.to_string()))?;
        Ok(HttpResponse { status, body })
    }
}
