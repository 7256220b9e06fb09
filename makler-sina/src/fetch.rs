use std::sync::Arc;

use async_trait::async_trait;
use futures::{StreamExt, stream};

use makler_core::{MaklerError, QuoteRow, QuoteTable};
use makler_session::{HttpTransport, Method, RequestOptions, Transport};

use crate::parse;

/// Upper bound on symbols per feed request; longer lists are split.
pub const MAX_BATCH: usize = 800;

/// How many batch requests may be in flight at once.
pub const FETCH_CONCURRENCY: usize = 5;

/// The production feed endpoint.
pub const DEFAULT_BASE_URL: &str = "http://hq.sinajs.cn";

/// The one HTTP operation quote fetching needs, behind a seam so tests can
/// inject fakes.
#[async_trait]
pub trait QuoteTransport: Send + Sync {
    /// GET `url` and return the decoded body.
    ///
    /// # Errors
    /// `Transport` for wire failures, `Status` for a non-2xx answer.
    async fn get_text(&self, url: &str) -> Result<String, MaklerError>;
}

/// Default transport: the standard-header HTTP client. Quote retrieval is
/// unauthenticated, so no session is involved and no expiry is touched.
pub struct HttpQuoteTransport {
    inner: HttpTransport,
}

impl HttpQuoteTransport {
    /// Build the default client.
    ///
    /// # Errors
    /// `Transport` when the underlying client cannot be constructed.
    pub fn new() -> Result<Self, MaklerError> {
        Ok(Self {
            inner: HttpTransport::new()?,
        })
    }
}

#[async_trait]
impl QuoteTransport for HttpQuoteTransport {
    async fn get_text(&self, url: &str) -> Result<String, MaklerError> {
        let resp = self
            .inner
            .issue(Method::GET, url, &RequestOptions::new())
            .await?;
        if !resp.is_success() {
            return Err(MaklerError::status(resp.status, url));
        }
        Ok(resp.body)
    }
}

/// Batched, parallel quote fetcher over the Sina-style feed.
///
/// Splits the symbol list into chunks of at most [`MAX_BATCH`], requests up
/// to [`FETCH_CONCURRENCY`] chunks concurrently, and reassembles rows in the
/// caller's requested order regardless of completion order.
pub struct SinaQuotes {
    transport: Arc<dyn QuoteTransport>,
    base_url: String,
    batch_size: usize,
    concurrency: usize,
}

impl SinaQuotes {
    /// Fetcher against the production endpoint with the default transport.
    ///
    /// # Errors
    /// `Transport` when the HTTP client cannot be constructed.
    pub fn new() -> Result<Self, MaklerError> {
        Ok(Self::with_transport(Arc::new(HttpQuoteTransport::new()?)))
    }

    /// Fetcher with an injected transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn QuoteTransport>) -> Self {
        Self {
            transport,
            base_url: DEFAULT_BASE_URL.to_string(),
            batch_size: MAX_BATCH,
            concurrency: FETCH_CONCURRENCY,
        }
    }

    /// Point the fetcher at a different endpoint.
    #[must_use]
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the chunk size. Values below 1 are clamped to 1.
    #[must_use]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Override the number of concurrent in-flight requests. Clamped to 1.
    #[must_use]
    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    fn chunk_url(&self, chunk: &[String]) -> String {
        // The rn parameter is a cache-buster the feed expects.
        format!(
            "{}/?rn={}&list={}",
            self.base_url,
            chrono::Utc::now().timestamp_millis(),
            chunk.join(",")
        )
    }

    /// Fetch quotes for `symbols`, one row per symbol in requested order,
    /// duplicates preserved.
    ///
    /// A failed chunk degrades to all-missing rows for that chunk only;
    /// other chunks are unaffected. A chunk answering with the wrong number
    /// of lines is padded or cut to the chunk length so adjacent chunks
    /// never misalign.
    ///
    /// # Errors
    /// Currently infallible at the batch level; the `Result` leaves room
    /// for input validation.
    pub async fn fetch(&self, symbols: &[String]) -> Result<QuoteTable, MaklerError> {
        if symbols.is_empty() {
            return Ok(QuoteTable::default());
        }
        tracing::debug!(symbols = symbols.len(), "dispatching quote fetch");

        let requests = symbols.chunks(self.batch_size).map(|chunk| {
            let url = self.chunk_url(chunk);
            let expected = chunk.len();
            let transport = Arc::clone(&self.transport);
            async move {
                match transport.get_text(&url).await {
                    Ok(body) => {
                        let mut rows = parse::parse_body(&body);
                        if rows.len() != expected {
                            tracing::warn!(
                                expected,
                                got = rows.len(),
                                "quote response line count mismatch"
                            );
                            rows.resize_with(expected, QuoteRow::missing);
                        }
                        rows
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "quote chunk failed");
                        std::iter::repeat_with(QuoteRow::missing)
                            .take(expected)
                            .collect()
                    }
                }
            }
        });

        // Ordered buffering: rows come back in chunk order no matter which
        // request finishes first.
        let rows: Vec<QuoteRow> = stream::iter(requests)
            .buffered(self.concurrency)
            .collect::<Vec<Vec<QuoteRow>>>()
            .await
            .into_iter()
            .flatten()
            .collect();

        Ok(QuoteTable::new(symbols.to_vec(), rows))
    }

    /// Fetch a single symbol's row.
    ///
    /// # Errors
    /// As [`SinaQuotes::fetch`].
    pub async fn fetch_one(&self, symbol: &str) -> Result<QuoteRow, MaklerError> {
        let symbols = [symbol.to_string()];
        let table = self.fetch(&symbols).await?;
        Ok(table
            .rows()
            .first()
            .cloned()
            .unwrap_or_else(QuoteRow::missing))
    }
}
