use crate::config::FetcherConfig;
use crate::fetcher::errors::FetchError;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, LOCATION};
use reqwest::{Client, ClientBuilder, redirect};
use tracing::{debug, instrument, warn};
use url::Url;

/// Source of raw page bytes.
///
/// Extractors only see this trait, so the HTTP client (and whatever session
/// it carries) is chosen by the caller rather than held globally. An empty
/// body means the page does not exist in the expected form.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Bytes, FetchError>;
}

/// Client builder with the settings every judge request needs: timeouts,
/// user agent, HTML `Accept` header and no redirect following.
///
/// Callers that need extra client features (a cookie jar holding a login
/// session, proxies) start from this builder and pass the result to
/// [`HttpFetcher::with_client`].
pub fn client_builder(config: &FetcherConfig) -> ClientBuilder {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );

    ClientBuilder::new()
        .connect_timeout(config.connect_timeout())
        .timeout(config.timeout())
        .user_agent(config.user_agent())
        .redirect(redirect::Policy::none())
        .default_headers(headers)
}

/// [`PageFetcher`] backed by a reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    max_body_bytes: u64,
}

impl HttpFetcher {
    pub fn new(config: &FetcherConfig) -> Result<Self, FetchError> {
        let client = client_builder(config)
            .build()
            .map_err(|e| FetchError::Client(e.to_string()))?;
        Ok(Self::with_client(client, config.max_body_bytes()))
    }

    /// Wrap an existing client. It should be built from [`client_builder`]
    /// or otherwise have redirects disabled, because a followed redirect
    /// hides the "page does not exist" signal.
    pub fn with_client(client: Client, max_body_bytes: u64) -> Self {
        Self {
            client,
            max_body_bytes,
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    #[instrument(skip_all, fields(url = %url))]
    async fn fetch(&self, url: &Url) -> Result<Bytes, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(FetchError::from_reqwest_error)?;

        let status = response.status();

        // The judge redirects away from contests that don't exist
        if status.is_redirection() {
            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|l| l.to_str().ok())
                .unwrap_or_default();
            warn!(%status, location, "redirect not followed, page treated as missing");
            return Ok(Bytes::new());
        }

        if !status.is_success() {
            return Err(FetchError::Http {
                status,
                retriable: status.is_server_error(),
            });
        }

        // Check content length before downloading
        if let Some(content_length) = response.content_length()
            && content_length > self.max_body_bytes
        {
            return Err(FetchError::BodyTooLarge(content_length));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Io(e.to_string()))?;

        // Content-Length may have been missing
        if body.len() as u64 > self.max_body_bytes {
            return Err(FetchError::BodyTooLarge(body.len() as u64));
        }

        debug!(status = %status, size = body.len(), "fetched page");
        Ok(body)
    }
}
