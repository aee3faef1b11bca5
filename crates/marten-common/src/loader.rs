//! Network loader for markup documents.
//!
//! A [`Session`] owns the HTTP client used to retrieve documents. Creating a
//! session performs the one-time setup; dropping it releases the client, so
//! there is no process-wide handle or "ready" flag to keep in sync.
//!
//! Only `http`, `https` and `ftp` URLs are considered fetchable. Anything else
//! yields an empty document without touching the network.
use std::io::Read;
use std::time::Duration;

use thiserror::Error;

use crate::warning::warn_once;

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Size of the read buffer used while streaming a response body.
const STREAM_CHUNK_SIZE: usize = 1024;

/// Schemes accepted by [`is_fetchable_url`], including the `//` separator.
const FETCHABLE_PREFIXES: [&str; 3] = ["http://", "https://", "ftp://"];

/// Failures surfaced by the loader.
///
/// None of these abort the caller: a failed fetch is simply a document that
/// never arrived.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The session was closed (or never configured) before the fetch.
    #[error("loader session is not configured")]
    NotConfigured,
    /// The HTTP client could not be created.
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// The request could not be sent or the connection failed.
    #[error("request to {url} failed: {source}")]
    Request {
        /// URL that was requested.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("HTTP error {status} for {url}")]
    Status {
        /// URL that was requested.
        url: String,
        /// Status line returned by the server.
        status: reqwest::StatusCode,
    },
    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(#[source] std::io::Error),
    /// The response body could not be read as text.
    #[error("failed to read response body: {0}")]
    Text(#[source] reqwest::Error),
    /// The URL passed the scheme filter but there is no transport for it.
    #[error("no transport available for {0}")]
    UnsupportedTransport(String),
}

/// Returns true if `url` names a network resource the loader may retrieve:
/// an `http://`, `https://` or `ftp://` prefix (ASCII case-insensitive)
/// followed by at least one more character.
#[must_use]
pub fn is_fetchable_url(url: &str) -> bool {
    FETCHABLE_PREFIXES.iter().any(|prefix| {
        url.len() > prefix.len()
            && url
                .get(..prefix.len())
                .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}

/// Returns true if the URL uses the `ftp` scheme.
fn is_ftp_url(url: &str) -> bool {
    url.get(..6)
        .is_some_and(|head| head.eq_ignore_ascii_case("ftp://"))
}

/// An owned loader session.
///
/// # Example
/// ```ignore
/// let session = Session::configure("MartenBrowser")?;
/// let html = session.fetch("https://example.com")?;
/// ```
pub struct Session {
    agent: String,
    timeout: Duration,
    client: Option<reqwest::blocking::Client>,
}

impl Session {
    /// Create a ready-to-use session that identifies itself as `agent`.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::Client`] if the HTTP client cannot be built.
    pub fn configure(agent: &str) -> Result<Self, LoaderError> {
        Self::with_timeout(agent, DEFAULT_TIMEOUT)
    }

    /// Like [`Session::configure`], with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::Client`] if the HTTP client cannot be built.
    pub fn with_timeout(agent: &str, timeout: Duration) -> Result<Self, LoaderError> {
        let mut session = Self {
            agent: agent.to_string(),
            timeout,
            client: None,
        };
        session.reconfigure(agent)?;
        Ok(session)
    }

    /// Set the session up again after [`Session::close`].
    ///
    /// Idempotent: if the session is already ready this does nothing, and the
    /// original agent identifier stays in effect.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::Client`] if the HTTP client cannot be built.
    pub fn reconfigure(&mut self, agent: &str) -> Result<(), LoaderError> {
        if self.client.is_some() {
            return Ok(());
        }

        let client = reqwest::blocking::Client::builder()
            .user_agent(agent)
            .timeout(self.timeout)
            .build()
            .map_err(|e| {
                warn_once("Loader", &format!("failed to create HTTP client: {e}"));
                LoaderError::Client(e)
            })?;

        log::debug!(target: "marten::loader", "session configured for agent {agent:?}");
        self.agent = agent.to_string();
        self.client = Some(client);
        Ok(())
    }

    /// Returns true while the session can issue fetches.
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        self.client.is_some()
    }

    /// The agent identifier sent with every request.
    #[must_use]
    pub fn agent(&self) -> &str {
        &self.agent
    }

    /// Release the HTTP client. Subsequent fetches fail with
    /// [`LoaderError::NotConfigured`] until [`Session::reconfigure`] is called.
    pub fn close(&mut self) {
        if self.client.take().is_some() {
            log::debug!(target: "marten::loader", "session closed");
        }
    }

    /// Fetch a URL and return its whole body as text.
    ///
    /// URLs that are not fetchable (see [`is_fetchable_url`]) produce an empty
    /// string without any network traffic.
    ///
    /// # Errors
    ///
    /// Returns an error if the session is closed, the request fails, the
    /// response has a non-success status, or the body cannot be read.
    pub fn fetch(&self, url: &str) -> Result<String, LoaderError> {
        let client = self.client.as_ref().ok_or(LoaderError::NotConfigured)?;
        if !is_fetchable_url(url) {
            return Ok(String::new());
        }

        // Malformed UTF-8 in the body decodes to U+FFFD rather than failing.
        Self::send(client, url)?.text().map_err(|e| {
            warn_once("Loader", &format!("failed to read body of {url}: {e}"));
            LoaderError::Text(e)
        })
    }

    /// Fetch a URL and hand its body to `on_chunk` one byte at a time.
    ///
    /// Every body byte is delivered as `(byte, false)`. Exactly one final
    /// `(0, true)` marker follows, whether the fetch succeeded, failed, or
    /// the URL was not fetchable, so a consumer can always finish its work.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Session::fetch`]; the final marker has
    /// already been delivered when an error is returned.
    pub fn fetch_streaming<F>(&self, url: &str, mut on_chunk: F) -> Result<(), LoaderError>
    where
        F: FnMut(u8, bool),
    {
        let result = self.stream_body(url, &mut on_chunk);
        on_chunk(0, true);
        result
    }

    fn stream_body<F>(&self, url: &str, on_chunk: &mut F) -> Result<(), LoaderError>
    where
        F: FnMut(u8, bool),
    {
        let client = self.client.as_ref().ok_or(LoaderError::NotConfigured)?;
        if !is_fetchable_url(url) {
            return Ok(());
        }

        let mut response = Self::send(client, url)?;
        let mut buffer = [0u8; STREAM_CHUNK_SIZE];
        loop {
            let read = response.read(&mut buffer).map_err(|e| {
                warn_once("Loader", &format!("failed to read body of {url}: {e}"));
                LoaderError::Body(e)
            })?;
            if read == 0 {
                return Ok(());
            }
            for &byte in &buffer[..read] {
                on_chunk(byte, false);
            }
        }
    }

    fn send(
        client: &reqwest::blocking::Client,
        url: &str,
    ) -> Result<reqwest::blocking::Response, LoaderError> {
        if is_ftp_url(url) {
            warn_once("Loader", &format!("ftp is not supported: {url}"));
            return Err(LoaderError::UnsupportedTransport(url.to_string()));
        }

        log::debug!(target: "marten::loader", "GET {url}");
        let response = client
            .get(url)
            .header("Pragma", "no-cache")
            .send()
            .map_err(|source| {
                warn_once("Loader", &format!("failed to open {url}: {source}"));
                LoaderError::Request {
                    url: url.to_string(),
                    source,
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn_once("Loader", &format!("HTTP error {status} for {url}"));
            return Err(LoaderError::Status {
                url: url.to_string(),
                status,
            });
        }
        Ok(response)
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.close();
    }
}
