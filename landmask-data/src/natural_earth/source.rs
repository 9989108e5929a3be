//! Where GeoJSON documents come from.

use std::{fmt, io, time::Duration};

use reqwest::Client;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};

use super::{SourceBuildError, SourceUrl, TransportError};

/// User agent sent with every request unless overridden.
pub const DEFAULT_USER_AGENT: &str = "landmask-regenerate/0.1";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Supplies raw GeoJSON bodies.
///
/// The trait is synchronous: the regenerator fetches one document at a time
/// and nothing proceeds until the current request has finished.
pub trait GeoJsonSource {
    /// Fetch the body served at `url`.
    ///
    /// Any HTTP status of 400 or above, and any transport failure, is an
    /// error.
    fn fetch(&self, url: &SourceUrl) -> Result<Vec<u8>, TransportError>;
}

/// Configuration for [`HttpGeoJsonSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSourceConfig {
    /// Connect and whole-request timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpSourceConfig {
    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP implementation of [`GeoJsonSource`].
///
/// Requests go through an async `reqwest` client and are driven to
/// completion on a runtime the source owns. Inside a multi-threaded Tokio
/// runtime the ambient handle is used via `block_in_place` instead, which
/// avoids nesting runtimes. Inside a current-thread runtime neither is
/// possible, so `fetch` returns [`TransportError::Network`] with
/// [`std::io::ErrorKind::Unsupported`] without issuing a request.
pub struct HttpGeoJsonSource {
    client: Client,
    config: HttpSourceConfig,
    runtime: Runtime,
}

impl fmt::Debug for HttpGeoJsonSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpGeoJsonSource")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl HttpGeoJsonSource {
    /// Construct a source with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new() -> Result<Self, SourceBuildError> {
        Self::with_config(HttpSourceConfig::default())
    }

    /// Construct a source with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: HttpSourceConfig) -> Result<Self, SourceBuildError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(SourceBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(SourceBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Configuration the source was built with.
    pub fn config(&self) -> &HttpSourceConfig {
        &self.config
    }

    async fn fetch_async(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| convert_reqwest_error(err, url))?
            .error_for_status()
            .map_err(|err| convert_reqwest_error(err, url))?;
        let body = response
            .bytes()
            .await
            .map_err(|err| convert_reqwest_error(err, url))?;
        Ok(body.to_vec())
    }
}

impl GeoJsonSource for HttpGeoJsonSource {
    fn fetch(&self, url: &SourceUrl) -> Result<Vec<u8>, TransportError> {
        let future = self.fetch_async(url.as_ref());
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            Ok(_) => Err(TransportError::Network {
                url: url.to_string(),
                source: io::Error::new(
                    io::ErrorKind::Unsupported,
                    "blocking fetch cannot run inside a current-thread Tokio runtime",
                ),
            }),
            Err(_) => self.runtime.block_on(future),
        }
    }
}

fn convert_reqwest_error(error: reqwest::Error, url: &str) -> TransportError {
    if let Some(status) = error.status() {
        return TransportError::Http {
            url: url.to_owned(),
            status: status.as_u16(),
            message: error.to_string(),
        };
    }

    let kind = if error.is_timeout() {
        io::ErrorKind::TimedOut
    } else {
        io::ErrorKind::Other
    };
    TransportError::Network {
        url: url.to_owned(),
        source: io::Error::new(kind, error),
    }
}
