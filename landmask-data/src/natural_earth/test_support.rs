//! In-memory [`GeoJsonSource`] for tests.

use std::{cell::RefCell, collections::HashMap, io};

use super::{GeoJsonSource, SourceUrl, TransportError};

#[derive(Debug, Clone)]
enum StubResponse {
    Body(Vec<u8>),
    Status(u16),
    Unreachable,
}

/// Stub [`GeoJsonSource`] serving canned responses keyed by URL.
///
/// URLs without a canned response answer with HTTP 404. Every request is
/// recorded so tests can assert fetch order.
///
/// # Examples
/// ```
/// use landmask_data::natural_earth::{GeoJsonSource, SourceUrl, test_support::StubSource};
///
/// let source = StubSource::new().with_body("https://example.test/land.json", b"{}".to_vec());
/// let body = source.fetch(&SourceUrl::new("https://example.test/land.json"));
/// assert_eq!(body.ok(), Some(b"{}".to_vec()));
/// assert_eq!(source.requests(), vec!["https://example.test/land.json".to_owned()]);
/// ```
#[derive(Debug, Default)]
pub struct StubSource {
    responses: HashMap<String, StubResponse>,
    requests: RefCell<Vec<String>>,
}

impl StubSource {
    /// Construct a stub with no canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `body` for `url`.
    #[must_use]
    pub fn with_body(mut self, url: impl Into<String>, body: Vec<u8>) -> Self {
        self.responses.insert(url.into(), StubResponse::Body(body));
        self
    }

    /// Answer `url` with an HTTP error `status`.
    #[must_use]
    pub fn with_status(mut self, url: impl Into<String>, status: u16) -> Self {
        self.responses
            .insert(url.into(), StubResponse::Status(status));
        self
    }

    /// Fail `url` as though the connection was refused.
    #[must_use]
    pub fn with_unreachable(mut self, url: impl Into<String>) -> Self {
        self.responses.insert(url.into(), StubResponse::Unreachable);
        self
    }

    /// URLs requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl GeoJsonSource for StubSource {
    fn fetch(&self, url: &SourceUrl) -> Result<Vec<u8>, TransportError> {
        self.requests.borrow_mut().push(url.to_string());
        match self.responses.get(url.as_ref()) {
            Some(StubResponse::Body(body)) => Ok(body.clone()),
            Some(StubResponse::Status(status)) => Err(TransportError::Http {
                url: url.to_string(),
                status: *status,
                message: format!("HTTP status {status}"),
            }),
            Some(StubResponse::Unreachable) => Err(TransportError::Network {
                url: url.to_string(),
                source: io::Error::new(io::ErrorKind::ConnectionRefused, "connection refused"),
            }),
            None => Err(TransportError::Http {
                url: url.to_string(),
                status: 404,
                message: "HTTP status 404 Not Found".to_owned(),
            }),
        }
    }
}

/// A source `FeatureCollection` with `count` small land polygons.
///
/// Feature `i` is a small triangle starting at longitude `i`; properties carry the
/// Natural Earth members the regenerator reads plus one it drops.
pub fn sample_collection(count: usize, featurecla: Option<&str>) -> Vec<u8> {
    let features: Vec<String> = (0..count)
        .map(|index| {
            let class = featurecla
                .map(|value| format!(r#""featurecla":"{value}","#))
                .unwrap_or_default();
            format!(
                r#"{{"type":"Feature","properties":{{{class}"scalerank":1,"min_zoom":0.5,"name":"island {index}"}},"geometry":{{"type":"Polygon","coordinates":[[[{index}.0,0.0],[{index}.5,0.0],[{index}.5,0.5],[{index}.0,0.0]]]}}}}"#
            )
        })
        .collect();
    format!(
        r#"{{"type":"FeatureCollection","features":[{}]}}"#,
        features.join(",")
    )
    .into_bytes()
}
