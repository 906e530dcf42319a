//! Network fetch boundary.
//!
//! The media cache only needs "GET this URL, give me a status and a body".
//! [`Fetcher`] is that seam; [`CurlFetcher`] is the libcurl implementation used
//! by the CLI, and tests substitute their own.

mod curl;

pub use self::curl::CurlFetcher;

use std::fmt;

/// Successful transfer: the final status (after redirects) and the full body.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

/// Why a GET produced no usable body.
#[derive(Debug)]
pub enum FetchError {
    /// URL could not be parsed or is not http(s); no request was made.
    InvalidUrl(String),
    /// Curl reported an error (DNS, connect, timeout, TLS, etc.).
    Transport(::curl::Error),
    /// HTTP response had a non-2xx status.
    Http(u32),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::InvalidUrl(reason) => write!(f, "invalid URL: {}", reason),
            FetchError::Transport(e) => write!(f, "{}", e),
            FetchError::Http(code) => write!(f, "HTTP {}", code),
        }
    }
}

impl std::error::Error for FetchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchError::Transport(e) => Some(e),
            FetchError::InvalidUrl(_) | FetchError::Http(_) => None,
        }
    }
}

/// Issues one unauthenticated GET per call. Implementations must not retry.
pub trait Fetcher {
    fn get(&self, url: &str) -> Result<FetchResponse, FetchError>;
}

impl<F: Fetcher + ?Sized> Fetcher for &F {
    fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        (**self).get(url)
    }
}

/// True for 2xx.
pub fn is_success(status: u32) -> bool {
    (200..300).contains(&status)
}

/// Reject anything libcurl should not be asked to GET (bad syntax, non-http schemes).
pub fn validate_url(url: &str) -> Result<url::Url, FetchError> {
    let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(FetchError::InvalidUrl(format!(
            "{url}: unsupported scheme {other:?}"
        ))),
    }
}
