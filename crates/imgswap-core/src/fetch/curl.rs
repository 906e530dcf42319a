//! Blocking single-stream GET via libcurl; the body is collected in memory.

use std::time::Duration;

use super::{is_success, validate_url, FetchError, FetchResponse, Fetcher};
use crate::config::FetchConfig;

/// libcurl-backed [`Fetcher`]. A fresh easy handle is used for every request.
#[derive(Debug, Clone, Default)]
pub struct CurlFetcher {
    config: FetchConfig,
}

impl CurlFetcher {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    fn build_easy(&self, url: &str) -> Result<::curl::easy::Easy, ::curl::Error> {
        let mut easy = ::curl::easy::Easy::new();
        easy.url(url)?;
        easy.get(true)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.config.max_redirects)?;
        if let Some(secs) = self.config.connect_timeout_secs {
            easy.connect_timeout(Duration::from_secs(secs))?;
        }
        if let Some(secs) = self.config.timeout_secs {
            easy.timeout(Duration::from_secs(secs))?;
        }
        if let Some(ua) = self.config.user_agent.as_deref() {
            easy.useragent(ua)?;
        }
        Ok(easy)
    }
}

impl Fetcher for CurlFetcher {
    fn get(&self, url: &str) -> Result<FetchResponse, FetchError> {
        validate_url(url)?;

        let mut easy = self.build_easy(url).map_err(FetchError::Transport)?;
        let mut body: Vec<u8> = Vec::new();
        {
            let mut transfer = easy.transfer();
            transfer
                .write_function(|data| {
                    body.extend_from_slice(data);
                    Ok(data.len())
                })
                .map_err(FetchError::Transport)?;
            transfer.perform().map_err(FetchError::Transport)?;
        }

        let status = easy.response_code().map_err(FetchError::Transport)?;
        if !is_success(status) {
            return Err(FetchError::Http(status));
        }
        tracing::debug!("GET {} -> HTTP {} ({} bytes)", url, status, body.len());
        Ok(FetchResponse { status, body })
    }
}
