//! HTTP access for the download commands.
//!
//! One blocking client per run. Every request URL must be `http`/`https`,
//! and redirects to any other scheme are refused.

pub mod commons;
pub mod table;

use std::{
    fs,
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use reqwest::blocking::{Client, Response};
use reqwest::redirect::{Attempt, Policy};
use thiserror::Error;

use crate::config::FetchConfig;
use crate::core::url::{UrlError, ensure_web_url, is_web_scheme};

/// Maximum redirect hops per request.
const MAX_REDIRECTS: usize = 10;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Url(#[from] UrlError),

    #[error("redirect to a non-web scheme refused for `{0}`")]
    InsecureRedirect(String),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} for `{url}`")]
    Status { url: String, status: u16 },

    #[error("failed to write '{}'", .0.display())]
    Io(PathBuf, #[source] std::io::Error),
}

impl FetchError {
    /// Scheme violations stop the whole command; everything else skips one item.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            FetchError::Url(UrlError::InsecureScheme(_)) | FetchError::InsecureRedirect(_)
        )
    }
}

fn redirect_policy(attempt: Attempt) -> reqwest::redirect::Action {
    if !is_web_scheme(attempt.url().scheme()) {
        let target = attempt.url().to_string();
        attempt.error(UrlError::InsecureScheme(target))
    } else if attempt.previous().len() >= MAX_REDIRECTS {
        attempt.error("too many redirects")
    } else {
        attempt.follow()
    }
}

/// Whether the redirect policy stopped `err` on a non-web scheme.
fn refused_scheme(err: &reqwest::Error) -> bool {
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        if matches!(
            cause.downcast_ref::<UrlError>(),
            Some(UrlError::InsecureScheme(_))
        ) {
            return true;
        }
        source = cause.source();
    }
    false
}

/// Blocking HTTP client with the configured agent and timeout.
pub struct Fetcher {
    client: Client,
}

impl Fetcher {
    pub fn new(config: &FetchConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .redirect(Policy::custom(redirect_policy))
            .build()?;
        Ok(Self { client })
    }

    fn get(&self, raw: &str) -> Result<Response, FetchError> {
        let url = ensure_web_url(raw)?;
        let response = self.client.get(url).send().map_err(|err| {
            if refused_scheme(&err) {
                FetchError::InsecureRedirect(raw.to_string())
            } else {
                FetchError::Http(err)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: raw.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }

    /// GET `url` as UTF-8 text.
    pub fn get_text(&self, url: &str) -> Result<String, FetchError> {
        Ok(self.get(url)?.text()?)
    }

    /// GET `url` as raw bytes.
    pub fn get_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        Ok(self.get(url)?.bytes()?.to_vec())
    }

    /// GET `url` into `dest`, creating parent directories.
    pub fn download_to(&self, url: &str, dest: &Path) -> Result<(), FetchError> {
        let bytes = self.get_bytes(url)?;
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| FetchError::Io(parent.to_path_buf(), e))?;
        }
        fs::write(dest, bytes).map_err(|e| FetchError::Io(dest.to_path_buf(), e))
    }
}

/// Courtesy pause between downloads.
pub fn pause(delay: Duration) {
    if !delay.is_zero() {
        thread::sleep(delay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;

    /// Local server answering every request with `302 Location: {location}`.
    fn redirect_server(location: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else { break };
                let mut buf = [0u8; 1024];
                let _ = stream.read(&mut buf);
                let reply = format!(
                    "HTTP/1.1 302 Found\r\nLocation: {location}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                );
                let _ = stream.write_all(reply.as_bytes());
            }
        });
        format!("http://{addr}/start")
    }

    fn fetcher() -> Fetcher {
        Fetcher::new(&FetchConfig::default()).unwrap()
    }

    #[test]
    fn test_non_web_scheme_rejected_before_request() {
        let err = fetcher().get_text("file:///etc/passwd").unwrap_err();
        assert!(matches!(err, FetchError::Url(UrlError::InsecureScheme(_))));
        assert!(err.is_fatal());

        let err = fetcher().get_bytes("ftp://example.com/card.svg").unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_invalid_url_is_not_fatal() {
        let err = fetcher().get_text("not a url").unwrap_err();
        assert!(matches!(err, FetchError::Url(UrlError::Invalid { .. })));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_status_error_is_not_fatal() {
        let err = FetchError::Status {
            url: "https://example.com/x.svg".into(),
            status: 404,
        };
        assert!(!err.is_fatal());
        assert_eq!(err.to_string(), "HTTP 404 for `https://example.com/x.svg`");
    }

    #[test]
    fn test_redirect_loop_skips_item() {
        let url = redirect_server("/loop");
        let err = fetcher().get_text(&url).unwrap_err();
        assert!(matches!(err, FetchError::Http(_)));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_redirect_to_ftp_is_fatal() {
        let url = redirect_server("ftp://127.0.0.1/card.svg");
        let err = fetcher().get_text(&url).unwrap_err();
        assert!(matches!(err, FetchError::InsecureRedirect(_)));
        assert!(err.is_fatal());
    }
}
