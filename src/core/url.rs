//! URL handling for remote sources.
//!
//! - Only `http` and `https` are ever fetched
//! - File names taken from URLs are percent-decoded before classification

use percent_encoding::percent_decode_str;
use thiserror::Error;
use url::Url;

/// URL validation errors.
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("invalid url `{url}`: {source}")]
    Invalid {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("refusing non-web url `{0}` (only http and https are allowed)")]
    InsecureScheme(String),
}

/// Whether a scheme may be fetched.
#[inline]
pub fn is_web_scheme(scheme: &str) -> bool {
    matches!(scheme, "http" | "https")
}

/// Parse `raw` and reject anything that is not `http`/`https`.
pub fn ensure_web_url(raw: &str) -> Result<Url, UrlError> {
    let url = Url::parse(raw).map_err(|source| UrlError::Invalid {
        url: raw.to_string(),
        source,
    })?;
    if !is_web_scheme(url.scheme()) {
        return Err(UrlError::InsecureScheme(raw.to_string()));
    }
    Ok(url)
}

/// Resolve a site-relative path (`/wiki/File:...`) against `base`.
pub fn join_web_url(base: &str, path: &str) -> Result<Url, UrlError> {
    let base = ensure_web_url(base)?;
    let joined = base.join(path).map_err(|source| UrlError::Invalid {
        url: path.to_string(),
        source,
    })?;
    if !is_web_scheme(joined.scheme()) {
        return Err(UrlError::InsecureScheme(joined.to_string()));
    }
    Ok(joined)
}

/// Percent-decode a string, keeping the input when it is not valid UTF-8.
pub fn decode(encoded: &str) -> String {
    percent_decode_str(encoded)
        .decode_utf8()
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| encoded.to_string())
}

/// File name from a wiki file page path, still percent-encoded.
///
/// `/wiki/File:Atlas%20ace.svg` -> `Atlas%20ace.svg`
pub fn wiki_file_tail(page_path: &str) -> &str {
    let tail = page_path.rsplit('/').next().unwrap_or(page_path);
    tail.strip_prefix("File:").unwrap_or(tail)
}

/// Decoded file name from a wiki file page path.
pub fn wiki_file_name(page_path: &str) -> String {
    decode(wiki_file_tail(page_path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_schemes_accepted() {
        assert!(ensure_web_url("https://commons.wikimedia.org/wiki/Category:X").is_ok());
        assert!(ensure_web_url("http://example.com/a.svg").is_ok());
    }

    #[test]
    fn test_other_schemes_rejected() {
        assert!(matches!(
            ensure_web_url("file:///etc/passwd"),
            Err(UrlError::InsecureScheme(_))
        ));
        assert!(matches!(
            ensure_web_url("ftp://example.com/a.svg"),
            Err(UrlError::InsecureScheme(_))
        ));
    }

    #[test]
    fn test_invalid_url() {
        assert!(matches!(
            ensure_web_url("not a url"),
            Err(UrlError::Invalid { .. })
        ));
    }

    #[test]
    fn test_join_relative_path() {
        let url = join_web_url(
            "https://commons.wikimedia.org",
            "/wiki/File:Atlas_deck_king_of_hearts.svg",
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://commons.wikimedia.org/wiki/File:Atlas_deck_king_of_hearts.svg"
        );
    }

    #[test]
    fn test_join_cannot_escape_scheme() {
        assert!(join_web_url("https://commons.wikimedia.org", "javascript:alert(1)").is_err());
    }

    #[test]
    fn test_wiki_file_name_decoded() {
        assert_eq!(
            wiki_file_name("/wiki/File:Carte%20da%20gioco%20Re%20di%20Coppe.svg"),
            "Carte da gioco Re di Coppe.svg"
        );
        assert_eq!(wiki_file_name("KH.svg"), "KH.svg");
        assert_eq!(wiki_file_tail("/wiki/File:Re%20di%20Coppe.svg"), "Re%20di%20Coppe.svg");
    }
}
