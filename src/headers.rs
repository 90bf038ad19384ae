// src/headers.rs
// =============================================================================
// Custom request headers supplied on the command line.
//
// Format: declarations separated by two semicolons, each "Name: value".
//
//   "Cookie: a=b;;Referer: http://example.com/"
//
// Two semicolons are used as the separator so that a single ';' or ':'
// can still appear inside a header value (cookies, URLs).
// =============================================================================

use std::collections::HashMap;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tracing::warn;

use crate::error::CrawlError;

/// Header name -> header value, both trimmed.
pub type HeaderSet = HashMap<String, String>;

const DECLARATION_SEPARATOR: &str = ";;";

/// Parses a raw header string into a HeaderSet.
///
/// - Empty input gives an empty set.
/// - Input without any ':' is rejected with `MalformedHeaders`.
/// - A declaration is split on the first ": " if present, otherwise on
///   the first ':'. Declarations with no colon are skipped.
/// - Later duplicates overwrite earlier ones.
pub fn parse_headers(raw: &str) -> Result<HeaderSet, CrawlError> {
    let mut headers = HeaderSet::new();

    if raw.is_empty() {
        return Ok(headers);
    }

    if !raw.contains(':') {
        return Err(CrawlError::MalformedHeaders);
    }

    for declaration in raw.split(DECLARATION_SEPARATOR) {
        let Some((name, value)) = declaration
            .split_once(": ")
            .or_else(|| declaration.split_once(':'))
        else {
            continue;
        };

        headers.insert(name.trim().to_string(), value.trim().to_string());
    }

    Ok(headers)
}

/// Converts a HeaderSet into the wire representation sent with every
/// request. Entries that are not valid HTTP header names or values are
/// dropped with a warning.
pub fn to_header_map(headers: &HeaderSet) -> HeaderMap {
    let mut map = HeaderMap::with_capacity(headers.len());

    for (name, value) in headers {
        let parsed_name = match HeaderName::from_bytes(name.as_bytes()) {
            Ok(n) => n,
            Err(_) => {
                warn!(header = %name, "skipping header with invalid name");
                continue;
            }
        };
        let parsed_value = match HeaderValue::from_str(value) {
            Ok(v) => v,
            Err(_) => {
                warn!(header = %name, "skipping header with invalid value");
                continue;
            }
        };
        map.insert(parsed_name, parsed_value);
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_two_headers() {
        let headers = parse_headers("Cookie: a=b;;Referer: http://x/").unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["Cookie"], "a=b");
        assert_eq!(headers["Referer"], "http://x/");
    }

    #[test]
    fn test_parse_empty_input() {
        let headers = parse_headers("").unwrap();
        assert!(headers.is_empty());
    }

    #[test]
    fn test_no_colon_is_malformed() {
        let result = parse_headers("badheader");
        assert!(matches!(result, Err(CrawlError::MalformedHeaders)));
    }

    #[test]
    fn test_colon_without_space() {
        let headers = parse_headers("X-Token:abc").unwrap();
        assert_eq!(headers["X-Token"], "abc");
    }

    #[test]
    fn test_value_keeps_inner_colons_and_semicolons() {
        let headers = parse_headers("Cookie: a=1; b=2;;Referer: http://x:8080/p").unwrap();
        assert_eq!(headers["Cookie"], "a=1; b=2");
        assert_eq!(headers["Referer"], "http://x:8080/p");
    }

    #[test]
    fn test_bad_declaration_is_skipped() {
        let headers = parse_headers("junk;;Cookie: a=b;;").unwrap();
        assert_eq!(headers.len(), 1);
        assert_eq!(headers["Cookie"], "a=b");
    }

    #[test]
    fn test_duplicate_names_last_wins() {
        let headers = parse_headers("X-A: 1;;X-A: 2").unwrap();
        assert_eq!(headers["X-A"], "2");
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let headers = parse_headers("  Cookie :   a=b  ").unwrap();
        assert_eq!(headers["Cookie"], "a=b");
    }

    #[test]
    fn test_header_map_drops_invalid_names() {
        let mut set = HeaderSet::new();
        set.insert("Cookie".to_string(), "a=b".to_string());
        set.insert("bad name".to_string(), "x".to_string());

        let map = to_header_map(&set);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("cookie").unwrap(), "a=b");
    }
}
