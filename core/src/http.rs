//! HTTP transport types for the host-does-IO pattern.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The core
//! crate builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network; a [`Transport`](crate::transport::Transport) (or any
//! other host) executes the actual I/O.
//!
//! Query parameters are kept as ordered pairs until [`HttpRequest::url`]
//! renders them, so tests can assert on parameters without re-parsing URLs.

/// HTTP method for a request. The catalog API is read-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

/// An HTTP request described as plain data.
///
/// Built by `CatalogClient::build_*` methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    /// Absolute URL without the query string.
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    pub(crate) fn get(path: String) -> Self {
        Self {
            method: HttpMethod::Get,
            path,
            query: Vec::new(),
            headers: vec![("accept".to_string(), "application/json".to_string())],
        }
    }

    /// Value of the first query parameter named `key`.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Full URL with the percent-encoded query string appended.
    pub fn url(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        format!("{}?{}", self.path, encode_query(&self.query))
    }
}

/// An HTTP response described as plain data.
///
/// Constructed by the host after executing an `HttpRequest`, then passed to
/// `CatalogClient::parse_*` methods for deserialization.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

/// Render `key=value` pairs joined by `&`, percent-encoding both sides.
pub fn encode_query<K, V>(pairs: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    pairs
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                urlencoding::encode(k.as_ref()),
                urlencoding::encode(v.as_ref())
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// Split a query string into decoded pairs. A leading `?` is ignored and `+`
/// is read as a space, as browsers write it.
pub fn decode_query(query: &str) -> Vec<(String, String)> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut it = part.splitn(2, '=');
            let k = it.next().unwrap_or_default();
            let v = it.next().unwrap_or_default();
            (decode_component(k), decode_component(v))
        })
        .collect()
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| raw.replace('+', " "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_without_query_is_path() {
        let req = HttpRequest::get("http://localhost:8000/api/categories".to_string());
        assert_eq!(req.url(), "http://localhost:8000/api/categories");
    }

    #[test]
    fn url_encodes_query_values() {
        let mut req = HttpRequest::get("http://h/api/drugs".to_string());
        req.query.push(("search".to_string(), "cold & flu".to_string()));
        req.query.push(("categories".to_string(), "1,2".to_string()));
        assert_eq!(req.url(), "http://h/api/drugs?search=cold%20%26%20flu&categories=1%2C2");
        assert_eq!(req.query_param("categories"), Some("1,2"));
        assert_eq!(req.query_param("limit"), None);
    }

    #[test]
    fn decode_query_handles_plus_and_percent() {
        let pairs = decode_query("?search=cold+%26+flu&categories=1%2C2&empty=");
        assert_eq!(
            pairs,
            vec![
                ("search".to_string(), "cold & flu".to_string()),
                ("categories".to_string(), "1,2".to_string()),
                ("empty".to_string(), String::new()),
            ]
        );
    }

    #[test]
    fn decode_query_skips_empty_segments() {
        assert!(decode_query("").is_empty());
        assert_eq!(decode_query("a=1&&b=2").len(), 2);
    }
}
