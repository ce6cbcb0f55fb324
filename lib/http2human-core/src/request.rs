//! Request options and the request handed to a transport.
//!
//! [`RequestOptions`] is the `params` of a dispatch: method, headers, query and body.
//! They are not interpreted by the classification logic, only forwarded to the
//! transport inside a [`Request`].
//!
//! # Example
//!
//! ```
//! use http2human_core::{Method, Request, RequestOptions};
//!
//! let options = RequestOptions::new()
//!     .method(Method::Post)
//!     .header("Accept", "application/json")
//!     .query("page", "1")
//!     .text("hello");
//!
//! let request = Request::new("https://api.example.com/notes".parse().unwrap(), options);
//! assert_eq!(request.url().as_str(), "https://api.example.com/notes?page=1");
//! ```

use std::collections::HashMap;

use bytes::Bytes;

use crate::{ContentType, Method};

/// Options forwarded verbatim to the transport.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    method: Method,
    headers: HashMap<String, String>,
    query: Vec<(String, String)>,
    body: Option<Bytes>,
}

impl RequestOptions {
    /// Options for a plain GET request.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the HTTP method.
    #[must_use]
    pub const fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets multiple headers.
    #[must_use]
    pub fn headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Sets the raw request body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a plain text body.
    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        let text: String = text.into();
        self.header("Content-Type", ContentType::PlainText.as_str())
            .body(text)
    }

    /// Set a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn json<T: serde::Serialize>(self, value: &T) -> crate::Result<Self> {
        let body = crate::to_json(value)?;
        Ok(self
            .header("Content-Type", ContentType::Json.as_str())
            .body(body))
    }

    /// Set a form-urlencoded body.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn form<T: serde::Serialize>(self, value: &T) -> crate::Result<Self> {
        let body = crate::to_form(value)?;
        Ok(self
            .header("Content-Type", ContentType::FormUrlEncoded.as_str())
            .body(body))
    }

    /// HTTP method.
    #[must_use]
    pub const fn get_method(&self) -> Method {
        self.method
    }

    /// Request headers.
    #[must_use]
    pub fn get_headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Request body.
    #[must_use]
    pub const fn get_body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }
}

/// An HTTP request with method, URL, headers, and optional body.
#[derive(Debug, Clone)]
pub struct Request<B = Bytes> {
    method: Method,
    url: url::Url,
    headers: HashMap<String, String>,
    body: Option<B>,
}

impl Request<Bytes> {
    /// Build a request from a target URL and its options.
    ///
    /// Query pairs from the options are appended to the URL.
    #[must_use]
    pub fn new(mut url: url::Url, options: RequestOptions) -> Self {
        let RequestOptions {
            method,
            headers,
            query,
            body,
        } = options;

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &query {
                pairs.append_pair(name, value);
            }
        }

        Self {
            method,
            url,
            headers,
            body,
        }
    }
}

impl<B> Request<B> {
    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL.
    #[must_use]
    pub fn url(&self) -> &url::Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Mutable access to headers.
    #[must_use]
    pub fn headers_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.headers
    }

    /// Single header value by name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).map(String::as_str)
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, url::Url, HashMap<String, String>, Option<B>) {
        (self.method, self.url, self.headers, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> url::Url {
        url::Url::parse(s).expect("valid URL")
    }

    #[test]
    fn default_options_are_a_get() {
        let request = Request::new(url("https://api.example.com/users"), RequestOptions::new());

        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.url().as_str(), "https://api.example.com/users");
        assert!(request.headers().is_empty());
        assert!(request.body().is_none());
    }

    #[test]
    fn options_with_query() {
        let options = RequestOptions::new().query("page", "1").query("limit", "10");
        let request = Request::new(url("https://api.example.com/users"), options);

        assert_eq!(
            request.url().as_str(),
            "https://api.example.com/users?page=1&limit=10"
        );
    }

    #[test]
    fn query_is_appended_to_existing_one() {
        let options = RequestOptions::new().query("b", "2");
        let request = Request::new(url("https://api.example.com/?a=1"), options);

        assert_eq!(request.url().as_str(), "https://api.example.com/?a=1&b=2");
    }

    #[test]
    fn options_with_body() {
        let options = RequestOptions::new()
            .method(Method::Put)
            .header("Content-Type", "application/octet-stream")
            .body(Bytes::from_static(b"raw"));
        let request = Request::new(url("https://api.example.com/blob"), options);

        assert_eq!(request.method(), Method::Put);
        assert_eq!(request.body(), Some(&Bytes::from_static(b"raw")));
        assert_eq!(
            request.header("Content-Type"),
            Some("application/octet-stream")
        );
    }

    #[test]
    fn options_json() {
        #[derive(serde::Serialize)]
        struct User {
            name: String,
        }

        let options = RequestOptions::new()
            .method(Method::Post)
            .json(&User {
                name: "test".to_string(),
            })
            .expect("json");

        assert_eq!(options.get_method(), Method::Post);
        assert_eq!(
            options.get_headers().get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(
            options.get_body().map(Bytes::as_ref),
            Some(br#"{"name":"test"}"#.as_slice())
        );
    }

    #[test]
    fn options_form_and_text() {
        #[derive(serde::Serialize)]
        struct Login {
            username: String,
        }

        let options = RequestOptions::new()
            .form(&Login {
                username: "alice".to_string(),
            })
            .expect("form");
        assert_eq!(
            options.get_body().map(Bytes::as_ref),
            Some(b"username=alice".as_slice())
        );

        let options = RequestOptions::new().text("hi");
        assert_eq!(
            options.get_headers().get("Content-Type").map(String::as_str),
            Some("text/plain")
        );
    }
}
