//! Per-request context: request accessors, captured path parameters, body
//! binding, and response builders.

use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::http::request::Parts;
use hyper::{Method, StatusCode, Uri};
use serde::de::DeserializeOwned;
use serde::Serialize;

use wicket_router::Params;

use crate::{bind, Error};

/// The response type handlers produce.
pub type Response = hyper::Response<Full<Bytes>>;

/// Everything a handler gets about one request.
///
/// The body has already been collected into memory by the engine; binding
/// helpers deserialize it on demand.
#[derive(Debug)]
pub struct Context {
    parts: Parts,
    body: Bytes,
    params: Params,
}

impl Context {
    pub(crate) fn new(parts: Parts, body: Bytes, params: Params) -> Self {
        Self {
            parts,
            body,
            params,
        }
    }

    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    pub fn path(&self) -> &str {
        self.parts.uri.path()
    }

    /// Raw request body bytes.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// A path parameter captured by the router (`:name` or `*name`).
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// First value of a query-string key, percent-decoded.
    pub fn query(&self, key: &str) -> Option<String> {
        let query = self.parts.uri.query()?;
        form_urlencoded::parse(query.as_bytes())
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// First value of a form-encoded body key.
    ///
    /// Returns `None` unless the request declares
    /// `application/x-www-form-urlencoded`.
    pub fn post_form(&self, key: &str) -> Option<String> {
        if bind::media_type(self.header(CONTENT_TYPE.as_str())?) != "application/x-www-form-urlencoded"
        {
            return None;
        }
        form_urlencoded::parse(&self.body)
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// A request header value, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.parts.headers.get(name)?.to_str().ok()
    }

    // === Body binding ===

    /// Deserialize the body as JSON regardless of the declared content type.
    pub fn bind_json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        bind::from_json(&self.body)
    }

    /// Deserialize the body as XML regardless of the declared content type.
    pub fn bind_xml<T: DeserializeOwned>(&self) -> Result<T, Error> {
        bind::from_xml(&self.body)
    }

    /// Deserialize the body according to its Content-Type header.
    pub fn should_bind<T: DeserializeOwned>(&self) -> Result<T, Error> {
        bind::from_body(self.header(CONTENT_TYPE.as_str()), &self.body)
    }

    // === Response builders ===

    /// A JSON response. Serialization failure degrades to a plain 500.
    pub fn json<T: Serialize>(&self, status: StatusCode, data: &T) -> Response {
        match serde_json::to_vec(data) {
            Ok(body) => respond(status, "application/json", Bytes::from(body)),
            Err(e) => {
                tracing::error!(error = %e, "response serialization failed");
                respond(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "text/plain",
                    Bytes::from_static(b"internal server error"),
                )
            }
        }
    }

    /// A plain-text response.
    pub fn string(&self, status: StatusCode, body: impl Into<String>) -> Response {
        respond(status, "text/plain", Bytes::from(body.into()))
    }

    /// An HTML response.
    pub fn html(&self, status: StatusCode, body: impl Into<String>) -> Response {
        respond(status, "text/html", Bytes::from(body.into()))
    }

    /// A response with a status code and empty body.
    pub fn status(&self, status: StatusCode) -> Response {
        let mut response = Response::new(Full::new(Bytes::new()));
        *response.status_mut() = status;
        response
    }
}

/// Build a response without going through the fallible builder API.
pub(crate) fn respond(status: StatusCode, content_type: &'static str, body: Bytes) -> Response {
    let mut response = Response::new(Full::new(body));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use hyper::Request;

    fn context(uri: &str, content_type: Option<&str>, body: &str, params: Params) -> Context {
        let mut builder = Request::builder().uri(uri);
        if let Some(ct) = content_type {
            builder = builder.header(CONTENT_TYPE, ct);
        }
        let (parts, ()) = builder.body(()).unwrap().into_parts();
        Context::new(parts, Bytes::from(body.to_string()), params)
    }

    #[test]
    fn query_decodes_first_value() {
        let ctx = context("/search?q=a%20b&q=second&page=2", None, "", Params::default());
        assert_eq!(ctx.query("q"), Some("a b".to_string()));
        assert_eq!(ctx.query("page"), Some("2".to_string()));
        assert_eq!(ctx.query("missing"), None);
    }

    #[test]
    fn post_form_requires_form_content_type() {
        let ctx = context(
            "/login",
            Some("application/x-www-form-urlencoded"),
            "user=alice&password=s3cret",
            Params::default(),
        );
        assert_eq!(ctx.post_form("user"), Some("alice".to_string()));

        let ctx = context("/login", Some("application/json"), "user=alice", Params::default());
        assert_eq!(ctx.post_form("user"), None);
    }

    #[test]
    fn should_bind_uses_content_type() {
        #[derive(Debug, serde::Deserialize)]
        struct Login {
            user: String,
        }

        let ctx = context(
            "/login",
            Some("application/json; charset=utf-8"),
            r#"{"user":"alice"}"#,
            Params::default(),
        );
        let login: Login = ctx.should_bind().unwrap();
        assert_eq!(login.user, "alice");

        let ctx = context(
            "/login",
            Some("application/x-www-form-urlencoded"),
            "user=alice",
            Params::default(),
        );
        let login: Login = ctx.should_bind().unwrap();
        assert_eq!(login.user, "alice");

        let ctx = context("/login", None, r#"{"user":"alice"}"#, Params::default());
        assert!(matches!(
            ctx.should_bind::<Login>(),
            Err(Error::UnsupportedContentType(_))
        ));
    }

    #[test]
    fn json_response_sets_status_and_content_type() {
        let ctx = context("/", None, "", Params::default());
        let response = ctx.json(StatusCode::CREATED, &serde_json::json!({"ok": true}));

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn string_and_html_responses() {
        let ctx = context("/", None, "", Params::default());

        let response = ctx.string(StatusCode::OK, "hello");
        assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), "text/plain");

        let response = ctx.html(StatusCode::OK, "<h1>hello</h1>");
        assert_eq!(response.headers().get(CONTENT_TYPE).unwrap(), "text/html");
    }
}
