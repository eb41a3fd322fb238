//! The engine: route registration and the HTTP serving loop.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::pin::Pin;
use std::sync::Arc;

use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::http::request::Parts;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, StatusCode};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use wicket_router::{RouteMatch, Router};

use crate::context::{respond, Context, Response};
use crate::{Error, RouteGroup};

/// Boxed future produced by a handler invocation.
type HandlerFuture = Pin<Box<dyn Future<Output = Response> + Send>>;

/// A registered request handler.
pub(crate) type Handler = Arc<dyn Fn(Context) -> HandlerFuture + Send + Sync>;

/// The framework entry point: register routes, then serve.
///
/// Registration happens on `&mut self` before serving starts; `serve`
/// consumes the engine and shares it immutably across connection tasks, so
/// the route table needs no locking on the request path.
#[derive(Default)]
pub struct Engine {
    pub(crate) router: Router<Handler>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler for an arbitrary method.
    ///
    /// Fails fast on conflicting or malformed patterns so a broken route
    /// table is caught before the server starts.
    pub fn add_route<F, Fut>(&mut self, method: &str, pattern: &str, handler: F) -> Result<(), Error>
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let handler: Handler = Arc::new(move |ctx| Box::pin(handler(ctx)));
        self.router.insert(method, pattern, handler)?;
        Ok(())
    }

    pub fn get<F, Fut>(&mut self, pattern: &str, handler: F) -> Result<(), Error>
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.add_route(Method::GET.as_str(), pattern, handler)
    }

    pub fn post<F, Fut>(&mut self, pattern: &str, handler: F) -> Result<(), Error>
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.add_route(Method::POST.as_str(), pattern, handler)
    }

    pub fn put<F, Fut>(&mut self, pattern: &str, handler: F) -> Result<(), Error>
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.add_route(Method::PUT.as_str(), pattern, handler)
    }

    pub fn delete<F, Fut>(&mut self, pattern: &str, handler: F) -> Result<(), Error>
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.add_route(Method::DELETE.as_str(), pattern, handler)
    }

    pub fn patch<F, Fut>(&mut self, pattern: &str, handler: F) -> Result<(), Error>
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.add_route(Method::PATCH.as_str(), pattern, handler)
    }

    pub fn head<F, Fut>(&mut self, pattern: &str, handler: F) -> Result<(), Error>
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.add_route(Method::HEAD.as_str(), pattern, handler)
    }

    pub fn options<F, Fut>(&mut self, pattern: &str, handler: F) -> Result<(), Error>
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        self.add_route(Method::OPTIONS.as_str(), pattern, handler)
    }

    /// Start a route group with a shared pattern prefix.
    pub fn group(&mut self, prefix: &str) -> RouteGroup<'_> {
        RouteGroup::new(self, prefix)
    }

    /// Bind and serve until the process is killed.
    ///
    /// One task per connection; the engine itself is shared read-only.
    pub async fn serve(self, addr: SocketAddr) -> Result<(), Error> {
        let listener = TcpListener::bind(addr).await?;

        for (method, pattern) in self.router.routes() {
            tracing::debug!(method, pattern, "route registered");
        }
        tracing::info!(%addr, routes = self.router.len(), "listening");

        let engine = Arc::new(self);
        loop {
            let (stream, remote) = match listener.accept().await {
                Ok(conn) => conn,
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                    continue;
                }
            };

            let engine = Arc::clone(&engine);
            let io = TokioIo::new(stream);

            tokio::spawn(async move {
                let service = service_fn(move |req| {
                    let engine = Arc::clone(&engine);
                    async move { engine.handle(req).await }
                });

                if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                    tracing::debug!(error = %e, %remote, "connection error");
                }
            });
        }
    }

    /// Handle one request: collect the body, then dispatch.
    async fn handle(&self, req: Request<Incoming>) -> Result<Response, Infallible> {
        let (parts, body) = req.into_parts();
        let body = match body.collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read request body");
                return Ok(respond(
                    StatusCode::BAD_REQUEST,
                    "text/plain",
                    Bytes::from_static(b"failed to read request body"),
                ));
            }
        };
        Ok(self.dispatch(parts, body).await)
    }

    /// Resolve the route and invoke its handler, or answer 404.
    async fn dispatch(&self, parts: Parts, body: Bytes) -> Response {
        let method = parts.method.clone();
        let path = parts.uri.path().to_string();

        let response = match self.router.resolve(method.as_str(), &path) {
            RouteMatch::Found {
                handler,
                pattern,
                params,
            } => {
                tracing::debug!(%method, path, pattern, "matched route");
                let handler = Arc::clone(handler);
                handler(Context::new(parts, body, params)).await
            }
            RouteMatch::NotFound => not_found(&path),
        };

        tracing::info!(
            %method,
            path,
            status = response.status().as_u16(),
            "request completed"
        );
        response
    }
}

/// The stock 404 response for unmatched requests.
fn not_found(path: &str) -> Response {
    respond(
        StatusCode::NOT_FOUND,
        "text/plain",
        Bytes::from(format!("404 NOT FOUND -- {}", path)),
    )
}
