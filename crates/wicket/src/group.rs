//! Route groups: register routes under a shared pattern prefix.

use std::future::Future;

use hyper::Method;

use crate::context::{Context, Response};
use crate::{Engine, Error};

/// A registration handle that prepends a prefix to every pattern.
///
/// Groups nest; prefixes accumulate. The group borrows the engine, so all
/// grouping happens before serving starts.
pub struct RouteGroup<'e> {
    engine: &'e mut Engine,
    prefix: String,
}

impl<'e> RouteGroup<'e> {
    pub(crate) fn new(engine: &'e mut Engine, prefix: &str) -> Self {
        Self {
            engine,
            prefix: prefix.to_string(),
        }
    }

    /// A nested group; its prefix is appended to this group's.
    pub fn group(&mut self, prefix: &str) -> RouteGroup<'_> {
        RouteGroup {
            engine: &mut *self.engine,
            prefix: format!("{}{}", self.prefix, prefix),
        }
    }

    pub fn add_route<F, Fut>(&mut self, method: &str, pattern: &str, handler: F) -> Result<(), Error>
    where
        F: Fn(Context) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Response> + Send + 'static,
    {
        let full = format!("{}{}", self.prefix, pattern);
        self.engine.add_route(method, &full, handler)
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
}
