//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. The router also owns the
//! application state and hands an `Arc` of it to every handler it calls.

use std::collections::HashMap;
use std::sync::Arc;

use matchit::Router as MatchitRouter;
use tracing::debug;

use crate::cors;
use crate::handler::{BoxedHandler, Handler};
use crate::method::{Method, join};
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

/// The application router.
///
/// Build it once at startup around the shared state; pass it to
/// [`Server::serve`](crate::Server::serve). Each [`Router::on`] call returns
/// `self` so registrations chain naturally.
pub struct Router<S> {
    state: Arc<S>,
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
}

impl<S: Send + Sync + 'static> Router<S> {
    pub fn new(state: S) -> Self {
        Self { state: Arc::new(state), routes: HashMap::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them:
    ///
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use postbox::{Method, PostStore, Request, Response, Router, Status};
    /// # async fn get_post(_: Arc<PostStore>, _: Request) -> Response { Response::status(Status::Ok) }
    /// # async fn create_post(_: Arc<PostStore>, _: Request) -> Response { Response::status(Status::Ok) }
    /// Router::new(PostStore::new())
    ///     .on(Method::Get,  "/api/posts/{id}", get_post)
    ///     .on(Method::Post, "/api/posts",      create_post);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Routes one request and produces one response.
    ///
    /// Unknown paths get `404`. A path that exists under other methods gets
    /// `405` with an `allow` header, or a CORS preflight answer for
    /// `OPTIONS`. `HEAD` falls back to the `GET` route and drops the body.
    /// Every response carries the CORS origin header.
    pub async fn handle(&self, req: Request) -> Response {
        let method = req.method();
        let path = req.path().to_owned();

        let route = self.lookup(method, &path).or_else(|| match method {
            Method::Head => self.lookup(Method::Get, &path),
            _ => None,
        });

        let mut response = match route {
            Some((handler, params)) => {
                handler.call(Arc::clone(&self.state), req.with_params(params)).await
            }
            None => {
                let allowed = self.allowed(&path);
                if allowed.is_empty() {
                    Response::error(Status::NotFound, "Not Found")
                } else if method == Method::Options {
                    cors::preflight(&req, &allowed)
                } else {
                    let mut res = Response::error(Status::MethodNotAllowed, "Method Not Allowed");
                    res.set_header("allow", &join(&allowed));
                    res
                }
            }
        };

        if method == Method::Head {
            response.clear_body();
        }

        let response = cors::allow_any_origin(response);
        debug!(%method, path = %path, status = response.status_code(), "request handled");
        response
    }

    fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler<S>, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }

    /// Methods with a route matching `path`, in a stable order.
    fn allowed(&self, path: &str) -> Vec<Method> {
        let mut methods: Vec<Method> = self.routes.iter()
            .filter(|(_, tree)| tree.at(path).is_ok())
            .map(|(method, _)| *method)
            .collect();
        if methods.contains(&Method::Get) && !methods.contains(&Method::Head) {
            methods.push(Method::Head);
        }
        methods.sort_by_key(|m| m.as_str());
        methods
    }
}
