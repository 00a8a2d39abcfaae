//! # postbox
//!
//! A small JSON HTTP service over an in-memory collection of posts.
//!
//! ## What lives where
//!
//! - [`PostStore`]: owns the posts, assigns ids, and implements create,
//!   list/sort, search, update and delete. One lock, held for each whole
//!   operation.
//! - [`api`]: the `/api/posts` endpoints, mapping store results to status
//!   codes and `{"error": …, "status": …}` bodies.
//! - [`Router`] / [`Server`]: radix-tree routing via [`matchit`], hyper
//!   connections, CORS for any origin, graceful shutdown on SIGTERM / Ctrl-C.
//!
//! Nothing is persisted. A restart brings back the two seed posts.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use postbox::{Config, PostStore, Server, api};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let app = api::router(PostStore::seeded());
//!
//!     Server::bind(config.addr).serve(app).await?;
//!     Ok(())
//! }
//! ```
//!
//! Or drive the router directly, no sockets involved:
//!
//! ```rust
//! use postbox::{Method, PostStore, Request, api};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let app = api::router(PostStore::seeded());
//! let res = app.handle(Request::new(Method::Get, "/api/posts/search?title=first")).await;
//! assert_eq!(res.status_code(), 200);
//! # }
//! ```

mod config;
mod cors;
mod error;
mod handler;
mod method;
mod post;
mod request;
mod response;
mod router;
mod server;
mod status;
mod store;

pub mod api;

pub use config::Config;
pub use error::{Error, StoreError};
pub use handler::Handler;
pub use method::Method;
pub use post::{ListParams, Post, PostInput, SearchParams, SortDirection, SortField, parse_id};
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
pub use store::PostStore;
