//! Wicket: a minimal HTTP framework.
//!
//! Routes live in a per-method prefix trie ([`wicket_router`]) with support
//! for `:param` and trailing `*catch_all` segments. Registration happens on
//! a mutable [`Engine`] at startup and fails fast on conflicting patterns;
//! serving shares the finished engine read-only across connection tasks.
//!
//! ```no_run
//! use hyper::StatusCode;
//! use wicket::Engine;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), wicket::Error> {
//!     let mut engine = Engine::new();
//!     engine.get("/users/:id", |ctx| async move {
//!         let id = ctx.param("id").unwrap_or_default().to_string();
//!         ctx.string(StatusCode::OK, id)
//!     })?;
//!     engine.serve(([127, 0, 0, 1], 9091).into()).await
//! }
//! ```

pub mod bind;
pub mod context;
pub mod engine;
pub mod error;
pub mod group;
pub mod logging;

pub use context::{Context, Response};
pub use engine::Engine;
pub use error::Error;
pub use group::RouteGroup;
pub use logging::LogFormat;

pub use wicket_router::{Params, RouteError};
