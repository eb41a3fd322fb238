//! Prefix-trie HTTP request router.
//!
//! Stores route patterns (`/users/:id`, `/files/*path`) in one trie per
//! HTTP method and matches request paths against them. Supports path
//! parameter capture, static-over-wild precedence with backtracking, and
//! fail-fast conflict detection at registration time.

pub mod trie;

pub use trie::{Params, RouteError, RouteMatch, Router};
