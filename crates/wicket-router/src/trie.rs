use std::collections::HashMap;

use thiserror::Error;

/// The routing trie. Maps HTTP methods + paths to registered handlers.
///
/// One trie root per HTTP method. Built single-threaded at startup, then
/// read-only while serving; share it behind an `Arc` once registration is
/// done.
#[derive(Debug)]
pub struct Router<T> {
    /// Per-method trie roots.
    roots: HashMap<String, Node>,
    /// Flat (method, pattern) -> handler table, written at insertion time.
    handlers: HashMap<(String, String), T>,
}

/// A single node in the prefix trie. Represents one segment position
/// shared by all patterns with that prefix.
#[derive(Debug, Default)]
struct Node {
    /// The segment this node matches (`users`, `:id`, `*path`).
    /// Empty for the per-method root.
    segment: String,
    /// Static children keyed by segment text.
    static_children: HashMap<String, Node>,
    /// Parameter or catch-all child. At most one per node: a wild child
    /// matches every literal at this position, so a second one could never
    /// be reached deterministically.
    wild_child: Option<Box<Node>>,
    /// The full pattern string if a registered route ends exactly here.
    pattern: Option<String>,
}

/// Errors raised at route registration time.
///
/// These are fail-fast: a process should not start serving with a broken
/// route table. Lookup itself never errors; a miss is [`RouteMatch::NotFound`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    /// Two wild segments (`:name` or `*name`) registered at the same depth.
    /// Allowing both would make dispatch depend on registration order.
    #[error("route conflict in `{pattern}`: wild segment `{offered}` clashes with existing `{existing}`")]
    Conflict {
        pattern: String,
        existing: String,
        offered: String,
    },

    /// A catch-all segment (`*name`) in a non-final position.
    #[error("malformed pattern `{pattern}`: catch-all `{segment}` must be the last segment")]
    MalformedPattern { pattern: String, segment: String },
}

/// The result of a route lookup.
#[derive(Debug)]
pub enum RouteMatch<'a, T> {
    /// Matched a registered pattern.
    Found {
        handler: &'a T,
        /// The pattern the request matched, as registered.
        pattern: &'a str,
        params: Params,
    },
    /// No registered pattern matched.
    NotFound,
}

/// Parameters captured from a matched path, in pattern order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    /// Look up a captured parameter by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over (name, value) pairs in the order they appear in the
    /// pattern.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    fn push(&mut self, name: &str, value: String) {
        self.0.push((name.to_string(), value));
    }
}

impl Node {
    fn new(segment: &str) -> Self {
        Self {
            segment: segment.to_string(),
            ..Self::default()
        }
    }
}

impl<T> Default for Router<T> {
    fn default() -> Self {
        Self {
            roots: HashMap::new(),
            handlers: HashMap::new(),
        }
    }
}

impl<T> Router<T> {
    /// Create a new empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route.
    ///
    /// Pattern segments starting with `:` capture one path segment; a final
    /// segment starting with `*` captures the whole remaining path. Method
    /// comparison is case-insensitive (stored uppercase).
    ///
    /// Re-registering an identical (method, pattern) pair replaces the
    /// handler (last write wins). Registering a second wild segment at a
    /// depth that already has one fails with [`RouteError::Conflict`].
    pub fn insert(&mut self, method: &str, pattern: &str, handler: T) -> Result<(), RouteError> {
        let segments = parse_pattern(pattern)?;
        let method = method.to_uppercase();

        let mut current = self.roots.entry(method.clone()).or_default();
        for segment in &segments {
            current = if is_wild(segment) {
                if let Some(existing) = &current.wild_child {
                    if existing.segment != *segment {
                        return Err(RouteError::Conflict {
                            pattern: pattern.to_string(),
                            existing: existing.segment.clone(),
                            offered: (*segment).to_string(),
                        });
                    }
                }
                if current.wild_child.is_none() {
                    current.wild_child = Some(Box::new(Node::new(segment)));
                }
                current.wild_child.as_deref_mut().expect("just set above")
            } else {
                current
                    .static_children
                    .entry((*segment).to_string())
                    .or_insert_with(|| Node::new(segment))
            };
        }
        current.pattern = Some(pattern.to_string());

        self.handlers
            .insert((method, pattern.to_string()), handler);
        Ok(())
    }

    /// Look up a request path.
    ///
    /// Path should be an actual request path (not a template), already
    /// unescaped by the caller. Duplicate and trailing slashes are ignored.
    pub fn resolve(&self, method: &str, path: &str) -> RouteMatch<'_, T> {
        let method = method.to_uppercase();
        let Some(root) = self.roots.get(&method) else {
            return RouteMatch::NotFound;
        };

        let segments = tokenize(path);
        let Some(node) = search(root, &segments, 0) else {
            return RouteMatch::NotFound;
        };
        let Some(pattern) = node.pattern.as_deref() else {
            return RouteMatch::NotFound;
        };
        let Some(handler) = self.handlers.get(&(method, pattern.to_string())) else {
            return RouteMatch::NotFound;
        };

        RouteMatch::Found {
            handler,
            pattern,
            params: bind_params(pattern, &segments),
        }
    }

    /// Number of registered (method, pattern) pairs.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Iterate over registered (method, pattern) pairs, for startup dumps.
    /// Order is unspecified.
    pub fn routes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.handlers
            .keys()
            .map(|(method, pattern)| (method.as_str(), pattern.as_str()))
    }
}

/// Depth-first search with backtracking.
///
/// A node terminates the walk when the request segments are exhausted or the
/// node itself is a catch-all (it has conceptually consumed the rest of the
/// path). A terminated branch matches only if a registered pattern ends
/// there. At each depth the static child is tried before the wild child, so
/// `/users/me` beats `/users/:id` regardless of registration order.
fn search<'a>(node: &'a Node, segments: &[&str], depth: usize) -> Option<&'a Node> {
    if depth == segments.len() || node.segment.starts_with('*') {
        return node.pattern.is_some().then_some(node);
    }

    if let Some(child) = node.static_children.get(segments[depth]) {
        if let Some(found) = search(child, segments, depth + 1) {
            return Some(found);
        }
    }

    // Backtrack into the wild child if the static branch dead-ended.
    if let Some(child) = &node.wild_child {
        if let Some(found) = search(child, segments, depth + 1) {
            return Some(found);
        }
    }

    None
}

/// Bind the wild segments of a matched pattern to the request segments.
///
/// Walks the pattern and the request path in lock-step: `:name` binds the
/// segment at its position, `*name` binds the `/`-joined remainder and stops.
/// A bare `*` matches without binding anything.
fn bind_params(pattern: &str, segments: &[&str]) -> Params {
    let mut params = Params::default();
    for (i, part) in tokenize(pattern).iter().enumerate() {
        if let Some(name) = part.strip_prefix(':') {
            if let Some(value) = segments.get(i) {
                params.push(name, (*value).to_string());
            }
        } else if let Some(name) = part.strip_prefix('*') {
            if !name.is_empty() && i < segments.len() {
                params.push(name, segments[i..].join("/"));
            }
            break;
        }
    }
    params
}

/// Split a path into non-empty segments, stopping after a catch-all.
///
/// Empty segments are dropped, so `/a//b/` tokenizes like `/a/b`. The root
/// path yields no segments. Truncating at `*` guarantees a catch-all is
/// always the last segment considered during matching.
pub fn tokenize(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        segments.push(segment);
        if segment.starts_with('*') {
            break;
        }
    }
    segments
}

/// Tokenize a registration-time pattern, rejecting a catch-all anywhere but
/// the final position rather than silently truncating the tail.
fn parse_pattern(pattern: &str) -> Result<Vec<&str>, RouteError> {
    let segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
    for (i, segment) in segments.iter().enumerate() {
        if segment.starts_with('*') && i + 1 != segments.len() {
            return Err(RouteError::MalformedPattern {
                pattern: pattern.to_string(),
                segment: (*segment).to_string(),
            });
        }
    }
    Ok(segments)
}

fn is_wild(segment: &str) -> bool {
    segment.starts_with(':') || segment.starts_with('*')
}
