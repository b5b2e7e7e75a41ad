use std::fmt;
use tracing::debug;
use url::Url;

/// Canonical route key: no leading/trailing slash, no query. Empty is root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NormalizedPath(String);

impl NormalizedPath {
    /// The root path (`""`)
    #[must_use]
    pub fn root() -> Self {
        Self(String::new())
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Slash-separated segments, left to right. The root path has none.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|_| !self.0.is_empty())
    }

    /// Segment at `index`, if the path is that long.
    #[must_use]
    pub fn segment(&self, index: usize) -> Option<&str> {
        self.segments().nth(index)
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Parent directory of the script name, following `dirname` conventions:
/// `/app/index.php` → `/app`, `/index.php` → `/`, `index.php` → `.`.
fn script_dir(script_name: &str) -> &str {
    let trimmed = script_name.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) => "/",
        Some(idx) => &trimmed[..idx],
        None if script_name.starts_with('/') => "/",
        None => ".",
    }
}

/// Remove the script name, or failing that its directory, from the front of the URI.
fn strip_base<'a>(uri: &'a str, script_name: &str) -> &'a str {
    if let Some(rest) = uri.strip_prefix(script_name) {
        return rest;
    }
    uri.strip_prefix(script_dir(script_name)).unwrap_or(uri)
}

/// Split a URI into its path part and its raw query string (if any).
#[must_use]
pub fn split_query(uri: &str) -> (&str, Option<&str>) {
    match uri.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (uri, None),
    }
}

/// Drop scheme and authority when the remainder still looks like a URL.
fn path_component(uri: &str) -> String {
    if uri.contains("://") || uri.starts_with("//") {
        let parsed = Url::parse(uri).or_else(|_| {
            Url::parse("http://localhost/").and_then(|base| base.join(uri))
        });
        if let Ok(url) = parsed {
            return url.path().to_string();
        }
    }
    uri.to_string()
}

fn route_part<'a>(uri: &'a str, script_name: &str) -> &'a str {
    let uri = strip_base(uri, script_name);
    let uri = uri.strip_prefix("?/").unwrap_or(uri);
    split_query(uri).0
}

/// Normalize a raw request URI against the script/base prefix.
///
/// The traversal rewrite is a single pass; see [`normalize_strict`].
#[must_use]
pub fn normalize(uri: &str, script_name: &str) -> NormalizedPath {
    let route = route_part(uri, script_name);
    if route.is_empty() || route == "/" {
        debug!(uri = %uri, "Request targets root path");
        return NormalizedPath::root();
    }

    let path = path_component(route).replace("../", "/");
    let mut collapsed = String::with_capacity(path.len());
    for c in path.chars() {
        if c == '/' && collapsed.ends_with('/') {
            continue;
        }
        collapsed.push(c);
    }
    let normalized = collapsed.trim_matches('/').to_string();

    debug!(uri = %uri, script_name = %script_name, path = %normalized, "Request path normalized");
    NormalizedPath(normalized)
}

/// Like [`normalize`], but repeats until no empty, `.` or `..` segment is left.
///
/// Idempotent for every input.
#[must_use]
pub fn normalize_strict(uri: &str, script_name: &str) -> NormalizedPath {
    let mut current = normalize(uri, script_name).0;
    loop {
        let next = current
            .split('/')
            .filter(|s| !s.is_empty() && *s != "." && *s != "..")
            .collect::<Vec<_>>()
            .join("/");
        if next == current {
            return NormalizedPath(next);
        }
        current = next;
    }
}
