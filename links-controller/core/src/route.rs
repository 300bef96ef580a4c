use crate::{DEFAULT_NAMESPACE, UNKNOWN_NAME};
use http::uri::Scheme;
use serde::Serialize;
use std::fmt;

/// A single routable link discovered in the cluster.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct RouteLink {
    pub title: String,
    pub url: String,
    pub description: String,
}

/// The kind of cluster resource a link was derived from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SourceKind {
    Ingress,
    HttpRoute,
}

/// Identifies the resource that produced a set of links.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteSource {
    pub kind: SourceKind,
    pub namespace: String,
    pub name: String,
}

// === impl SourceKind ===

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ingress => "Ingress",
            Self::HttpRoute => "HTTPRoute",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// === impl RouteSource ===

impl RouteSource {
    /// Builds a source from optional resource metadata, falling back to the
    /// `default` namespace and the `unknown` name.
    pub fn new(kind: SourceKind, namespace: Option<&str>, name: Option<&str>) -> Self {
        Self {
            kind,
            namespace: namespace.unwrap_or(DEFAULT_NAMESPACE).to_string(),
            name: name.unwrap_or(UNKNOWN_NAME).to_string(),
        }
    }

    pub fn description(&self) -> String {
        format!("{}: {} in namespace {}", self.kind, self.name, self.namespace)
    }

    /// Builds a link to `host`, optionally suffixed with `path`.
    ///
    /// The path is appended verbatim, so callers must supply it with its
    /// leading slash.
    pub fn link(&self, scheme: &Scheme, host: &str, path: Option<&str>) -> RouteLink {
        let path = path.unwrap_or_default();
        RouteLink {
            title: format!("{host}{path} ({}/{})", self.namespace, self.name),
            url: format!("{scheme}://{host}{path}"),
            description: self.description(),
        }
    }
}
