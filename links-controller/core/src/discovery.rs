use crate::{RouteLink, SourceKind};
use serde::Serialize;

/// The result of a single discovery pass, as served to the dashboard.
///
/// Routes may only be present when a cluster connection was established; the
/// constructors are the only way to build a result so that this holds.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DiscoveryResult {
    #[serde(rename = "isInCluster")]
    in_cluster: bool,

    #[serde(rename = "ingresses")]
    routes: Vec<RouteLink>,

    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// What a single collector observed while listing its resource type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The list call succeeded.
    Listed(Vec<RouteLink>),

    /// The API server does not serve this resource type.
    NotInstalled,

    /// The API server could not be reached or did not answer in time.
    Unreachable(String),

    /// Any other failure, e.g. a forbidden list or an undecodable response.
    Failed(String),
}

/// Lists one kind of routing resource and normalizes it into links.
///
/// Implementations must not fail their caller: every failure is reported as
/// an [`Outcome`] variant.
#[async_trait::async_trait]
pub trait CollectRoutes: Send + Sync {
    fn kind(&self) -> SourceKind;

    async fn collect(&self) -> Outcome;
}

/// Runs a complete discovery pass.
///
/// An `Err` indicates that the pass itself failed, not that a collector did.
#[async_trait::async_trait]
pub trait DiscoverRoutes: Send + Sync {
    async fn discover(&self) -> anyhow::Result<DiscoveryResult>;
}

// === impl DiscoveryResult ===

impl DiscoveryResult {
    /// No connection to a cluster could be established.
    pub fn not_in_cluster() -> Self {
        Self::default()
    }

    pub fn in_cluster(routes: Vec<RouteLink>) -> Self {
        Self {
            in_cluster: true,
            routes,
            error: None,
        }
    }

    /// The pass failed for a reason not attributable to a single collector.
    pub fn failed(error: impl ToString) -> Self {
        Self {
            in_cluster: false,
            routes: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    pub fn is_in_cluster(&self) -> bool {
        self.in_cluster
    }

    pub fn routes(&self) -> &[RouteLink] {
        &self.routes
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn into_routes(self) -> Vec<RouteLink> {
        self.routes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RouteSource, Scheme};
    use pretty_assertions::assert_eq;

    fn link() -> RouteLink {
        RouteSource::new(SourceKind::Ingress, Some("ns"), Some("web")).link(
            &Scheme::HTTPS,
            "web.example.com",
            Some("/"),
        )
    }

    #[test]
    fn not_in_cluster_has_no_routes() {
        let result = DiscoveryResult::not_in_cluster();
        assert!(!result.is_in_cluster());
        assert!(result.routes().is_empty());
        assert_eq!(result.error(), None);
    }

    #[test]
    fn failed_has_no_routes() {
        let result = DiscoveryResult::failed("boom");
        assert!(!result.is_in_cluster());
        assert!(result.routes().is_empty());
        assert_eq!(result.error(), Some("boom"));
    }

    #[test]
    fn serializes_wire_names() {
        let json = serde_json::to_value(DiscoveryResult::in_cluster(vec![link()]))
            .expect("result must serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "isInCluster": true,
                "ingresses": [{
                    "title": "web.example.com/ (ns/web)",
                    "url": "https://web.example.com/",
                    "description": "Ingress: web in namespace ns",
                }],
            })
        );
    }

    #[test]
    fn serializes_error_only_when_set() {
        let json = serde_json::to_value(DiscoveryResult::not_in_cluster())
            .expect("result must serialize");
        assert_eq!(
            json,
            serde_json::json!({ "isInCluster": false, "ingresses": [] })
        );

        let json = serde_json::to_value(DiscoveryResult::failed("connection reset"))
            .expect("result must serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "isInCluster": false,
                "ingresses": [],
                "error": "connection reset",
            })
        );
    }
}
