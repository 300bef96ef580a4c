use crate::{HttpRouteCollector, IngressCollector, Resolver};
use homepage_links_core::{CollectRoutes, DiscoverRoutes, DiscoveryResult, Outcome};
use tracing::{debug, error, warn};

/// Discovers routes in whichever cluster the [`Resolver`] connects to.
///
/// Every pass resolves a new client; nothing is shared between passes.
#[derive(Clone, Debug, Default)]
pub struct Discover {
    resolver: Resolver,
}

// === impl Discover ===

impl Discover {
    pub fn new(resolver: Resolver) -> Self {
        Self { resolver }
    }
}

#[async_trait::async_trait]
impl DiscoverRoutes for Discover {
    async fn discover(&self) -> anyhow::Result<DiscoveryResult> {
        let Some(cx) = self.resolver.resolve().await else {
            return Ok(DiscoveryResult::not_in_cluster());
        };

        let timeout = self.resolver.timeout();
        let ingresses = IngressCollector::new(cx.client.clone(), timeout);
        let http_routes = HttpRouteCollector::new(cx.client, timeout);
        let collectors: [&dyn CollectRoutes; 2] = [&ingresses, &http_routes];
        Ok(aggregate(&collectors).await)
    }
}

/// Runs each collector in order and concatenates their links.
///
/// A collector that fails contributes no links; the result is always
/// in-cluster.
pub async fn aggregate(collectors: &[&dyn CollectRoutes]) -> DiscoveryResult {
    let mut routes = Vec::new();
    for collector in collectors {
        let kind = collector.kind();
        match collector.collect().await {
            Outcome::Listed(links) => {
                debug!(%kind, routes = links.len(), "Listed routes");
                routes.extend(links);
            }
            Outcome::NotInstalled => debug!(%kind, "Resource type not installed"),
            Outcome::Unreachable(error) => warn!(%kind, %error, "API server unreachable"),
            Outcome::Failed(error) => error!(%kind, %error, "Failed to list routes"),
        }
    }
    DiscoveryResult::in_cluster(routes)
}
