use crate::list::list_all;
use homepage_links_core::{
    CollectRoutes, Outcome, RouteLink, RouteSource, Scheme, SourceKind,
};
use homepage_links_k8s_api::{gateway::HTTPRoute, Client};
use tokio::time::Duration;

/// Lists Gateway API `gateway.networking.k8s.io/v1` HTTPRoutes in all
/// namespaces.
///
/// Clusters without the Gateway API CRDs report [`Outcome::NotInstalled`].
#[derive(Clone)]
pub struct HttpRouteCollector {
    client: Client,
    timeout: Duration,
}

// === impl HttpRouteCollector ===

impl HttpRouteCollector {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait::async_trait]
impl CollectRoutes for HttpRouteCollector {
    fn kind(&self) -> SourceKind {
        SourceKind::HttpRoute
    }

    async fn collect(&self) -> Outcome {
        match list_all::<HTTPRoute>(&self.client, self.timeout).await {
            Ok(routes) => Outcome::Listed(routes.iter().flat_map(links).collect()),
            Err(outcome) => outcome,
        }
    }
}

/// Returns a link for each (match path, hostname) pair of the route.
///
/// Routes are always linked over `https`: TLS termination for an HTTPRoute is
/// configured on its parent Gateway, which isn't inspected here. Rules are
/// walked in order; a rule without matches links to each bare hostname. A
/// route with no matches in any rule links to each bare hostname once.
pub fn links(route: &HTTPRoute) -> Vec<RouteLink> {
    let hostnames = route
        .spec
        .hostnames
        .iter()
        .flatten()
        .map(String::as_str)
        .filter(|hostname| !hostname.is_empty())
        .collect::<Vec<_>>();
    if hostnames.is_empty() {
        return Vec::new();
    }

    let source = RouteSource::new(
        SourceKind::HttpRoute,
        route.metadata.namespace.as_deref(),
        route.metadata.name.as_deref(),
    );
    let bare = |links: &mut Vec<RouteLink>| {
        for hostname in &hostnames {
            links.push(source.link(&Scheme::HTTPS, hostname, None));
        }
    };

    let rules = route
        .spec
        .rules
        .iter()
        .flatten()
        .map(|rule| rule.matches.as_deref().unwrap_or_default())
        .collect::<Vec<_>>();

    let mut links = Vec::new();
    if rules.iter().all(|matches| matches.is_empty()) {
        bare(&mut links);
        return links;
    }

    for matches in rules {
        if matches.is_empty() {
            bare(&mut links);
            continue;
        }

        for route_match in matches {
            let path = route_match
                .path
                .as_ref()
                .and_then(|path| path.value.as_deref())
                .filter(|path| !path.is_empty())
                .unwrap_or("/");
            for hostname in &hostnames {
                links.push(source.link(&Scheme::HTTPS, hostname, Some(path)));
            }
        }
    }
    links
}
