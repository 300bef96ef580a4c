use crate::list::list_all;
use homepage_links_core::{
    CollectRoutes, Outcome, RouteLink, RouteSource, Scheme, SourceKind,
};
use homepage_links_k8s_api::{Client, Ingress};
use tokio::time::Duration;

/// Lists `networking.k8s.io/v1` Ingresses in all namespaces.
#[derive(Clone)]
pub struct IngressCollector {
    client: Client,
    timeout: Duration,
}

// === impl IngressCollector ===

impl IngressCollector {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }
}

#[async_trait::async_trait]
impl CollectRoutes for IngressCollector {
    fn kind(&self) -> SourceKind {
        SourceKind::Ingress
    }

    async fn collect(&self) -> Outcome {
        match list_all::<Ingress>(&self.client, self.timeout).await {
            Ok(ingresses) => Outcome::Listed(ingresses.iter().flat_map(links).collect()),
            Err(outcome) => outcome,
        }
    }
}

/// Returns a link for each host/path pair declared by the Ingress.
///
/// The scheme is `https` when the Ingress has any TLS configuration, which
/// applies to all of its rules. Rules without a host are skipped; a rule
/// without paths links to its bare host.
pub fn links(ingress: &Ingress) -> Vec<RouteLink> {
    let Some(spec) = ingress.spec.as_ref() else {
        return Vec::new();
    };
    let rules = spec.rules.as_deref().unwrap_or_default();
    if rules.is_empty() {
        return Vec::new();
    }

    let scheme = if spec.tls.as_ref().is_some_and(|tls| !tls.is_empty()) {
        Scheme::HTTPS
    } else {
        Scheme::HTTP
    };
    let source = RouteSource::new(
        SourceKind::Ingress,
        ingress.metadata.namespace.as_deref(),
        ingress.metadata.name.as_deref(),
    );

    let mut links = Vec::new();
    for rule in rules {
        let Some(host) = rule.host.as_deref().filter(|host| !host.is_empty()) else {
            continue;
        };

        let paths = rule
            .http
            .as_ref()
            .map(|http| http.paths.as_slice())
            .unwrap_or_default();
        if paths.is_empty() {
            links.push(source.link(&scheme, host, None));
            continue;
        }

        for path in paths {
            let path = path
                .path
                .as_deref()
                .filter(|path| !path.is_empty())
                .unwrap_or("/");
            links.push(source.link(&scheme, host, Some(path)));
        }
    }
    links
}
