use super::*;
use crate::{aggregate, Discover, Resolver, Strategy};
use homepage_links_core::{DiscoverRoutes, RouteLink, RouteSource, Scheme};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use tokio::time::Duration;

fn gateway_links() -> Vec<RouteLink> {
    let source = RouteSource::new(SourceKind::HttpRoute, Some("ns-0"), Some("route-0"));
    vec![
        source.link(&Scheme::HTTPS, "h1", Some("/p")),
        source.link(&Scheme::HTTPS, "h2", Some("/p")),
    ]
}

fn ingress_links() -> Vec<RouteLink> {
    let source = RouteSource::new(SourceKind::Ingress, Some("ns-0"), Some("web"));
    vec![source.link(&Scheme::HTTP, "a.example.com", Some("/x"))]
}

#[tokio::test]
async fn concatenates_ingresses_then_http_routes() {
    let ingresses = StaticCollector::new(SourceKind::Ingress, Outcome::Listed(ingress_links()));
    let routes = StaticCollector::new(SourceKind::HttpRoute, Outcome::Listed(gateway_links()));

    let result = aggregate(&[&ingresses, &routes]).await;
    assert!(result.is_in_cluster());
    assert_eq!(result.error(), None);
    assert_eq!(
        result.into_routes(),
        ingress_links().into_iter().chain(gateway_links()).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn failed_collector_does_not_block_the_other() {
    let errors = ErrorCount::default();
    let _tracing = errors.set_default();

    let ingresses = StaticCollector::new(
        SourceKind::Ingress,
        Outcome::Failed("403 Forbidden: ingresses is forbidden".to_string()),
    );
    let routes = StaticCollector::new(SourceKind::HttpRoute, Outcome::Listed(gateway_links()));

    let result = aggregate(&[&ingresses, &routes]).await;
    assert!(result.is_in_cluster());
    assert_eq!(result.error(), None);
    assert_eq!(result.routes(), gateway_links().as_slice());
    assert_eq!(errors.get(), 1, "collector failures must be logged");
}

#[tokio::test]
async fn unreachable_collector_does_not_block_the_other() {
    let ingresses = StaticCollector::new(SourceKind::Ingress, Outcome::Listed(ingress_links()));
    let routes = StaticCollector::new(
        SourceKind::HttpRoute,
        Outcome::Unreachable("list timed out after 10ms".to_string()),
    );

    let result = aggregate(&[&ingresses, &routes]).await;
    assert!(result.is_in_cluster());
    assert_eq!(result.routes(), ingress_links().as_slice());
}

#[tokio::test]
async fn missing_gateway_api_is_not_an_error() {
    let errors = ErrorCount::default();
    let _tracing = errors.set_default();

    let ingresses = StaticCollector::new(SourceKind::Ingress, Outcome::Listed(ingress_links()));
    let not_installed = StaticCollector::new(SourceKind::HttpRoute, Outcome::NotInstalled);
    let empty = StaticCollector::new(SourceKind::HttpRoute, Outcome::Listed(vec![]));

    let absent = aggregate(&[&ingresses, &not_installed]).await;
    let listed = aggregate(&[&ingresses, &empty]).await;
    assert_eq!(absent, listed);
    assert_eq!(absent.error(), None);
    assert_eq!(errors.get(), 0, "a missing CRD must not be logged as an error");
}

#[tokio::test]
async fn everything_failing_is_still_in_cluster() {
    let ingresses = StaticCollector::new(SourceKind::Ingress, Outcome::Failed("boom".into()));
    let routes = StaticCollector::new(SourceKind::HttpRoute, Outcome::NotInstalled);

    let result = aggregate(&[&ingresses, &routes]).await;
    assert!(result.is_in_cluster());
    assert!(result.routes().is_empty());
    assert_eq!(result.error(), None);
}

#[tokio::test]
async fn each_collector_runs_once_per_pass() {
    let ingresses = StaticCollector::new(SourceKind::Ingress, Outcome::Listed(ingress_links()));
    let routes = StaticCollector::new(SourceKind::HttpRoute, Outcome::Listed(gateway_links()));

    let first = aggregate(&[&ingresses, &routes]).await;
    let second = aggregate(&[&ingresses, &routes]).await;
    assert_eq!(first, second);
    assert_eq!(ingresses.calls(), 2);
    assert_eq!(routes.calls(), 2);
}

#[tokio::test]
async fn unresolved_cluster_is_not_in_cluster() {
    let resolver = Resolver::with_strategies(
        vec![Strategy::Kubeconfig {
            path: Some(PathBuf::from("/nonexistent/kubeconfig")),
            options: Default::default(),
        }],
        Duration::from_millis(100),
    );

    let result = Discover::new(resolver)
        .discover()
        .await
        .expect("discovery must not fail");
    assert!(!result.is_in_cluster());
    assert!(result.routes().is_empty());
    assert_eq!(result.error(), None);
}
