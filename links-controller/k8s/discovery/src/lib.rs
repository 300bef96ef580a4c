//! Kubernetes route discovery.
//!
//! A discovery pass resolves a cluster connection and, if one is available,
//! lists every `Ingress` and Gateway API `HTTPRoute` in the cluster,
//! flattening them into a list of links:
//!
//! ```text
//! [ Resolver ] -> [ Ingress collector ]   -\
//!              -> [ HTTPRoute collector ] ---> [ aggregate ] -> DiscoveryResult
//! ```
//!
//! Collectors are independent failure domains. A collector that cannot list
//! its resources contributes no links but never prevents the other collector
//! from contributing, and never changes whether the pass is considered to be
//! in a cluster. Nothing is cached between passes.

#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

mod aggregate;
pub mod cluster;
pub mod http_route;
pub mod ingress;
mod list;


pub use self::{
    aggregate::{aggregate, Discover},
    cluster::{ClusterContext, ResolveError, Resolver, Strategy},
    http_route::HttpRouteCollector,
    ingress::IngressCollector,
};

/// Bounds each API server round-trip unless configured otherwise.
pub const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);
