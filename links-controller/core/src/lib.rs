#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod discovery;
pub mod route;

pub use self::{
    discovery::{CollectRoutes, DiscoverRoutes, DiscoveryResult, Outcome},
    route::{RouteLink, RouteSource, SourceKind},
};
pub use http::uri::Scheme;

/// The namespace reported for resources whose metadata omits one.
pub const DEFAULT_NAMESPACE: &str = "default";

/// The name reported for resources whose metadata omits one.
pub const UNKNOWN_NAME: &str = "unknown";
