#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

//! Kubernetes resource types consumed by route discovery.

pub use k8s_openapi::api::networking::v1::{
    HTTPIngressPath, HTTPIngressRuleValue, Ingress, IngressRule, IngressSpec, IngressTLS,
};
pub use kube::{
    api::{Api, ListParams, ObjectMeta},
    config::{self, KubeConfigOptions, Kubeconfig},
    core::ErrorResponse,
    Client, Config, Error, Resource,
};

/// Gateway API `gateway.networking.k8s.io/v1` HTTPRoute types.
pub mod gateway {
    pub use gateway_api::apis::standard::httproutes::{
        HTTPRoute, HTTPRouteRules, HTTPRouteRulesMatches, HTTPRouteSpec,
    };
}
