use homepage_links_core::Outcome;
use homepage_links_k8s_api::{Api, Client, Error, ErrorResponse, ListParams, Resource};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use tokio::time::{self, Duration};

/// Lists all `K` resources across all namespaces in a single request.
///
/// Failures are classified into the [`Outcome`] that the collector should
/// report.
pub(crate) async fn list_all<K>(client: &Client, timeout: Duration) -> Result<Vec<K>, Outcome>
where
    K: Resource + Clone + Debug + DeserializeOwned,
    K::DynamicType: Default,
{
    let api = Api::<K>::all(client.clone());
    match time::timeout(timeout, api.list(&ListParams::default())).await {
        Ok(Ok(list)) => Ok(list.items),
        Ok(Err(error)) => Err(classify(error)),
        Err(_) => Err(Outcome::Unreachable(format!(
            "list timed out after {}ms",
            timeout.as_millis()
        ))),
    }
}

/// A 404 means the API group or resource isn't served, i.e. its CRD isn't
/// installed.
pub(crate) fn classify(error: Error) -> Outcome {
    match error {
        Error::Api(ErrorResponse { code: 404, .. }) => Outcome::NotInstalled,
        Error::Api(ErrorResponse {
            code,
            reason,
            message,
            ..
        }) => Outcome::Failed(format!("{code} {reason}: {message}")),
        error @ (Error::HyperError(_) | Error::Service(_)) => {
            Outcome::Unreachable(error.to_string())
        }
        error => Outcome::Failed(error.to_string()),
    }
}
