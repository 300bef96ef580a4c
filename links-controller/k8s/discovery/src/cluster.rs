use homepage_links_k8s_api::{Client, Config, KubeConfigOptions, Kubeconfig};
use std::{fmt, path::PathBuf};
use tokio::time::Duration;
use tracing::debug;

/// A way of obtaining API server credentials.
#[derive(Clone)]
pub enum Strategy {
    /// The service account mounted into a pod.
    InCluster,

    /// A kubeconfig file: `path` when set, otherwise `$KUBECONFIG` or
    /// `~/.kube/config`.
    Kubeconfig {
        path: Option<PathBuf>,
        options: KubeConfigOptions,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("in-cluster configuration unavailable: {0}")]
    InCluster(#[from] homepage_links_k8s_api::config::InClusterError),

    #[error("kubeconfig unavailable: {0}")]
    Kubeconfig(#[from] homepage_links_k8s_api::config::KubeconfigError),

    #[error("failed to build client: {0}")]
    Client(#[from] homepage_links_k8s_api::Error),
}

/// Tries each strategy in order until one yields a client.
#[derive(Clone, Debug)]
pub struct Resolver {
    strategies: Vec<Strategy>,
    timeout: Duration,
}

/// A client for the cluster and the strategy that produced it.
#[derive(Clone)]
pub struct ClusterContext {
    pub client: Client,
    pub strategy: Strategy,
}

// === impl Strategy ===

impl Strategy {
    /// The default kubeconfig location with its current context.
    pub fn default_kubeconfig() -> Self {
        Self::Kubeconfig {
            path: None,
            options: KubeConfigOptions::default(),
        }
    }

    async fn config(&self) -> Result<Config, ResolveError> {
        match self {
            Self::InCluster => Ok(Config::incluster()?),
            Self::Kubeconfig {
                path: Some(path),
                options,
            } => {
                let kubeconfig = Kubeconfig::read_from(path)?;
                Ok(Config::from_custom_kubeconfig(kubeconfig, options).await?)
            }
            Self::Kubeconfig {
                path: None,
                options,
            } => Ok(Config::from_kubeconfig(options).await?),
        }
    }

    /// Builds a client whose connections and reads are bounded by `timeout`.
    pub async fn connect(&self, timeout: Duration) -> Result<Client, ResolveError> {
        let mut config = self.config().await?;
        config.connect_timeout = Some(timeout);
        config.read_timeout = Some(timeout);
        Ok(Client::try_from(config)?)
    }
}

impl fmt::Debug for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InCluster => f.write_str("InCluster"),
            Self::Kubeconfig { path, options } => f
                .debug_struct("Kubeconfig")
                .field("path", path)
                .field("context", &options.context)
                .field("cluster", &options.cluster)
                .field("user", &options.user)
                .finish_non_exhaustive(),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InCluster => f.write_str("in-cluster"),
            Self::Kubeconfig { path: None, .. } => f.write_str("kubeconfig"),
            Self::Kubeconfig {
                path: Some(path), ..
            } => write!(f, "kubeconfig ({})", path.display()),
        }
    }
}

// === impl Resolver ===

impl Resolver {
    /// Tries in-cluster credentials first, then the given kubeconfig.
    pub fn new(kubeconfig: Option<PathBuf>, options: KubeConfigOptions, timeout: Duration) -> Self {
        Self::with_strategies(
            vec![
                Strategy::InCluster,
                Strategy::Kubeconfig {
                    path: kubeconfig,
                    options,
                },
            ],
            timeout,
        )
    }

    pub fn with_strategies(strategies: Vec<Strategy>, timeout: Duration) -> Self {
        Self {
            strategies,
            timeout,
        }
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Returns a context for the first strategy that yields a client.
    ///
    /// Failing to resolve is the normal state outside of a cluster, so
    /// failures are only logged at debug level.
    pub async fn resolve(&self) -> Option<ClusterContext> {
        for strategy in &self.strategies {
            match strategy.connect(self.timeout).await {
                Ok(client) => {
                    debug!(%strategy, "Resolved cluster configuration");
                    return Some(ClusterContext {
                        client,
                        strategy: strategy.clone(),
                    });
                }
                Err(error) => debug!(%strategy, %error, "Cluster configuration unavailable"),
            }
        }

        debug!("No cluster configuration available");
        None
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(None, KubeConfigOptions::default(), crate::DEFAULT_TIMEOUT)
    }
}

// === impl ClusterContext ===

impl fmt::Debug for ClusterContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClusterContext")
            .field("strategy", &self.strategy)
            .finish_non_exhaustive()
    }
}
