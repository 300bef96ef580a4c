use crate::{
    discovery::{Discover, Resolver},
    k8s::KubeConfigOptions,
    server::{self, Server},
};
use anyhow::Result;
use clap::Parser;
use std::{net::SocketAddr, path::PathBuf};
use tokio::{
    signal::unix::{signal, SignalKind},
    time::Duration,
};
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[clap(
    name = "homepage-links",
    about = "Serves links to the HTTP routes exposed by a Kubernetes cluster"
)]
pub struct Args {
    #[clap(
        long,
        default_value = "homepage_links=info,warn",
        env = "HOMEPAGE_LINKS_LOG"
    )]
    log_level: kubert::LogFilter,

    #[clap(long, default_value = "plain", env = "HOMEPAGE_LINKS_LOG_FORMAT")]
    log_format: kubert::LogFormat,

    #[clap(long, default_value = "0.0.0.0:8080", env = "HOMEPAGE_LINKS_ADDR")]
    addr: SocketAddr,

    /// Bounds each request to the Kubernetes API server.
    #[clap(long, default_value = "10000", env = "HOMEPAGE_LINKS_TIMEOUT_MS")]
    request_timeout_ms: u64,

    /// Kubeconfig used when in-cluster credentials are unavailable. Defaults to
    /// `$KUBECONFIG` or `~/.kube/config`.
    #[clap(long)]
    kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use instead of the current context.
    #[clap(long)]
    context: Option<String>,

    /// Kubeconfig cluster to use instead of the context's cluster.
    #[clap(long)]
    cluster: Option<String>,

    /// Kubeconfig user to use instead of the context's user.
    #[clap(long)]
    user: Option<String>,

    /// Runs a single discovery pass, prints the result and exits.
    #[clap(long)]
    once: bool,
}

impl Args {
    #[inline]
    pub async fn parse_and_run() -> Result<()> {
        Self::parse().run().await
    }

    pub async fn run(self) -> Result<()> {
        let Self {
            log_level,
            log_format,
            addr,
            request_timeout_ms,
            kubeconfig,
            context,
            cluster,
            user,
            once,
        } = self;

        log_format.try_init(log_level)?;

        let options = KubeConfigOptions {
            context,
            cluster,
            user,
            ..Default::default()
        };
        let timeout = Duration::from_millis(request_timeout_ms);
        let discover = Discover::new(Resolver::new(kubeconfig, options, timeout));

        if once {
            let result = server::pass(&discover).await;
            println!("{}", serde_json::to_string_pretty(&result)?);
            return Ok(());
        }

        let server = Server::bind(addr).await?;
        server.run(discover, shutdown()).await;
        info!("Server stopped");
        Ok(())
    }
}

/// Completes when the process receives SIGINT or SIGTERM.
async fn shutdown() {
    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sigterm) => sigterm,
        Err(error) => {
            warn!(%error, "Failed to register SIGTERM handler");
            let _ = tokio::signal::ctrl_c().await;
            return;
        }
    };

    tokio::select! {
        _ = tokio::signal::ctrl_c() => info!("Received SIGINT"),
        _ = sigterm.recv() => info!("Received SIGTERM"),
    }
}
