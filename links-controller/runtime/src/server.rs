//! Serves discovery results to the dashboard.
//!
//! Every request to [`DISCOVERY_PATH`] runs a fresh discovery pass. The
//! response is always `200 OK`; failures are reported in the body so that the
//! dashboard can render them without handling transport errors.

use crate::core::{DiscoverRoutes, DiscoveryResult};
use bytes::Bytes;
use futures::prelude::*;
use http::{header, Method, Request, Response, StatusCode};
use http_body_util::Full;
use hyper::{body::Incoming, server::conn::http1, service::service_fn};
use hyper_util::rt::TokioIo;
use std::{any::Any, convert::Infallible, net::SocketAddr, panic::AssertUnwindSafe};
use tokio::net::TcpListener;
use tracing::{debug, error, info, info_span, Instrument};

pub const DISCOVERY_PATH: &str = "/api/k8s/ingresses";

/// Returned if a result somehow fails to serialize.
const ENCODE_FAILED: &str =
    r#"{"isInCluster":false,"ingresses":[],"error":"failed to encode discovery result"}"#;

pub struct Server {
    listener: TcpListener,
    addr: SocketAddr,
}

// === impl Server ===

impl Server {
    pub async fn bind(addr: SocketAddr) -> std::io::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        let addr = listener.local_addr()?;
        Ok(Self { listener, addr })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Accepts connections until `shutdown` completes.
    pub async fn run<D>(self, discover: D, shutdown: impl Future<Output = ()>)
    where
        D: DiscoverRoutes + Clone + 'static,
    {
        let Self { listener, addr } = self;
        info!(%addr, "HTTP server listening");

        tokio::pin!(shutdown);
        loop {
            let (io, client) = tokio::select! {
                accept = listener.accept() => match accept {
                    Ok(conn) => conn,
                    Err(error) => {
                        debug!(%error, "Failed to accept connection");
                        continue;
                    }
                },
                () = &mut shutdown => return,
            };

            let discover = discover.clone();
            tokio::spawn(
                async move {
                    let svc = service_fn(move |req: Request<Incoming>| {
                        let discover = discover.clone();
                        async move { Ok::<_, Infallible>(handle(&discover, req).await) }
                    });
                    // Dropping a connection also drops its in-flight pass.
                    if let Err(error) = http1::Builder::new()
                        .serve_connection(TokioIo::new(io), svc)
                        .await
                    {
                        debug!(%error, "Connection closed");
                    }
                }
                .instrument(info_span!("conn", %client)),
            );
        }
    }
}

/// Routes a single request. Request bodies are ignored.
pub async fn handle<D, B>(discover: &D, req: Request<B>) -> Response<Full<Bytes>>
where
    D: DiscoverRoutes,
{
    if *req.method() != Method::GET && *req.method() != Method::HEAD {
        return rsp(StatusCode::METHOD_NOT_ALLOWED, None, Bytes::new());
    }

    match req.uri().path() {
        DISCOVERY_PATH => {
            let result = pass(discover).await;
            let body = match serde_json::to_vec(&result) {
                Ok(body) => Bytes::from(body),
                Err(error) => {
                    error!(%error, "Failed to encode discovery result");
                    Bytes::from_static(ENCODE_FAILED.as_bytes())
                }
            };
            rsp(StatusCode::OK, Some("application/json"), body)
        }
        "/live" => rsp(StatusCode::OK, Some("text/plain"), Bytes::from_static(b"live\n")),
        "/ready" => rsp(StatusCode::OK, Some("text/plain"), Bytes::from_static(b"ready\n")),
        _ => rsp(StatusCode::NOT_FOUND, None, Bytes::new()),
    }
}

/// Runs a discovery pass, converting any failure of the pass itself into a
/// result that reports it.
pub async fn pass<D: DiscoverRoutes>(discover: &D) -> DiscoveryResult {
    let discovery = AssertUnwindSafe(discover.discover())
        .catch_unwind()
        .instrument(info_span!("discover"));
    match discovery.await {
        Ok(Ok(result)) => {
            debug!(
                in_cluster = result.is_in_cluster(),
                routes = result.routes().len(),
                "Discovered routes"
            );
            result
        }
        Ok(Err(error)) => {
            error!(%error, "Discovery failed");
            DiscoveryResult::failed(error)
        }
        Err(panic) => {
            let error = panic_message(&*panic);
            error!(%error, "Discovery panicked");
            DiscoveryResult::failed(error)
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        return msg.to_string();
    }
    if let Some(msg) = panic.downcast_ref::<String>() {
        return msg.clone();
    }
    "discovery panicked".to_string()
}

fn rsp(status: StatusCode, content_type: Option<&str>, body: Bytes) -> Response<Full<Bytes>> {
    let mut rsp = Response::builder().status(status);
    if let Some(content_type) = content_type {
        rsp = rsp.header(header::CONTENT_TYPE, content_type);
    }
    rsp.body(Full::new(body))
        .expect("response must be valid")
}
