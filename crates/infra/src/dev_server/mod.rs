//! Development server
//!
//! Serves the frontend during development: requests under the proxy prefix
//! (`/api` by default) are forwarded to the backend, paths in the route
//! table get the SPA `index.html`, and anything else comes from the static
//! directory when one is configured.

mod proxy;
mod spa;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::routing::any;
use axum::Router;
use ewiki_domain::{DevServerConfig, EwikiError, Result};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::http::HttpClient;

/// Shared handler state.
#[derive(Debug)]
struct DevServerState {
    http_client: HttpClient,
    /// Backend origin without a trailing slash.
    proxy_target: String,
    change_origin: bool,
    static_dir: Option<PathBuf>,
}

/// Build the dev server router without binding a socket.
///
/// # Errors
/// Returns `EwikiError::Config` if the proxy prefix is empty or the proxy
/// target is not an absolute http(s) URL.
pub fn router(config: &DevServerConfig) -> Result<Router> {
    let prefix = config.proxy_prefix.trim_end_matches('/');
    if prefix.is_empty() || !prefix.starts_with('/') {
        return Err(EwikiError::Config(format!(
            "proxy prefix must start with '/' and not be the root: {:?}",
            config.proxy_prefix
        )));
    }

    let target = url::Url::parse(&config.proxy_target).map_err(|err| {
        EwikiError::Config(format!("invalid proxy target {:?}: {err}", config.proxy_target))
    })?;
    if !matches!(target.scheme(), "http" | "https") {
        return Err(EwikiError::Config(format!(
            "proxy target must be http or https: {}",
            config.proxy_target
        )));
    }

    let http_client = HttpClient::builder().follow_redirects(false).build()?;

    let state = Arc::new(DevServerState {
        http_client,
        proxy_target: config.proxy_target.trim_end_matches('/').to_string(),
        change_origin: config.change_origin,
        static_dir: config.static_dir.as_ref().map(PathBuf::from),
    });

    Ok(Router::new()
        .route(prefix, any(proxy::forward))
        .route(&format!("{prefix}/{{*rest}}"), any(proxy::forward))
        .fallback(spa::serve)
        .with_state(state))
}

/// Running development server.
pub struct DevServer {
    local_addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl DevServer {
    /// Bind `host:port` from `config` and start serving in the background.
    ///
    /// Port `0` binds an ephemeral port; see [`DevServer::local_addr`].
    ///
    /// # Errors
    /// Returns `EwikiError::Config` for an invalid configuration and
    /// `EwikiError::Network` if the address cannot be bound.
    pub async fn start(config: &DevServerConfig) -> Result<Self> {
        let app = router(config)?;
        let bind_address = config.bind_address();

        let listener = TcpListener::bind(&bind_address).await.map_err(|err| {
            EwikiError::Network(format!("failed to bind dev server on {bind_address}: {err}"))
        })?;
        let local_addr = listener.local_addr().map_err(|err| {
            EwikiError::Network(format!("failed to determine dev server address: {err}"))
        })?;

        info!(
            %local_addr,
            prefix = %config.proxy_prefix,
            target = %config.proxy_target,
            "dev server listening"
        );

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            if let Err(err) = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
            {
                error!("dev server error: {}", err);
            }
        });

        Ok(Self { local_addr, shutdown_tx: Some(shutdown_tx), handle: Some(handle) })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Base URL of the running server, e.g. `http://127.0.0.1:3000`.
    pub fn url(&self) -> String {
        format!("http://{}", self.local_addr)
    }

    /// Stop accepting connections and wait for in-flight requests.
    ///
    /// # Errors
    /// Returns `EwikiError::Internal` if the server task panicked.
    pub async fn shutdown(mut self) -> Result<()> {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }

        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.await {
                if err.is_panic() {
                    return Err(EwikiError::Internal(format!("dev server panicked: {err}")));
                }
            }
        }

        info!(addr = %self.local_addr, "dev server stopped");
        Ok(())
    }
}

impl Drop for DevServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            if !handle.is_finished() {
                handle.abort();
            }
        }
    }
}
