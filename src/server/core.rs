use log::{error, info};
use std::future::Future;
use std::io;
use tokio::net::TcpListener;

use crate::api::{AppState, build_router};
use crate::config::GatewayConfig;

pub struct Server {
    listener: TcpListener,
    state: AppState,
    socket: String,
}

impl Server {
    /// Bind the HTTP listener described by `config`.
    pub async fn bind(config: &GatewayConfig) -> io::Result<Self> {
        let socket = config.http_socket();

        let listener = match TcpListener::bind(&socket).await {
            Ok(listener) => {
                info!("Server bound to {}", socket);
                listener
            }
            Err(e) => {
                error!("Failed to bind to {}: {}", socket, e);
                return Err(e);
            }
        };

        info!(
            "Proxying to FTP server {} as {}",
            config.ftp.address(),
            config.ftp.user
        );

        Ok(Self {
            listener,
            state: AppState::new(config),
            socket,
        })
    }

    /// Serve requests until Ctrl-C.
    pub async fn start(self) -> io::Result<()> {
        info!("Starting FTP gateway on http://{}", self.socket);

        let router = build_router(self.state);
        axum::serve(self.listener, router)
            .with_graceful_shutdown(wait_for_shutdown(tokio::signal::ctrl_c()))
            .await
    }
}

/// Resolves once `signal` fires. If the signal handler could not be
/// installed the server keeps running and never shuts down gracefully.
async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Ctrl-C received, shutting down"),
        Err(e) => {
            error!("Failed to listen for Ctrl-C, graceful shutdown disabled: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
