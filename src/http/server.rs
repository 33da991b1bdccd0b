use super::routes::create_router;
use super::state::AppState;
use crate::config::ServerConfig;
use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::thread::JoinHandle;
use tokio::sync::oneshot;
use tracing::{error, info};

/// Control API running on its own thread
///
/// OBS owns the main thread and has no tokio runtime, so the server gets a
/// dedicated thread with a current-thread runtime.
pub struct ControlServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl ControlServer {
    /// Bind synchronously (so bind errors surface here) and start serving
    pub fn spawn(config: &ServerConfig, state: AppState) -> Result<Self> {
        let listener = std::net::TcpListener::bind((config.bind.as_str(), config.port))
            .with_context(|| format!("Failed to bind {}:{}", config.bind, config.port))?;
        listener.set_nonblocking(true)?;
        let addr = listener.local_addr()?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to build tokio runtime")?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let thread = std::thread::Builder::new()
            .name("obsc-http".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    let listener = match tokio::net::TcpListener::from_std(listener) {
                        Ok(listener) => listener,
                        Err(e) => {
                            error!("Failed to register listener: {}", e);
                            return;
                        }
                    };

                    let shutdown = async {
                        let _ = shutdown_rx.await;
                    };

                    if let Err(e) = axum::serve(listener, create_router(state))
                        .with_graceful_shutdown(shutdown)
                        .await
                    {
                        error!("Control API stopped with error: {}", e);
                    }
                });
            })
            .context("Failed to spawn control API thread")?;

        info!("Control API listening on http://{}", addr);

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
            thread: Some(thread),
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Stop accepting connections and wait for the server thread to exit
    pub fn shutdown(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!("Control API thread panicked");
            }
            info!("Control API stopped");
        }
    }
}

impl Drop for ControlServer {
    fn drop(&mut self) {
        self.stop();
    }
}
