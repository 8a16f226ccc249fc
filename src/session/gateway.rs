//! Session gateway
//!
//! Opens one authenticated FTP session per request and guarantees it is quit
//! on every exit path.

use log::{debug, warn};
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use crate::config::FtpConfig;
use crate::error::{ConnectionFailure, GatewayError};
use crate::session::client::{Connector, FtpClient};
use crate::session::remote::RemoteConnector;

/// Hands out fresh sessions; holds no connection itself.
#[derive(Clone)]
pub struct SessionGateway {
    connector: Arc<dyn Connector>,
}

impl SessionGateway {
    /// Gateway talking to the real server described by `config`.
    pub fn new(config: &FtpConfig) -> Self {
        Self::with_connector(Arc::new(RemoteConnector::new(config)))
    }

    pub fn with_connector(connector: Arc<dyn Connector>) -> Self {
        Self { connector }
    }

    /// Connect and log in. The returned guard quits the session when dropped.
    pub fn open_session(&self) -> Result<Session, ConnectionFailure> {
        let client = self.connector.connect()?;
        debug!("FTP session opened");
        Ok(Session {
            client,
            released: false,
        })
    }

    /// Run `operation` against a fresh session on the blocking pool.
    ///
    /// The session is quit before this returns, whether `operation`
    /// succeeded, failed, or panicked.
    pub async fn run<T, F>(&self, operation: F) -> Result<T, GatewayError>
    where
        T: Send + 'static,
        F: FnOnce(&mut dyn FtpClient) -> Result<T, GatewayError> + Send + 'static,
    {
        let gateway = self.clone();
        tokio::task::spawn_blocking(move || -> Result<T, GatewayError> {
            let mut session = gateway.open_session()?;
            operation(&mut *session)
        })
        .await
        .map_err(|e| GatewayError::Internal(e.to_string()))?
    }
}

/// Scoped FTP session; QUIT is sent exactly once, on drop.
pub struct Session {
    client: Box<dyn FtpClient>,
    released: bool,
}

impl Session {
    /// Quit now instead of at end of scope.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        match self.client.quit() {
            Ok(()) => debug!("FTP session closed"),
            Err(e) => warn!("QUIT failed, dropping connection: {}", e),
        }
    }
}

impl Deref for Session {
    type Target = dyn FtpClient;

    fn deref(&self) -> &Self::Target {
        &*self.client
    }
}

impl DerefMut for Session {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.client
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.release();
    }
}
