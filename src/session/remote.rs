//! `suppaftp`-backed implementation of the FTP client capability

use log::debug;
use std::io::Cursor;
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use suppaftp::types::FileType;
use suppaftp::{FtpError, FtpStream};

use crate::config::FtpConfig;
use crate::error::{ConnectionFailure, RemoteError};
use crate::session::client::{Connector, FtpClient};

/// Connects to the configured server with plain (unencrypted) FTP
pub struct RemoteConnector {
    config: FtpConfig,
}

impl RemoteConnector {
    pub fn new(config: &FtpConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    fn resolve(&self) -> Result<SocketAddr, ConnectionFailure> {
        let address = self.config.address();
        address
            .to_socket_addrs()
            .map_err(|e| ConnectionFailure::Resolve(format!("{}: {}", address, e)))?
            .next()
            .ok_or_else(|| ConnectionFailure::Resolve(format!("{}: no addresses", address)))
    }
}

impl Connector for RemoteConnector {
    /// The connect timeout bounds each phase up to a logged-in session:
    /// TCP connect, the greeting and the login exchange.
    fn connect(&self) -> Result<Box<dyn FtpClient>, ConnectionFailure> {
        let addr = self.resolve()?;
        let timeout = self.config.connect_timeout();
        debug!("Connecting to FTP server {}", addr);

        let tcp = TcpStream::connect_timeout(&addr, timeout)
            .map_err(|e| ConnectionFailure::Connect(e.to_string()))?;
        tcp.set_read_timeout(Some(timeout))
            .and_then(|()| tcp.set_write_timeout(Some(timeout)))
            .map_err(|e| ConnectionFailure::Connect(e.to_string()))?;

        let mut stream = FtpStream::connect_with_stream(tcp)
            .map_err(|e| ConnectionFailure::Connect(format!("no greeting: {}", e)))?;

        if let Err(e) = stream.login(self.config.user.as_str(), self.config.password.as_str()) {
            // Best effort: the server may already have dropped us
            let _ = stream.quit();
            return Err(ConnectionFailure::Login(e.to_string()));
        }

        // Commands after login may legitimately wait on long transfers
        let control = stream.get_ref();
        control
            .set_read_timeout(None)
            .and_then(|()| control.set_write_timeout(None))
            .map_err(|e| ConnectionFailure::Connect(e.to_string()))?;

        Ok(Box::new(RemoteClient { stream }))
    }
}

/// Session over a live `suppaftp` control connection
pub struct RemoteClient {
    stream: FtpStream,
}

impl FtpClient for RemoteClient {
    fn cwd(&mut self, path: &str) -> Result<(), RemoteError> {
        self.stream.cwd(path).map_err(into_remote)
    }

    fn cdup(&mut self) -> Result<(), RemoteError> {
        self.stream.cdup().map_err(into_remote)
    }

    fn nlst(&mut self) -> Result<Vec<String>, RemoteError> {
        self.stream.nlst(None).map_err(into_remote)
    }

    fn size(&mut self, path: &str) -> Result<u64, RemoteError> {
        self.stream
            .size(path)
            .map(|size| size as u64)
            .map_err(into_remote)
    }

    fn put_file(&mut self, filename: &str, data: &[u8]) -> Result<u64, RemoteError> {
        self.stream
            .transfer_type(FileType::Binary)
            .map_err(into_remote)?;
        let mut reader = Cursor::new(data);
        self.stream.put_file(filename, &mut reader).map_err(into_remote)
    }

    fn mkdir(&mut self, name: &str) -> Result<(), RemoteError> {
        self.stream.mkdir(name).map_err(into_remote)
    }

    fn rmdir(&mut self, name: &str) -> Result<(), RemoteError> {
        self.stream.rmdir(name).map_err(into_remote)
    }

    fn rm(&mut self, name: &str) -> Result<(), RemoteError> {
        self.stream.rm(name).map_err(into_remote)
    }

    fn quit(&mut self) -> Result<(), RemoteError> {
        self.stream.quit().map_err(into_remote)
    }
}

/// Map a `suppaftp` error onto the reply-code based taxonomy
fn into_remote(error: FtpError) -> RemoteError {
    match error {
        FtpError::UnexpectedResponse(response) => RemoteError::from_reply(
            response.status.code(),
            &String::from_utf8_lossy(&response.body),
        ),
        FtpError::ConnectionError(e) => RemoteError::from(e),
        other => RemoteError::transport(other.to_string()),
    }
}
