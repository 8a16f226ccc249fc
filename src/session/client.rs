//! FTP client capability
//!
//! The commands operation handlers may issue over an authenticated session,
//! and the connector that produces such sessions.

use crate::error::{ConnectionFailure, RemoteError};

/// An authenticated FTP control connection.
///
/// Every method maps to a single FTP command and blocks until the server replies.
pub trait FtpClient: Send {
    /// CWD
    fn cwd(&mut self, path: &str) -> Result<(), RemoteError>;

    /// CDUP
    fn cdup(&mut self) -> Result<(), RemoteError>;

    /// NLST of the current working directory, in server order
    fn nlst(&mut self) -> Result<Vec<String>, RemoteError>;

    /// SIZE
    fn size(&mut self, path: &str) -> Result<u64, RemoteError>;

    /// TYPE I followed by STOR
    fn put_file(&mut self, filename: &str, data: &[u8]) -> Result<u64, RemoteError>;

    /// MKD
    fn mkdir(&mut self, name: &str) -> Result<(), RemoteError>;

    /// RMD
    fn rmdir(&mut self, name: &str) -> Result<(), RemoteError>;

    /// DELE
    fn rm(&mut self, name: &str) -> Result<(), RemoteError>;

    /// QUIT
    fn quit(&mut self) -> Result<(), RemoteError>;
}

/// Opens authenticated sessions against one fixed server.
pub trait Connector: Send + Sync {
    fn connect(&self) -> Result<Box<dyn FtpClient>, ConnectionFailure>;
}
