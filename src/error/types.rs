//! Error types
//!
//! Defines the error taxonomy of the gateway: failures opening a session,
//! failures reported by the remote server, and request-level errors.

use std::fmt;
use std::io;

/// Failure while opening an authenticated FTP session
#[derive(Debug)]
pub enum ConnectionFailure {
    /// Host name could not be resolved to a socket address
    Resolve(String),
    /// TCP connect failed or timed out
    Connect(String),
    /// Server refused the credentials
    Login(String),
}

impl fmt::Display for ConnectionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionFailure::Resolve(m) => write!(f, "Cannot resolve FTP host: {}", m),
            ConnectionFailure::Connect(m) => write!(f, "Cannot connect to FTP server: {}", m),
            ConnectionFailure::Login(m) => write!(f, "FTP login failed: {}", m),
        }
    }
}

impl std::error::Error for ConnectionFailure {}

/// Category of an error reported over an open session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteErrorKind {
    /// Reply 550: no such file or directory, or not accessible
    Unavailable,
    /// Any other permanent negative reply (5xx)
    Rejected,
    /// Transient negative reply (4xx) or another unexpected reply code
    Transient,
    /// Socket failure or a reply that could not be parsed
    Transport,
}

/// Error reported by the remote server (or the wire) during a command
#[derive(Debug, Clone)]
pub struct RemoteError {
    pub kind: RemoteErrorKind,
    /// Reply code, when the server sent one
    pub code: Option<u32>,
    pub message: String,
}

impl RemoteError {
    /// Classify a server reply by its code.
    pub fn from_reply(code: u32, text: &str) -> Self {
        let kind = match code {
            550 => RemoteErrorKind::Unavailable,
            500..=599 => RemoteErrorKind::Rejected,
            _ => RemoteErrorKind::Transient,
        };

        let text = text.trim();
        // Reply lines normally carry their own code
        let message = if text.starts_with(&code.to_string()) {
            text.to_string()
        } else if text.is_empty() {
            code.to_string()
        } else {
            format!("{} {}", code, text)
        };

        Self {
            kind,
            code: Some(code),
            message,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: RemoteErrorKind::Transport,
            code: None,
            message: message.into(),
        }
    }

    /// True for 550, the "no such file or directory" reply
    pub fn is_not_found(&self) -> bool {
        self.kind == RemoteErrorKind::Unavailable
    }

    /// True for any permanent negative (5xx) reply.
    ///
    /// Directory probing treats these as "not a directory" and forced folder
    /// deletion treats a rejected DELE as "this entry is a directory".
    pub fn is_permanent(&self) -> bool {
        matches!(
            self.kind,
            RemoteErrorKind::Unavailable | RemoteErrorKind::Rejected
        )
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for RemoteError {}

impl From<io::Error> for RemoteError {
    fn from(error: io::Error) -> Self {
        RemoteError::transport(error.to_string())
    }
}

/// General gateway error that encompasses all request failures
#[derive(Debug)]
pub enum GatewayError {
    /// A required request parameter is missing or empty
    Validation(String),
    Connection(ConnectionFailure),
    Remote(RemoteError),
    /// file-info target does not exist
    NotFound { path: String },
    /// delete-folder on a non-empty folder without force
    NotEmpty(String),
    /// Request body could not be decoded (HTTP status chosen by the extractor)
    BadBody { status: u16, message: String },
    /// The blocking worker running the session failed
    Internal(String),
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Validation(m) => write!(f, "{}", m),
            GatewayError::Connection(_) => write!(f, "Failed to connect to the FTP server"),
            GatewayError::Remote(e) => write!(f, "{}", e),
            GatewayError::NotFound { path } => write!(f, "Not found: {}", path),
            GatewayError::NotEmpty(_) => write!(
                f,
                "Folder is not empty. Use force_deletion to delete non-empty folders."
            ),
            GatewayError::BadBody { message, .. } => write!(f, "{}", message),
            GatewayError::Internal(m) => write!(f, "{}", m),
        }
    }
}

impl std::error::Error for GatewayError {}

impl From<ConnectionFailure> for GatewayError {
    fn from(error: ConnectionFailure) -> Self {
        GatewayError::Connection(error)
    }
}

impl From<RemoteError> for GatewayError {
    fn from(error: RemoteError) -> Self {
        GatewayError::Remote(error)
    }
}
