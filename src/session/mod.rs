//! FTP session management
//!
//! Per-request session lifecycle and the FTP client capability it wraps.

pub mod client;
pub mod gateway;
pub mod remote;

pub use client::{Connector, FtpClient};
pub use gateway::{Session, SessionGateway};
