//! Server core functionality
//!
//! Binds the HTTP listener and serves the gateway routes.

pub mod core;

pub use self::core::Server;
