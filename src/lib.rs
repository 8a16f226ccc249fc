pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod operations;
pub mod server;
pub mod session;

pub use server::Server;
