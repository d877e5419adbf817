//! Local development server with permissive CORS and a mock music API.
//!
//! Serves a directory over HTTP, adds CORS headers to every response,
//! answers preflight requests, and exposes `/api/music-proxy` for front-end
//! work without the real backend.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod routing;
pub mod server;
