//! Request handler module
//!
//! Dispatches each request to the mock music API or to static file serving.

pub mod music_proxy;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
