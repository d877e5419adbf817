//! HTTP protocol layer module
//!
//! Response builders, the shared body type, CORS decoration and MIME lookup,
//! independent of which handler produced the response.

pub mod cors;
pub mod mime;
pub mod response;

// Re-export commonly used items
pub use cors::apply_cors_headers;
pub use response::{
    build_404_response, build_405_response, build_file_response, build_json_response,
    build_options_response, build_text_response, empty, full, ResponseBody, JSON_CONTENT_TYPE,
    TEXT_CONTENT_TYPE,
};
