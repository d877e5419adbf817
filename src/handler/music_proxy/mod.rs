//! Mock music API
//!
//! `/api/music-proxy` answers search, stream-url and lyric lookups with
//! canned data, and streams remote resources given by `target`.

pub mod passthrough;
pub mod query;
pub mod search;

use hyper::{Response, StatusCode};
use serde::Serialize;

use crate::config::AppState;
use crate::http::{self, ResponseBody};
use crate::logger;

pub use query::QueryParams;

/// Playable sample returned by `types=url`
pub const SAMPLE_AUDIO_URL: &str = "https://www.soundhelix.com/examples/mp3/SoundHelix-Song-1.mp3";

/// Sub-operation selected by the query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    Search,
    StreamUrl,
    Lyric,
    /// Stream the resource at the contained URL
    Passthrough(String),
}

impl MockOperation {
    /// Pick the operation for a request
    ///
    /// Named `types` win. Without `types`, a `target` selects the
    /// passthrough and anything else is a search. An unrecognised `types`
    /// falls back to `target` when present; otherwise the unknown value is
    /// returned as the error.
    pub fn select(params: &QueryParams) -> Result<Self, String> {
        let target = params.first("target").map(ToString::to_string);

        match params.first("types") {
            Some("search") => Ok(Self::Search),
            Some("url") => Ok(Self::StreamUrl),
            Some("lyric") => Ok(Self::Lyric),
            Some(other) => target.map(Self::Passthrough).ok_or_else(|| other.to_string()),
            None => Ok(target.map_or(Self::Search, Self::Passthrough)),
        }
    }
}

#[derive(Serialize)]
struct StreamUrlBody {
    url: &'static str,
}

#[derive(Serialize)]
struct LyricBody {
    lyric: &'static str,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Handle one `/api/music-proxy` request
pub async fn handle_music_proxy(query: Option<&str>, state: &AppState) -> Response<ResponseBody> {
    let params = QueryParams::parse(query);

    match MockOperation::select(&params) {
        Ok(MockOperation::Search) => {
            let page = search::build_search_page(params.first("name"), params.page());
            http::build_json_response(StatusCode::OK, &page)
        }
        Ok(MockOperation::StreamUrl) => http::build_json_response(
            StatusCode::OK,
            &StreamUrlBody {
                url: SAMPLE_AUDIO_URL,
            },
        ),
        Ok(MockOperation::Lyric) => {
            http::build_json_response(StatusCode::OK, &LyricBody { lyric: "" })
        }
        Ok(MockOperation::Passthrough(target)) => passthrough::proxy_target(&target, state).await,
        Err(types) => {
            logger::log_warning(&format!("Unsupported types parameter: {types}"));
            http::build_json_response(
                StatusCode::BAD_REQUEST,
                &ErrorBody {
                    error: format!("Unsupported types parameter: {types}"),
                },
            )
        }
    }
}
