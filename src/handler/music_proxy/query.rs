//! Query string parsing for the mock API

use std::collections::HashMap;
use url::form_urlencoded;

/// Decoded query parameters; the first non-blank value of each key wins
///
/// Blank values (`name=`) are dropped, so a blank parameter behaves exactly
/// like a missing one.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct QueryParams {
    values: HashMap<String, String>,
}

impl QueryParams {
    pub fn parse(query: Option<&str>) -> Self {
        let mut values = HashMap::new();
        for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            if value.is_empty() {
                continue;
            }
            values
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }
        Self { values }
    }

    /// First value of a parameter
    pub fn first(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// `pages` as a 1-based page number; missing, malformed or zero means 1
    ///
    /// Digit strings past `u64::MAX` saturate instead of resetting to 1.
    pub fn page(&self) -> u64 {
        let Some(raw) = self.first("pages").map(str::trim) else {
            return 1;
        };
        match raw.parse::<u64>() {
            Ok(p) => p.max(1),
            Err(_) if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) => u64::MAX,
            Err(_) => 1,
        }
    }
}
