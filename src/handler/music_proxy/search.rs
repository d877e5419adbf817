//! Mock search results
//!
//! Pages are pure functions of `(name, page)`: no counters, no randomness.

use serde::Serialize;

pub const PAGE_SIZE: u32 = 6;
pub const TOTAL_PAGES: u32 = 5;

const DEFAULT_SONG_NAME: &str = "示例歌曲";
const MOCK_ARTIST: &str = "示例歌手";
const MOCK_COVER_URL: &str = "https://placehold.co/300x300?text=Cover";
const MOCK_SOURCE: &str = "mock";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MockSong {
    pub id: String,
    pub name: String,
    pub artist: &'static str,
    pub pic: &'static str,
    pub source: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchPage {
    pub songs: Vec<MockSong>,
    pub page: u64,
    pub total_pages: u32,
}

/// Build one page of `PAGE_SIZE` mock songs
///
/// Song `idx` runs from `(page - 1) * PAGE_SIZE + 1` to `page * PAGE_SIZE`.
pub fn build_search_page(name: Option<&str>, page: u64) -> SearchPage {
    let base_name = name.filter(|n| !n.is_empty()).unwrap_or(DEFAULT_SONG_NAME);
    // u128 keeps ids exact for every u64 page
    let offset = u128::from(page.saturating_sub(1)) * u128::from(PAGE_SIZE);

    let songs = (1..=u128::from(PAGE_SIZE))
        .map(|position| {
            let idx = offset + position;
            MockSong {
                id: format!("mock-{idx}"),
                name: format!("{base_name} {idx}"),
                artist: MOCK_ARTIST,
                pic: MOCK_COVER_URL,
                source: MOCK_SOURCE,
            }
        })
        .collect();

    SearchPage {
        songs,
        page,
        total_pages: TOTAL_PAGES,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page() {
        let page = build_search_page(None, 1);
        assert_eq!(page.songs.len(), 6);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 5);
        assert_eq!(page.songs[0].id, "mock-1");
        assert_eq!(page.songs[0].name, "示例歌曲 1");
        assert_eq!(page.songs[5].id, "mock-6");
        assert_eq!(page.songs[0].artist, "示例歌手");
        assert_eq!(page.songs[0].source, "mock");
    }

    #[test]
    fn test_ids_follow_page() {
        for p in [1_u64, 2, 3, 7, 100] {
            let page = build_search_page(Some("x"), p);
            let ids: Vec<_> = page.songs.iter().map(|s| s.id.clone()).collect();
            let start = (p - 1) * 6;
            let expected: Vec<_> = (1..=6).map(|i| format!("mock-{}", start + i)).collect();
            assert_eq!(ids, expected);
            assert_eq!(page.total_pages, 5);
        }
    }

    #[test]
    fn test_pages_beyond_u32() {
        let page = build_search_page(None, 4_294_967_296);
        assert_eq!(page.page, 4_294_967_296);
        assert_eq!(page.songs[0].id, "mock-25769803771");
        assert_eq!(page.songs[5].id, "mock-25769803776");

        let last = build_search_page(None, u64::MAX);
        assert_eq!(last.songs[5].id, format!("mock-{}", u128::from(u64::MAX) * 6));
    }

    #[test]
    fn test_name_prefix() {
        let page = build_search_page(Some("晴天"), 2);
        assert_eq!(page.songs[0].name, "晴天 7");
        assert_eq!(page.songs[5].name, "晴天 12");
    }

    #[test]
    fn test_serialized_field_order() {
        let json = serde_json::to_string(&build_search_page(Some("a"), 1)).unwrap();
        assert!(json.starts_with(r#"{"songs":[{"id":"mock-1","name":"a 1","artist":"示例歌手","pic":"https://placehold.co/300x300?text=Cover","source":"mock"}"#));
        assert!(json.ends_with(r#""page":1,"total_pages":5}"#));
    }

    #[test]
    fn test_idempotent() {
        let a = serde_json::to_vec(&build_search_page(Some("same"), 4)).unwrap();
        let b = serde_json::to_vec(&build_search_page(Some("same"), 4)).unwrap();
        assert_eq!(a, b);
    }
}
