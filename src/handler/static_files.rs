//! Static file serving module
//!
//! Resolves request paths against the configured serving root.

use hyper::Response;
use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::http::{self, mime, ResponseBody};
use crate::logger;

/// Serve a file from `root`, or 404
pub async fn serve_static(
    path: &str,
    root: &Path,
    index_files: &[String],
) -> Response<ResponseBody> {
    match load_from_root(root, path, index_files).await {
        Some((content, content_type)) => http::build_file_response(content, content_type),
        None => http::build_404_response(),
    }
}

/// Load a file below `root`, with index file support for directories
///
/// Returns `None` for missing files, directories without an index file and
/// paths escaping the root.
pub async fn load_from_root(
    root: &Path,
    path: &str,
    index_files: &[String],
) -> Option<(Vec<u8>, &'static str)> {
    let Ok(decoded) = percent_decode_str(path).decode_utf8() else {
        logger::log_warning(&format!("Request path is not valid UTF-8: {path}"));
        return None;
    };
    let relative = decoded.trim_start_matches('/');

    let root_canonical = match fs::canonicalize(root).await {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Serving root not found or inaccessible '{}': {e}",
                root.display()
            ));
            return None;
        }
    };

    let mut file_path = root_canonical.join(relative);
    if is_dir(&file_path).await {
        file_path = find_index_file(&file_path, index_files).await?;
    }

    // Missing files are the common 404 case, not worth a log line
    let file_canonical = fs::canonicalize(&file_path).await.ok()?;
    if !file_canonical.starts_with(&root_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path,
            file_canonical.display()
        ));
        return None;
    }

    let content = match fs::read(&file_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_canonical.display()
            ));
            return None;
        }
    };

    let content_type = mime::get_content_type(file_path.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}

async fn is_dir(path: &Path) -> bool {
    fs::metadata(path).await.is_ok_and(|m| m.is_dir())
}

async fn find_index_file(dir: &Path, index_files: &[String]) -> Option<PathBuf> {
    for name in index_files {
        let candidate = dir.join(name);
        if fs::metadata(&candidate).await.is_ok_and(|m| m.is_file()) {
            return Some(candidate);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_files() -> Vec<String> {
        vec!["index.html".to_string(), "index.htm".to_string()]
    }

    #[tokio::test]
    async fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log(1)").unwrap();

        let (content, content_type) = load_from_root(dir.path(), "/app.js", &index_files())
            .await
            .unwrap();
        assert_eq!(content, b"console.log(1)");
        assert_eq!(content_type, "text/javascript; charset=utf-8");
    }

    #[tokio::test]
    async fn test_percent_encoded_name() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("my song.mp3"), b"ID3").unwrap();

        let (content, content_type) =
            load_from_root(dir.path(), "/my%20song.mp3", &index_files())
                .await
                .unwrap();
        assert_eq!(content, b"ID3");
        assert_eq!(content_type, "audio/mpeg");
    }

    #[tokio::test]
    async fn test_directory_index() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("player")).unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>root</h1>").unwrap();
        std::fs::write(dir.path().join("player/index.htm"), "<h1>player</h1>").unwrap();

        let (content, _) = load_from_root(dir.path(), "/", &index_files()).await.unwrap();
        assert_eq!(content, b"<h1>root</h1>");

        let (content, _) = load_from_root(dir.path(), "/player/", &index_files())
            .await
            .unwrap();
        assert_eq!(content, b"<h1>player</h1>");
    }

    #[tokio::test]
    async fn test_directory_without_index() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("empty")).unwrap();
        assert!(load_from_root(dir.path(), "/empty/", &index_files()).await.is_none());
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from_root(dir.path(), "/nope.css", &index_files()).await.is_none());
    }

    #[tokio::test]
    async fn test_traversal_blocked() {
        let outer = tempfile::tempdir().unwrap();
        let root = outer.path().join("site");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(outer.path().join("secret.txt"), "secret").unwrap();

        assert!(load_from_root(&root, "/../secret.txt", &index_files()).await.is_none());
        assert!(load_from_root(&root, "/%2e%2e/secret.txt", &index_files()).await.is_none());
    }
}
