use std::path::PathBuf;

use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use reqwest::{StatusCode, Url};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Cache version tag. Bumping this invalidates every previously cached
/// asset on the next activation.
pub const CACHE_VERSION: &str = "cocktail-finder-v5";

/// The app shell: assets installed up front so the app can start offline.
pub const APP_SHELL: &[&str] = &["data/recipes.json"];

/// Maximum concurrent downloads during install.
const MAX_CONCURRENT_REQUESTS: usize = 4;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected status: {0}")]
    Http(StatusCode),

    #[error("not in cache: {0}")]
    Miss(String),

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// File-backed request cache with an install/activate lifecycle: `install`
/// prefetches the app shell into a version-tagged directory, `activate`
/// evicts every other version, `fetch` is network-first with cache
/// fallback.
pub struct AssetCache {
    client: reqwest::Client,
    base_url: Url,
    root: PathBuf,
}

impl AssetCache {
    pub fn new(root: PathBuf, base_url: &str) -> Result<Self, CacheError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| CacheError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        std::fs::create_dir_all(root.join(CACHE_VERSION))?;
        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            root,
        })
    }

    fn asset_url(&self, path: &str) -> Result<Url, CacheError> {
        self.base_url
            .join(path)
            .map_err(|e| CacheError::InvalidUrl(format!("{}: {}", path, e)))
    }

    /// Flat entry file name for a request path.
    fn entry_name(path: &str) -> String {
        path.replace(['/', '\\'], "_")
    }

    fn entry_path(&self, path: &str) -> PathBuf {
        self.root.join(CACHE_VERSION).join(Self::entry_name(path))
    }

    /// Fetch and cache the whole app shell. Any failed entry fails the
    /// install, and the caller must then skip activation so that older cache
    /// versions keep serving.
    pub async fn install(&self) -> Result<(), CacheError> {
        let results: Vec<Result<(), CacheError>> =
            stream::iter(APP_SHELL.iter().map(|path| async move {
                self.fetch(path).await.map(|_| ())
            }))
            .buffer_unordered(MAX_CONCURRENT_REQUESTS)
            .collect()
            .await;

        for result in results {
            result?;
        }
        info!(version = CACHE_VERSION, assets = APP_SHELL.len(), "App shell cached");
        Ok(())
    }

    /// Delete every cache version other than the current one.
    pub fn activate(&self) -> Result<(), CacheError> {
        for entry in std::fs::read_dir(&self.root)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            if entry.file_name() != std::ffi::OsStr::new(CACHE_VERSION) {
                debug!(stale = ?entry.file_name(), "Evicting stale cache version");
                std::fs::remove_dir_all(entry.path())?;
            }
        }
        Ok(())
    }

    /// Network-first fetch. A live 200 over http(s) is written into the
    /// current cache and returned; a network failure falls back to the
    /// cached copy; a live non-200 is an error with no cache fallback.
    pub async fn fetch(&self, path: &str) -> Result<Vec<u8>, CacheError> {
        let url = self.asset_url(path)?;

        let live = async {
            let response = self.client.get(url.clone()).send().await?;
            let status = response.status();
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, body))
        }
        .await;

        match live {
            Ok((status, body)) if status == StatusCode::OK => {
                if matches!(url.scheme(), "http" | "https") {
                    if let Err(e) = self.store(path, &body) {
                        warn!(path, error = %e, "Failed to write cache entry");
                    }
                }
                Ok(body.to_vec())
            }
            Ok((status, _)) => Err(CacheError::Http(status)),
            Err(e) => {
                debug!(path, error = %e, "Network fetch failed, trying cache");
                self.lookup(path)
                    .ok_or_else(|| CacheError::Miss(path.to_string()))
            }
        }
    }

    fn store(&self, path: &str, body: &[u8]) -> std::io::Result<()> {
        let entry = self.entry_path(path);
        if let Some(parent) = entry.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(entry, body)
    }

    /// Cached copy of a request: the current version first, then any
    /// version that has not been evicted (a failed install skips
    /// activation, so older entries may still be present).
    fn lookup(&self, path: &str) -> Option<Vec<u8>> {
        let current = self.entry_path(path);
        if let Ok(body) = std::fs::read(&current) {
            return Some(body);
        }

        let name = Self::entry_name(path);
        for entry in std::fs::read_dir(&self.root).ok()?.flatten() {
            let candidate = entry.path().join(&name);
            if candidate != current {
                if let Ok(body) = std::fs::read(&candidate) {
                    return Some(body);
                }
            }
        }
        None
    }

    /// Age of a cached entry for status display, from the file mtime.
    pub fn entry_age(&self, path: &str) -> Option<String> {
        let modified = std::fs::metadata(self.entry_path(path))
            .ok()?
            .modified()
            .ok()?;
        let modified: DateTime<Utc> = modified.into();
        Some(age_display((Utc::now() - modified).num_minutes()))
    }
}

/// Human-readable cache age with coarse rounding.
fn age_display(minutes: i64) -> String {
    if minutes < 1 {
        // Also covers clock skew.
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m ago", minutes)
    } else if minutes < 1440 {
        let hours = minutes / 60;
        if minutes % 60 >= 30 {
            format!("{}h ago", hours + 1)
        } else {
            format!("{}h ago", hours)
        }
    } else {
        let days = minutes / 1440;
        if (minutes % 1440) / 60 >= 12 {
            format!("{}d ago", days + 1)
        } else {
            format!("{}d ago", days)
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn test_root(name: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!("barback-cache-{}-{}", std::process::id(), name));
        let _ = std::fs::remove_dir_all(&root);
        root
    }

    // Nothing listens on port 9 (discard); connections fail fast.
    const DEAD_BASE: &str = "http://127.0.0.1:9/";

    /// One-shot loopback HTTP server returning a canned response.
    async fn one_shot_server(status_line: &'static str, body: &'static [u8]) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            let header = format!(
                "{}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status_line,
                body.len()
            );
            socket.write_all(header.as_bytes()).await.unwrap();
            socket.write_all(body).await.unwrap();
        });
        format!("http://{}/", addr)
    }

    #[test]
    fn test_entry_name_flattens_path_separators() {
        assert_eq!(AssetCache::entry_name("data/recipes.json"), "data_recipes.json");
    }

    #[test]
    fn test_activate_evicts_only_other_versions() {
        let root = test_root("activate");
        let cache = AssetCache::new(root.clone(), DEAD_BASE).unwrap();
        cache.store("data/recipes.json", b"[]").unwrap();

        let stale = root.join("cocktail-finder-v1");
        std::fs::create_dir_all(&stale).unwrap();
        std::fs::write(stale.join("data_recipes.json"), b"old").unwrap();

        cache.activate().unwrap();

        assert!(!stale.exists());
        assert!(cache.entry_path("data/recipes.json").exists());
        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn test_network_failure_falls_back_to_cache() {
        let root = test_root("fallback");
        let cache = AssetCache::new(root.clone(), DEAD_BASE).unwrap();
        cache.store("data/recipes.json", b"cached-body").unwrap();

        let body = cache.fetch("data/recipes.json").await.unwrap();
        assert_eq!(body, b"cached-body");
        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn test_network_failure_without_cache_is_a_miss() {
        let root = test_root("miss");
        let cache = AssetCache::new(root.clone(), DEAD_BASE).unwrap();

        let err = cache.fetch("data/recipes.json").await.unwrap_err();
        assert!(matches!(err, CacheError::Miss(_)));
        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn test_fallback_reads_older_version_when_current_is_empty() {
        let root = test_root("older-version");
        let cache = AssetCache::new(root.clone(), DEAD_BASE).unwrap();

        // An older version that was never evicted because install failed.
        let stale = root.join("cocktail-finder-v1");
        std::fs::create_dir_all(&stale).unwrap();
        std::fs::write(stale.join("data_recipes.json"), b"old-body").unwrap();

        let body = cache.fetch("data/recipes.json").await.unwrap();
        assert_eq!(body, b"old-body");
        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn test_success_overwrites_cache_entry_and_returns_live_body() {
        let root = test_root("overwrite");
        let base = one_shot_server("HTTP/1.1 200 OK", b"live-body").await;
        let cache = AssetCache::new(root.clone(), &base).unwrap();
        cache.store("data/recipes.json", b"stale-body").unwrap();

        let body = cache.fetch("data/recipes.json").await.unwrap();
        assert_eq!(body, b"live-body");
        let cached = std::fs::read(cache.entry_path("data/recipes.json")).unwrap();
        assert_eq!(cached, b"live-body");
        let _ = std::fs::remove_dir_all(root);
    }

    #[tokio::test]
    async fn test_non_200_is_an_error_and_leaves_cache_untouched() {
        let root = test_root("not-found");
        let base = one_shot_server("HTTP/1.1 404 Not Found", b"gone").await;
        let cache = AssetCache::new(root.clone(), &base).unwrap();
        cache.store("data/recipes.json", b"cached-body").unwrap();

        let err = cache.fetch("data/recipes.json").await.unwrap_err();
        assert!(matches!(err, CacheError::Http(status) if status == StatusCode::NOT_FOUND));
        let cached = std::fs::read(cache.entry_path("data/recipes.json")).unwrap();
        assert_eq!(cached, b"cached-body");
        let _ = std::fs::remove_dir_all(root);
    }

    #[test]
    fn test_age_display_tiers() {
        assert_eq!(age_display(-2), "just now");
        assert_eq!(age_display(0), "just now");
        assert_eq!(age_display(5), "5m ago");
        assert_eq!(age_display(61), "1h ago");
        assert_eq!(age_display(95), "2h ago");
        assert_eq!(age_display(1500), "1d ago");
    }
}
