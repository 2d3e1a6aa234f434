//! On-disk persistence for the two user-state sets.
//!
//! Favorites and the my-bar set each live in their own JSON file as an array
//! of strings. Every mutation rewrites the full set; there is no partial
//! update and no schema versioning. A missing or malformed file reads back
//! as the empty set and is never surfaced as an error.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;
use tracing::debug;

const FAVORITES_FILE: &str = "cocktail-favorites.json";
const MY_BAR_FILE: &str = "cocktail-mybar.json";

pub struct Persistence {
    dir: PathBuf,
}

impl Persistence {
    pub fn new(dir: PathBuf) -> Result<Self> {
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }

    fn load_set(&self, name: &str) -> BTreeSet<String> {
        let path = self.path(name);
        if !path.exists() {
            return BTreeSet::new();
        }

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                debug!(file = name, error = %e, "Unreadable persisted set, starting empty");
                return BTreeSet::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&contents) {
            Ok(values) => values.into_iter().collect(),
            Err(e) => {
                debug!(file = name, error = %e, "Malformed persisted set, starting empty");
                BTreeSet::new()
            }
        }
    }

    // The set iterates sorted, so the serialized form is stable for a given
    // set of values.
    fn save_set(&self, name: &str, set: &BTreeSet<String>) -> Result<()> {
        let values: Vec<&String> = set.iter().collect();
        let contents = serde_json::to_string_pretty(&values)?;
        std::fs::write(self.path(name), contents)?;
        Ok(())
    }

    pub fn load_favorites(&self) -> BTreeSet<String> {
        self.load_set(FAVORITES_FILE)
    }

    pub fn save_favorites(&self, favorites: &BTreeSet<String>) -> Result<()> {
        self.save_set(FAVORITES_FILE, favorites)
    }

    pub fn load_my_bar(&self) -> BTreeSet<String> {
        self.load_set(MY_BAR_FILE)
    }

    pub fn save_my_bar(&self, owned: &BTreeSet<String>) -> Result<()> {
        self.save_set(MY_BAR_FILE, owned)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("barback-persist-{}-{}", std::process::id(), name));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_missing_files_read_as_empty_sets() {
        let dir = test_dir("missing");
        let persist = Persistence::new(dir.clone()).unwrap();
        assert!(persist.load_favorites().is_empty());
        assert!(persist.load_my_bar().is_empty());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_malformed_file_reads_as_empty_set() {
        let dir = test_dir("malformed");
        let persist = Persistence::new(dir.clone()).unwrap();
        std::fs::write(dir.join(FAVORITES_FILE), "{not json").unwrap();
        assert!(persist.load_favorites().is_empty());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = test_dir("roundtrip");
        let persist = Persistence::new(dir.clone()).unwrap();

        let owned: BTreeSet<String> = ["Gin", "Lime Juice"].iter().map(|s| s.to_string()).collect();
        persist.save_my_bar(&owned).unwrap();
        assert_eq!(persist.load_my_bar(), owned);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn test_double_toggle_restores_persisted_bytes() {
        let dir = test_dir("toggle");
        let persist = Persistence::new(dir.clone()).unwrap();

        let mut favorites: BTreeSet<String> = ["12", "7"].iter().map(|s| s.to_string()).collect();
        persist.save_favorites(&favorites).unwrap();
        let before = std::fs::read(dir.join(FAVORITES_FILE)).unwrap();

        // Toggle on, then off again.
        favorites.insert("42".to_string());
        persist.save_favorites(&favorites).unwrap();
        favorites.remove("42");
        persist.save_favorites(&favorites).unwrap();

        let after = std::fs::read(dir.join(FAVORITES_FILE)).unwrap();
        assert_eq!(before, after);
        let _ = std::fs::remove_dir_all(dir);
    }
}
