//! Application state management for barback.
//!
//! The `App` struct owns the recipe store, the two persisted sets, the
//! active view mode and filter inputs, plus all UI selection state. The
//! filtering itself lives in pure functions in `crate::filter`; persistence
//! is an injected collaborator so the state logic stays unit-testable.

use std::collections::BTreeSet;
use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::cache::AssetCache;
use crate::config::Config;
use crate::filter::{self, Category, DropdownOptions, SearchFilters};
use crate::ingredients;
use crate::models::Recipe;
use crate::persist::Persistence;

// ============================================================================
// Constants
// ============================================================================

/// Relative path of the recipe document within the app shell.
pub const RECIPES_PATH: &str = "data/recipes.json";

/// Number of items to scroll on page up/down.
pub const PAGE_SCROLL_SIZE: usize = 10;

/// Maximum length for the free-text query.
pub const MAX_QUERY_LENGTH: usize = 100;

// ============================================================================
// UI State Types
// ============================================================================

/// Main navigation tabs, one per view mode. Always starts on Search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Search,
    MyBar,
    Favorites,
}

impl Tab {
    /// Get the next tab (wrapping around)
    pub fn next(&self) -> Self {
        match self {
            Tab::Search => Tab::MyBar,
            Tab::MyBar => Tab::Favorites,
            Tab::Favorites => Tab::Search,
        }
    }

    /// Get the previous tab (wrapping around)
    pub fn prev(&self) -> Self {
        match self {
            Tab::Search => Tab::Favorites,
            Tab::MyBar => Tab::Search,
            Tab::Favorites => Tab::MyBar,
        }
    }
}

/// Current focus area on the My Bar tab (checklist or result list).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Detail,
}

/// Overall application state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Normal,
    EditingQuery,
    ShowingHelp,
    ConfirmingQuit,
    Quitting,
}

// ============================================================================
// Main Application Struct
// ============================================================================

pub struct App {
    // Core services
    pub cache: AssetCache,
    pub persist: Persistence,

    // UI state
    pub state: AppState,
    pub current_tab: Tab,
    pub focus: Focus,

    // Recipe store and persisted sets
    pub recipes: Vec<Recipe>,
    pub favorites: BTreeSet<String>,
    pub my_bar: BTreeSet<String>,

    // Search inputs and derived dropdown options
    pub filters: SearchFilters,
    pub options: DropdownOptions,

    /// Top ingredients offered on the My Bar checklist.
    pub checklist: Vec<String>,

    /// Current results as store indices. `None` shows the mode's initial
    /// prompt instead of a result list.
    pub results: Option<Vec<usize>>,
    pub result_selection: usize,
    pub checklist_selection: usize,

    // Status bar
    pub status_message: Option<String>,
    pub load_error: Option<String>,
    pub data_age: Option<String>,
}

impl App {
    /// Create a new application instance from the on-disk config.
    pub fn new() -> Result<Self> {
        debug!("App::new() starting");
        let config = match Config::load() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "Failed to load config, using defaults");
                Config::default()
            }
        };

        let cache_dir = config.cache_dir().unwrap_or_else(|_| PathBuf::from("./cache"));
        let data_dir = config.data_dir().unwrap_or_else(|_| PathBuf::from("./data"));
        debug!(?cache_dir, ?data_dir, "Storage directories configured");

        let cache = AssetCache::new(cache_dir, &config.base_url())?;
        let persist = Persistence::new(data_dir)?;

        Ok(Self::with_parts(cache, persist))
    }

    fn with_parts(cache: AssetCache, persist: Persistence) -> Self {
        let favorites = persist.load_favorites();
        let my_bar = persist.load_my_bar();
        debug!(
            favorites = favorites.len(),
            my_bar = my_bar.len(),
            "Persisted state loaded"
        );

        Self {
            cache,
            persist,

            state: AppState::Normal,
            current_tab: Tab::Search,
            focus: Focus::List,

            recipes: Vec::new(),
            favorites,
            my_bar,

            filters: SearchFilters::default(),
            options: DropdownOptions::default(),
            checklist: Vec::new(),

            results: None,
            result_selection: 0,
            checklist_selection: 0,

            status_message: None,
            load_error: None,
            data_age: None,
        }
    }

    // =========================================================================
    // Recipe store
    // =========================================================================

    /// Prefetch the app shell and evict stale cache versions. Failures are
    /// only logged; a failed install skips activation so older cached
    /// versions keep serving.
    pub async fn prime_offline_cache(&self) {
        match self.cache.install().await {
            Ok(()) => {
                if let Err(e) = self.cache.activate() {
                    warn!(error = %e, "Cache activation failed");
                }
            }
            Err(e) => warn!(error = %e, "App shell install failed, keeping previous cache"),
        }
    }

    /// Fetch and parse the recipe document (network first, cache fallback),
    /// then recompute everything derived from the store.
    pub async fn load_recipes(&mut self) -> Result<()> {
        let body = self.cache.fetch(RECIPES_PATH).await?;
        let recipes: Vec<Recipe> = serde_json::from_slice(&body)?;
        info!(count = recipes.len(), "Recipe store loaded");

        self.checklist = ingredients::checklist(&recipes);
        self.recipes = recipes;
        self.options = filter::dropdown_options(&self.recipes, &self.filters);
        self.data_age = self.cache.entry_age(RECIPES_PATH);
        self.load_error = None;

        self.checklist_selection = self
            .checklist_selection
            .min(self.checklist.len().saturating_sub(1));
        // Re-run whatever was showing against the new store.
        if self.results.is_some() {
            self.run_find();
        }
        Ok(())
    }

    // =========================================================================
    // View modes and filtering
    // =========================================================================

    fn current_results(&self) -> Vec<usize> {
        match self.current_tab {
            Tab::Search => filter::search_results(&self.recipes, &self.filters),
            Tab::MyBar => filter::my_bar_results(&self.recipes, &self.my_bar),
            Tab::Favorites => filter::favorite_results(&self.recipes, &self.favorites),
        }
    }

    /// The explicit "find" trigger for the current mode.
    pub fn run_find(&mut self) {
        self.results = Some(self.current_results());
        self.result_selection = 0;
    }

    /// Switch view mode. Favorites renders immediately; search and my-bar
    /// show their prompt until an explicit find.
    pub fn switch_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
        self.focus = Focus::List;
        self.result_selection = 0;
        self.results = match tab {
            Tab::Favorites => Some(filter::favorite_results(&self.recipes, &self.favorites)),
            Tab::Search | Tab::MyBar => None,
        };
    }

    /// Cycle a category dropdown through its currently selectable values,
    /// wrapping back to "any". Recalculates the other dropdowns afterwards.
    pub fn cycle_category(&mut self, category: Category) {
        let values = match category {
            Category::Spirit => self.options.spirits.clone(),
            Category::Flavor => self.options.flavors.clone(),
            Category::Difficulty => self.options.difficulties.clone(),
        };
        let slot = match category {
            Category::Spirit => &mut self.filters.spirit,
            Category::Flavor => &mut self.filters.flavor,
            Category::Difficulty => &mut self.filters.difficulty,
        };

        *slot = match slot.take() {
            None => values.first().cloned(),
            Some(current) => match values.iter().position(|v| *v == current) {
                Some(i) if i + 1 < values.len() => Some(values[i + 1].clone()),
                _ => None,
            },
        };

        self.options = filter::dropdown_options(&self.recipes, &self.filters);
    }

    /// The "clear filters" trigger: reset selections and query, restore the
    /// full option lists, go back to the initial prompt.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
        self.options = filter::dropdown_options(&self.recipes, &self.filters);
        self.results = None;
        self.result_selection = 0;
    }

    // =========================================================================
    // Favorites and My Bar
    // =========================================================================

    pub fn selected_recipe(&self) -> Option<&Recipe> {
        let results = self.results.as_ref()?;
        results
            .get(self.result_selection)
            .and_then(|&i| self.recipes.get(i))
    }

    pub fn is_favorite(&self, recipe: &Recipe) -> bool {
        self.favorites.contains(&recipe.id)
    }

    /// Toggle the selected recipe in the favorite set and persist the full
    /// set. In the favorites view an unfavorited card disappears right away.
    pub fn toggle_favorite(&mut self) -> Result<()> {
        let Some(recipe) = self.selected_recipe() else {
            return Ok(());
        };
        let id = recipe.id.clone();

        if !self.favorites.remove(&id) {
            self.favorites.insert(id);
        }
        self.persist.save_favorites(&self.favorites)?;

        if self.current_tab == Tab::Favorites {
            let results = filter::favorite_results(&self.recipes, &self.favorites);
            self.result_selection = self
                .result_selection
                .min(results.len().saturating_sub(1));
            self.results = Some(results);
        }
        Ok(())
    }

    /// Toggle the highlighted checklist ingredient and persist the full set.
    pub fn toggle_checklist_item(&mut self) -> Result<()> {
        let Some(name) = self.checklist.get(self.checklist_selection).cloned() else {
            return Ok(());
        };
        if !self.my_bar.remove(&name) {
            self.my_bar.insert(name);
        }
        self.persist.save_my_bar(&self.my_bar)
    }

    /// The "clear my bar" trigger.
    pub fn clear_my_bar(&mut self) -> Result<()> {
        self.my_bar.clear();
        self.persist.save_my_bar(&self.my_bar)?;
        self.results = None;
        self.result_selection = 0;
        Ok(())
    }

    // =========================================================================
    // Selection movement
    // =========================================================================

    pub fn result_count(&self) -> usize {
        self.results.as_ref().map_or(0, Vec::len)
    }

    pub fn move_result_selection(&mut self, delta: isize) {
        let len = self.result_count();
        if len == 0 {
            return;
        }
        let current = self.result_selection as isize;
        self.result_selection = (current + delta).clamp(0, len as isize - 1) as usize;
    }

    pub fn move_checklist_selection(&mut self, delta: isize) {
        let len = self.checklist.len();
        if len == 0 {
            return;
        }
        let current = self.checklist_selection as isize;
        self.checklist_selection = (current + delta).clamp(0, len as isize - 1) as usize;
    }
}

// ============================================================================
// Tests
// ============================================================================
