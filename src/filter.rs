//! Pure filtering over the recipe store.
//!
//! Every function here maps the full store plus mode-specific inputs to an
//! ordered list of store indices. Result order is always store order;
//! nothing re-sorts.

use std::collections::BTreeSet;

use crate::models::Recipe;

/// Search-mode inputs: three optional exact-match category filters plus a
/// free-text query. All predicates are AND-combined; absent filters pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub spirit: Option<String>,
    pub flavor: Option<String>,
    pub difficulty: Option<String>,
    pub query: String,
}

impl SearchFilters {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.spirit.is_none()
            && self.flavor.is_none()
            && self.difficulty.is_none()
            && self.query.trim().is_empty()
    }
}

/// Selectable values for the three category dropdowns, deduplicated and
/// sorted lexicographically.
#[derive(Debug, Clone, Default)]
pub struct DropdownOptions {
    pub spirits: Vec<String>,
    pub flavors: Vec<String>,
    pub difficulties: Vec<String>,
}

/// One of the three category dropdowns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Spirit,
    Flavor,
    Difficulty,
}

fn matches_categories(
    recipe: &Recipe,
    spirit: Option<&str>,
    flavor: Option<&str>,
    difficulty: Option<&str>,
) -> bool {
    let m_spirit = spirit.map_or(true, |s| recipe.main_liquor.iter().any(|v| v == s));
    let m_flavor = flavor.map_or(true, |f| recipe.flavor.iter().any(|v| v == f));
    let m_difficulty = difficulty.map_or(true, |d| recipe.difficulty.as_deref() == Some(d));
    m_spirit && m_flavor && m_difficulty
}

/// Tokenize a query on whitespace and commas, lowercased. Empty tokens from
/// repeated separators are dropped.
fn query_tokens(query: &str) -> Vec<String> {
    query
        .to_lowercase()
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Search mode: category filters AND every query token present as a
/// case-insensitive substring of name + ingredient lines.
pub fn search_results(recipes: &[Recipe], filters: &SearchFilters) -> Vec<usize> {
    let tokens = query_tokens(&filters.query);

    recipes
        .iter()
        .enumerate()
        .filter(|(_, recipe)| {
            if !matches_categories(
                recipe,
                filters.spirit.as_deref(),
                filters.flavor.as_deref(),
                filters.difficulty.as_deref(),
            ) {
                return false;
            }
            if tokens.is_empty() {
                return true;
            }
            let text = recipe.search_text();
            tokens.iter().all(|token| text.contains(token.as_str()))
        })
        .map(|(i, _)| i)
        .collect()
}

/// Favorites mode: id-in-set, nothing else.
pub fn favorite_results(recipes: &[Recipe], favorites: &BTreeSet<String>) -> Vec<usize> {
    recipes
        .iter()
        .enumerate()
        .filter(|(_, recipe)| favorites.contains(&recipe.id))
        .map(|(i, _)| i)
        .collect()
}

/// My-bar mode: every ingredient line must contain at least one owned name
/// as a case-insensitive substring. Permissive per line (substring, so
/// "Lime" covers "Limeade"), strict across the recipe (all lines covered).
pub fn my_bar_results(recipes: &[Recipe], owned: &BTreeSet<String>) -> Vec<usize> {
    // An empty bar matches nothing, not everything.
    if owned.is_empty() {
        return Vec::new();
    }

    let owned_lower: Vec<String> = owned.iter().map(|name| name.to_lowercase()).collect();

    recipes
        .iter()
        .enumerate()
        .filter(|(_, recipe)| {
            recipe.ingredients.iter().all(|line| {
                let line = line.to_lowercase();
                owned_lower.iter().any(|have| line.contains(have.as_str()))
            })
        })
        .map(|(i, _)| i)
        .collect()
}

/// Cascading dropdown options: each list is computed against the OTHER two
/// current selections, ignoring its own, so a selected value never vanishes
/// from its own dropdown and any listed value yields at least one result.
pub fn dropdown_options(recipes: &[Recipe], filters: &SearchFilters) -> DropdownOptions {
    let spirit = filters.spirit.as_deref();
    let flavor = filters.flavor.as_deref();
    let difficulty = filters.difficulty.as_deref();

    let mut spirits = BTreeSet::new();
    let mut flavors = BTreeSet::new();
    let mut difficulties = BTreeSet::new();

    for recipe in recipes {
        if matches_categories(recipe, None, flavor, difficulty) {
            spirits.extend(recipe.main_liquor.iter().cloned());
        }
        if matches_categories(recipe, spirit, None, difficulty) {
            flavors.extend(recipe.flavor.iter().cloned());
        }
        if matches_categories(recipe, spirit, flavor, None) {
            if let Some(d) = &recipe.difficulty {
                difficulties.insert(d.clone());
            }
        }
    }

    DropdownOptions {
        spirits: spirits.into_iter().collect(),
        flavors: flavors.into_iter().collect(),
        difficulties: difficulties.into_iter().collect(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(
        id: &str,
        name: &str,
        spirits: &[&str],
        flavors: &[&str],
        difficulty: &str,
        ingredients: &[&str],
    ) -> Recipe {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "name": name,
            "mainLiquor": spirits,
            "flavor": flavors,
            "difficulty": difficulty,
            "ingredients": ingredients,
        }))
        .unwrap()
    }

    fn store() -> Vec<Recipe> {
        vec![
            recipe(
                "1",
                "Gin & Tonic",
                &["Gin"],
                &["Bitter"],
                "Easy",
                &["2 oz Gin", "4 oz Tonic Water", "1 Lime Wedge"],
            ),
            recipe(
                "2",
                "Daiquiri",
                &["Rum"],
                &["Sour"],
                "Easy",
                &["2 oz White Rum", "1 oz Lime Juice", "0.5 oz Simple Syrup"],
            ),
            recipe(
                "3",
                "Old Fashioned",
                &["Whiskey"],
                &["Bitter", "Sweet"],
                "Medium",
                &["2 oz Bourbon", "1 Sugar Cube", "3 dashes Angostura Bitters"],
            ),
            recipe(
                "4",
                "Rum Punch",
                &["Rum"],
                &["Fruity"],
                "Hard",
                &["2 oz Dark Rum", "2 oz Limeade", "1 oz Grenadine"],
            ),
        ]
    }

    #[test]
    fn test_empty_filters_return_full_store_in_order() {
        let recipes = store();
        let results = search_results(&recipes, &SearchFilters::default());
        assert_eq!(results, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_query_tokens_are_order_and_separator_invariant() {
        let recipes = store();
        let base = SearchFilters {
            query: "lime rum".to_string(),
            ..Default::default()
        };
        let reordered = SearchFilters {
            query: "rum,  lime".to_string(),
            ..Default::default()
        };
        let noisy = SearchFilters {
            query: " ,rum ,,   lime, ".to_string(),
            ..Default::default()
        };

        let expected = search_results(&recipes, &base);
        assert_eq!(expected, vec![1, 3]);
        assert_eq!(search_results(&recipes, &reordered), expected);
        assert_eq!(search_results(&recipes, &noisy), expected);
    }

    #[test]
    fn test_query_matches_are_case_insensitive_substrings() {
        let recipes = store();
        let filters = SearchFilters {
            query: "ANGOSTURA".to_string(),
            ..Default::default()
        };
        assert_eq!(search_results(&recipes, &filters), vec![2]);
    }

    #[test]
    fn test_category_filters_are_and_combined() {
        let recipes = store();
        let filters = SearchFilters {
            spirit: Some("Rum".to_string()),
            difficulty: Some("Easy".to_string()),
            ..Default::default()
        };
        assert_eq!(search_results(&recipes, &filters), vec![1]);
    }

    #[test]
    fn test_favorites_filter_by_id_in_store_order() {
        let recipes = store();
        let favorites: BTreeSet<String> = ["3", "1"].iter().map(|s| s.to_string()).collect();
        assert_eq!(favorite_results(&recipes, &favorites), vec![0, 2]);
    }

    #[test]
    fn test_empty_bar_yields_empty_result() {
        let recipes = store();
        assert!(my_bar_results(&recipes, &BTreeSet::new()).is_empty());
    }

    #[test]
    fn test_my_bar_requires_every_line_covered() {
        let recipes = store();
        let mut owned: BTreeSet<String> =
            ["White Rum", "Lime Juice"].iter().map(|s| s.to_string()).collect();
        // Daiquiri still needs Simple Syrup.
        assert!(my_bar_results(&recipes, &owned).is_empty());

        owned.insert("Simple Syrup".to_string());
        assert_eq!(my_bar_results(&recipes, &owned), vec![1]);
    }

    #[test]
    fn test_my_bar_is_monotonic_under_ingredient_addition() {
        let recipes = store();
        let mut owned: BTreeSet<String> = ["Rum", "Lime", "Simple Syrup"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let before = my_bar_results(&recipes, &owned);

        owned.insert("Grenadine".to_string());
        owned.insert("Gin".to_string());
        let after = my_bar_results(&recipes, &owned);

        for index in &before {
            assert!(after.contains(index), "recipe {} dropped after adding ingredients", index);
        }
    }

    #[test]
    fn test_my_bar_substring_match_is_deliberately_permissive() {
        let recipes = store();
        // "Lime" covers both "Lime Juice" and "Limeade" lines.
        let owned: BTreeSet<String> =
            ["Rum", "Lime", "Grenadine"].iter().map(|s| s.to_string()).collect();
        assert_eq!(my_bar_results(&recipes, &owned), vec![3]);
    }

    #[test]
    fn test_dropdown_lists_ignore_their_own_selection() {
        // Only Easy recipes use Gin; selecting Easy must narrow spirit and
        // flavor to Easy values while the difficulty list stays complete.
        let recipes = store();
        let filters = SearchFilters {
            difficulty: Some("Easy".to_string()),
            ..Default::default()
        };

        let options = dropdown_options(&recipes, &filters);
        assert_eq!(options.spirits, vec!["Gin".to_string(), "Rum".to_string()]);
        assert_eq!(options.flavors, vec!["Bitter".to_string(), "Sour".to_string()]);
        assert_eq!(
            options.difficulties,
            vec!["Easy".to_string(), "Hard".to_string(), "Medium".to_string()]
        );
    }

    #[test]
    fn test_dropdown_options_are_sorted_and_deduplicated() {
        let recipes = store();
        let options = dropdown_options(&recipes, &SearchFilters::default());
        assert_eq!(
            options.flavors,
            vec![
                "Bitter".to_string(),
                "Fruity".to_string(),
                "Sour".to_string(),
                "Sweet".to_string()
            ]
        );
    }

    #[test]
    fn test_selected_spirit_constrains_other_lists() {
        let recipes = store();
        let filters = SearchFilters {
            spirit: Some("Whiskey".to_string()),
            ..Default::default()
        };
        let options = dropdown_options(&recipes, &filters);
        assert_eq!(options.flavors, vec!["Bitter".to_string(), "Sweet".to_string()]);
        assert_eq!(options.difficulties, vec!["Medium".to_string()]);
        // The spirit list itself is computed without the spirit selection.
        assert_eq!(
            options.spirits,
            vec!["Gin".to_string(), "Rum".to_string(), "Whiskey".to_string()]
        );
    }
}
