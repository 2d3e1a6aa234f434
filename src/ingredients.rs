//! Ingredient-line normalization and the My Bar checklist.
//!
//! Recipe ingredient lines are free text ("2 oz Fresh Lime Juice"). The
//! checklist needs bare ingredient names, so lines go through a small
//! normalization pipeline driven by two vocabulary tables rather than inline
//! patterns: a preparation-prefix list and a quantity-unit list. The tables
//! are data so they can be tested and extended without touching control flow.

use std::collections::HashMap;

use crate::models::Recipe;

/// Preparation words stripped from the front of a line.
pub const PREP_PREFIXES: &[&str] = &["fresh", "juice of", "chilled", "hot", "dry", "sweet"];

/// Measurement units that may follow a leading quantity.
pub const UNITS: &[&str] = &[
    "oz", "cl", "ml", "dash", "dashes", "tsp", "tbsp", "cup", "cups", "qt", "liter", "litre",
    "shot", "shots", "part", "parts", "piece", "pieces", "slice", "slices", "wedge", "wedges",
    "leaf", "leaves", "sprig", "sprigs", "stick", "sticks", "drop", "drops", "bottle", "bottles",
    "can", "cans",
];

/// How many of the most frequent ingredients the checklist shows.
pub const CHECKLIST_SIZE: usize = 48;

/// Normalize one ingredient line to a display name.
///
/// Pipeline: lowercase, truncate at the first parenthesis, strip prep
/// prefix / quantity-and-unit / leftover "of ", then title-case. The three
/// strips repeat to a fixed point because they can expose each other: a
/// quantity hides a prep prefix ("2 oz Fresh Lime Juice") and a prefix hides
/// a quantity ("Juice of 1 lime").
///
/// Returns `None` when nothing is left, e.g. a pure parenthetical note.
pub fn normalize(line: &str) -> Option<String> {
    let mut s = line.to_lowercase();
    if let Some(i) = s.find('(') {
        s.truncate(i);
    }
    let mut s = s.trim().to_string();

    loop {
        let mut changed = false;
        if let Some(rest) = strip_prep_prefix(&s) {
            s = rest.to_string();
            changed = true;
        }
        if let Some(rest) = strip_quantity(&s) {
            s = rest.to_string();
            changed = true;
        }
        if let Some(rest) = s.strip_prefix("of ") {
            s = rest.trim_start().to_string();
            changed = true;
        }
        if !changed {
            break;
        }
    }

    let name = title_case(&s);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// Frequency of each normalized ingredient name across the whole store.
pub fn ingredient_counts(recipes: &[Recipe]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for recipe in recipes {
        for line in &recipe.ingredients {
            if let Some(name) = normalize(line) {
                *counts.entry(name).or_insert(0) += 1;
            }
        }
    }
    counts
}

/// The checklist: the `CHECKLIST_SIZE` most frequent normalized names,
/// re-sorted alphabetically for display. Frequency ties are broken by name
/// ascending before the cut so the cut is deterministic.
pub fn checklist(recipes: &[Recipe]) -> Vec<String> {
    let mut ranked: Vec<(String, usize)> = ingredient_counts(recipes).into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(CHECKLIST_SIZE);

    let mut names: Vec<String> = ranked.into_iter().map(|(name, _)| name).collect();
    names.sort();
    names
}

fn strip_prep_prefix(s: &str) -> Option<&str> {
    for prefix in PREP_PREFIXES {
        if let Some(rest) = s.strip_prefix(prefix) {
            if let Some(rest) = rest.strip_prefix(' ') {
                return Some(rest.trim_start());
            }
        }
    }
    None
}

/// Characters a quantity expression is made of: digits, fractions (ASCII and
/// the Unicode vulgar-fraction blocks), ranges, decimals.
fn is_quantity_char(c: char) -> bool {
    c.is_ascii_digit()
        || c == ' '
        || c == '.'
        || c == '/'
        || c == '-'
        || ('\u{00BC}'..='\u{00BE}').contains(&c)
        || ('\u{2150}'..='\u{215E}').contains(&c)
}

/// Strip a leading quantity expression plus at most one following unit word.
/// The unit is only recognized after an actual quantity and at a word
/// boundary, so "dash of salt" keeps its dash and "cupcake" keeps its cup.
fn strip_quantity(s: &str) -> Option<&str> {
    let end = s
        .char_indices()
        .find(|&(_, c)| !is_quantity_char(c))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }

    let rest = &s[end..];
    for unit in UNITS {
        if let Some(after) = rest.strip_prefix(unit) {
            if after.is_empty() {
                return Some("");
            }
            if after.starts_with(|c: char| !c.is_alphanumeric()) {
                return Some(after.trim_start());
            }
        }
    }
    Some(rest.trim_start())
}

fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_quantity_unit_prefix_and_parenthetical() {
        assert_eq!(
            normalize("2 oz Fresh Lime Juice (squeezed)"),
            Some("Lime Juice".to_string())
        );
    }

    #[test]
    fn test_normalize_strips_prefix_then_quantity() {
        assert_eq!(normalize("Juice of 1 lime"), Some("Lime".to_string()));
    }

    #[test]
    fn test_normalize_handles_ranges_and_plural_units() {
        assert_eq!(
            normalize("3-4 dashes Angostura Bitters"),
            Some("Angostura Bitters".to_string())
        );
    }

    #[test]
    fn test_normalize_handles_fractions() {
        assert_eq!(normalize("1/2 oz Simple Syrup"), Some("Simple Syrup".to_string()));
        assert_eq!(normalize("\u{00BD} oz Triple Sec"), Some("Triple Sec".to_string()));
    }

    #[test]
    fn test_unit_requires_word_boundary() {
        // "cupcake" must not lose its "cup".
        assert_eq!(normalize("2 cupcake sprinkles"), Some("Cupcake Sprinkles".to_string()));
    }

    #[test]
    fn test_unit_without_quantity_is_kept() {
        assert_eq!(normalize("dash of salt"), Some("Dash Of Salt".to_string()));
    }

    #[test]
    fn test_leading_digits_in_brand_names_are_stripped() {
        // Accepted false positive of the quantity strip.
        assert_eq!(normalize("7-Up"), Some("Up".to_string()));
    }

    #[test]
    fn test_pure_parenthetical_yields_nothing() {
        assert_eq!(normalize("(optional)"), None);
    }

    fn recipe_with(lines: &[&str]) -> Recipe {
        serde_json::from_value(serde_json::json!({
            "id": "1",
            "name": "Test",
            "ingredients": lines,
        }))
        .unwrap()
    }

    #[test]
    fn test_counts_group_by_normalized_name() {
        let recipes = vec![
            recipe_with(&["2 oz Gin", "1 Lime Wedge"]),
            recipe_with(&["1 oz gin", "Juice of 1 lime"]),
        ];
        let counts = ingredient_counts(&recipes);
        assert_eq!(counts.get("Gin"), Some(&2));
        assert_eq!(counts.get("Lime Wedge"), Some(&1));
        assert_eq!(counts.get("Lime"), Some(&1));
    }

    #[test]
    fn test_checklist_cuts_ties_by_name_then_resorts_alphabetically() {
        // 50 distinct singleton names plus one frequent one. The cut keeps
        // the frequent name and the alphabetically-first 47 singletons.
        let mut recipes: Vec<Recipe> = (1..=50)
            .map(|i| recipe_with(&[&format!("Ing{:02}", i)]))
            .collect();
        recipes.push(recipe_with(&["Vodka", "Vodka", "Vodka"]));

        let list = checklist(&recipes);
        assert_eq!(list.len(), CHECKLIST_SIZE);
        assert!(list.contains(&"Vodka".to_string()));
        assert!(list.contains(&"Ing47".to_string()));
        assert!(!list.contains(&"Ing48".to_string()));
        // Alphabetical for display, so Vodka sorts last.
        assert_eq!(list.first(), Some(&"Ing01".to_string()));
        assert_eq!(list.last(), Some(&"Vodka".to_string()));
    }

    #[test]
    fn test_checklist_is_sorted_alphabetically() {
        let recipes = vec![recipe_with(&["Vodka", "Gin", "Lime Juice", "Gin"])];
        assert_eq!(checklist(&recipes), vec!["Gin", "Lime Juice", "Vodka"]);
    }
}
