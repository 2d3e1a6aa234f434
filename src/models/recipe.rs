use serde::{Deserialize, Deserializer, Serialize};

/// A single record from the static recipe document.
///
/// The document is read-only and fetched once at startup. Ids may appear as
/// numbers or strings in the JSON and are stringified on load; uniqueness is
/// assumed, never enforced. Collection fields default to empty when absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(rename = "mainLiquor", default)]
    pub main_liquor: Vec<String>,
    #[serde(default)]
    pub flavor: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub instructions: Vec<String>,
}

impl Recipe {
    /// Lowercased name plus ingredient lines, the haystack query tokens are
    /// matched against.
    pub fn search_text(&self) -> String {
        let mut text = self.name.clone();
        for line in &self.ingredients {
            text.push(' ');
            text.push_str(line);
        }
        text.to_lowercase()
    }
}

fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Num(i64),
        Str(String),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Num(n) => n.to_string(),
        RawId::Str(s) => s,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_id_is_stringified() {
        let recipe: Recipe =
            serde_json::from_str(r#"{"id": 7, "name": "Negroni"}"#).unwrap();
        assert_eq!(recipe.id, "7");
        assert!(recipe.ingredients.is_empty());
    }

    #[test]
    fn test_string_id_passes_through() {
        let recipe: Recipe =
            serde_json::from_str(r#"{"id": "mojito-1", "name": "Mojito"}"#).unwrap();
        assert_eq!(recipe.id, "mojito-1");
    }

    #[test]
    fn test_search_text_concatenates_name_and_ingredients() {
        let recipe: Recipe = serde_json::from_str(
            r#"{"id": 1, "name": "Daiquiri", "ingredients": ["2 oz White Rum", "1 oz Lime Juice"]}"#,
        )
        .unwrap();
        assert_eq!(recipe.search_text(), "daiquiri 2 oz white rum 1 oz lime juice");
    }
}
