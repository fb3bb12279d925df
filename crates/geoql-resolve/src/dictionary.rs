//! Selector dictionary.
//!
//! Maps selector names to the semantic type of the value they produce. The
//! dictionary is supplied by the caller and only read by the checker.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared type of a selector's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticType {
    Int,
    Float,
    String,
    Boolean,
    ArrayInt,
    ArrayFloat,
    ArrayString,
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SemanticType::Int => "int",
            SemanticType::Float => "float",
            SemanticType::String => "string",
            SemanticType::Boolean => "boolean",
            SemanticType::ArrayInt => "array_int",
            SemanticType::ArrayFloat => "array_float",
            SemanticType::ArrayString => "array_string",
        };
        f.write_str(name)
    }
}

/// Selector name to semantic type.
///
/// Names are stored lower-cased, matching how the tokenizer folds
/// identifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "IndexMap<String, SemanticType>", into = "IndexMap<String, SemanticType>")]
pub struct Dictionary {
    selectors: IndexMap<String, SemanticType>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from a JSON object such as `{"speed": "float", "tags": "array_string"}`.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn insert(&mut self, name: impl AsRef<str>, ty: SemanticType) -> Option<SemanticType> {
        self.selectors.insert(name.as_ref().to_ascii_lowercase(), ty)
    }

    pub fn get(&self, name: &str) -> Option<SemanticType> {
        self.selectors.get(&name.to_ascii_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SemanticType)> {
        self.selectors.iter().map(|(name, ty)| (name.as_str(), *ty))
    }
}

impl<S: AsRef<str>> FromIterator<(S, SemanticType)> for Dictionary {
    fn from_iter<T: IntoIterator<Item = (S, SemanticType)>>(iter: T) -> Self {
        let mut dictionary = Dictionary::new();
        for (name, ty) in iter {
            dictionary.insert(name, ty);
        }
        dictionary
    }
}

impl From<IndexMap<String, SemanticType>> for Dictionary {
    fn from(selectors: IndexMap<String, SemanticType>) -> Self {
        selectors.into_iter().collect()
    }
}

impl From<Dictionary> for IndexMap<String, SemanticType> {
    fn from(dictionary: Dictionary) -> Self {
        dictionary.selectors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json() {
        let dictionary = Dictionary::from_json(
            r#"{"speed": "float", "Count": "int", "tags": "array_string", "on": "boolean"}"#,
        )
        .unwrap();
        assert_eq!(dictionary.len(), 4);
        assert_eq!(dictionary.get("speed"), Some(SemanticType::Float));
        assert_eq!(dictionary.get("count"), Some(SemanticType::Int));
        assert_eq!(dictionary.get("TAGS"), Some(SemanticType::ArrayString));
        assert_eq!(dictionary.get("missing"), None);
    }

    #[test]
    fn test_unknown_type_name_is_rejected() {
        assert!(Dictionary::from_json(r#"{"speed": "double"}"#).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let dictionary: Dictionary = [
            ("a", SemanticType::ArrayInt),
            ("b", SemanticType::String),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&dictionary).unwrap();
        assert_eq!(json, r#"{"a":"array_int","b":"string"}"#);
        assert_eq!(Dictionary::from_json(&json).unwrap(), dictionary);
    }
}
