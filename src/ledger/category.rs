use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::currency::Language;

/// Spending/earning category attached to every transaction.
///
/// Codes outside the known set are preserved in `Unrecognized` so stored data
/// survives a round trip untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Food,
    Transport,
    Housing,
    Health,
    Education,
    Entertainment,
    Other,
    Unrecognized(String),
}

impl Category {
    /// Every known category, in display order.
    pub const ALL: [Category; 7] = [
        Category::Food,
        Category::Transport,
        Category::Housing,
        Category::Health,
        Category::Education,
        Category::Entertainment,
        Category::Other,
    ];

    /// Maps a stored code to its category. Matching is exact, so `"Food"` stays
    /// an unrecognized code and is written back unchanged.
    pub fn from_code(code: &str) -> Self {
        match code {
            "food" => Category::Food,
            "transport" => Category::Transport,
            "housing" => Category::Housing,
            "health" => Category::Health,
            "education" => Category::Education,
            "entertainment" => Category::Entertainment,
            "other" => Category::Other,
            _ => Category::Unrecognized(code.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Housing => "housing",
            Category::Health => "health",
            Category::Education => "education",
            Category::Entertainment => "entertainment",
            Category::Other => "other",
            Category::Unrecognized(code) => code,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Unrecognized(_))
    }

    /// Human-readable label; unrecognized codes pass through unchanged.
    pub fn display_name(&self, language: Language) -> &str {
        match language {
            Language::Portuguese => match self {
                Category::Food => "Alimentação",
                Category::Transport => "Transporte",
                Category::Housing => "Moradia",
                Category::Health => "Saúde",
                Category::Education => "Educação",
                Category::Entertainment => "Entretenimento",
                Category::Other => "Outras",
                Category::Unrecognized(code) => code,
            },
            Language::English => match self {
                Category::Food => "Food",
                Category::Transport => "Transport",
                Category::Housing => "Housing",
                Category::Health => "Health",
                Category::Education => "Education",
                Category::Entertainment => "Entertainment",
                Category::Other => "Other",
                Category::Unrecognized(code) => code,
            },
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = String::deserialize(deserializer)?;
        Ok(Category::from_code(&code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_codes_round_trip_verbatim() {
        let category: Category = serde_json::from_str("\"Pets\"").unwrap();
        assert_eq!(category, Category::Unrecognized("Pets".into()));
        assert_eq!(category.display_name(Language::Portuguese), "Pets");
        assert_eq!(serde_json::to_string(&category).unwrap(), "\"Pets\"");
    }

    #[test]
    fn known_codes_map_to_labels() {
        assert_eq!(Category::from_code("food"), Category::Food);
        assert_eq!(Category::from_code("Food"), Category::Unrecognized("Food".into()));
        assert_eq!(Category::from_code(" food"), Category::Unrecognized(" food".into()));
        assert_eq!(Category::Food.display_name(Language::Portuguese), "Alimentação");
        assert_eq!(Category::Other.display_name(Language::English), "Other");
        assert!(Category::ALL.iter().all(Category::is_known));
    }
}
