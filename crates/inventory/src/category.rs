use serde::{Deserialize, Serialize};

/// Food category of an inventory item.
///
/// The four named categories carry their own shelf-life and reliability
/// constants. Anything else lands in `Other`, which always resolves to the
/// `other` column of a [`CategoryTable`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Dairy,
    Meat,
    Produce,
    Bakery,
    Other(String),
}

impl Category {
    /// Display name, also used as the tie-break key when ordering categories.
    pub fn name(&self) -> &str {
        match self {
            Category::Dairy => "Dairy",
            Category::Meat => "Meat",
            Category::Produce => "Produce",
            Category::Bakery => "Bakery",
            Category::Other(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Other(_))
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        match value.trim() {
            "Dairy" => Category::Dairy,
            "Meat" => Category::Meat,
            "Produce" => Category::Produce,
            "Bakery" => Category::Bakery,
            other => Category::Other(other.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::from(value.as_str())
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Other(name) => name,
            known => known.name().to_string(),
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per named category plus a fallback for [`Category::Other`].
///
/// Replaces string-keyed lookups: every category resolves to exactly one
/// field, so an unmapped category can never miss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTable<T> {
    pub dairy: T,
    pub meat: T,
    pub produce: T,
    pub bakery: T,
    pub other: T,
}

impl<T> CategoryTable<T> {
    pub fn get(&self, category: &Category) -> &T {
        match category {
            Category::Dairy => &self.dairy,
            Category::Meat => &self.meat,
            Category::Produce => &self.produce,
            Category::Bakery => &self.bakery,
            Category::Other(_) => &self.other,
        }
    }

    /// Iterate values in declaration order (`other` last).
    pub fn values(&self) -> impl Iterator<Item = &T> {
        [&self.dairy, &self.meat, &self.produce, &self.bakery, &self.other].into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_names_and_keeps_unknown_ones() {
        assert_eq!(Category::from("Dairy"), Category::Dairy);
        assert_eq!(Category::from(" Bakery "), Category::Bakery);
        assert_eq!(Category::from("Frozen"), Category::Other("Frozen".to_string()));
        assert_eq!(Category::from(""), Category::Other(String::new()));
    }

    #[test]
    fn serializes_as_plain_string() {
        let json = serde_json::to_string(&Category::Produce).unwrap();
        assert_eq!(json, "\"Produce\"");

        let other: Category = serde_json::from_str("\"Canned\"").unwrap();
        assert_eq!(other, Category::Other("Canned".to_string()));
        assert_eq!(serde_json::to_string(&other).unwrap(), "\"Canned\"");
    }

    #[test]
    fn table_routes_unknown_categories_to_other() {
        let table = CategoryTable {
            dairy: 1,
            meat: 2,
            produce: 3,
            bakery: 4,
            other: 9,
        };

        assert_eq!(*table.get(&Category::Meat), 2);
        assert_eq!(*table.get(&Category::Other("Frozen".into())), 9);
        assert_eq!(table.values().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 9]);
    }
}
