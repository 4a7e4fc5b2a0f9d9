//! Category taxonomy as served by the backend.

use serde::{Deserialize, Serialize};

/// A subcategory within a material category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: u64,
    pub name: String,
}

/// A material category ("Plastics", "Metals", ...) and its subcategories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub subcategories: Vec<Subcategory>,
}

impl Category {
    pub fn subcategory_named(&self, name: &str) -> Option<&Subcategory> {
        let name = name.trim();
        self.subcategories
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    pub fn subcategory_by_id(&self, id: u64) -> Option<&Subcategory> {
        self.subcategories.iter().find(|s| s.id == id)
    }
}

/// The loaded category list, looked up by display name or backend id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taxonomy {
    categories: Vec<Category>,
}

impl Taxonomy {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn category_named(&self, name: &str) -> Option<&Category> {
        let name = name.trim();
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn category_by_id(&self, id: u64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Resolves display names to `(category_id, subcategory_id)`.
    ///
    /// Returns `None` when either name has no match, including a
    /// subcategory that belongs to a different category.
    pub fn resolve_ids(&self, category: &str, subcategory: &str) -> Option<(u64, u64)> {
        let category = self.category_named(category)?;
        let subcategory = category.subcategory_named(subcategory)?;
        Some((category.id, subcategory.id))
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Two categories used across the wizard tests.
    pub fn sample_taxonomy() -> Taxonomy {
        Taxonomy::new(vec![
            Category {
                id: 1,
                name: "Plastics".to_string(),
                subcategories: vec![
                    Subcategory { id: 10, name: "HDPE".to_string() },
                    Subcategory { id: 11, name: "PET".to_string() },
                ],
            },
            Category {
                id: 2,
                name: "Metals".to_string(),
                subcategories: vec![
                    Subcategory { id: 20, name: "Aluminium".to_string() },
                    Subcategory { id: 21, name: "Copper".to_string() },
                ],
            },
        ])
    }
}
