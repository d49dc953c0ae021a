use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::domain::product::{PriorityTier, Product};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub name: String,
    pub dosage: String,
    pub timing: String,
    pub reason: String,
    pub priority: PriorityTier,
}

impl RecommendationItem {
    /// Copies dosage, timing and priority from the catalog entry.
    pub fn from_product(product: &Product, reason: impl Into<String>) -> Self {
        Self {
            name: product.name.clone(),
            dosage: product.dosage.clone(),
            timing: product.timing.clone(),
            reason: reason.into(),
            priority: product.priority,
        }
    }
}

/// Ordered recommendation list. Insertion order is recommendation order and a
/// canonical name appears at most once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stack {
    items: Vec<RecommendationItem>,
    pub insights: Vec<String>,
    pub ai_generated: bool,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the item unless one with the same name is already present.
    /// Returns whether the item was added.
    pub fn push(&mut self, item: RecommendationItem) -> bool {
        if self.contains(&item.name) {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name == name)
    }

    /// Case-insensitive substring match over item names.
    pub fn any_name_contains(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.items.iter().any(|item| item.name.to_lowercase().contains(&needle))
    }

    pub fn items(&self) -> &[RecommendationItem] {
        &self.items
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|item| item.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items whose name does not resolve to an active catalog product.
    pub fn unresolved_items<'a>(&'a self, catalog: &Catalog) -> Vec<&'a RecommendationItem> {
        self.items.iter().filter(|item| catalog.by_canonical_name(&item.name).is_none()).collect()
    }

    /// Sum of catalog prices; unresolved items count as zero.
    pub fn total_price(&self, catalog: &Catalog) -> Decimal {
        self.items
            .iter()
            .filter_map(|item| catalog.by_canonical_name(&item.name))
            .map(|product| product.price)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{RecommendationItem, Stack};
    use crate::catalog::Catalog;
    use crate::domain::product::PriorityTier;

    fn item(name: &str) -> RecommendationItem {
        RecommendationItem {
            name: name.to_string(),
            dosage: "As directed".to_string(),
            timing: "As directed".to_string(),
            reason: "test".to_string(),
            priority: PriorityTier::Medium,
        }
    }

    #[test]
    fn push_rejects_duplicate_names() {
        let mut stack = Stack::new();

        assert!(stack.push(item("Creatine Monohydrate")));
        assert!(!stack.push(item("Creatine Monohydrate")));
        assert!(stack.push(item("Melatonin")));
        assert_eq!(stack.names(), vec!["Creatine Monohydrate", "Melatonin"]);
    }

    #[test]
    fn name_lookup_is_case_insensitive() {
        let mut stack = Stack::new();
        stack.push(item("Magnesium Glycinate"));

        assert!(stack.any_name_contains("magnesium glycinate"));
        assert!(!stack.any_name_contains("multivitamin"));
    }

    #[test]
    fn unresolved_items_and_price_use_catalog() {
        let catalog = Catalog::builtin();
        let mut stack = Stack::new();
        stack.push(item("Creatine Monohydrate"));
        stack.push(item("Mystery Powder"));

        let unresolved = stack.unresolved_items(&catalog);
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].name, "Mystery Powder");

        let creatine = catalog.by_canonical_name("Creatine Monohydrate").expect("seeded product");
        assert_eq!(stack.total_price(&catalog), creatine.price);
        assert!(stack.total_price(&catalog) > Decimal::ZERO);
    }
}
