mod ingest;
pub(crate) mod seeds;

pub use ingest::{classify_category, ExternalProduct};

use std::collections::HashSet;

use crate::domain::product::{Category, Product};
use crate::domain::profile::Goal;
use crate::errors::DomainError;

/// Immutable product snapshot. Built once and passed by reference to every
/// engine; only active products take part in lookups.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.name.to_lowercase()) {
                return Err(DomainError::DuplicateCanonicalName(product.name.clone()));
            }
        }

        Ok(Self { products })
    }

    pub fn builtin() -> Self {
        Self { products: seeds::PRODUCT_SEEDS.iter().map(|seed| seed.to_product()).collect() }
    }

    pub fn list_active(&self) -> impl Iterator<Item = &Product> + '_ {
        self.products.iter().filter(|product| product.active)
    }

    pub fn by_canonical_name(&self, name: &str) -> Option<&Product> {
        self.list_active().find(|product| product.name == name)
    }

    pub fn by_category(&self, category: Category) -> Vec<&Product> {
        self.list_active().filter(|product| product.category == category).collect()
    }

    pub fn by_goal_tag(&self, goal: Goal) -> Vec<&Product> {
        self.list_active().filter(|product| product.supports(goal)).collect()
    }

    /// Keyword lookup over names and descriptions. Keywords are tried in order;
    /// for each, the first matching product in catalog order wins.
    pub fn find_by_keywords(
        &self,
        category: Option<Category>,
        keywords: &[&str],
    ) -> Option<&Product> {
        self.find_by_keywords_excluding(category, keywords, &[])
    }

    /// Same as [`find_by_keywords`](Self::find_by_keywords), skipping products
    /// whose canonical name is in `excluded`.
    pub fn find_by_keywords_excluding(
        &self,
        category: Option<Category>,
        keywords: &[&str],
        excluded: &[&str],
    ) -> Option<&Product> {
        keywords.iter().find_map(|keyword| {
            let keyword = keyword.to_lowercase();
            self.list_active()
                .filter(|product| category.map_or(true, |category| product.category == category))
                .filter(|product| !excluded.contains(&product.name.as_str()))
                .find(|product| product.search_text().contains(&keyword))
        })
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Catalog;
    use crate::domain::product::Category;
    use crate::domain::profile::Goal;
    use crate::errors::DomainError;

    #[test]
    fn builtin_catalog_has_unique_names() {
        let builtin = Catalog::builtin();
        let products = builtin.list_active().cloned().collect::<Vec<_>>();

        let rebuilt = Catalog::new(products).expect("builtin names are unique");
        assert_eq!(rebuilt.len(), builtin.len());
    }

    #[test]
    fn duplicate_names_are_rejected_case_insensitively() {
        let builtin = Catalog::builtin();
        let mut products = builtin.list_active().take(2).cloned().collect::<Vec<_>>();
        let mut copy = products[0].clone();
        copy.name = copy.name.to_uppercase();
        products.push(copy);

        assert!(matches!(Catalog::new(products), Err(DomainError::DuplicateCanonicalName(_))));
    }

    #[test]
    fn unknown_name_is_not_found() {
        let catalog = Catalog::builtin();

        assert!(catalog.by_canonical_name("Creatine Monohydrate").is_some());
        assert!(catalog.by_canonical_name("creatine monohydrate").is_none());
        assert!(catalog.by_canonical_name("Snake Oil").is_none());
    }

    #[test]
    fn inactive_products_are_hidden() {
        let mut products = Catalog::builtin().list_active().cloned().collect::<Vec<_>>();
        for product in products.iter_mut().filter(|product| product.name == "Melatonin") {
            product.active = false;
        }
        let catalog = Catalog::new(products).expect("valid catalog");

        assert!(catalog.by_canonical_name("Melatonin").is_none());
        assert!(catalog
            .by_category(Category::RecoverySleep)
            .iter()
            .all(|product| product.name != "Melatonin"));
    }

    #[test]
    fn category_and_goal_views_preserve_catalog_order() {
        let catalog = Catalog::builtin();

        let sleep = catalog.by_category(Category::RecoverySleep);
        assert_eq!(sleep.first().map(|product| product.name.as_str()), Some("Magnesium Glycinate"));

        let focus = catalog.by_goal_tag(Goal::Focus);
        assert!(focus.iter().any(|product| product.name == "Lion's Mane Mushroom"));
        assert!(focus.iter().all(|product| product.supports(Goal::Focus)));
    }

    #[test]
    fn keyword_lookup_tries_keywords_in_order() {
        let catalog = Catalog::builtin();

        let stress = catalog.find_by_keywords(None, &["adaptogen", "magnesium"]);
        assert_eq!(stress.map(|product| product.name.as_str()), Some("Ashwagandha KSM-66"));

        let sleep = catalog.find_by_keywords(Some(Category::RecoverySleep), &["sleep"]);
        assert_eq!(sleep.map(|product| product.name.as_str()), Some("Magnesium Glycinate"));

        assert!(catalog.find_by_keywords(Some(Category::Beauty), &["creatine"]).is_none());
    }

    #[test]
    fn excluded_names_move_lookup_to_the_next_match() {
        let catalog = Catalog::builtin();

        let next = catalog.find_by_keywords_excluding(
            None,
            &["multivitamin"],
            &["Daily Multivitamin"],
        );
        assert_eq!(next.map(|product| product.name.as_str()), Some("Vegan Multivitamin"));

        let exhausted = catalog.find_by_keywords_excluding(
            Some(Category::Beauty),
            &["biotin"],
            &["Biotin"],
        );
        assert!(exhausted.is_none());
    }
}
