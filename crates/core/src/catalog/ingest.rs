//! Building a catalog snapshot from an external storefront payload.

use std::collections::HashSet;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{seeds, Catalog};
use crate::domain::product::{Category, PriorityTier, Product, ProductId};

const DEFAULT_DIRECTIONS: &str = "As directed";

/// Keyword buckets in priority order. The first bucket with a hit decides the
/// category; anything unmatched is Health & Wellness.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Performance,
        &[
            "protein",
            "creatine",
            "pre-workout",
            "preworkout",
            "bcaa",
            "beta-alanine",
            "citrulline",
            "electrolyte",
            "pump",
            "strength",
            "performance",
            "muscle",
        ],
    ),
    (
        Category::WeightManagement,
        &[
            "fat burn",
            "fat loss",
            "thermogenic",
            "green tea",
            "carnitine",
            "metabolism",
            "weight",
            "appetite",
            "fiber",
            "linoleic",
        ],
    ),
    (
        Category::RecoverySleep,
        &[
            "sleep",
            "melatonin",
            "magnesium",
            "recovery",
            "ashwagandha",
            "theanine",
            "glutamine",
            "cherry",
            "relax",
            "calm",
        ],
    ),
    (
        Category::FocusCognition,
        &[
            "focus",
            "nootropic",
            "cognitive",
            "brain",
            "memory",
            "lion's mane",
            "alpha-gpc",
            "choline",
            "rhodiola",
            "energy",
        ],
    ),
    (Category::Beauty, &["collagen", "biotin", "hyaluronic", "skin", "hair", "nail", "beauty"]),
];

/// Product as returned by the storefront collaborator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExternalProduct {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub product_type: Option<String>,
    #[serde(default)]
    pub variant_id: Option<String>,
}

fn default_currency() -> String {
    "USD".to_string()
}

fn default_available() -> bool {
    true
}

pub fn classify_category(
    title: &str,
    description: &str,
    tags: &[String],
    product_type: Option<&str>,
) -> Category {
    let haystack =
        format!("{title} {description} {} {}", tags.join(" "), product_type.unwrap_or_default())
            .to_lowercase();

    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| haystack.contains(keyword)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::HealthWellness)
}

impl Catalog {
    /// Builds a snapshot from storefront products. Dosage, timing, priority and
    /// goal tags come from the built-in definition with the same title when one
    /// exists. Repeated titles keep their first occurrence.
    pub fn from_external(products: Vec<ExternalProduct>) -> Self {
        let mut seen = HashSet::new();
        let mut converted = Vec::with_capacity(products.len());

        for external in products {
            let title = external.title.trim().to_string();
            if title.is_empty() || !seen.insert(title.to_lowercase()) {
                debug!(
                    event_name = "engine.catalog.skipped_external_product",
                    product_id = %external.id,
                    title = %external.title,
                    "skipping untitled or repeated storefront product"
                );
                continue;
            }

            let category = classify_category(
                &title,
                &external.description,
                &external.tags,
                external.product_type.as_deref(),
            );
            let seed = seeds::find_seed(&title);

            converted.push(Product {
                id: ProductId(external.id),
                name: title,
                description: external.description,
                category,
                price: external.price,
                currency: external.currency,
                priority: seed.map_or(PriorityTier::Medium, |seed| seed.priority),
                dosage: seed.map_or(DEFAULT_DIRECTIONS, |seed| seed.dosage).to_string(),
                timing: seed.map_or(DEFAULT_DIRECTIONS, |seed| seed.timing).to_string(),
                goal_tags: seed.map(|seed| seed.goals.to_vec()).unwrap_or_default(),
                active: external.available,
            });
        }

        Self { products: converted }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{classify_category, ExternalProduct};
    use crate::catalog::Catalog;
    use crate::domain::product::{Category, PriorityTier};
    use crate::domain::profile::Goal;

    fn external(id: &str, title: &str, description: &str) -> ExternalProduct {
        ExternalProduct {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            price: Decimal::new(2999, 2),
            currency: "USD".to_string(),
            available: true,
            images: Vec::new(),
            tags: Vec::new(),
            product_type: None,
            variant_id: None,
        }
    }

    #[test]
    fn first_matching_bucket_wins() {
        // "protein" (Performance) outranks "collagen" (Beauty).
        assert_eq!(
            classify_category("Collagen Protein Bar", "", &[], None),
            Category::Performance
        );
        assert_eq!(
            classify_category("Night Formula", "melatonin blend", &[], None),
            Category::RecoverySleep
        );
        assert_eq!(
            classify_category("Mystery Tonic", "", &["nootropic".to_string()], None),
            Category::FocusCognition
        );
        assert_eq!(classify_category("Glow", "", &[], Some("Skin Care")), Category::Beauty);
        assert_eq!(classify_category("Vitamin C", "immune", &[], None), Category::HealthWellness);
    }

    #[test]
    fn builtin_attributes_are_copied_for_known_titles() {
        let catalog = Catalog::from_external(vec![
            external("gid://1", "Magnesium Glycinate", "Sleep support"),
            external("gid://2", "Sea Moss Gel", "Trace minerals"),
        ]);

        let magnesium = catalog.by_canonical_name("Magnesium Glycinate").expect("ingested");
        assert_eq!(magnesium.category, Category::RecoverySleep);
        assert_eq!(magnesium.priority, PriorityTier::Essential);
        assert_eq!(magnesium.dosage, "300-400mg");
        assert!(magnesium.supports(Goal::Sleep));

        let sea_moss = catalog.by_canonical_name("Sea Moss Gel").expect("ingested");
        assert_eq!(sea_moss.category, Category::HealthWellness);
        assert_eq!(sea_moss.priority, PriorityTier::Medium);
        assert_eq!(sea_moss.dosage, "As directed");
        assert!(sea_moss.goal_tags.is_empty());
    }

    #[test]
    fn unavailable_and_repeated_products_do_not_participate() {
        let mut sold_out = external("gid://3", "Melatonin", "");
        sold_out.available = false;

        let catalog = Catalog::from_external(vec![
            sold_out,
            external("gid://4", "Biotin", "Hair"),
            external("gid://5", "biotin", "Duplicate listing"),
            external("gid://6", "   ", ""),
        ]);

        assert_eq!(catalog.len(), 2);
        assert!(catalog.by_canonical_name("Melatonin").is_none());
        assert_eq!(catalog.list_active().count(), 1);
    }

    #[test]
    fn storefront_json_deserializes_with_defaults() {
        let product: ExternalProduct = serde_json::from_str(
            r#"{"id":"gid://7","title":"Creatine Monohydrate","price":"29.99","tags":["strength"]}"#,
        )
        .expect("deserialize product");

        assert_eq!(product.price, Decimal::new(2999, 2));
        assert_eq!(product.currency, "USD");
        assert!(product.available);
        assert!(product.variant_id.is_none());
    }
}
