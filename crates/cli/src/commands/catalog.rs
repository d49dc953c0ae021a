use std::path::Path;

use serde::Serialize;
use stackcoach_core::config::ConfigOverrides;
use stackcoach_core::{Category, Goal, Product};

use crate::commands::{catalog_snapshot, load_config, runtime, CatalogOrigin, CommandResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductRow<'a> {
    name: &'a str,
    category: Category,
    price: String,
    currency: &'a str,
    dosage: &'a str,
    timing: &'a str,
    goals: Vec<&'static str>,
}

impl<'a> From<&'a Product> for ProductRow<'a> {
    fn from(product: &'a Product) -> Self {
        Self {
            name: &product.name,
            category: product.category,
            price: product.price.to_string(),
            currency: &product.currency,
            dosage: &product.dosage,
            timing: &product.timing,
            goals: product.goal_tags.iter().map(Goal::as_str).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct CatalogReport<'a> {
    products: Vec<ProductRow<'a>>,
    catalog: CatalogOrigin,
}

pub fn run(
    category: Option<&str>,
    goal: Option<&str>,
    config_path: Option<&Path>,
) -> CommandResult {
    let category = match category.map(|value| (value, Category::parse(value))) {
        None => None,
        Some((_, Some(category))) => Some(category),
        Some((value, None)) => {
            return CommandResult::failure(
                "catalog",
                "input",
                format!("unknown category `{value}`"),
                2,
            );
        }
    };
    let goal = match goal.map(|value| (value, Goal::parse(value))) {
        None => None,
        Some((value, Goal::Unknown)) => {
            return CommandResult::failure("catalog", "input", format!("unknown goal `{value}`"), 2);
        }
        Some((_, goal)) => Some(goal),
    };

    let config = match load_config("catalog", config_path, ConfigOverrides::default()) {
        Ok(config) => config,
        Err(result) => return result,
    };
    let runtime = match runtime("catalog") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };
    let snapshot = match catalog_snapshot("catalog", &config, &runtime) {
        Ok(snapshot) => snapshot,
        Err(result) => return result,
    };

    let products = snapshot
        .catalog
        .list_active()
        .filter(|product| category.map_or(true, |category| product.category == category))
        .filter(|product| goal.map_or(true, |goal| product.supports(goal)))
        .map(ProductRow::from)
        .collect();

    CommandResult::report(
        "catalog",
        &CatalogReport { products, catalog: CatalogOrigin::from(snapshot.as_ref()) },
    )
}
