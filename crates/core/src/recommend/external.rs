//! Turning an advisor response into a canonical stack.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::rules::{GENERIC_INSIGHTS, SAFETY_DISCLAIMER};
use crate::catalog::Catalog;
use crate::domain::product::PriorityTier;
use crate::domain::stack::{RecommendationItem, Stack};
use crate::matching::FuzzyMatcher;

const DEFAULT_DIRECTIONS: &str = "As directed";
const DEFAULT_REASON: &str = "Recommended for your profile";

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorSupplement {
    pub name: String,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub timing: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorResponse {
    #[serde(default)]
    pub supplements: Vec<AdvisorSupplement>,
    #[serde(default)]
    pub insights: Vec<String>,
    #[serde(default)]
    pub summary: String,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|value| !value.is_empty())
}

/// Resolves every suggested name through the fuzzy matcher and fills missing
/// fields from the matched catalog entry, then from literal defaults.
/// Unresolved names are kept as given. Universal rules are not applied.
pub fn canonicalize_advisor_stack(response: &AdvisorResponse, catalog: &Catalog) -> Stack {
    let matcher = FuzzyMatcher::new(catalog);
    let mut stack = Stack::new();

    for supplement in &response.supplements {
        if supplement.name.trim().is_empty() {
            debug!(event_name = "engine.advisor.blank_name", "dropping unnamed advisor supplement");
            continue;
        }

        let name = matcher.resolve(&supplement.name);
        let product = catalog.by_canonical_name(&name);

        let item = RecommendationItem {
            dosage: non_empty(&supplement.dosage)
                .or(product.map(|product| product.dosage.as_str()))
                .unwrap_or(DEFAULT_DIRECTIONS)
                .to_string(),
            timing: non_empty(&supplement.timing)
                .or(product.map(|product| product.timing.as_str()))
                .unwrap_or(DEFAULT_DIRECTIONS)
                .to_string(),
            reason: non_empty(&supplement.reason).unwrap_or(DEFAULT_REASON).to_string(),
            priority: non_empty(&supplement.priority)
                .and_then(PriorityTier::parse)
                .or(product.map(|product| product.priority))
                .unwrap_or(PriorityTier::Medium),
            name,
        };

        if !stack.push(item) {
            debug!(
                event_name = "engine.advisor.duplicate",
                candidate = %supplement.name,
                "advisor suggested a product twice; keeping the first"
            );
        }
    }

    let mut insights = response
        .insights
        .iter()
        .map(|insight| insight.trim())
        .filter(|insight| !insight.is_empty())
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    if insights.is_empty() {
        insights = GENERIC_INSIGHTS.iter().map(|insight| insight.to_string()).collect();
    } else if insights.last().map(String::as_str) != Some(SAFETY_DISCLAIMER) {
        insights.push(SAFETY_DISCLAIMER.to_string());
    }

    stack.insights = insights;
    stack.ai_generated = true;
    stack
}
