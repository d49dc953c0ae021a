//! Top-priority picks: an ordered strategy list evaluated until the first
//! branch whose predicate holds. Earlier branches pre-empt later ones.

use tracing::debug;

use super::MAX_PRIORITY_PICKS;
use crate::catalog::Catalog;
use crate::domain::product::Category;
use crate::domain::profile::{Goal, UserProfile};
use crate::domain::stack::RecommendationItem;

/// Keyword lookup against product names and descriptions.
#[derive(Clone, Copy, Debug)]
pub struct ProductQuery {
    pub category: Option<Category>,
    pub keywords: &'static [&'static str],
    pub reasoning: &'static str,
}

#[derive(Clone, Copy)]
pub struct SelectorBranch {
    pub name: &'static str,
    pub applies: fn(&UserProfile) -> bool,
    pub picks: &'static [ProductQuery],
}

const SLEEP_SUPPORT: ProductQuery = ProductQuery {
    category: Some(Category::RecoverySleep),
    keywords: &["sleep", "relax"],
    reasoning: "Your sleep score is the biggest limiter right now. Fixing sleep improves recovery, energy and results from every other supplement.",
};

const STRESS_SUPPORT: ProductQuery = ProductQuery {
    category: None,
    keywords: &["adaptogen", "stress", "magnesium"],
    reasoning: "High stress keeps cortisol elevated, which undermines sleep, recovery and body composition. Bring it down first.",
};

const ENERGY_SUPPORT: ProductQuery = ProductQuery {
    category: None,
    keywords: &["atp", "cellular energy"],
    reasoning: "Low energy often starts at the cellular level. Supporting ATP production helps you feel the difference day to day.",
};

const MICRONUTRIENT_BASE: ProductQuery = ProductQuery {
    category: None,
    keywords: &["multivitamin", "micronutrient"],
    reasoning: "Closing micronutrient gaps is the foundation every other supplement builds on.",
};

const STRENGTH_SUPPORT: ProductQuery = ProductQuery {
    category: Some(Category::Performance),
    keywords: &["creatine", "strength"],
    reasoning: "Creatine is the most proven supplement for strength and muscle gain, and your recovery can support hard training.",
};

const PROTEIN_SUPPORT: ProductQuery = ProductQuery {
    category: Some(Category::Performance),
    keywords: &["whey", "protein"],
    reasoning: "Hitting your daily protein target is non-negotiable for building muscle.",
};

const METABOLIC_SUPPORT: ProductQuery = ProductQuery {
    category: Some(Category::WeightManagement),
    keywords: &["metabolism", "metabolic", "thermogenic"],
    reasoning: "Metabolic support helps your calorie deficit go further without extra stimulants.",
};

const BRAIN_HEALTH: ProductQuery = ProductQuery {
    category: Some(Category::FocusCognition),
    keywords: &["brain", "cognitive"],
    reasoning: "Targeted brain-health support for sharper focus and long-term cognitive function.",
};

const ENDURANCE_ENERGY: ProductQuery = ProductQuery {
    category: None,
    keywords: &["atp", "cellular energy"],
    reasoning: "Endurance depends on efficient energy production; ATP support helps you go longer.",
};

pub const SELECTOR_BRANCHES: &[SelectorBranch] = &[
    SelectorBranch {
        name: "poor_sleep",
        applies: |profile| profile.sleep_quality.value() <= 2,
        picks: &[SLEEP_SUPPORT],
    },
    SelectorBranch {
        name: "high_stress",
        applies: |profile| profile.stress_level.value() >= 4,
        picks: &[STRESS_SUPPORT],
    },
    SelectorBranch {
        name: "low_energy",
        applies: |profile| profile.energy_level.value() <= 2,
        picks: &[ENERGY_SUPPORT, MICRONUTRIENT_BASE],
    },
    SelectorBranch {
        name: "muscle_building",
        applies: |profile| {
            profile.primary_goal == Goal::Muscle && profile.sleep_quality.value() >= 3
        },
        picks: &[STRENGTH_SUPPORT, PROTEIN_SUPPORT],
    },
    SelectorBranch {
        name: "fat_loss",
        applies: |profile| profile.primary_goal == Goal::FatLoss,
        picks: &[METABOLIC_SUPPORT, MICRONUTRIENT_BASE],
    },
    SelectorBranch {
        name: "focus",
        applies: |profile| profile.primary_goal == Goal::Focus,
        picks: &[MICRONUTRIENT_BASE, BRAIN_HEALTH],
    },
    SelectorBranch {
        name: "endurance",
        applies: |profile| profile.primary_goal == Goal::Athletic,
        picks: &[ENDURANCE_ENERGY],
    },
    SelectorBranch { name: "general", applies: |_| true, picks: &[MICRONUTRIENT_BASE] },
];

pub struct PrioritySelector<'a> {
    catalog: &'a Catalog,
}

impl<'a> PrioritySelector<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn matching_branch(&self, profile: &UserProfile) -> Option<&'static SelectorBranch> {
        SELECTOR_BRANCHES.iter().find(|branch| (branch.applies)(profile))
    }

    /// At most two items. Each query skips products an earlier slot already
    /// took; a query with no remaining match leaves its slot empty.
    pub fn select(&self, profile: &UserProfile) -> Vec<RecommendationItem> {
        let Some(branch) = self.matching_branch(profile) else {
            return Vec::new();
        };

        let mut picks: Vec<RecommendationItem> = Vec::with_capacity(MAX_PRIORITY_PICKS);
        for query in branch.picks {
            if picks.len() == MAX_PRIORITY_PICKS {
                break;
            }

            let taken: Vec<&str> = picks.iter().map(|pick| pick.name.as_str()).collect();
            let found =
                self.catalog.find_by_keywords_excluding(query.category, query.keywords, &taken);
            match found {
                Some(product) => {
                    picks.push(RecommendationItem::from_product(product, query.reasoning));
                }
                None => debug!(
                    event_name = "engine.priority.slot_empty",
                    branch = branch.name,
                    keywords = ?query.keywords,
                    "no catalog product for priority slot"
                ),
            }
        }

        picks
    }
}
