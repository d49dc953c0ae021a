//! Goal-based stack rules.
//!
//! Each goal owns an ordered list of entries; an entry is added when its
//! predicate (if any) holds for the profile. Two universal passes and the
//! generic insights follow every goal branch.

use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::domain::profile::{DietType, Goal, UserProfile};
use crate::domain::stack::{RecommendationItem, Stack};

pub type RulePredicate = fn(&UserProfile) -> bool;

#[derive(Clone, Copy)]
pub struct RuleEntry {
    pub name: &'static str,
    pub reason: &'static str,
    pub when: Option<RulePredicate>,
}

impl RuleEntry {
    pub const fn always(name: &'static str, reason: &'static str) -> Self {
        Self { name, reason, when: None }
    }

    pub const fn when(name: &'static str, reason: &'static str, predicate: RulePredicate) -> Self {
        Self { name, reason, when: Some(predicate) }
    }

    pub fn applies(&self, profile: &UserProfile) -> bool {
        self.when.map_or(true, |predicate| predicate(profile))
    }
}

pub const BASELINE_MAGNESIUM: &str = "Magnesium Glycinate";
pub const PLANT_BASED_MULTIVITAMIN: &str = "Vegan Multivitamin";
pub const SAFETY_DISCLAIMER: &str =
    "Always consult a healthcare provider before starting any new supplement regimen, especially if you take medication or have a medical condition.";

pub const GENERIC_INSIGHTS: &[&str] = &[
    "Consistency beats intensity: take your stack daily for at least 4-6 weeks before judging results.",
    "Supplements amplify the basics. Prioritize protein intake, whole foods and hydration first.",
    "Aim for 7-9 hours of quality sleep; recovery is where progress actually happens.",
    SAFETY_DISCLAIMER,
];

fn is_vegan(profile: &UserProfile) -> bool {
    profile.diet_type == DietType::Vegan
}

fn not_vegan(profile: &UserProfile) -> bool {
    !is_vegan(profile)
}

fn trains_frequently(profile: &UserProfile) -> bool {
    profile.trains_frequently()
}

fn needs_recovery(profile: &UserProfile) -> bool {
    profile.needs_recovery()
}

fn wants_pumps(profile: &UserProfile) -> bool {
    profile.has_health_goal("Better Pumps")
}

fn wants_joint_support(profile: &UserProfile) -> bool {
    profile.has_health_goal("Joint Health")
}

fn sleeps_poorly(profile: &UserProfile) -> bool {
    profile.sleep_quality.value() <= 3
}

fn stressed(profile: &UserProfile) -> bool {
    profile.stress_level.value() >= 4
}

fn low_energy(profile: &UserProfile) -> bool {
    profile.energy_level.value() <= 3
}

const MUSCLE_RULES: &[RuleEntry] = &[
    RuleEntry::always(
        "Creatine Monohydrate",
        "The most researched supplement for strength, power and lean mass gains.",
    ),
    RuleEntry::when(
        "Whey Protein Isolate",
        "Fast-absorbing protein that makes hitting your daily protein target easy.",
        not_vegan,
    ),
    RuleEntry::when(
        "Plant Protein Blend",
        "Complete plant protein to fuel muscle growth on a vegan diet.",
        is_vegan,
    ),
    RuleEntry::when(
        "Citrulline Malate",
        "Boosts nitric oxide for fuller pumps and more training volume.",
        wants_pumps,
    ),
    RuleEntry::when(
        "Glutamine",
        "Supports muscle recovery and gut health under heavy training loads.",
        needs_recovery,
    ),
    RuleEntry::always(
        "Vitamin D3 + K2",
        "Supports healthy testosterone, bone density and muscle function.",
    ),
];

const FAT_LOSS_RULES: &[RuleEntry] = &[
    RuleEntry::always(
        "Green Tea Extract",
        "EGCG and natural caffeine support metabolic rate and fat oxidation.",
    ),
    RuleEntry::when(
        "Whey Protein Isolate",
        "Preserves lean muscle in a calorie deficit and keeps you full longer.",
        not_vegan,
    ),
    RuleEntry::when(
        "Plant Protein Blend",
        "Preserves lean muscle in a calorie deficit on a vegan diet.",
        is_vegan,
    ),
    RuleEntry::when(
        "L-Carnitine",
        "Helps shuttle fatty acids into your cells for fuel during frequent training.",
        trains_frequently,
    ),
    RuleEntry::always("Fiber Complex", "Improves fullness and digestion while dieting."),
];

const TONE_RULES: &[RuleEntry] = &[
    RuleEntry::when(
        "Whey Protein Isolate",
        "Supports lean muscle for visible definition.",
        not_vegan,
    ),
    RuleEntry::when(
        "Plant Protein Blend",
        "Supports lean muscle for visible definition on a vegan diet.",
        is_vegan,
    ),
    RuleEntry::always(
        "Creatine Monohydrate",
        "Improves training performance for a firmer, more toned physique.",
    ),
    RuleEntry::always(
        "Green Tea Extract",
        "Gentle metabolic support while you build definition.",
    ),
    RuleEntry::when(
        "Marine Collagen Peptides",
        "Supports joints and connective tissue as training volume increases.",
        wants_joint_support,
    ),
];

const ATHLETIC_RULES: &[RuleEntry] = &[
    RuleEntry::always(
        "Electrolyte Complex",
        "Replaces the sodium, potassium and magnesium you lose in sweat.",
    ),
    RuleEntry::always(
        "Beta-Alanine",
        "Buffers lactic acid so you can sustain high-intensity efforts longer.",
    ),
    RuleEntry::always("Creatine Monohydrate", "Supports repeated sprint power and work capacity."),
    RuleEntry::when(
        "Citrulline Malate",
        "Improves blood flow and delays fatigue in long sessions.",
        wants_pumps,
    ),
    RuleEntry::when(
        "Tart Cherry Extract",
        "Reduces muscle soreness and speeds recovery between sessions.",
        needs_recovery,
    ),
];

const BEAUTY_RULES: &[RuleEntry] = &[
    RuleEntry::always(
        "Marine Collagen Peptides",
        "Supports skin elasticity and stronger hair and nails.",
    ),
    RuleEntry::always("Biotin", "Supports healthy hair and nail growth."),
    RuleEntry::always("Hyaluronic Acid", "Supports skin hydration from within."),
    RuleEntry::when(
        "Omega-3 Fish Oil",
        "Healthy fats that support the skin barrier and calm inflammation.",
        not_vegan,
    ),
    RuleEntry::when(
        "Algae Omega-3",
        "Plant-based omega-3s that support the skin barrier.",
        is_vegan,
    ),
];

const SLEEP_RULES: &[RuleEntry] = &[
    RuleEntry::always(
        BASELINE_MAGNESIUM,
        "Calms the nervous system and improves sleep depth and quality.",
    ),
    RuleEntry::when(
        "Melatonin",
        "Helps reset your sleep-wake cycle so you fall asleep faster.",
        sleeps_poorly,
    ),
    RuleEntry::always(
        "Ashwagandha KSM-66",
        "Adaptogen that lowers evening cortisol for more restful sleep.",
    ),
    RuleEntry::when("L-Theanine", "Promotes relaxation without next-day grogginess.", stressed),
];

const FOCUS_RULES: &[RuleEntry] = &[
    RuleEntry::always(
        "Lion's Mane Mushroom",
        "Supports nerve growth factor and long-term cognitive health.",
    ),
    RuleEntry::always("Alpha-GPC", "Choline source that supports focus, memory and recall."),
    RuleEntry::when(
        "Rhodiola Rosea",
        "Adaptogen that fights mental fatigue on low-energy days.",
        low_energy,
    ),
    RuleEntry::always("L-Theanine", "Smooths out focus and takes the edge off caffeine."),
    RuleEntry::when(
        "Omega-3 Fish Oil",
        "DHA is a building block of brain tissue.",
        not_vegan,
    ),
    RuleEntry::when("Algae Omega-3", "Plant-based DHA for brain health.", is_vegan),
];

const LONGEVITY_RULES: &[RuleEntry] = &[
    RuleEntry::when(
        "Omega-3 Fish Oil",
        "Supports heart, brain and joint health as you age.",
        not_vegan,
    ),
    RuleEntry::when(
        "Algae Omega-3",
        "Plant-based omega-3s for heart and brain health.",
        is_vegan,
    ),
    RuleEntry::always(
        "Vitamin D3 + K2",
        "Most adults are low in vitamin D; supports immunity and bone health.",
    ),
    RuleEntry::always("CoQ10", "Supports cellular energy production and heart health."),
    RuleEntry::always(
        "Turmeric Curcumin",
        "Supports a healthy inflammation response for healthy aging.",
    ),
];

const HORMONE_RULES: &[RuleEntry] = &[
    RuleEntry::always("ZMA", "Zinc and magnesium support healthy hormone production."),
    RuleEntry::always(
        "Vitamin D3 + K2",
        "Vitamin D is essential for healthy testosterone and estrogen balance.",
    ),
    RuleEntry::always(
        "Ashwagandha KSM-66",
        "Lowers cortisol, which otherwise suppresses healthy hormone levels.",
    ),
    RuleEntry::when(
        "Omega-3 Fish Oil",
        "Healthy fats are raw material for hormone synthesis.",
        not_vegan,
    ),
];

pub fn rules_for(goal: Goal) -> &'static [RuleEntry] {
    match goal {
        Goal::Muscle => MUSCLE_RULES,
        Goal::FatLoss => FAT_LOSS_RULES,
        Goal::Tone => TONE_RULES,
        Goal::Athletic => ATHLETIC_RULES,
        Goal::Beauty => BEAUTY_RULES,
        Goal::Sleep => SLEEP_RULES,
        Goal::Focus => FOCUS_RULES,
        Goal::Longevity => LONGEVITY_RULES,
        Goal::Hormones => HORMONE_RULES,
        Goal::Unknown => &[],
    }
}

pub struct RuleEngine<'a> {
    catalog: &'a Catalog,
}

impl<'a> RuleEngine<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn build(&self, profile: &UserProfile) -> Stack {
        let mut stack = Stack::new();

        if profile.primary_goal == Goal::Unknown {
            debug!(
                event_name = "engine.rules.unknown_goal",
                "no goal branch for profile; applying universal rules only"
            );
        }
        self.apply_rules(&mut stack, profile, rules_for(profile.primary_goal));

        if !stack.any_name_contains(BASELINE_MAGNESIUM) {
            self.add_item(
                &mut stack,
                BASELINE_MAGNESIUM,
                "Baseline recovery support: most active adults don't get enough magnesium.",
            );
        }

        if profile.diet_type.is_plant_based() && !stack.any_name_contains("multivitamin") {
            self.add_item(
                &mut stack,
                PLANT_BASED_MULTIVITAMIN,
                "Covers B12, iron, zinc and iodine, which plant-based diets often lack.",
            );
        }

        stack.insights = GENERIC_INSIGHTS.iter().map(|insight| insight.to_string()).collect();
        stack
    }

    pub fn apply_rules(&self, stack: &mut Stack, profile: &UserProfile, rules: &[RuleEntry]) {
        for rule in rules.iter().filter(|rule| rule.applies(profile)) {
            self.add_item(stack, rule.name, rule.reason);
        }
    }

    /// Adds the catalog product with this canonical name. Missing products and
    /// duplicates are skipped.
    fn add_item(&self, stack: &mut Stack, name: &str, reason: &str) -> bool {
        let Some(product) = self.catalog.by_canonical_name(name) else {
            warn!(
                event_name = "engine.rules.catalog_miss",
                product_name = name,
                "rule references a product missing from the catalog; skipping"
            );
            return false;
        };

        stack.push(RecommendationItem::from_product(product, reason))
    }
}
