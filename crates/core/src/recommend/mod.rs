//! Recommendation engines
//!
//! Deterministic stack building, optimization scoring and priority picks over
//! a validated [`UserProfile`](crate::domain::profile::UserProfile) and a
//! read-only [`Catalog`](crate::catalog::Catalog) snapshot, plus the adapter
//! that canonicalizes advisor-generated stacks.

mod external;
mod priority;
mod rules;
mod scoring;

pub use external::{canonicalize_advisor_stack, AdvisorResponse, AdvisorSupplement};
pub use priority::{PrioritySelector, ProductQuery, SelectorBranch, SELECTOR_BRANCHES};
pub use rules::{
    rules_for, RuleEngine, RuleEntry, RulePredicate, BASELINE_MAGNESIUM, GENERIC_INSIGHTS,
    PLANT_BASED_MULTIVITAMIN, SAFETY_DISCLAIMER,
};
pub use scoring::{goal_alignment, training_load, ScoreBand, ScoreBreakdown, ScoreCalculator};

/// Points for a perfect sleep answer
pub const SLEEP_WEIGHT: f64 = 25.0;

/// Points for a perfect energy answer
pub const ENERGY_WEIGHT: f64 = 20.0;

/// Points for the lowest stress answer
pub const STRESS_WEIGHT: f64 = 20.0;

/// Goal alignment before per-goal bonuses
pub const GOAL_ALIGNMENT_BASE: f64 = 10.0;

/// Upper bound of the optimization score
pub const MAX_TOTAL_SCORE: f64 = 100.0;

/// Maximum priority picks per profile
pub const MAX_PRIORITY_PICKS: usize = 2;
