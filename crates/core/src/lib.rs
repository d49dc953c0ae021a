pub mod catalog;
pub mod config;
pub mod domain;
pub mod errors;
pub mod matching;
pub mod recommend;

pub use catalog::{classify_category, Catalog, ExternalProduct};
pub use domain::product::{Category, PriorityTier, Product, ProductId};
pub use domain::profile::{
    Challenge, DietType, Goal, QuizAnswers, ScaleAnswer, TrainingFrequency, UserProfile,
};
pub use domain::stack::{RecommendationItem, Stack};
pub use errors::{ApplicationError, DomainError};
pub use matching::{FuzzyMatcher, MatchSource, Resolution, SynonymTable};
pub use recommend::{
    canonicalize_advisor_stack, AdvisorResponse, AdvisorSupplement, PrioritySelector, RuleEngine,
    ScoreBand, ScoreBreakdown, ScoreCalculator,
};
