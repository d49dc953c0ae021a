//! Stackcoach agent runtime
//!
//! Async edges around the deterministic engines in `stackcoach-core`:
//! - `catalog_source` fetches the storefront catalog once per session and
//!   falls back to the built-in catalog on any failure
//! - `advisor` talks to the optional external AI advisor
//! - `runtime` assembles score, priority picks and a stack, choosing the
//!   advisor stack when it succeeds and the rule-engine stack otherwise
//!
//! # Safety Principle
//!
//! The advisor only suggests names and wording. Canonical names, dosage
//! defaults and scores always come from the core.

pub mod advisor;
pub mod catalog_source;
pub mod runtime;

pub use advisor::{AdvisorClient, AdvisorError, AdvisorRequest, HttpAdvisorClient};
pub use catalog_source::{
    CatalogCache, CatalogSnapshot, CatalogSource, CatalogSourceError, HttpCatalogSource,
    SnapshotOrigin, StaticCatalogSource,
};
pub use runtime::{Recommendation, RecommendationRuntime, StackSource};
