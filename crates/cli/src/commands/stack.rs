use std::path::Path;

use serde::Serialize;
use stackcoach_agent::{Recommendation, RecommendationRuntime};
use stackcoach_core::config::ConfigOverrides;

use crate::commands::{
    catalog_snapshot, load_config, load_profile, read_json_file, runtime, CatalogOrigin,
    CommandResult,
};

#[derive(Debug, Serialize)]
struct StackReport {
    #[serde(flatten)]
    recommendation: Recommendation,
    catalog: CatalogOrigin,
}

#[derive(Debug, Clone, Copy)]
pub struct StackArgs<'a> {
    pub answers_path: &'a Path,
    pub prior_path: Option<&'a Path>,
    /// Forces the advisor on regardless of `advisor.enabled`.
    pub advisor: bool,
    pub config_path: Option<&'a Path>,
}

pub fn run(args: StackArgs<'_>) -> CommandResult {
    let overrides = ConfigOverrides {
        advisor_enabled: args.advisor.then_some(true),
        ..ConfigOverrides::default()
    };
    let config = match load_config("stack", args.config_path, overrides) {
        Ok(config) => config,
        Err(result) => return result,
    };
    let profile = match load_profile("stack", args.answers_path) {
        Ok(profile) => profile,
        Err(result) => return result,
    };
    let prior_result = match args.prior_path.map(|path| read_json_file("stack", path)).transpose() {
        Ok(prior_result) => prior_result,
        Err(result) => return result,
    };
    let runtime = match runtime("stack") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };
    let snapshot = match catalog_snapshot("stack", &config, &runtime) {
        Ok(snapshot) => snapshot,
        Err(result) => return result,
    };

    let engine = RecommendationRuntime::from_config(snapshot.catalog.clone(), &config.advisor);
    let recommendation = runtime.block_on(engine.recommend(&profile, prior_result));

    CommandResult::report(
        "stack",
        &StackReport { recommendation, catalog: CatalogOrigin::from(snapshot.as_ref()) },
    )
}
