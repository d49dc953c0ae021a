use std::path::Path;

use serde::Serialize;
use stackcoach_core::config::ConfigOverrides;
use stackcoach_core::{PrioritySelector, RecommendationItem};

use crate::commands::{
    catalog_snapshot, load_config, load_profile, runtime, CatalogOrigin, CommandResult,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PicksReport {
    branch: Option<&'static str>,
    picks: Vec<RecommendationItem>,
    catalog: CatalogOrigin,
}

pub fn run(answers_path: &Path, config_path: Option<&Path>) -> CommandResult {
    let config = match load_config("picks", config_path, ConfigOverrides::default()) {
        Ok(config) => config,
        Err(result) => return result,
    };
    let profile = match load_profile("picks", answers_path) {
        Ok(profile) => profile,
        Err(result) => return result,
    };
    let runtime = match runtime("picks") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };
    let snapshot = match catalog_snapshot("picks", &config, &runtime) {
        Ok(snapshot) => snapshot,
        Err(result) => return result,
    };

    let selector = PrioritySelector::new(&snapshot.catalog);
    let report = PicksReport {
        branch: selector.matching_branch(&profile).map(|branch| branch.name),
        picks: selector.select(&profile),
        catalog: CatalogOrigin::from(snapshot.as_ref()),
    };

    CommandResult::report("picks", &report)
}
