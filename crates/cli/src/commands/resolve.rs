use std::path::Path;

use serde::Serialize;
use stackcoach_core::config::ConfigOverrides;
use stackcoach_core::{FuzzyMatcher, Resolution};

use crate::commands::{catalog_snapshot, load_config, runtime, CatalogOrigin, CommandResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ResolveReport {
    resolutions: Vec<Resolution>,
    unresolved: usize,
    catalog: CatalogOrigin,
}

pub fn run(names: &[String], config_path: Option<&Path>) -> CommandResult {
    if names.iter().all(|name| name.trim().is_empty()) {
        return CommandResult::failure(
            "resolve",
            "input",
            "at least one product name is required",
            2,
        );
    }

    let config = match load_config("resolve", config_path, ConfigOverrides::default()) {
        Ok(config) => config,
        Err(result) => return result,
    };
    let runtime = match runtime("resolve") {
        Ok(runtime) => runtime,
        Err(result) => return result,
    };
    let snapshot = match catalog_snapshot("resolve", &config, &runtime) {
        Ok(snapshot) => snapshot,
        Err(result) => return result,
    };

    let matcher = FuzzyMatcher::new(&snapshot.catalog);
    let resolutions: Vec<Resolution> =
        names.iter().map(|name| matcher.resolve_detailed(name)).collect();
    let unresolved = resolutions.iter().filter(|resolution| !resolution.is_resolved()).count();

    CommandResult::report(
        "resolve",
        &ResolveReport { resolutions, unresolved, catalog: CatalogOrigin::from(snapshot.as_ref()) },
    )
}
