use std::path::Path;

use serde::Serialize;
use stackcoach_core::{ScoreBand, ScoreBreakdown, ScoreCalculator};

use crate::commands::{load_profile, CommandResult};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScoreReport {
    primary_goal: &'static str,
    score: ScoreBreakdown,
    band: ScoreBand,
    band_label: &'static str,
}

pub fn run(answers_path: &Path) -> CommandResult {
    let profile = match load_profile("score", answers_path) {
        Ok(profile) => profile,
        Err(result) => return result,
    };

    let score = ScoreCalculator::new().score(&profile);
    let band = score.band();
    let report = ScoreReport {
        primary_goal: profile.primary_goal.as_str(),
        score,
        band,
        band_label: band.label(),
    };

    CommandResult::report("score", &report)
}
