//! Optimization score for a validated profile.

use serde::Serialize;

use super::{ENERGY_WEIGHT, GOAL_ALIGNMENT_BASE, MAX_TOTAL_SCORE, SLEEP_WEIGHT, STRESS_WEIGHT};
use crate::domain::profile::{Goal, TrainingFrequency, UserProfile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Optimized,
    Strong,
    Developing,
    NeedsAttention,
}

impl ScoreBand {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Optimized => "Optimized",
            Self::Strong => "Strong",
            Self::Developing => "Developing",
            Self::NeedsAttention => "Needs Attention",
        }
    }
}

/// Rounded sub-scores and the total. The total is rounded from the unrounded
/// components, so the displayed parts may not add up to it exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub sleep: u8,
    pub energy: u8,
    pub stress: u8,
    pub goal_alignment: u8,
    pub training_load: u8,
    pub total: u8,
}

impl ScoreBreakdown {
    pub fn band(&self) -> ScoreBand {
        match self.total {
            85..=u8::MAX => ScoreBand::Optimized,
            70..=84 => ScoreBand::Strong,
            50..=69 => ScoreBand::Developing,
            _ => ScoreBand::NeedsAttention,
        }
    }
}

struct AlignmentBonus {
    points: f64,
    applies: fn(&UserProfile) -> bool,
}

const MUSCLE_BONUSES: &[AlignmentBonus] = &[
    AlignmentBonus { points: 5.0, applies: |profile| profile.trains_frequently() },
    AlignmentBonus { points: 5.0, applies: |profile| profile.energy_level.value() >= 4 },
];

const FAT_LOSS_BONUSES: &[AlignmentBonus] = &[
    AlignmentBonus {
        points: 5.0,
        applies: |profile| profile.training_frequency >= TrainingFrequency::Moderate,
    },
    AlignmentBonus { points: 5.0, applies: |profile| profile.stress_level.value() <= 2 },
];

const SLEEP_BONUSES: &[AlignmentBonus] =
    &[AlignmentBonus { points: 10.0, applies: |profile| profile.sleep_quality.value() <= 2 }];

const FOCUS_BONUSES: &[AlignmentBonus] = &[
    AlignmentBonus { points: 5.0, applies: |profile| profile.sleep_quality.value() >= 3 },
    AlignmentBonus { points: 5.0, applies: |profile| profile.stress_level.value() <= 3 },
];

const ENDURANCE_BONUSES: &[AlignmentBonus] = &[
    AlignmentBonus {
        points: 5.0,
        applies: |profile| profile.training_frequency >= TrainingFrequency::Moderate,
    },
    AlignmentBonus { points: 5.0, applies: |profile| profile.energy_level.value() >= 3 },
];

const HORMONE_BONUSES: &[AlignmentBonus] = &[
    AlignmentBonus { points: 5.0, applies: |profile| profile.sleep_quality.value() >= 3 },
    AlignmentBonus { points: 5.0, applies: |profile| profile.stress_level.value() <= 3 },
];

fn alignment_bonuses(goal: Goal) -> &'static [AlignmentBonus] {
    match goal {
        Goal::Muscle => MUSCLE_BONUSES,
        Goal::FatLoss => FAT_LOSS_BONUSES,
        Goal::Sleep => SLEEP_BONUSES,
        Goal::Focus => FOCUS_BONUSES,
        Goal::Athletic => ENDURANCE_BONUSES,
        Goal::Hormones => HORMONE_BONUSES,
        Goal::Tone | Goal::Beauty | Goal::Longevity | Goal::Unknown => &[],
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreCalculator;

impl ScoreCalculator {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, profile: &UserProfile) -> ScoreBreakdown {
        let sleep = profile.sleep_quality.as_f64() / 5.0 * SLEEP_WEIGHT;
        let energy = profile.energy_level.as_f64() / 5.0 * ENERGY_WEIGHT;
        let stress = (6.0 - profile.stress_level.as_f64()) / 5.0 * STRESS_WEIGHT;
        let goal_alignment = goal_alignment(profile);
        let training_load = training_load(profile.training_frequency);

        let total = (sleep + energy + stress + goal_alignment + training_load)
            .round()
            .clamp(0.0, MAX_TOTAL_SCORE);

        ScoreBreakdown {
            sleep: round_component(sleep),
            energy: round_component(energy),
            stress: round_component(stress),
            goal_alignment: round_component(goal_alignment),
            training_load: round_component(training_load),
            total: round_component(total),
        }
    }
}

pub fn goal_alignment(profile: &UserProfile) -> f64 {
    GOAL_ALIGNMENT_BASE
        + alignment_bonuses(profile.primary_goal)
            .iter()
            .filter(|bonus| (bonus.applies)(profile))
            .map(|bonus| bonus.points)
            .sum::<f64>()
}

pub fn training_load(frequency: TrainingFrequency) -> f64 {
    match frequency {
        TrainingFrequency::Daily => 15.0,
        TrainingFrequency::Frequent => 12.0,
        TrainingFrequency::Moderate => 8.0,
        TrainingFrequency::Occasional => 4.0,
        TrainingFrequency::Never => 0.0,
    }
}

fn round_component(value: f64) -> u8 {
    // Saturating cast; components are bounded well below u8::MAX.
    value.round().max(0.0) as u8
}
