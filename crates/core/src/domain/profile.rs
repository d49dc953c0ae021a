//! Questionnaire answers and the validated profile the engines operate on.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Primary goal. Both questionnaire variants map onto this one set: the
/// eight-way quiz ids (`muscle`, `fatloss`, ...) and the six-way scoring ids
/// (`build-muscle`, `burn-fat`, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Goal {
    Muscle,
    FatLoss,
    Tone,
    Athletic,
    Beauty,
    Sleep,
    Focus,
    Longevity,
    Hormones,
    Unknown,
}

impl Goal {
    pub fn parse(value: &str) -> Self {
        let normalized = value
            .to_ascii_lowercase()
            .replace('_', " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");

        match normalized.as_str() {
            "muscle" | "build-muscle" | "muscle-gain" => Self::Muscle,
            "fatloss" | "fat-loss" | "burn-fat" | "weight-loss" => Self::FatLoss,
            "tone" | "get-toned" => Self::Tone,
            "athletic" | "endurance" | "increase-endurance" | "athletic-performance" => {
                Self::Athletic
            }
            "beauty" => Self::Beauty,
            "sleep" | "improve-sleep" | "better-sleep" => Self::Sleep,
            "focus" | "boost-focus" => Self::Focus,
            "longevity" | "healthy-aging" => Self::Longevity,
            "hormone-optimization" | "hormones" => Self::Hormones,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Muscle => "muscle",
            Self::FatLoss => "fatloss",
            Self::Tone => "tone",
            Self::Athletic => "athletic",
            Self::Beauty => "beauty",
            Self::Sleep => "sleep",
            Self::Focus => "focus",
            Self::Longevity => "longevity",
            Self::Hormones => "hormone-optimization",
            Self::Unknown => "unknown",
        }
    }
}

impl From<String> for Goal {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Goal> for &'static str {
    fn from(value: Goal) -> Self {
        value.as_str()
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Training days per week, as five ordered bands (lowest first).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum TrainingFrequency {
    Never,
    Occasional,
    Moderate,
    Frequent,
    Daily,
}

impl TrainingFrequency {
    /// Accepts both label sets: `0 / 1-2 / 3-4 / 5-6 / 7+` and `0 / 1 / 2-3 / 4-5 / 6-7`.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let compact: String = value.chars().filter(|ch| !ch.is_whitespace()).collect();
        let compact = compact.to_ascii_lowercase();
        let band = compact.trim_end_matches("days/week").trim_end_matches("days");

        match band {
            "0" | "none" | "never" => Ok(Self::Never),
            "1-2" | "1" => Ok(Self::Occasional),
            "3-4" | "2-3" => Ok(Self::Moderate),
            "5-6" | "4-5" => Ok(Self::Frequent),
            "7+" | "6-7" | "7" => Ok(Self::Daily),
            _ => Err(DomainError::UnknownTrainingFrequency(value.to_string())),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Never => "0",
            Self::Occasional => "1-2",
            Self::Moderate => "3-4",
            Self::Frequent => "5-6",
            Self::Daily => "7+",
        }
    }

    /// One of the two highest bands.
    pub fn is_frequent(&self) -> bool {
        *self >= Self::Frequent
    }
}

impl TryFrom<String> for TrainingFrequency {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TrainingFrequency> for &'static str {
    fn from(value: TrainingFrequency) -> Self {
        value.label()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DietType {
    #[default]
    Omnivore,
    Vegetarian,
    Vegan,
    Keto,
}

impl DietType {
    pub fn is_plant_based(&self) -> bool {
        matches!(self, Self::Vegan | Self::Vegetarian)
    }
}

/// Biggest training challenge. Matched without regard to case; anything
/// unrecognised becomes `Other`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Challenge {
    Recovery,
    Energy,
    Plateau,
    Motivation,
    Stress,
    Time,
    Other,
}

impl Challenge {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "recovery" => Self::Recovery,
            "energy" => Self::Energy,
            "plateau" => Self::Plateau,
            "motivation" => Self::Motivation,
            "stress" => Self::Stress,
            "time" => Self::Time,
            _ => Self::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recovery => "recovery",
            Self::Energy => "energy",
            Self::Plateau => "plateau",
            Self::Motivation => "motivation",
            Self::Stress => "stress",
            Self::Time => "time",
            Self::Other => "other",
        }
    }
}

impl From<String> for Challenge {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Challenge> for &'static str {
    fn from(value: Challenge) -> Self {
        value.as_str()
    }
}

/// A validated 1-5 questionnaire answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ScaleAnswer(u8);

impl ScaleAnswer {
    pub fn new(field: &'static str, value: Option<u8>) -> Result<Self, DomainError> {
        match value {
            None | Some(0) => Err(DomainError::IncompleteProfile { field }),
            Some(value @ 1..=5) => Ok(Self(value)),
            Some(value) => Err(DomainError::InvalidScaleAnswer { field, value }),
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub(crate) fn as_f64(&self) -> f64 {
        f64::from(self.0)
    }
}

/// Raw questionnaire payload. Every answer is optional here; validation happens
/// when converting into a [`UserProfile`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuizAnswers {
    pub primary_goal: Option<String>,
    pub sleep_quality: Option<u8>,
    pub energy_level: Option<u8>,
    pub stress_level: Option<u8>,
    pub training_frequency: Option<String>,
    pub diet_type: Option<DietType>,
    pub biggest_challenge: Option<Challenge>,
    pub health_goals: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub primary_goal: Goal,
    pub sleep_quality: ScaleAnswer,
    pub energy_level: ScaleAnswer,
    pub stress_level: ScaleAnswer,
    pub training_frequency: TrainingFrequency,
    pub diet_type: DietType,
    pub biggest_challenge: Option<Challenge>,
    pub health_goals: BTreeSet<String>,
}

impl UserProfile {
    pub fn trains_frequently(&self) -> bool {
        self.training_frequency.is_frequent()
    }

    pub fn needs_recovery(&self) -> bool {
        self.trains_frequently() || self.biggest_challenge == Some(Challenge::Recovery)
    }

    pub fn has_health_goal(&self, tag: &str) -> bool {
        self.health_goals.iter().any(|goal| goal.eq_ignore_ascii_case(tag))
    }
}

impl TryFrom<QuizAnswers> for UserProfile {
    type Error = DomainError;

    fn try_from(answers: QuizAnswers) -> Result<Self, Self::Error> {
        let primary_goal = answers
            .primary_goal
            .as_deref()
            .map(str::trim)
            .filter(|goal| !goal.is_empty())
            .map(Goal::parse)
            .ok_or(DomainError::IncompleteProfile { field: "primaryGoal" })?;

        let sleep_quality = ScaleAnswer::new("sleepQuality", answers.sleep_quality)?;
        let energy_level = ScaleAnswer::new("energyLevel", answers.energy_level)?;
        let stress_level = ScaleAnswer::new("stressLevel", answers.stress_level)?;

        let training_frequency = answers
            .training_frequency
            .as_deref()
            .ok_or(DomainError::IncompleteProfile { field: "trainingFrequency" })
            .and_then(TrainingFrequency::parse)?;

        let health_goals = answers
            .health_goals
            .into_iter()
            .map(|goal| goal.trim().to_string())
            .filter(|goal| !goal.is_empty())
            .collect();

        Ok(Self {
            primary_goal,
            sleep_quality,
            energy_level,
            stress_level,
            training_frequency,
            diet_type: answers.diet_type.unwrap_or_default(),
            biggest_challenge: answers.biggest_challenge,
            health_goals,
        })
    }
}
