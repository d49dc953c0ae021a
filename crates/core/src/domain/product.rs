use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::profile::Goal;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Performance")]
    Performance,
    #[serde(rename = "Weight Management")]
    WeightManagement,
    #[serde(rename = "Health & Wellness")]
    HealthWellness,
    #[serde(rename = "Recovery & Sleep")]
    RecoverySleep,
    #[serde(rename = "Focus & Cognition")]
    FocusCognition,
    #[serde(rename = "Beauty")]
    Beauty,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Performance,
        Category::WeightManagement,
        Category::HealthWellness,
        Category::RecoverySleep,
        Category::FocusCognition,
        Category::Beauty,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Performance => "Performance",
            Self::WeightManagement => "Weight Management",
            Self::HealthWellness => "Health & Wellness",
            Self::RecoverySleep => "Recovery & Sleep",
            Self::FocusCognition => "Focus & Cognition",
            Self::Beauty => "Beauty",
        }
    }

    /// Accepts the display label or a loose slug (`recovery-sleep`, `focus`).
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "performance" => Some(Self::Performance),
            "weight management" | "weight" => Some(Self::WeightManagement),
            "health & wellness" | "health wellness" | "health" | "wellness" => {
                Some(Self::HealthWellness)
            }
            "recovery & sleep" | "recovery sleep" | "recovery" | "sleep" => {
                Some(Self::RecoverySleep)
            }
            "focus & cognition" | "focus cognition" | "focus & energy" | "focus" => {
                Some(Self::FocusCognition)
            }
            "beauty" => Some(Self::Beauty),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PriorityTier {
    Essential,
    High,
    Medium,
}

impl PriorityTier {
    /// Lenient parse for externally supplied labels; unknown labels yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "essential" => Some(Self::Essential),
            "high" => Some(Self::High),
            "medium" => Some(Self::Medium),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub category: Category,
    pub price: Decimal,
    pub currency: String,
    pub priority: PriorityTier,
    pub dosage: String,
    pub timing: String,
    pub goal_tags: Vec<Goal>,
    pub active: bool,
}

impl Product {
    pub fn supports(&self, goal: Goal) -> bool {
        self.goal_tags.contains(&goal)
    }

    /// Lowercased title and description, used for keyword lookups.
    pub(crate) fn search_text(&self) -> String {
        format!("{} {}", self.name, self.description).to_lowercase()
    }
}
