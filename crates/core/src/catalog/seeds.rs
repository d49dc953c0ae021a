//! Built-in product definitions. Order is significant: keyword lookups and
//! partial name matching return the first hit in this order.

use rust_decimal::Decimal;

use crate::domain::product::{Category, PriorityTier, Product, ProductId};
use crate::domain::profile::Goal;

#[derive(Debug, Clone, Copy)]
pub(crate) struct ProductSeed {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub price_cents: i64,
    pub priority: PriorityTier,
    pub dosage: &'static str,
    pub timing: &'static str,
    pub goals: &'static [Goal],
}

impl ProductSeed {
    pub(crate) fn to_product(self) -> Product {
        Product {
            id: ProductId(self.id.to_owned()),
            name: self.name.to_owned(),
            description: self.description.to_owned(),
            category: self.category,
            price: Decimal::new(self.price_cents, 2),
            currency: "USD".to_owned(),
            priority: self.priority,
            dosage: self.dosage.to_owned(),
            timing: self.timing.to_owned(),
            goal_tags: self.goals.to_vec(),
            active: true,
        }
    }
}

pub(crate) fn find_seed(name: &str) -> Option<&'static ProductSeed> {
    PRODUCT_SEEDS.iter().find(|seed| seed.name.eq_ignore_ascii_case(name.trim()))
}

pub(crate) const PRODUCT_SEEDS: &[ProductSeed] = &[
    // Performance
    ProductSeed {
        id: "perf-creatine",
        name: "Creatine Monohydrate",
        description: "Micronized creatine that saturates phosphocreatine stores for more strength and power",
        category: Category::Performance,
        price_cents: 2999,
        priority: PriorityTier::Essential,
        dosage: "5g daily",
        timing: "Any time, every day",
        goals: &[Goal::Muscle, Goal::Tone, Goal::Athletic],
    },
    ProductSeed {
        id: "perf-whey-isolate",
        name: "Whey Protein Isolate",
        description: "Fast-digesting whey protein with 25g protein per scoop for muscle growth",
        category: Category::Performance,
        price_cents: 5499,
        priority: PriorityTier::Essential,
        dosage: "1-2 scoops (25-50g protein)",
        timing: "Post-workout or between meals",
        goals: &[Goal::Muscle, Goal::Tone, Goal::FatLoss],
    },
    ProductSeed {
        id: "perf-plant-protein",
        name: "Plant Protein Blend",
        description: "Pea and rice protein with a complete amino acid profile",
        category: Category::Performance,
        price_cents: 4999,
        priority: PriorityTier::Essential,
        dosage: "1-2 scoops (25-50g protein)",
        timing: "Post-workout or between meals",
        goals: &[Goal::Muscle, Goal::Tone, Goal::FatLoss],
    },
    ProductSeed {
        id: "perf-preworkout",
        name: "Pre-Workout Formula",
        description: "Caffeine, beta-alanine and citrulline blend for explosive training sessions",
        category: Category::Performance,
        price_cents: 3999,
        priority: PriorityTier::High,
        dosage: "1 scoop",
        timing: "20-30 minutes before training",
        goals: &[Goal::Muscle, Goal::Athletic],
    },
    ProductSeed {
        id: "perf-bcaa",
        name: "BCAA Complex",
        description: "2:1:1 branched-chain amino acids to support training volume",
        category: Category::Performance,
        price_cents: 3299,
        priority: PriorityTier::Medium,
        dosage: "5-10g",
        timing: "During training",
        goals: &[Goal::Muscle, Goal::Athletic],
    },
    ProductSeed {
        id: "perf-beta-alanine",
        name: "Beta-Alanine",
        description: "Buffers muscle acidity to extend high-intensity efforts",
        category: Category::Performance,
        price_cents: 2499,
        priority: PriorityTier::Medium,
        dosage: "3.2g daily",
        timing: "Pre-workout or split through the day",
        goals: &[Goal::Athletic],
    },
    ProductSeed {
        id: "perf-citrulline",
        name: "Citrulline Malate",
        description: "Nitric oxide precursor for better pumps, blood flow and endurance",
        category: Category::Performance,
        price_cents: 2799,
        priority: PriorityTier::High,
        dosage: "6-8g",
        timing: "30-60 minutes before training",
        goals: &[Goal::Muscle, Goal::Athletic],
    },
    ProductSeed {
        id: "perf-electrolytes",
        name: "Electrolyte Complex",
        description: "Sodium, potassium and trace minerals to replace what you lose in sweat",
        category: Category::Performance,
        price_cents: 2299,
        priority: PriorityTier::Medium,
        dosage: "1 serving in 500ml water",
        timing: "During long or hot sessions",
        goals: &[Goal::Athletic],
    },
    // Weight Management
    ProductSeed {
        id: "wm-green-tea",
        name: "Green Tea Extract",
        description: "Standardized EGCG that supports metabolism and fat oxidation",
        category: Category::WeightManagement,
        price_cents: 2499,
        priority: PriorityTier::High,
        dosage: "500mg EGCG",
        timing: "Morning with food",
        goals: &[Goal::FatLoss, Goal::Tone],
    },
    ProductSeed {
        id: "wm-l-carnitine",
        name: "L-Carnitine",
        description: "Transports fatty acids into mitochondria to be used as fuel",
        category: Category::WeightManagement,
        price_cents: 2699,
        priority: PriorityTier::Medium,
        dosage: "2g",
        timing: "Morning or before cardio",
        goals: &[Goal::FatLoss],
    },
    ProductSeed {
        id: "wm-fiber",
        name: "Fiber Complex",
        description: "Psyllium and glucomannan blend for fullness and digestive regularity",
        category: Category::WeightManagement,
        price_cents: 1999,
        priority: PriorityTier::Medium,
        dosage: "1 serving (5g fiber)",
        timing: "15-30 minutes before meals",
        goals: &[Goal::FatLoss],
    },
    ProductSeed {
        id: "wm-cla",
        name: "CLA",
        description: "Conjugated linoleic acid to support body composition",
        category: Category::WeightManagement,
        price_cents: 2199,
        priority: PriorityTier::Medium,
        dosage: "3g daily",
        timing: "With meals",
        goals: &[Goal::FatLoss],
    },
    // Health & Wellness
    ProductSeed {
        id: "hw-multivitamin",
        name: "Daily Multivitamin",
        description: "Complete micronutrient coverage with methylated B vitamins and chelated minerals",
        category: Category::HealthWellness,
        price_cents: 2999,
        priority: PriorityTier::Essential,
        dosage: "2 capsules",
        timing: "Morning with breakfast",
        goals: &[Goal::Longevity, Goal::Focus, Goal::Hormones],
    },
    ProductSeed {
        id: "hw-vegan-multivitamin",
        name: "Vegan Multivitamin",
        description: "Plant-based multivitamin with B12, iron, zinc and iodine",
        category: Category::HealthWellness,
        price_cents: 3199,
        priority: PriorityTier::Essential,
        dosage: "2 capsules",
        timing: "Morning with breakfast",
        goals: &[Goal::Longevity],
    },
    ProductSeed {
        id: "hw-vitamin-d3-k2",
        name: "Vitamin D3 + K2",
        description: "5000 IU D3 with K2 (MK-7) for bone, immune and hormone health",
        category: Category::HealthWellness,
        price_cents: 1999,
        priority: PriorityTier::Essential,
        dosage: "1 softgel (5000 IU)",
        timing: "Morning with a fat-containing meal",
        goals: &[Goal::Muscle, Goal::Longevity, Goal::Hormones],
    },
    ProductSeed {
        id: "hw-omega-3",
        name: "Omega-3 Fish Oil",
        description: "High-potency EPA and DHA for heart, joint and eye health",
        category: Category::HealthWellness,
        price_cents: 3499,
        priority: PriorityTier::Essential,
        dosage: "2g EPA+DHA",
        timing: "With meals",
        goals: &[Goal::Longevity, Goal::Focus, Goal::Beauty, Goal::Hormones, Goal::FatLoss],
    },
    ProductSeed {
        id: "hw-algae-omega-3",
        name: "Algae Omega-3",
        description: "Vegan EPA and DHA sourced directly from marine algae",
        category: Category::HealthWellness,
        price_cents: 3899,
        priority: PriorityTier::Essential,
        dosage: "2 softgels",
        timing: "With meals",
        goals: &[Goal::Longevity, Goal::Focus, Goal::Beauty],
    },
    ProductSeed {
        id: "hw-zma",
        name: "ZMA",
        description: "Zinc, magnesium aspartate and B6 for hormone support",
        category: Category::HealthWellness,
        price_cents: 2199,
        priority: PriorityTier::High,
        dosage: "3 capsules",
        timing: "On an empty stomach before bed",
        goals: &[Goal::Hormones, Goal::Muscle],
    },
    ProductSeed {
        id: "hw-turmeric",
        name: "Turmeric Curcumin",
        description: "Curcumin with black pepper extract for healthy inflammation response",
        category: Category::HealthWellness,
        price_cents: 2599,
        priority: PriorityTier::Medium,
        dosage: "1000mg",
        timing: "With meals",
        goals: &[Goal::Longevity, Goal::Athletic],
    },
    ProductSeed {
        id: "hw-coq10",
        name: "CoQ10",
        description: "Ubiquinol for mitochondrial ATP production and cellular energy",
        category: Category::HealthWellness,
        price_cents: 3299,
        priority: PriorityTier::Medium,
        dosage: "100-200mg",
        timing: "Morning with food",
        goals: &[Goal::Longevity, Goal::Athletic],
    },
    // Recovery & Sleep
    ProductSeed {
        id: "rs-magnesium-glycinate",
        name: "Magnesium Glycinate",
        description: "Highly absorbable magnesium that calms the nervous system for deeper sleep",
        category: Category::RecoverySleep,
        price_cents: 2499,
        priority: PriorityTier::Essential,
        dosage: "300-400mg",
        timing: "30-60 minutes before bed",
        goals: &[Goal::Sleep, Goal::Muscle, Goal::Athletic, Goal::Hormones],
    },
    ProductSeed {
        id: "rs-melatonin",
        name: "Melatonin",
        description: "Low-dose melatonin to reset your sleep-wake cycle",
        category: Category::RecoverySleep,
        price_cents: 1499,
        priority: PriorityTier::Medium,
        dosage: "0.5-3mg",
        timing: "30 minutes before bed",
        goals: &[Goal::Sleep],
    },
    ProductSeed {
        id: "rs-ashwagandha",
        name: "Ashwagandha KSM-66",
        description: "Clinically studied adaptogen that lowers cortisol and perceived stress",
        category: Category::RecoverySleep,
        price_cents: 2799,
        priority: PriorityTier::High,
        dosage: "600mg",
        timing: "Evening",
        goals: &[Goal::Sleep, Goal::Hormones, Goal::Focus],
    },
    ProductSeed {
        id: "rs-l-theanine",
        name: "L-Theanine",
        description: "Amino acid from tea leaves that promotes calm without drowsiness",
        category: Category::RecoverySleep,
        price_cents: 1899,
        priority: PriorityTier::Medium,
        dosage: "200mg",
        timing: "Evening or alongside caffeine",
        goals: &[Goal::Sleep, Goal::Focus],
    },
    ProductSeed {
        id: "rs-tart-cherry",
        name: "Tart Cherry Extract",
        description: "Montmorency cherry to reduce soreness and speed recovery",
        category: Category::RecoverySleep,
        price_cents: 2299,
        priority: PriorityTier::Medium,
        dosage: "500mg",
        timing: "Post-workout or before bed",
        goals: &[Goal::Athletic, Goal::Sleep],
    },
    ProductSeed {
        id: "rs-glutamine",
        name: "Glutamine",
        description: "Conditionally essential amino acid for recovery and gut lining support",
        category: Category::RecoverySleep,
        price_cents: 2199,
        priority: PriorityTier::Medium,
        dosage: "5g",
        timing: "Post-workout",
        goals: &[Goal::Muscle],
    },
    // Focus & Cognition
    ProductSeed {
        id: "fc-lions-mane",
        name: "Lion's Mane Mushroom",
        description: "Dual-extract mushroom that supports brain health and nerve growth factor",
        category: Category::FocusCognition,
        price_cents: 3299,
        priority: PriorityTier::High,
        dosage: "1000mg",
        timing: "Morning",
        goals: &[Goal::Focus, Goal::Longevity],
    },
    ProductSeed {
        id: "fc-alpha-gpc",
        name: "Alpha-GPC",
        description: "Bioavailable choline for acetylcholine, memory and mental sharpness",
        category: Category::FocusCognition,
        price_cents: 2999,
        priority: PriorityTier::Medium,
        dosage: "300-600mg",
        timing: "Morning or pre-workout",
        goals: &[Goal::Focus],
    },
    ProductSeed {
        id: "fc-rhodiola",
        name: "Rhodiola Rosea",
        description: "Energizing adaptogen that fights mental fatigue",
        category: Category::FocusCognition,
        price_cents: 2399,
        priority: PriorityTier::Medium,
        dosage: "300mg",
        timing: "Morning on an empty stomach",
        goals: &[Goal::Focus],
    },
    // Beauty
    ProductSeed {
        id: "bt-collagen",
        name: "Marine Collagen Peptides",
        description: "Type I and III collagen for skin elasticity, hair, nails and joints",
        category: Category::Beauty,
        price_cents: 3999,
        priority: PriorityTier::Essential,
        dosage: "10g",
        timing: "Morning in coffee or a smoothie",
        goals: &[Goal::Beauty, Goal::Tone],
    },
    ProductSeed {
        id: "bt-biotin",
        name: "Biotin",
        description: "High-potency vitamin B7 for hair and nail growth",
        category: Category::Beauty,
        price_cents: 1499,
        priority: PriorityTier::Medium,
        dosage: "5000mcg",
        timing: "With breakfast",
        goals: &[Goal::Beauty],
    },
    ProductSeed {
        id: "bt-hyaluronic",
        name: "Hyaluronic Acid",
        description: "Oral hyaluronic acid for skin hydration from within",
        category: Category::Beauty,
        price_cents: 2499,
        priority: PriorityTier::Medium,
        dosage: "120mg",
        timing: "Morning",
        goals: &[Goal::Beauty],
    },
];
