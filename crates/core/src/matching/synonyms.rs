//! Alias table for free-text supplement names.
//!
//! Entries are scanned in order during substring matching, so more specific
//! aliases must precede the generic ones they contain (`algae omega` before
//! `omega-3`, `vegan multivitamin` before `multivitamin`).

pub(crate) const SYNONYMS: &[(&str, &str)] = &[
    ("creatine", "Creatine Monohydrate"),
    ("creatine hcl", "Creatine Monohydrate"),
    ("whey", "Whey Protein Isolate"),
    ("whey protein", "Whey Protein Isolate"),
    ("protein powder", "Whey Protein Isolate"),
    ("plant protein", "Plant Protein Blend"),
    ("vegan protein", "Plant Protein Blend"),
    ("pea protein", "Plant Protein Blend"),
    ("preworkout", "Pre-Workout Formula"),
    ("pre workout", "Pre-Workout Formula"),
    ("pre-workout", "Pre-Workout Formula"),
    ("bcaa", "BCAA Complex"),
    ("bcaas", "BCAA Complex"),
    ("branched chain amino acids", "BCAA Complex"),
    ("beta alanine", "Beta-Alanine"),
    ("beta-alanine", "Beta-Alanine"),
    ("citrulline", "Citrulline Malate"),
    ("nitric oxide", "Citrulline Malate"),
    ("electrolyte", "Electrolyte Complex"),
    ("hydration", "Electrolyte Complex"),
    ("green tea", "Green Tea Extract"),
    ("egcg", "Green Tea Extract"),
    ("fat burner", "Green Tea Extract"),
    ("carnitine", "L-Carnitine"),
    ("fiber", "Fiber Complex"),
    ("psyllium", "Fiber Complex"),
    ("conjugated linoleic acid", "CLA"),
    ("vegan multivitamin", "Vegan Multivitamin"),
    ("vegetarian multivitamin", "Vegan Multivitamin"),
    ("multivitamin", "Daily Multivitamin"),
    ("multi-vitamin", "Daily Multivitamin"),
    ("multi vitamin", "Daily Multivitamin"),
    ("vitamin d", "Vitamin D3 + K2"),
    ("vitamin k2", "Vitamin D3 + K2"),
    ("algae omega", "Algae Omega-3"),
    ("algae oil", "Algae Omega-3"),
    ("algal oil", "Algae Omega-3"),
    ("vegan omega", "Algae Omega-3"),
    ("fish oil", "Omega-3 Fish Oil"),
    ("omega-3", "Omega-3 Fish Oil"),
    ("omega 3", "Omega-3 Fish Oil"),
    ("omega3", "Omega-3 Fish Oil"),
    ("zma", "ZMA"),
    ("zinc", "ZMA"),
    ("turmeric", "Turmeric Curcumin"),
    ("curcumin", "Turmeric Curcumin"),
    ("coq10", "CoQ10"),
    ("coenzyme q10", "CoQ10"),
    ("ubiquinol", "CoQ10"),
    ("magnesium", "Magnesium Glycinate"),
    ("melatonin", "Melatonin"),
    ("ashwagandha", "Ashwagandha KSM-66"),
    ("ksm-66", "Ashwagandha KSM-66"),
    ("theanine", "L-Theanine"),
    ("tart cherry", "Tart Cherry Extract"),
    ("glutamine", "Glutamine"),
    ("lion's mane", "Lion's Mane Mushroom"),
    ("lions mane", "Lion's Mane Mushroom"),
    ("alpha gpc", "Alpha-GPC"),
    ("alpha-gpc", "Alpha-GPC"),
    ("choline", "Alpha-GPC"),
    ("rhodiola", "Rhodiola Rosea"),
    ("collagen", "Marine Collagen Peptides"),
    ("biotin", "Biotin"),
    ("hyaluronic", "Hyaluronic Acid"),
];
