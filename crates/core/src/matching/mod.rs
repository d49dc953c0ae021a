//! Best-effort resolution of free-text supplement names to catalog entries.
//!
//! Resolution order, first hit wins:
//! 1. exact alias lookup
//! 2. alias substring scan (either direction), in table order
//! 3. exact case-insensitive catalog name
//! 4. partial catalog name (candidate, or its first word, inside a name)
//! 5. the original candidate, unchanged

mod synonyms;

use std::sync::OnceLock;

use serde::Serialize;
use tracing::warn;

use crate::catalog::Catalog;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SynonymEntry {
    pub alias: String,
    pub canonical: String,
}

/// Ordered alias table. Iteration order is the substring tie-break.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SynonymTable {
    entries: Vec<SynonymEntry>,
}

impl SynonymTable {
    pub fn new<I, A, C>(entries: I) -> Self
    where
        I: IntoIterator<Item = (A, C)>,
        A: AsRef<str>,
        C: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(alias, canonical)| SynonymEntry {
                    alias: alias.as_ref().trim().to_lowercase(),
                    canonical: canonical.into(),
                })
                .collect(),
        }
    }

    pub fn builtin() -> &'static SynonymTable {
        static TABLE: OnceLock<SynonymTable> = OnceLock::new();
        TABLE.get_or_init(|| Self::new(synonyms::SYNONYMS.iter().copied()))
    }

    pub fn entries(&self) -> &[SynonymEntry] {
        &self.entries
    }

    fn exact(&self, normalized: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.alias == normalized)
            .map(|entry| entry.canonical.as_str())
    }

    fn substring(&self, normalized: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| normalized.contains(&entry.alias) || entry.alias.contains(normalized))
            .map(|entry| entry.canonical.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSource {
    Alias,
    AliasSubstring,
    CatalogExact,
    CatalogPartial,
    Unresolved,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub candidate: String,
    pub name: String,
    pub source: MatchSource,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        self.source != MatchSource::Unresolved
    }
}

pub struct FuzzyMatcher<'a> {
    catalog: &'a Catalog,
    synonyms: &'a SynonymTable,
}

impl<'a> FuzzyMatcher<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog, synonyms: SynonymTable::builtin() }
    }

    pub fn with_synonyms(catalog: &'a Catalog, synonyms: &'a SynonymTable) -> Self {
        Self { catalog, synonyms }
    }

    pub fn resolve(&self, candidate: &str) -> String {
        self.resolve_detailed(candidate).name
    }

    pub fn resolve_detailed(&self, candidate: &str) -> Resolution {
        let normalized = candidate.trim().to_lowercase();
        let resolved = |name: &str, source| Resolution {
            candidate: candidate.to_string(),
            name: name.to_string(),
            source,
        };

        // An empty candidate is a substring of every alias; treat it as a miss.
        if normalized.is_empty() {
            return self.unresolved(candidate);
        }

        if let Some(canonical) = self.synonyms.exact(&normalized) {
            return resolved(canonical, MatchSource::Alias);
        }

        if let Some(canonical) = self.synonyms.substring(&normalized) {
            return resolved(canonical, MatchSource::AliasSubstring);
        }

        if let Some(product) =
            self.catalog.list_active().find(|product| product.name.to_lowercase() == normalized)
        {
            return resolved(&product.name, MatchSource::CatalogExact);
        }

        let first_word = normalized.split_whitespace().next().unwrap_or(normalized.as_str());
        if let Some(product) = self.catalog.list_active().find(|product| {
            let name = product.name.to_lowercase();
            name.contains(&normalized) || name.contains(first_word)
        }) {
            return resolved(&product.name, MatchSource::CatalogPartial);
        }

        self.unresolved(candidate)
    }

    fn unresolved(&self, candidate: &str) -> Resolution {
        warn!(
            event_name = "engine.matcher.unresolved",
            candidate = candidate,
            "no catalog match for supplement name; keeping it unchanged"
        );
        Resolution {
            candidate: candidate.to_string(),
            name: candidate.to_string(),
            source: MatchSource::Unresolved,
        }
    }
}
