//! Round catalog: round names → kinds → buckets
//!
//! The catalog is data, loaded from YAML (`data/rounds.yml` is embedded as
//! the default). Classification is a lookup in three disjoint sets, checked
//! in the order Exempt, Special, Classic.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use serde::Deserialize;

use crate::types::{Bucket, CatalogError, RoundKind};

/// Default catalog, embedded at compile time
pub const DEFAULT_CATALOG_YAML: &str = include_str!("../../data/rounds.yml");

/// Word prefixes tried after the full remainder fails to match
const TOKEN_PREFIX_WORDS: [usize; 2] = [2, 1];

#[derive(Debug, Deserialize)]
struct CatalogFile {
    rounds: Vec<RoundEntry>,
    buckets: BucketSets,
}

#[derive(Debug, Deserialize)]
struct RoundEntry {
    kind: RoundKind,
    name: String,
    #[serde(default)]
    aliases: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
struct BucketSets {
    #[serde(default)]
    exempt: Vec<RoundKind>,
    #[serde(default)]
    special: Vec<RoundKind>,
    #[serde(default)]
    classic: Vec<RoundKind>,
}

/// Mapping from round names to kinds, and kinds to buckets
#[derive(Debug, Clone)]
pub struct RoundCatalog {
    exempt: HashSet<RoundKind>,
    special: HashSet<RoundKind>,
    classic: HashSet<RoundKind>,
    names: HashMap<String, RoundKind>,
}

impl RoundCatalog {
    /// Build a catalog from the three bucket sets
    ///
    /// Fails when a kind is listed in more than one set. The name table
    /// starts empty; see `with_name`.
    pub fn new(
        exempt: &[RoundKind],
        special: &[RoundKind],
        classic: &[RoundKind],
    ) -> Result<Self, CatalogError> {
        let mut assigned: HashMap<RoundKind, Bucket> = HashMap::new();
        let groups = [
            (Bucket::Exempt, exempt),
            (Bucket::Special, special),
            (Bucket::Classic, classic),
        ];
        for (bucket, kinds) in groups {
            for kind in kinds {
                if let Some(first) = assigned.insert(*kind, bucket) {
                    if first != bucket {
                        return Err(CatalogError::Conflict { kind: *kind, first, second: bucket });
                    }
                }
            }
        }

        Ok(Self {
            exempt: exempt.iter().copied().collect(),
            special: special.iter().copied().collect(),
            classic: classic.iter().copied().collect(),
            names: HashMap::new(),
        })
    }

    /// Register a name (canonical or alias) for a kind
    pub fn with_name(mut self, name: &str, kind: RoundKind) -> Result<Self, CatalogError> {
        self.add_name(name, kind)?;
        Ok(self)
    }

    fn add_name(&mut self, name: &str, kind: RoundKind) -> Result<(), CatalogError> {
        let name = name.trim();
        match self.names.get(name) {
            Some(first) if *first != kind => Err(CatalogError::DuplicateName {
                name: name.to_string(),
                first: *first,
                second: kind,
            }),
            _ => {
                self.names.insert(name.to_string(), kind);
                Ok(())
            }
        }
    }

    /// Parse a catalog document
    pub fn from_yaml(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yaml::from_str(yaml)?;
        let mut catalog = Self::new(
            &file.buckets.exempt,
            &file.buckets.special,
            &file.buckets.classic,
        )?;
        for entry in &file.rounds {
            catalog.add_name(&entry.name, entry.kind)?;
            for alias in &entry.aliases {
                catalog.add_name(alias, entry.kind)?;
            }
        }
        Ok(catalog)
    }

    /// Load a catalog document from disk
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    /// The embedded default catalog
    pub fn standard() -> Result<Self, CatalogError> {
        Self::from_yaml(DEFAULT_CATALOG_YAML)
    }

    /// Bucket of a round kind; `Unresolved` when the kind is in no set
    pub fn classify(&self, kind: RoundKind) -> Bucket {
        if self.exempt.contains(&kind) {
            Bucket::Exempt
        } else if self.special.contains(&kind) {
            Bucket::Special
        } else if self.classic.contains(&kind) {
            Bucket::Classic
        } else {
            Bucket::Unresolved
        }
    }

    /// Exact lookup of a canonical name or alias
    pub fn lookup_name(&self, name: &str) -> RoundKind {
        self.names.get(name.trim()).copied().unwrap_or(RoundKind::Unknown)
    }

    /// Match the text following a round marker against the name table
    ///
    /// Whitespace runs collapse to single spaces. Tries the whole text, then
    /// its first two words, then its first word. Returns the kind and the
    /// matched name.
    pub fn match_token(&self, raw: &str) -> Option<(RoundKind, String)> {
        let words: Vec<&str> = raw.split_whitespace().collect();
        if words.is_empty() {
            return None;
        }
        let text = words.join(" ");
        if let Some(kind) = self.names.get(&text) {
            return Some((*kind, text));
        }

        for count in TOKEN_PREFIX_WORDS {
            if words.len() <= count {
                continue;
            }
            let candidate = words[..count].join(" ");
            if let Some(kind) = self.names.get(&candidate) {
                return Some((*kind, candidate));
            }
        }
        None
    }

    /// Number of registered names and aliases
    pub fn name_count(&self) -> usize {
        self.names.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================
