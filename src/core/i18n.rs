//! Language packs
//!
//! Flat `key → template` maps, one per language. English and Japanese are
//! embedded; `*.yml` files from a user directory are merged on top (the
//! file stem is the language id). Lookups fall back to English, then to
//! the key itself. Templates use `{}` placeholders, filled in order.

use std::collections::HashMap;
use std::path::Path;

use crate::types::{Bucket, EngineEvent, LocaleError, RoundKind};

/// Language used when a key is missing from the selected pack
pub const FALLBACK_LANGUAGE: &str = "en";

const EMBEDDED_PACKS: [(&str, &str); 2] = [
    ("en", include_str!("../../lang/en.yml")),
    ("ja", include_str!("../../lang/ja.yml")),
];

type Pack = HashMap<String, String>;

/// Localized text lookup
#[derive(Debug, Clone)]
pub struct Localizer {
    language: String,
    packs: HashMap<String, Pack>,
}

impl Localizer {
    /// Create a localizer with the embedded packs
    pub fn new(language: &str) -> Result<Self, LocaleError> {
        let mut packs = HashMap::new();
        for (name, yaml) in EMBEDDED_PACKS {
            packs.insert(name.to_string(), parse_pack(name, yaml)?);
        }
        Ok(Self {
            language: language.to_lowercase(),
            packs,
        })
    }

    /// Merge every `*.yml` pack found in `dir`
    pub fn with_dir(mut self, dir: &Path) -> Result<Self, LocaleError> {
        let io_err = |source| LocaleError::Io { path: dir.to_path_buf(), source };
        for entry in std::fs::read_dir(dir).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yml") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let yaml = std::fs::read_to_string(&path).map_err(io_err)?;
            let pack = parse_pack(name, &yaml)?;
            self.packs
                .entry(name.to_lowercase())
                .or_default()
                .extend(pack);
        }
        Ok(self)
    }

    /// Selected language id
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Is a pack loaded for `language`?
    pub fn has_language(&self, language: &str) -> bool {
        self.packs.contains_key(&language.to_lowercase())
    }

    /// Template for `key`
    pub fn get<'a>(&'a self, key: &'a str) -> &'a str {
        [self.language.as_str(), FALLBACK_LANGUAGE]
            .iter()
            .find_map(|lang| self.packs.get(*lang).and_then(|p| p.get(key)))
            .map(String::as_str)
            .unwrap_or(key)
    }

    /// Template for `key` with placeholders filled
    pub fn format(&self, key: &str, args: &[&str]) -> String {
        fill(self.get(key), args)
    }

    /// Display name of a round; unknown kinds show the logged text
    pub fn round_name(&self, kind: RoundKind, logged: &str) -> String {
        match kind {
            RoundKind::Unknown => self.format(kind.key(), &[logged]),
            known => self.get(known.key()).to_string(),
        }
    }

    /// History as a comma-separated list of localized bucket names
    pub fn history(&self, buckets: &[Bucket]) -> String {
        buckets
            .iter()
            .map(|b| match b {
                Bucket::Special => self.get("log.recent_rounds_log_special"),
                _ => self.get("log.recent_rounds_log_classic"),
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Localized name of a predicted bucket
    pub fn prediction(&self, bucket: Bucket) -> &str {
        match bucket {
            Bucket::Special => self.get("log.predict_next_round_special"),
            _ => self.get("log.predict_next_round_classic"),
        }
    }

    /// Human-readable line for an event
    pub fn render(&self, event: &EngineEvent) -> String {
        match event {
            EngineEvent::RoundStarted { kind, name } => {
                self.format(event.key(), &[self.round_name(*kind, name).as_str()])
            }
            EngineEvent::UnknownRound { name } => self.format(event.key(), &[name.as_str()]),
            EngineEvent::PredictionMade { history, prediction } => self.format(
                event.key(),
                &[self.history(history).as_str(), self.prediction(*prediction)],
            ),
            EngineEvent::SignalEmitted { value } => {
                self.format(event.key(), &[value.to_string().as_str()])
            }
            EngineEvent::HostDisconnectCorrected
            | EngineEvent::BonusDetected
            | EngineEvent::BonusCleared
            | EngineEvent::HostSwitched
            | EngineEvent::AvatarDataSaved => self.get(event.key()).to_string(),
        }
    }
}

fn parse_pack(name: &str, yaml: &str) -> Result<Pack, LocaleError> {
    serde_yaml::from_str(yaml).map_err(|source| LocaleError::Parse {
        name: name.to_string(),
        source,
    })
}

/// Replace `{}` placeholders in order; surplus placeholders become empty
fn fill(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut rest = template;
    while let Some(pos) = rest.find("{}") {
        out.push_str(&rest[..pos]);
        out.push_str(args.next().copied().unwrap_or_default());
        rest = &rest[pos + 2..];
    }
    out.push_str(rest);
    out
}

// =============================================================================
// TESTS
// =============================================================================
