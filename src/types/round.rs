//! Round kinds and prediction buckets

use serde::{Deserialize, Serialize};

/// Every round variant the game announces in its log
///
/// The bucket a kind belongs to is not encoded here; it comes from the
/// loaded `RoundCatalog`, so new variants only need a catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RoundKind {
    Classic,
    Fog,
    Punished,
    Sabotage,
    Cracked,
    Alternate,
    Bloodbath,
    Midnight,
    MysticMoon,
    Twilight,
    Solstice,
    EightPages,
    BloodMoon,
    Run,
    ColdNight,
    Unbound,
    DoubleTrouble,
    Ghost,
    /// Name not present in the catalog
    Unknown,
}

impl RoundKind {
    /// All known kinds, `Unknown` excluded
    pub const ALL: [RoundKind; 18] = [
        RoundKind::Classic,
        RoundKind::Fog,
        RoundKind::Punished,
        RoundKind::Sabotage,
        RoundKind::Cracked,
        RoundKind::Alternate,
        RoundKind::Bloodbath,
        RoundKind::Midnight,
        RoundKind::MysticMoon,
        RoundKind::Twilight,
        RoundKind::Solstice,
        RoundKind::EightPages,
        RoundKind::BloodMoon,
        RoundKind::Run,
        RoundKind::ColdNight,
        RoundKind::Unbound,
        RoundKind::DoubleTrouble,
        RoundKind::Ghost,
    ];

    /// Language-pack key for the display name
    pub fn key(&self) -> &'static str {
        match self {
            RoundKind::Classic => "round.classic",
            RoundKind::Fog => "round.fog",
            RoundKind::Punished => "round.punished",
            RoundKind::Sabotage => "round.sabotage",
            RoundKind::Cracked => "round.cracked",
            RoundKind::Alternate => "round.alternate",
            RoundKind::Bloodbath => "round.bloodbath",
            RoundKind::Midnight => "round.midnight",
            RoundKind::MysticMoon => "round.mystic_moon",
            RoundKind::Twilight => "round.twilight",
            RoundKind::Solstice => "round.solstice",
            RoundKind::EightPages => "round.8_pages",
            RoundKind::BloodMoon => "round.blood_moon",
            RoundKind::Run => "round.run",
            RoundKind::ColdNight => "round.cold_night",
            RoundKind::Unbound => "round.unbound",
            RoundKind::DoubleTrouble => "round.double_trouble",
            RoundKind::Ghost => "round.ghost",
            RoundKind::Unknown => "log.unknown_type",
        }
    }
}

impl std::fmt::Display for RoundKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Classification of a round for the special/classic prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Bucket {
    /// Cosmetic round whose real bucket has to be inferred from history
    Exempt,
    Special,
    Classic,
    /// Kind not assigned to any bucket
    Unresolved,
}

impl Bucket {
    /// True for the two buckets that may be stored in history
    pub fn is_resolved(&self) -> bool {
        matches!(self, Bucket::Special | Bucket::Classic)
    }

    /// Opposite of a resolved bucket
    pub fn flipped(&self) -> Bucket {
        match self {
            Bucket::Special => Bucket::Classic,
            Bucket::Classic => Bucket::Special,
            other => *other,
        }
    }

    /// Get ANSI color for terminal display
    pub fn color(&self) -> colored::Color {
        match self {
            Bucket::Special => colored::Color::Magenta,
            Bucket::Classic => colored::Color::Cyan,
            Bucket::Exempt => colored::Color::Yellow,
            Bucket::Unresolved => colored::Color::BrightBlack,
        }
    }
}

impl std::fmt::Display for Bucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Bucket::Exempt => "EXEMPT",
            Bucket::Special => "SPECIAL",
            Bucket::Classic => "CLASSIC",
            Bucket::Unresolved => "UNRESOLVED",
        };
        write!(f, "{}", name)
    }
}
