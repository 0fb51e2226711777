//! Translation of raw numeric codes into human readable labels.
//!
//! Every table is an ordinary immutable value. [`LabelTables::build`] is the
//! single construction point; callers pass the result to whatever needs it.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, StatsError};

/// Returned for codes missing from a table when unknown codes are allowed.
pub const UNKNOWN_LABEL: &str = "UNKNOWN";

/// Environment variable naming the hero names JSON file.
pub const HERO_NAMES_ENV: &str = "WIBIDOTA_HERO_NAMES";

/// Category names whose keys are translated.
pub const GAME_MODE_CATEGORY: &str = "game_mode";
pub const LOBBY_TYPE_CATEGORY: &str = "lobby_type";
pub const HERO_CATEGORY: &str = "hero_id";

const GAME_MODES: &[&str] = &[
    "GAME_MODE_ZERO",
    "ALL_PICK",
    "CAPTAINS_MODE",
    "RANDOM_DRAFT",
    "SINGLE_DRAFT",
    "ALL_RANDOM",
    "GAME_MODE_SIX",
    "THE_DIRETIDE",
    "REVERSE_CAPTAINS_MODE",
    "GREEVILING",
    "TUTORIAL",
    "MID_ONLY",
    "LEAST_PLAYED",
    "NEW_PLAYER_POOL",
    "COMPENDIUM",
];

// Index 0 holds the sentinel for code -1.
const LOBBY_TYPES: &[&str] = &[
    "INVALID",
    "PUBLIC_MATCHMAKING",
    "PRACTICE",
    "TOURNAMENT",
    "TUTORIAL",
    "CO_OP_WITH_BOTS",
    "TEAM_MATCH",
    "SOLO_QUEUE",
    "RANKED",
];

// ── LabelLookup ───────────────────────────────────────────────────────────────

/// Maps an integer code to a label.
pub trait LabelLookup {
    /// Short table name used in error messages.
    fn name(&self) -> &'static str;

    /// Label for `code`, or `None` when the table has no entry for it.
    fn lookup(&self, code: i64) -> Option<String>;

    /// Label for `code`, applying the caller's unknown-code policy.
    fn label(&self, code: i64, allow_unknown: bool) -> Result<String> {
        match self.lookup(code) {
            Some(label) => Ok(label),
            None if allow_unknown => Ok(UNKNOWN_LABEL.to_string()),
            None => Err(StatsError::UnknownLabel {
                table: self.name(),
                code,
            }),
        }
    }
}

fn indexed(table: &[&str], idx: i64) -> Option<String> {
    usize::try_from(idx)
        .ok()
        .and_then(|i| table.get(i))
        .map(|s| (*s).to_string())
}

/// Game modes, indexed directly by code.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameModes;

impl LabelLookup for GameModes {
    fn name(&self) -> &'static str {
        "game mode"
    }

    fn lookup(&self, code: i64) -> Option<String> {
        indexed(GAME_MODES, code)
    }
}

/// Lobby types. Codes start at -1 (`INVALID`), so the index is `code + 1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LobbyTypes;

impl LabelLookup for LobbyTypes {
    fn name(&self) -> &'static str {
        "lobby type"
    }

    fn lookup(&self, code: i64) -> Option<String> {
        indexed(LOBBY_TYPES, code.checked_add(1)?)
    }
}

/// Renders the code itself. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl LabelLookup for Identity {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn lookup(&self, code: i64) -> Option<String> {
        Some(code.to_string())
    }
}

// ── HeroNames ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct HeroFile {
    heroes: Vec<HeroEntry>,
}

#[derive(Debug, Deserialize)]
struct HeroEntry {
    id: i64,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    localized_name: Option<String>,
}

/// Hero id to display name, loaded from a `{"heroes": [...]}` JSON file.
#[derive(Debug, Clone, Default)]
pub struct HeroNames {
    names: HashMap<i64, String>,
}

impl HeroNames {
    /// Parse a hero table from JSON text.
    ///
    /// `localized_name` is preferred; the internal `name` is the fallback.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: HeroFile = serde_json::from_str(json)?;
        let names = file
            .heroes
            .into_iter()
            .filter_map(|hero| {
                let label = hero.localized_name.or(hero.name)?;
                Some((hero.id, label))
            })
            .collect();
        Ok(Self { names })
    }

    /// Load the hero table from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| StatsError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let heroes = Self::from_json(&content).map_err(|e| StatsError::HeroTable {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        debug!("Loaded {} hero names from {}", heroes.len(), path.display());
        Ok(heroes)
    }

    /// Load from the configured path. A missing path is reported as
    /// [`StatsError::MissingConfig`] naming [`HERO_NAMES_ENV`].
    pub fn from_config(path: Option<&Path>) -> Result<Self> {
        let path = path.ok_or(StatsError::MissingConfig(HERO_NAMES_ENV))?;
        Self::load(path)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl LabelLookup for HeroNames {
    fn name(&self) -> &'static str {
        "hero"
    }

    fn lookup(&self, code: i64) -> Option<String> {
        self.names.get(&code).cloned()
    }
}

// ── LabelTables ───────────────────────────────────────────────────────────────

/// Every lookup the presenters need, built once per run.
#[derive(Debug, Clone, Default)]
pub struct LabelTables {
    game_modes: GameModes,
    lobby_types: LobbyTypes,
    heroes: Option<HeroNames>,
}

impl LabelTables {
    /// Build the tables. Hero names are only needed when a hero category is
    /// rendered, so they are optional here.
    pub fn build(heroes: Option<HeroNames>) -> Self {
        Self {
            game_modes: GameModes,
            lobby_types: LobbyTypes,
            heroes,
        }
    }

    /// Whether keys of `category` are numeric codes that get translated.
    pub fn is_translatable(category: &str) -> bool {
        matches!(
            category,
            GAME_MODE_CATEGORY | LOBBY_TYPE_CATEGORY | HERO_CATEGORY
        )
    }

    /// The lookup used for `category`; [`Identity`] for everything else.
    ///
    /// Asking for the hero table when none was loaded is a
    /// [`StatsError::MissingConfig`] error.
    pub fn for_category(&self, category: &str) -> Result<&dyn LabelLookup> {
        match category {
            GAME_MODE_CATEGORY => Ok(&self.game_modes),
            LOBBY_TYPE_CATEGORY => Ok(&self.lobby_types),
            HERO_CATEGORY => self
                .heroes
                .as_ref()
                .map(|h| h as &dyn LabelLookup)
                .ok_or(StatsError::MissingConfig(HERO_NAMES_ENV)),
            _ => Ok(&Identity),
        }
    }

    /// Translate a raw key of `category`.
    ///
    /// Keys of categories that are not translatable come back unchanged.
    pub fn translate(&self, category: &str, key: &str, allow_unknown: bool) -> Result<String> {
        if !Self::is_translatable(category) {
            return Ok(key.to_string());
        }
        let code: i64 = key.trim().parse().map_err(|_| StatsError::NonNumericKey {
            category: category.to_string(),
            key: key.to_string(),
        })?;
        self.for_category(category)?.label(code, allow_unknown)
    }

    pub fn heroes(&self) -> Option<&HeroNames> {
        self.heroes.as_ref()
    }
}
