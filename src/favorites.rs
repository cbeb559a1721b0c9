//! Favorites: a deduplicated bookmark set over four item kinds.
//!
//! Identity keys are content-derived, so re-favoriting the identical
//! scanned color or extracted combination resolves to the existing entry
//! instead of creating a near-duplicate. Catalog items key on their
//! catalog id.

use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::scan::SampledColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteSource {
    Catalog,
    Scanner,
}

impl FavoriteSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Scanner => "scanner",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteKind {
    Color,
    Combination,
}

/// What is being bookmarked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "item", rename_all = "snake_case")]
pub enum FavoriteItem {
    CatalogColor { color_id: u32 },
    CatalogCombination { combination_id: u32 },
    ScannedColor { color: SampledColor },
    ScannedCombination { colors: Vec<SampledColor> },
}

impl FavoriteItem {
    pub fn source(&self) -> FavoriteSource {
        match self {
            Self::CatalogColor { .. } | Self::CatalogCombination { .. } => FavoriteSource::Catalog,
            Self::ScannedColor { .. } | Self::ScannedCombination { .. } => FavoriteSource::Scanner,
        }
    }

    pub fn kind(&self) -> FavoriteKind {
        match self {
            Self::CatalogColor { .. } | Self::ScannedColor { .. } => FavoriteKind::Color,
            Self::CatalogCombination { .. } | Self::ScannedCombination { .. } => {
                FavoriteKind::Combination
            }
        }
    }

    /// Deterministic identity key. At most one entry per key exists in the
    /// set, which is what makes add/toggle idempotent: scanned items key
    /// on their hex content, not on a random identifier.
    pub fn identity_key(&self) -> String {
        match self {
            Self::CatalogColor { color_id } => {
                format!("{}-color-{}", self.source().as_str(), color_id)
            }
            Self::CatalogCombination { combination_id } => {
                format!("{}-combination-{}", self.source().as_str(), combination_id)
            }
            Self::ScannedColor { color } => format!("scanner-color-{}", color.hex),
            Self::ScannedCombination { colors } => {
                let hexes: Vec<&str> = colors.iter().map(|c| c.hex.as_str()).collect();
                format!("scanner-combination-{}", hexes.join("-"))
            }
        }
    }
}

/// A stored favorite. Replaced wholesale on change, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteEntry {
    pub key: String,
    /// Milliseconds since epoch.
    pub created_at: u64,
    /// Optional encoded preview image (scanned combinations keep one).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<Vec<u8>>,
    #[serde(flatten)]
    pub item: FavoriteItem,
}

/// Durable blob store holding the favorites array under a single key.
pub trait FavoritesStore: Send + Sync {
    /// Returns the stored blob, or `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<Vec<u8>>>;
    fn save(&self, blob: &[u8]) -> Result<()>;
}

/// JSON file in the platform data directory.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "huebook", "huebook")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("/tmp/huebook"))
            .join("favorites.json")
    }
}

impl FavoritesStore for JsonFileStore {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let data = std::fs::read(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))?;
        Ok(Some(data))
    }

    fn save(&self, blob: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, blob)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

struct State {
    entries: Vec<FavoriteEntry>,
    dirty: bool,
}

/// Process-wide favorites set.
///
/// Every mutation runs as one critical section and flushes the whole
/// array to the store afterwards. A failed flush keeps the in-memory set
/// intact, logs, and retries on the next mutation (or an explicit
/// [`Favorites::flush`]).
pub struct Favorites {
    state: Mutex<State>,
    store: Box<dyn FavoritesStore>,
}

impl Favorites {
    /// Load the set from the store. A missing key or an undecodable blob
    /// starts an empty set; startup never fails on favorites.
    pub fn load(store: Box<dyn FavoritesStore>) -> Self {
        let entries = match store.load() {
            Ok(Some(blob)) => match serde_json::from_slice::<Vec<FavoriteEntry>>(&blob) {
                Ok(mut entries) => {
                    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                    entries
                }
                Err(e) => {
                    warn!(error = %e, "undecodable favorites blob, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "favorites store unreadable, starting empty");
                Vec::new()
            }
        };
        Self {
            state: Mutex::new(State {
                entries,
                dirty: false,
            }),
            store,
        }
    }

    /// Add `item` unless its key is already present. Returns true when a
    /// new entry was created.
    pub fn add(&self, item: FavoriteItem) -> bool {
        self.add_with_thumbnail(item, None)
    }

    pub fn add_with_thumbnail(&self, item: FavoriteItem, thumbnail: Option<Vec<u8>>) -> bool {
        let mut state = self.lock();
        let key = item.identity_key();
        if state.entries.iter().any(|e| e.key == key) {
            return false;
        }
        state.entries.insert(0, new_entry(key, item, thumbnail));
        self.flush_locked(&mut state);
        true
    }

    /// Delete the entry with `key`. Returns true when something was
    /// removed.
    pub fn remove(&self, key: &str) -> bool {
        let mut state = self.lock();
        let before = state.entries.len();
        state.entries.retain(|e| e.key != key);
        let removed = state.entries.len() < before;
        if removed {
            self.flush_locked(&mut state);
        }
        removed
    }

    /// Remove `item` if present, add it otherwise. Returns true when the
    /// item is a favorite after the call.
    pub fn toggle(&self, item: FavoriteItem) -> bool {
        self.toggle_with_thumbnail(item, None)
    }

    pub fn toggle_with_thumbnail(&self, item: FavoriteItem, thumbnail: Option<Vec<u8>>) -> bool {
        let mut state = self.lock();
        let key = item.identity_key();
        let now_favorite = match state.entries.iter().position(|e| e.key == key) {
            Some(pos) => {
                state.entries.remove(pos);
                false
            }
            None => {
                state.entries.insert(0, new_entry(key, item, thumbnail));
                true
            }
        };
        self.flush_locked(&mut state);
        now_favorite
    }

    pub fn is_favorite(&self, key: &str) -> bool {
        self.lock().entries.iter().any(|e| e.key == key)
    }

    pub fn is_favorite_color(&self, color_id: u32) -> bool {
        self.is_favorite(&FavoriteItem::CatalogColor { color_id }.identity_key())
    }

    pub fn is_favorite_combination(&self, combination_id: u32) -> bool {
        self.is_favorite(&FavoriteItem::CatalogCombination { combination_id }.identity_key())
    }

    /// Entries filtered by source and kind, newest first.
    pub fn list(
        &self,
        source: Option<FavoriteSource>,
        kind: Option<FavoriteKind>,
    ) -> Vec<FavoriteEntry> {
        let state = self.lock();
        let mut out: Vec<FavoriteEntry> = state
            .entries
            .iter()
            .filter(|e| source.map_or(true, |s| e.item.source() == s))
            .filter(|e| kind.map_or(true, |k| e.item.kind() == k))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    /// Explicitly retry a failed flush.
    pub fn flush(&self) -> Result<()> {
        let mut state = self.lock();
        let blob = serde_json::to_vec(&state.entries)?;
        self.store.save(&blob)?;
        state.dirty = false;
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state.lock().expect("favorites mutex poisoned")
    }

    fn flush_locked(&self, state: &mut State) {
        let blob = match serde_json::to_vec(&state.entries) {
            Ok(blob) => blob,
            Err(e) => {
                state.dirty = true;
                warn!(error = %e, "failed to encode favorites, keeping in-memory state");
                return;
            }
        };
        match self.store.save(&blob) {
            Ok(()) => state.dirty = false,
            Err(e) => {
                state.dirty = true;
                warn!(error = %e, "failed to persist favorites, will retry on next change");
            }
        }
    }
}

fn new_entry(key: String, item: FavoriteItem, thumbnail: Option<Vec<u8>>) -> FavoriteEntry {
    FavoriteEntry {
        key,
        created_at: now_millis(),
        thumbnail,
        item,
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
