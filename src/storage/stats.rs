//! Per-participant usage counters persisted as a JSON file.
//!
//! The file maps a participant id to `{"uses", "last_seen", "name"}`. Older
//! files stored a bare integer per participant; those entries are upgraded on
//! load and written back in the full shape on the next flush.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::warn;

use crate::error::StorageError;
use crate::tournament::ParticipantId;
use crate::utils::datetime::{format_last_seen, local_now};
use crate::utils::logging::{log_storage_error, log_storage_operation};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsEntry {
    pub uses: u64,
    pub last_seen: Option<String>,
    pub name: Option<String>,
}

/// Every shape a stored value has had.
#[derive(Deserialize)]
#[serde(untagged)]
enum StoredEntry {
    Legacy(u64),
    Full {
        #[serde(default)]
        uses: u64,
        #[serde(default)]
        last_seen: Option<String>,
        #[serde(default)]
        name: Option<String>,
    },
}

impl From<StoredEntry> for StatsEntry {
    fn from(stored: StoredEntry) -> Self {
        match stored {
            StoredEntry::Legacy(uses) => StatsEntry {
                uses,
                last_seen: None,
                name: None,
            },
            StoredEntry::Full { uses, last_seen, name } => StatsEntry { uses, last_seen, name },
        }
    }
}

/// Normalizes raw file contents. Anything unreadable yields an empty map;
/// values of unknown shape are skipped.
pub fn parse_entries(raw: &str) -> BTreeMap<String, StatsEntry> {
    let values: BTreeMap<String, serde_json::Value> = match serde_json::from_str(raw) {
        Ok(values) => values,
        Err(e) => {
            warn!("Stats file is not a JSON object, starting empty: {}", e);
            return BTreeMap::new();
        }
    };

    values
        .into_iter()
        .filter_map(|(participant, value)| match serde_json::from_value::<StoredEntry>(value) {
            Ok(stored) => Some((participant, stored.into())),
            Err(_) => {
                warn!("Skipping stats entry '{}' with unknown shape", participant);
                None
            }
        })
        .collect()
}

/// One line of the usage ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedUser {
    pub participant: String,
    /// Stored display name, or the participant id when none is known
    pub name: String,
    pub uses: u64,
    pub last_seen: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSummary {
    pub total_users: usize,
    pub total_uses: u64,
    /// Sorted by uses, most active first
    pub ranking: Vec<RankedUser>,
}

pub struct StatsStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, StatsEntry>>,
}

impl StatsStore {
    /// Loads the store. A missing or corrupt file gives an empty store.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => parse_entries(&raw),
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                log_storage_error("read", &path.display().to_string(), &e.to_string(), Some("starting with empty stats"));
                BTreeMap::new()
            }
        };

        log_storage_operation("load", &path.display().to_string(), Some(&format!("{} users", entries.len())));

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn entries(&self) -> MutexGuard<'_, BTreeMap<String, StatsEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Counts one tournament-menu visit and flushes the file.
    pub fn record_visit(
        &self,
        participant: ParticipantId,
        display_name: &str,
    ) -> Result<StatsEntry, StorageError> {
        self.record_visit_at(participant, display_name, local_now())
    }

    /// Like [`record_visit`](Self::record_visit) with an explicit clock.
    /// The display name is only stored the first time it is known.
    pub fn record_visit_at(
        &self,
        participant: ParticipantId,
        display_name: &str,
        now: NaiveDateTime,
    ) -> Result<StatsEntry, StorageError> {
        let mut entries = self.entries();
        let entry = entries.entry(participant.to_string()).or_default();
        entry.uses = entry.uses.saturating_add(1);
        entry.last_seen = Some(format_last_seen(&now));
        if entry.name.as_deref().map_or(true, str::is_empty) && !display_name.is_empty() {
            entry.name = Some(display_name.to_string());
        }
        let updated = entry.clone();

        write_entries(&self.path, &entries)?;
        Ok(updated)
    }

    /// Writes the current entries in canonical form.
    pub fn flush(&self) -> Result<(), StorageError> {
        let entries = self.entries();
        write_entries(&self.path, &entries)
    }

    /// Copy of every entry keyed by participant id.
    pub fn snapshot(&self) -> BTreeMap<String, StatsEntry> {
        self.entries().clone()
    }

    pub fn get(&self, participant: ParticipantId) -> Option<StatsEntry> {
        self.entries().get(&participant.to_string()).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    pub fn summary(&self) -> StatsSummary {
        let entries = self.entries();

        let mut ranking: Vec<RankedUser> = entries
            .iter()
            .map(|(participant, entry)| RankedUser {
                participant: participant.clone(),
                name: entry
                    .name
                    .clone()
                    .filter(|n| !n.is_empty())
                    .unwrap_or_else(|| participant.clone()),
                uses: entry.uses,
                last_seen: entry.last_seen.clone(),
            })
            .collect();
        ranking.sort_by(|a, b| b.uses.cmp(&a.uses));

        StatsSummary {
            total_users: entries.len(),
            total_uses: entries.values().fold(0u64, |total, e| total.saturating_add(e.uses)),
            ranking,
        }
    }
}

// Write-then-rename so a crash never leaves a half-written file behind.
fn write_entries(path: &Path, entries: &BTreeMap<String, StatsEntry>) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(entries)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    fs::write(&tmp_path, json)?;
    fs::rename(&tmp_path, path).map_err(|e| {
        log_storage_error("rename", &path.display().to_string(), &e.to_string(), None);
        StorageError::from(e)
    })
}
