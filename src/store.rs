//! The record store: lazy loading, caching, and the loaded snapshot.
//!
//! [`XmlDirectoryService`] owns a [`DirectorySource`] and materializes it
//! into an immutable [`DirectorySnapshot`] on first access. The store is an
//! explicit two-state machine: unloaded until the first property access or
//! [`reload`](XmlDirectoryService::reload), loaded thereafter until the next
//! reload replaces the snapshot wholesale. The check-and-load sequence runs
//! under a write lock, so concurrent first accesses parse the source once
//! and a failed load never disturbs previously cached state.

use crate::error::{DirectoryError, DirectoryResult};
use crate::index::FieldIndex;
use crate::parser::parse_directory;
use crate::record::DirectoryRecord;
use crate::schema::FieldName;
use crate::service::DirectoryService;
use crate::source::DirectorySource;
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

/// Content digest of the loaded source bytes.
///
/// Stable across loads of byte-identical sources, so an external refresh
/// scheduler can tell whether anything changed without reparsing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SourceVersion(String);

impl SourceVersion {
    /// Digest the raw bytes of a source document.
    pub fn from_content(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);
        Self(BASE64.encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One load's immutable result.
///
/// Realm name, record set, unknown-token sets, field index, and load
/// metadata are populated together in a single swap; a snapshot never
/// changes after it is published.
#[derive(Debug, Clone)]
pub struct DirectorySnapshot {
    realm_name: String,
    records: HashSet<Arc<DirectoryRecord>>,
    unknown_record_types: HashSet<String>,
    unknown_field_names: HashSet<String>,
    index: FieldIndex,
    loaded_at: DateTime<Utc>,
    source_version: SourceVersion,
}

impl DirectorySnapshot {
    /// The realm the loaded document declares.
    pub fn realm_name(&self) -> &str {
        &self.realm_name
    }

    /// Every materialized record.
    pub fn records(&self) -> impl Iterator<Item = &Arc<DirectoryRecord>> {
        self.records.iter()
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// `type` attribute values the schema did not recognize.
    pub fn unknown_record_types(&self) -> &HashSet<String> {
        &self.unknown_record_types
    }

    /// Field element tags the schema did not recognize.
    pub fn unknown_field_names(&self) -> &HashSet<String> {
        &self.unknown_field_names
    }

    /// The field index built from this snapshot's records.
    pub fn index(&self) -> &FieldIndex {
        &self.index
    }

    /// When the load completed.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Digest of the bytes this snapshot was parsed from.
    pub fn source_version(&self) -> &SourceVersion {
        &self.source_version
    }
}

/// An in-memory directory service backed by an XML document.
///
/// Construction performs no I/O; the source is read and parsed the first
/// time any derived property is accessed, and again on every
/// [`reload`](Self::reload). The refresh interval is advisory metadata for
/// an external scheduler, surfaced through [`refresh_due`](Self::refresh_due);
/// the store itself never reloads on a timer.
///
/// # Examples
///
/// ```rust
/// use dirstore::{DirectoryService, InMemorySource, XmlDirectoryService};
///
/// # fn main() -> dirstore::DirectoryResult<()> {
/// let source = InMemorySource::new(
///     r#"<directory realm="Example">
///          <record><uid>u1</uid><short-name>alice</short-name></record>
///        </directory>"#,
/// );
/// let service = XmlDirectoryService::new(source);
///
/// assert_eq!(service.realm_name()?, "Example");
/// let record = service.record_with_uid("u1")?.unwrap();
/// assert_eq!(record.short_names(), ["alice"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct XmlDirectoryService<S> {
    source: S,
    refresh_interval: Duration,
    state: RwLock<Option<Arc<DirectorySnapshot>>>,
}

impl<S: DirectorySource> XmlDirectoryService<S> {
    /// Advisory refresh interval used when the caller gives none.
    pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(4);

    pub fn new(source: S) -> Self {
        Self::with_refresh_interval(source, Self::DEFAULT_REFRESH_INTERVAL)
    }

    pub fn with_refresh_interval(source: S, refresh_interval: Duration) -> Self {
        Self {
            source,
            refresh_interval,
            state: RwLock::new(None),
        }
    }

    /// The advisory refresh interval the store was constructed with.
    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// The current snapshot, loading the source first if the store has
    /// never loaded.
    ///
    /// Callers that read several properties should take one snapshot and
    /// read from it, which guarantees a consistent view across reads even
    /// if a reload lands in between.
    pub fn snapshot(&self) -> DirectoryResult<Arc<DirectorySnapshot>> {
        {
            let state = self.read_state()?;
            if let Some(snapshot) = state.as_ref() {
                return Ok(Arc::clone(snapshot));
            }
        }
        let mut state = self.write_state()?;
        // A racing caller may have loaded while we waited for the lock.
        if let Some(snapshot) = state.as_ref() {
            return Ok(Arc::clone(snapshot));
        }
        let snapshot = self.load()?;
        *state = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Parse the source's current contents and replace the snapshot.
    ///
    /// On failure the previous state is left untouched: an unloaded store
    /// stays unloaded, a loaded store keeps serving its old snapshot.
    pub fn reload(&self) -> DirectoryResult<Arc<DirectorySnapshot>> {
        let mut state = self.write_state()?;
        let snapshot = self.load()?;
        *state = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    /// Whether a load has completed. Never triggers one.
    pub fn is_loaded(&self) -> DirectoryResult<bool> {
        Ok(self.read_state()?.is_some())
    }

    /// The realm name always comes from the document. Assigning a value is
    /// rejected; `None` is accepted as a no-op, preserving the historical
    /// reset-to-unset contract.
    pub fn set_realm_name(&self, realm_name: Option<&str>) -> DirectoryResult<()> {
        match realm_name {
            None => Ok(()),
            Some(_) => Err(DirectoryError::RealmNameImmutable),
        }
    }

    /// `type` attribute values the loaded document used without a schema
    /// mapping. Loads on first access.
    pub fn unknown_record_types(&self) -> DirectoryResult<HashSet<String>> {
        Ok(self.snapshot()?.unknown_record_types().clone())
    }

    /// Field element tags the loaded document used without a schema
    /// mapping. Loads on first access.
    pub fn unknown_field_names(&self) -> DirectoryResult<HashSet<String>> {
        Ok(self.snapshot()?.unknown_field_names().clone())
    }

    /// When the current snapshot was loaded. Loads on first access.
    pub fn loaded_at(&self) -> DirectoryResult<DateTime<Utc>> {
        Ok(self.snapshot()?.loaded_at())
    }

    /// Digest of the currently loaded source bytes. Loads on first access.
    pub fn source_version(&self) -> DirectoryResult<SourceVersion> {
        Ok(self.snapshot()?.source_version().clone())
    }

    /// Whether an external scheduler should reload now: true when the store
    /// has never loaded, or when the refresh interval has elapsed since
    /// [`loaded_at`](Self::loaded_at). A pure calculation; never triggers a
    /// load.
    pub fn refresh_due(&self, now: DateTime<Utc>) -> DirectoryResult<bool> {
        let state = self.read_state()?;
        let Some(snapshot) = state.as_ref() else {
            return Ok(true);
        };
        let due = chrono::Duration::from_std(self.refresh_interval)
            .ok()
            .and_then(|interval| snapshot.loaded_at().checked_add_signed(interval));
        // An interval too large to represent never comes due.
        Ok(match due {
            Some(due) => due <= now,
            None => false,
        })
    }

    fn load(&self) -> DirectoryResult<Arc<DirectorySnapshot>> {
        let bytes = self.source.read()?;
        let parsed = parse_directory(&bytes)?;
        let records: HashSet<Arc<DirectoryRecord>> =
            parsed.records.into_iter().map(Arc::new).collect();
        let index = FieldIndex::build(&records);
        info!(
            "loaded directory realm '{}': {} record(s), {} unknown token(s)",
            parsed.realm_name,
            records.len(),
            parsed.unknown_record_types.len() + parsed.unknown_field_names.len(),
        );
        Ok(Arc::new(DirectorySnapshot {
            realm_name: parsed.realm_name,
            records,
            unknown_record_types: parsed.unknown_record_types,
            unknown_field_names: parsed.unknown_field_names,
            index,
            loaded_at: Utc::now(),
            source_version: SourceVersion::from_content(&bytes),
        }))
    }

    fn read_state(&self) -> DirectoryResult<RwLockReadGuard<'_, Option<Arc<DirectorySnapshot>>>> {
        self.state.read().map_err(|_| DirectoryError::LockPoisoned)
    }

    fn write_state(&self) -> DirectoryResult<RwLockWriteGuard<'_, Option<Arc<DirectorySnapshot>>>> {
        self.state.write().map_err(|_| DirectoryError::LockPoisoned)
    }
}

impl<S: DirectorySource> DirectoryService for XmlDirectoryService<S> {
    fn realm_name(&self) -> DirectoryResult<String> {
        Ok(self.snapshot()?.realm_name().to_string())
    }

    fn records(&self) -> DirectoryResult<Vec<Arc<DirectoryRecord>>> {
        Ok(self.snapshot()?.records().cloned().collect())
    }

    fn records_with_field_value(
        &self,
        field: FieldName,
        value: &str,
    ) -> DirectoryResult<Vec<Arc<DirectoryRecord>>> {
        Ok(self
            .snapshot()?
            .index()
            .records_with_value(field, value)
            .cloned()
            .collect())
    }
}
