// SQLite-backed leaderboard cache.
//
// One row per cache slot holding the rendered payload and its write
// timestamp, written together in a single statement so a concurrent reader
// can never observe a payload without its timestamp (or vice versa).
// Staleness is a pure function of an injectable clock, which keeps TTL
// behavior testable without real time passing.

use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use thiserror::Error;

/// Default time-to-live for a cached leaderboard payload.
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache store error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("failed to create cache directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Time source for staleness checks.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// ---------------------------------------------------------------------------
// TTL policy
// ---------------------------------------------------------------------------

/// Decides whether a cached entry is still servable.
#[derive(Debug, Clone, Copy)]
pub struct TtlPolicy {
    ttl: Duration,
}

impl TtlPolicy {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl }
    }

    /// Fresh means strictly younger than the TTL. A write timestamp in the
    /// future (clock skew, restored backup) counts as fresh rather than
    /// triggering a spurious recompute.
    pub fn is_fresh(&self, written_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        let age = now.signed_duration_since(written_at);
        if age < chrono::Duration::zero() {
            return true;
        }
        age.to_std().map(|age| age < self.ttl).unwrap_or(false)
    }
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// A cached payload with its write time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    pub payload: String,
    pub written_at: DateTime<Utc>,
}

/// SQLite key-value store for rendered leaderboard payloads.
#[derive(Debug)]
pub struct CacheStore {
    conn: Mutex<Connection>,
}

impl CacheStore {
    /// Open (or create) the cache database at `path`, creating missing
    /// parent directories. Pass `":memory:"` for an ephemeral store in
    /// tests.
    pub fn open(path: &str) -> Result<Self, CacheError> {
        if path != ":memory:" {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|source| CacheError::CreateDir {
                        path: parent.to_path_buf(),
                        source,
                    })?;
                }
            }
        }
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;

             CREATE TABLE IF NOT EXISTS leaderboard_cache (
                 slot       TEXT PRIMARY KEY,
                 payload    TEXT NOT NULL,
                 written_at INTEGER NOT NULL
             );",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Read a slot's entry, fresh or not.
    pub fn read(&self, slot: &str) -> Result<Option<CacheEntry>, CacheError> {
        let conn = self.conn.lock().expect("cache mutex poisoned");
        let row = conn
            .query_row(
                "SELECT payload, written_at FROM leaderboard_cache WHERE slot = ?1",
                params![slot],
                |row| {
                    let payload: String = row.get(0)?;
                    let written_at: i64 = row.get(1)?;
                    Ok((payload, written_at))
                },
            )
            .optional()?;
        Ok(row.map(|(payload, secs)| CacheEntry {
            payload,
            written_at: Utc
                .timestamp_opt(secs, 0)
                .single()
                .unwrap_or_else(Utc::now),
        }))
    }

    /// Overwrite a slot wholesale. Payload and timestamp land in one
    /// statement, so readers see either the old entry or the new one, never
    /// a mix.
    pub fn write(
        &self,
        slot: &str,
        payload: &str,
        written_at: DateTime<Utc>,
    ) -> Result<(), CacheError> {
        let conn = self.conn.lock().expect("cache mutex poisoned");
        conn.execute(
            "INSERT INTO leaderboard_cache (slot, payload, written_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(slot) DO UPDATE SET
                 payload = excluded.payload,
                 written_at = excluded.written_at",
            params![slot, payload, written_at.timestamp()],
        )?;
        Ok(())
    }

    /// Read a slot only if the policy still considers it fresh.
    pub fn read_fresh(
        &self,
        slot: &str,
        policy: &TtlPolicy,
        clock: &dyn Clock,
    ) -> Result<Option<CacheEntry>, CacheError> {
        Ok(self
            .read(slot)?
            .filter(|entry| policy.is_fresh(entry.written_at, clock.now())))
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::FixedClock;
    use super::*;

    fn store() -> CacheStore {
        CacheStore::open(":memory:").expect("in-memory cache should open")
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 10, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn write_then_read_round_trips_payload_and_timestamp() {
        let store = store();
        store.write("leaderboards:classic", "{\"a\":1}", t0()).unwrap();

        let entry = store.read("leaderboards:classic").unwrap().unwrap();
        assert_eq!(entry.payload, "{\"a\":1}");
        assert_eq!(entry.written_at, t0());
    }

    #[test]
    fn missing_slot_reads_none() {
        assert!(store().read("leaderboards:fun").unwrap().is_none());
    }

    #[test]
    fn overwrite_replaces_wholesale() {
        let store = store();
        store.write("slot", "old", t0()).unwrap();
        let later = t0() + chrono::Duration::hours(1);
        store.write("slot", "new", later).unwrap();

        let entry = store.read("slot").unwrap().unwrap();
        assert_eq!(entry.payload, "new");
        assert_eq!(entry.written_at, later);
    }

    #[test]
    fn fresh_within_ttl_stale_after() {
        let store = store();
        let policy = TtlPolicy::default();
        let clock = FixedClock::at(t0());
        store.write("slot", "payload", t0()).unwrap();

        clock.advance(Duration::from_secs(23 * 3600));
        assert!(store.read_fresh("slot", &policy, &clock).unwrap().is_some());

        clock.advance(Duration::from_secs(2 * 3600));
        assert!(store.read_fresh("slot", &policy, &clock).unwrap().is_none());
        // The stale entry is still readable raw; only freshness filtering
        // hides it.
        assert!(store.read("slot").unwrap().is_some());
    }

    #[test]
    fn future_timestamps_count_as_fresh() {
        let policy = TtlPolicy::default();
        assert!(policy.is_fresh(t0() + chrono::Duration::hours(2), t0()));
    }

    #[test]
    fn open_creates_missing_parent_directories() {
        let base = std::env::temp_dir().join("scorecard_cache_nested");
        let _ = std::fs::remove_dir_all(&base);
        let db_path = base.join("deeper").join("leaderboards.db");

        let store = CacheStore::open(&db_path.to_string_lossy()).unwrap();
        store.write("slot", "payload", t0()).unwrap();
        assert!(store.read("slot").unwrap().is_some());

        drop(store);
        let _ = std::fs::remove_dir_all(&base);
    }

    #[test]
    fn unusable_cache_directory_is_a_directory_error() {
        let base = std::env::temp_dir().join("scorecard_cache_blocked");
        let _ = std::fs::remove_dir_all(&base);
        let _ = std::fs::remove_file(&base);
        std::fs::write(&base, "not a directory").unwrap();

        // The parent path is an existing file, so directory creation fails
        // and the error says which path was at fault.
        let db_path = base.join("leaderboards.db");
        let err = CacheStore::open(&db_path.to_string_lossy()).unwrap_err();
        assert!(matches!(err, CacheError::CreateDir { ref path, .. } if *path == base));

        let _ = std::fs::remove_file(&base);
    }

    #[test]
    fn slots_are_independent() {
        let store = store();
        store.write("leaderboards:classic", "classic", t0()).unwrap();
        store.write("leaderboards:modern", "modern", t0()).unwrap();
        assert_eq!(
            store.read("leaderboards:classic").unwrap().unwrap().payload,
            "classic"
        );
        assert_eq!(
            store.read("leaderboards:modern").unwrap().unwrap().payload,
            "modern"
        );
    }
}
