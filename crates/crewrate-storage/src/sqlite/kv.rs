//! Key-value operations on the `rate_state` table for [`SqliteStore`].

use chrono::{SecondsFormat, Utc};
use rusqlite::{OptionalExtension, params};

use crate::error::Result;
use crate::sqlite::store::SqliteStore;
use crate::traits::KvStore;

impl KvStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM rate_state WHERE key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock_conn()?;
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        conn.execute(
            "INSERT OR REPLACE INTO rate_state (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, now],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let conn = self.lock_conn()?;
        let deleted = conn.execute("DELETE FROM rate_state WHERE key = ?1", params![key])?;
        Ok(deleted > 0)
    }

    fn scan(&self, prefix: &str) -> Result<Vec<(String, String)>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn.prepare(
            "SELECT key, value FROM rate_state
             WHERE substr(key, 1, length(?1)) = ?1
             ORDER BY key",
        )?;
        let rows = stmt.query_map(params![prefix], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn test_store() -> SqliteStore {
        SqliteStore::open_in_memory().unwrap()
    }

    #[test]
    fn put_and_get() {
        let store = test_store();
        store.put("rate-state:septic", "{\"a\":1}").unwrap();
        assert_eq!(
            store.get("rate-state:septic").unwrap().as_deref(),
            Some("{\"a\":1}")
        );
        assert_eq!(store.get("rate-state:plumbing").unwrap(), None);
    }

    #[test]
    fn put_replaces() {
        let store = test_store();
        store.put("k", "v1").unwrap();
        store.put("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));
    }

    #[test]
    fn remove_reports_existence() {
        let store = test_store();
        store.put("k", "v").unwrap();
        assert!(store.remove("k").unwrap());
        assert!(!store.remove("k").unwrap());
    }

    #[test]
    fn scan_matches_prefix_literally() {
        let store = test_store();
        store.put("rate-state:septic", "1").unwrap();
        store.put("rate-state:plumbing:crew:a", "2").unwrap();
        store.put("rate-state:plumbing", "3").unwrap();
        store.put("rate-config:plumbing", "4").unwrap();
        store.put("rate_state%", "5").unwrap();

        let keys: Vec<String> = store
            .scan("rate-state:")
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(
            keys,
            vec![
                "rate-state:plumbing",
                "rate-state:plumbing:crew:a",
                "rate-state:septic"
            ]
        );
    }
}
