//! DDL for the rate database.
//!
//! Values are JSON text; `updated_at` is RFC 3339 text. The schema version
//! lives in SQLite's `user_version` header field.

/// Schema version written by this build. Databases reporting a higher
/// version are refused.
pub const SCHEMA_VERSION: i32 = 1;

/// Creates the `rate_state` table and its index.
pub const RATE_STATE_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS rate_state (
    key        TEXT PRIMARY KEY,
    value      TEXT NOT NULL,
    updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
);
CREATE INDEX IF NOT EXISTS idx_rate_state_updated_at ON rate_state(updated_at);
"#;
