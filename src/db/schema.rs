/// Migration steps in order. Each entry moves the database to its version.
pub const MIGRATIONS: &[(i32, &str)] = &[(1, SCHEMA_V1)];

pub const SCHEMA_VERSION: i32 = 1;

/// V1: key/value settings (backend URL, session token, signed-in user).
const SCHEMA_V1: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    version INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS app_settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;
