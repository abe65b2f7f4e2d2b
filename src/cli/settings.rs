use anyhow::Result;

use super::ui::status;
use crate::config::AppConfig;
use crate::db::Database;

/// Execute the config command: store the given values, then print the
/// effective configuration (environment variables included).
pub fn run_config(db: &Database, backend_url: Option<&str>, timeout_secs: Option<u64>) -> Result<()> {
    let changed = backend_url.is_some() || timeout_secs.is_some();
    AppConfig::save(db, backend_url, timeout_secs)?;

    let config = AppConfig::load(db)?;
    println!("backend url: {}", config.backend_url);
    println!("timeout: {}s", config.timeout_secs);
    if changed {
        status("Saved.");
    }
    Ok(())
}
