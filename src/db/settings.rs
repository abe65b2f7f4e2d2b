use anyhow::Result;
use rusqlite::params;

use super::Database;
use crate::models::CurrentUser;

pub const SETTING_BACKEND_URL: &str = "backend_url";
pub const SETTING_TIMEOUT_SECS: &str = "timeout_secs";
pub const SETTING_SESSION_TOKEN: &str = "token";
pub const SETTING_SESSION_USER: &str = "user";

impl Database {
    // ==================== SETTINGS ====================

    pub fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let result = self.conn.query_row(
            "SELECT value FROM app_settings WHERE key = ?",
            [key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO app_settings (key, value) VALUES (?, ?)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Returns true if a value was removed.
    pub fn delete_setting(&self, key: &str) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM app_settings WHERE key = ?", [key])?;
        Ok(rows > 0)
    }

    // ==================== SESSION ====================

    pub fn save_session(&self, token: &str, user: &CurrentUser) -> Result<()> {
        let user_json = serde_json::to_string(user)?;
        self.set_setting(SETTING_SESSION_TOKEN, token)?;
        self.set_setting(SETTING_SESSION_USER, &user_json)?;
        Ok(())
    }

    pub fn session_token(&self) -> Result<Option<String>> {
        self.get_setting(SETTING_SESSION_TOKEN)
    }

    /// The signed-in user, or None when no session is stored. A stored value
    /// that no longer decodes is treated as signed out.
    pub fn current_user(&self) -> Result<Option<CurrentUser>> {
        let Some(json) = self.get_setting(SETTING_SESSION_USER)? else {
            return Ok(None);
        };
        match serde_json::from_str(&json) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!("ignoring unreadable stored user: {}", e);
                Ok(None)
            }
        }
    }

    pub fn clear_session(&self) -> Result<()> {
        self.delete_setting(SETTING_SESSION_TOKEN)?;
        self.delete_setting(SETTING_SESSION_USER)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setting_roundtrip_and_overwrite() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.get_setting(SETTING_BACKEND_URL).unwrap(), None);

        db.set_setting(SETTING_BACKEND_URL, "http://a.test").unwrap();
        db.set_setting(SETTING_BACKEND_URL, "http://b.test").unwrap();
        assert_eq!(
            db.get_setting(SETTING_BACKEND_URL).unwrap().as_deref(),
            Some("http://b.test")
        );

        assert!(db.delete_setting(SETTING_BACKEND_URL).unwrap());
        assert!(!db.delete_setting(SETTING_BACKEND_URL).unwrap());
    }

    #[test]
    fn test_session_save_and_clear() {
        let db = Database::open_memory().unwrap();
        let mut user = CurrentUser::with_role("admin");
        user.email = "ops@activus.in".to_string();

        db.save_session("tok-123", &user).unwrap();
        assert_eq!(db.session_token().unwrap().as_deref(), Some("tok-123"));
        assert_eq!(db.current_user().unwrap(), Some(user));

        db.clear_session().unwrap();
        assert_eq!(db.session_token().unwrap(), None);
        assert_eq!(db.current_user().unwrap(), None);
    }

    #[test]
    fn test_corrupt_user_reads_as_signed_out() {
        let db = Database::open_memory().unwrap();
        db.set_setting(SETTING_SESSION_USER, "not json").unwrap();
        assert_eq!(db.current_user().unwrap(), None);
    }
}
