use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Identifier of a nested record (location or bank account).
///
/// Records appended in the editor carry a `Pending` id until the profile is
/// saved; the backend assigns the real id. Pending ids are never sent over
/// the wire, and every id decoded from a server payload is `Persisted`,
/// including a missing one (see [`RecordId::unassigned`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordId {
    Pending(String),
    Persisted(String),
}

impl RecordId {
    /// Fresh client-side id derived from the current time in milliseconds.
    /// Two records added within the same millisecond share an id.
    pub fn pending() -> Self {
        Self::Pending(Utc::now().timestamp_millis().to_string())
    }

    pub fn persisted(id: impl Into<String>) -> Self {
        Self::Persisted(id.into())
    }

    /// Server record that came back without an id. Stays `Persisted` so a
    /// reload never turns stored entries into new pending ones.
    pub fn unassigned() -> Self {
        Self::Persisted(String::new())
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    /// No id to send: pending, or a server record without one.
    pub fn is_unsent(&self) -> bool {
        self.is_pending() || self.as_str().is_empty()
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending(id) | Self::Persisted(id) => id,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending(id) => write!(f, "pending:{}", id),
            Self::Persisted(id) => write!(f, "{}", id),
        }
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        Ok(Self::Persisted(id))
    }
}
