use serde::{Deserialize, Serialize};

/// Role of the signed-in user. Only `Admin` and `SuperAdmin` may manage
/// company profiles; any other value is kept as-is in `Other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    SuperAdmin,
    Admin,
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Self::SuperAdmin => "super_admin",
            Self::Admin => "admin",
            Self::Other(s) => s,
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "super_admin" => Self::SuperAdmin,
            "admin" => Self::Admin,
            other => Self::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
}

impl CurrentUser {
    pub fn with_role(role: &str) -> Self {
        Self {
            id: String::new(),
            email: String::new(),
            role: role.to_string(),
            company_name: None,
        }
    }

    pub fn role(&self) -> Role {
        Role::parse(&self.role)
    }
}
