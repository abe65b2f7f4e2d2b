use crate::models::{CurrentUser, Role};

pub const ACCESS_DENIED_TITLE: &str = "Access Denied";
pub const ACCESS_DENIED_MESSAGE: &str = "Only administrators can manage company profiles.";
pub const DELETE_DENIED_MESSAGE: &str = "Only super admin can delete company profiles";

/// Result of the role check for the profile management screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Denied,
    Granted { can_delete: bool },
}

impl Access {
    /// Admins manage profiles; only super admins may also delete them.
    pub fn check(user: Option<&CurrentUser>) -> Self {
        match user.map(CurrentUser::role) {
            Some(Role::SuperAdmin) => Self::Granted { can_delete: true },
            Some(Role::Admin) => Self::Granted { can_delete: false },
            Some(Role::Other(_)) | None => Self::Denied,
        }
    }

    pub fn is_granted(self) -> bool {
        matches!(self, Self::Granted { .. })
    }

    pub fn can_delete(self) -> bool {
        matches!(self, Self::Granted { can_delete: true })
    }
}
