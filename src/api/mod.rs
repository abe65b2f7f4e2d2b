//! REST access to the company profile resource.
//!
//! `ProfileApi` is the seam between the profile manager and the transport;
//! `HttpProfileApi` talks to the real backend.

mod client;
mod types;

pub use client::{HttpProfileApi, TokenSource};
pub use types::{ErrorBody, LoginRequest, LoginResponse, MutationReceipt};

use crate::models::{CompanyProfile, ProfileDraft};

pub const PROFILES_PATH: &str = "/api/company-profiles";
pub const LOGIN_PATH: &str = "/api/auth/login";

/// Which failure channel a request ended in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A response arrived with a non-success status.
    Rejected,
    /// The request never produced a usable response (connect, timeout, decode).
    Transport,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Non-2xx response; `detail` is the server's message when one was sent
    #[error("request rejected ({status}): {}", .detail.as_deref().unwrap_or("no detail"))]
    Rejected { status: u16, detail: Option<String> },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Network(#[from] reqwest::Error),

    /// Success response with a body that does not match the expected shape
    #[error("Invalid response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Backend URL that cannot take path segments
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    /// Profile id that cannot name a single resource (empty, `.` or `..`)
    #[error("Invalid profile id: {0:?}")]
    InvalidId(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Rejected { .. } => ErrorKind::Rejected,
            Self::Network(_) | Self::Decode(_) | Self::InvalidUrl(_) | Self::InvalidId(_) => {
                ErrorKind::Transport
            }
        }
    }

    /// Server-provided message, only for rejected responses.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Rejected { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Operations on `/api/company-profiles`.
pub trait ProfileApi {
    fn list_profiles(&self) -> ApiResult<Vec<CompanyProfile>>;
    fn get_profile(&self, id: &str) -> ApiResult<CompanyProfile>;
    fn create_profile(&self, draft: &ProfileDraft) -> ApiResult<MutationReceipt>;
    fn update_profile(&self, id: &str, draft: &ProfileDraft) -> ApiResult<MutationReceipt>;
    fn delete_profile(&self, id: &str) -> ApiResult<MutationReceipt>;
}

impl<T: ProfileApi + ?Sized> ProfileApi for &T {
    fn list_profiles(&self) -> ApiResult<Vec<CompanyProfile>> {
        (**self).list_profiles()
    }

    fn get_profile(&self, id: &str) -> ApiResult<CompanyProfile> {
        (**self).get_profile(id)
    }

    fn create_profile(&self, draft: &ProfileDraft) -> ApiResult<MutationReceipt> {
        (**self).create_profile(draft)
    }

    fn update_profile(&self, id: &str, draft: &ProfileDraft) -> ApiResult<MutationReceipt> {
        (**self).update_profile(id, draft)
    }

    fn delete_profile(&self, id: &str) -> ApiResult<MutationReceipt> {
        (**self).delete_profile(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let rejected = ApiError::Rejected {
            status: 404,
            detail: Some("Not found".into()),
        };
        assert_eq!(rejected.kind(), ErrorKind::Rejected);
        assert_eq!(rejected.detail(), Some("Not found"));
        assert_eq!(rejected.status(), Some(404));
        assert_eq!(rejected.to_string(), "request rejected (404): Not found");

        let decode: ApiError = serde_json::from_str::<Vec<CompanyProfile>>("{")
            .unwrap_err()
            .into();
        assert_eq!(decode.kind(), ErrorKind::Transport);
        assert_eq!(decode.detail(), None);
        assert_eq!(decode.status(), None);
    }
}
