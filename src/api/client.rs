//! Blocking HTTP client for the company profile endpoints.

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;
use serde::de::DeserializeOwned;
use std::time::Duration;

use super::types::{ErrorBody, LoginRequest, LoginResponse, MutationReceipt};
use super::{ApiError, ApiResult, ProfileApi, LOGIN_PATH, PROFILES_PATH};
use crate::config::AppConfig;
use crate::db::Database;
use crate::models::{CompanyProfile, ProfileDraft};

/// Where the bearer token comes from. Read once per request so a login in
/// another process is picked up without restarting.
pub trait TokenSource {
    fn token(&self) -> Option<String>;
}

impl TokenSource for Database {
    fn token(&self) -> Option<String> {
        match self.session_token() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!("could not read session token: {}", e);
                None
            }
        }
    }
}

impl TokenSource for Option<String> {
    fn token(&self) -> Option<String> {
        self.clone()
    }
}

impl<T: TokenSource + ?Sized> TokenSource for &T {
    fn token(&self) -> Option<String> {
        (**self).token()
    }
}

/// HTTP implementation of [`ProfileApi`].
#[derive(Debug)]
pub struct HttpProfileApi<S> {
    client: Client,
    base: Url,
    tokens: S,
}

impl<S: TokenSource> HttpProfileApi<S> {
    /// Create a client for `base_url` (scheme + host, no `/api` suffix).
    pub fn new(base_url: &str, timeout: Duration, tokens: S) -> ApiResult<Self> {
        let base = Url::parse(base_url.trim())
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(base_url.to_string()));
        }
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base,
            tokens,
        })
    }

    pub fn from_config(config: &AppConfig, tokens: S) -> ApiResult<Self> {
        Self::new(&config.backend_url, config.timeout(), tokens)
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    /// Exchange credentials for a bearer token. Sent without Authorization.
    pub fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let url = self.endpoint(LOGIN_PATH, None)?;
        tracing::debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()?;
        let response = Self::check_status(response)?;
        Self::read_json(response)
    }

    /// Base URL plus the segments of `path`, then `id` as one encoded segment.
    fn endpoint(&self, path: &str, id: Option<&str>) -> ApiResult<Url> {
        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(self.base.to_string()))?;
            segments
                .pop_if_empty()
                .extend(path.split('/').filter(|s| !s.is_empty()));
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    fn collection_url(&self) -> ApiResult<Url> {
        self.endpoint(PROFILES_PATH, None)
    }

    fn profile_url(&self, id: &str) -> ApiResult<Url> {
        let id = id.trim();
        // Dot segments are dropped on push, which would retarget the collection
        if id.is_empty() || id == "." || id == ".." {
            return Err(ApiError::InvalidId(id.to_string()));
        }
        self.endpoint(PROFILES_PATH, Some(id))
    }

    fn send(&self, request: RequestBuilder) -> ApiResult<Response> {
        let mut request = request.header(CONTENT_TYPE, "application/json");
        if let Some(token) = self.tokens.token() {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().map_err(|e| {
            tracing::error!("request failed: {}", e);
            ApiError::from(e)
        })?;
        Self::check_status(response)
    }

    fn check_status(response: Response) -> ApiResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        let detail = ErrorBody::detail_from(&body);
        tracing::warn!(
            "request rejected with {}: {}",
            status,
            detail.as_deref().unwrap_or("no detail")
        );
        Err(ApiError::Rejected {
            status: status.as_u16(),
            detail,
        })
    }

    fn read_json<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    fn read_receipt(response: Response) -> ApiResult<MutationReceipt> {
        let body = response.text()?;
        Ok(MutationReceipt::from_body(&body))
    }
}

impl<S: TokenSource> ProfileApi for HttpProfileApi<S> {
    fn list_profiles(&self) -> ApiResult<Vec<CompanyProfile>> {
        let url = self.collection_url()?;
        tracing::debug!("GET {}", url);
        let response = self.send(self.client.get(url))?;
        Self::read_json(response)
    }

    fn get_profile(&self, id: &str) -> ApiResult<CompanyProfile> {
        let url = self.profile_url(id)?;
        tracing::debug!("GET {}", url);
        let response = self.send(self.client.get(url))?;
        Self::read_json(response)
    }

    fn create_profile(&self, draft: &ProfileDraft) -> ApiResult<MutationReceipt> {
        let url = self.collection_url()?;
        tracing::debug!("POST {}", url);
        let response = self.send(self.client.post(url).json(draft))?;
        Self::read_receipt(response)
    }

    fn update_profile(&self, id: &str, draft: &ProfileDraft) -> ApiResult<MutationReceipt> {
        let url = self.profile_url(id)?;
        tracing::debug!("PUT {}", url);
        let response = self.send(self.client.put(url).json(draft))?;
        Self::read_receipt(response)
    }

    fn delete_profile(&self, id: &str) -> ApiResult<MutationReceipt> {
        let url = self.profile_url(id)?;
        tracing::debug!("DELETE {}", url);
        let response = self.send(self.client.delete(url))?;
        Self::read_receipt(response)
    }
}
