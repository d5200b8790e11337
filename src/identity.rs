//! Identity extraction from gateway-injected headers.
//!
//! The upstream gateway authenticates every caller and forwards the result as
//! three trusted headers. This service never validates tokens itself; it only
//! parses those headers into a typed [`CurrentUser`] that handlers pass around
//! explicitly.

use std::collections::{HashMap, HashSet};

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap},
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::scopes::Scope;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USERNAME_HEADER: &str = "x-username";
pub const SCOPES_HEADER: &str = "x-user-scopes";

/// The caller identity asserted by the gateway, scoped to a single request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
    scopes: HashSet<String>,
}

impl CurrentUser {
    pub fn new(id: Uuid, username: impl Into<String>, scopes: impl IntoIterator<Item = String>) -> Self {
        Self {
            id,
            username: username.into(),
            scopes: scopes.into_iter().collect(),
        }
    }

    /// Build a user from the three trusted headers.
    ///
    /// All three headers are required. Failures are reported per header and
    /// surface as 422 (gateway-trust design: this service never emits 401).
    /// An empty scopes header is valid and yields an empty scope set.
    pub fn from_headers(headers: &HeaderMap) -> Result<Self, ApiError> {
        let mut field_errors = HashMap::new();

        let id = match header_str(headers, USER_ID_HEADER) {
            Ok(raw) => match raw.trim().parse::<Uuid>() {
                Ok(id) => Some(id),
                Err(_) => {
                    field_errors.insert(USER_ID_HEADER.to_string(), "must be a valid UUID".to_string());
                    None
                }
            },
            Err(reason) => {
                field_errors.insert(USER_ID_HEADER.to_string(), reason.to_string());
                None
            }
        };

        let username = match header_str(headers, USERNAME_HEADER) {
            Ok(raw) if !raw.trim().is_empty() => Some(raw.trim().to_string()),
            Ok(_) => {
                field_errors.insert(USERNAME_HEADER.to_string(), "must not be empty".to_string());
                None
            }
            Err(reason) => {
                field_errors.insert(USERNAME_HEADER.to_string(), reason.to_string());
                None
            }
        };

        let scopes = match header_str(headers, SCOPES_HEADER) {
            Ok(raw) => Some(raw.split_whitespace().map(str::to_string).collect::<HashSet<_>>()),
            Err(reason) => {
                field_errors.insert(SCOPES_HEADER.to_string(), reason.to_string());
                None
            }
        };

        match (id, username, scopes) {
            (Some(id), Some(username), Some(scopes)) if field_errors.is_empty() => Ok(Self {
                id,
                username,
                scopes,
            }),
            _ => Err(ApiError::unauthenticated(field_errors)),
        }
    }

    /// Exact-token scope membership; unknown scopes in the header are ignored.
    pub fn has_scope(&self, scope: Scope) -> bool {
        self.scopes.contains(scope.as_str())
    }

    pub fn scopes(&self) -> &HashSet<String> {
        &self.scopes
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        CurrentUser::from_headers(&parts.headers)
    }
}

fn header_str<'h>(headers: &'h HeaderMap, name: &str) -> Result<&'h str, &'static str> {
    match headers.get(name) {
        None => Err("missing required header"),
        Some(value) => value.to_str().map_err(|_| "must be valid UTF-8"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(id: Option<&str>, username: Option<&str>, scopes: Option<&str>) -> HeaderMap {
        let mut map = HeaderMap::new();
        if let Some(id) = id {
            map.insert(USER_ID_HEADER, HeaderValue::from_str(id).unwrap());
        }
        if let Some(username) = username {
            map.insert(USERNAME_HEADER, HeaderValue::from_str(username).unwrap());
        }
        if let Some(scopes) = scopes {
            map.insert(SCOPES_HEADER, HeaderValue::from_str(scopes).unwrap());
        }
        map
    }

    #[test]
    fn parses_all_three_headers() {
        let id = Uuid::new_v4();
        let map = headers(Some(&id.to_string()), Some("maria"), Some("venues:read venues:write"));
        let user = CurrentUser::from_headers(&map).unwrap();
        assert_eq!(user.id, id);
        assert_eq!(user.username, "maria");
        assert!(user.has_scope(Scope::Write));
        assert!(!user.has_scope(Scope::Admin));
    }

    #[test]
    fn empty_scopes_header_yields_empty_set() {
        let id = Uuid::new_v4();
        let map = headers(Some(&id.to_string()), Some("maria"), Some(""));
        let user = CurrentUser::from_headers(&map).unwrap();
        assert!(user.scopes().is_empty());
    }

    #[test]
    fn unknown_scopes_are_carried_but_never_match() {
        let id = Uuid::new_v4();
        let map = headers(Some(&id.to_string()), Some("maria"), Some("frobnicate venues:write"));
        let user = CurrentUser::from_headers(&map).unwrap();
        assert!(user.has_scope(Scope::Write));
        assert_eq!(user.scopes().len(), 2);
    }

    #[test]
    fn missing_headers_reported_per_field() {
        let err = CurrentUser::from_headers(&headers(None, None, None)).unwrap_err();
        match err {
            ApiError::Unauthenticated { field_errors } => {
                assert!(field_errors.contains_key(USER_ID_HEADER));
                assert!(field_errors.contains_key(USERNAME_HEADER));
                assert!(field_errors.contains_key(SCOPES_HEADER));
            }
            other => panic!("expected Unauthenticated, got {:?}", other),
        }
    }

    #[test]
    fn malformed_uuid_is_rejected() {
        let map = headers(Some("not-a-uuid"), Some("maria"), Some(""));
        let err = CurrentUser::from_headers(&map).unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::UNPROCESSABLE_ENTITY);
    }
}
