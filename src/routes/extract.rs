use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, HeaderValue, header, request::Parts},
};

use crate::{db::entities::ListId, error::AppError};

pub const ACTIVE_LIST_COOKIE: &str = "active_list_id";

/// The list id remembered in the `active_list_id` cookie, if any. A missing
/// or malformed cookie is not an error; the active list then falls back to
/// the first list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveListCookie(pub Option<ListId>);

impl<S> FromRequestParts<S> for ActiveListCookie
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(read_active_list(&parts.headers)))
    }
}

fn read_active_list(headers: &HeaderMap) -> Option<ListId> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == ACTIVE_LIST_COOKIE)
        .and_then(|(_, value)| value.trim().parse().ok())
}

pub fn active_list_cookie(list_id: ListId) -> Result<HeaderValue, AppError> {
    HeaderValue::from_str(&format!(
        "{ACTIVE_LIST_COOKIE}={list_id}; Path=/; SameSite=Lax"
    ))
    .map_err(|_| AppError::internal("failed to build active list cookie"))
}
