//! Request extractors whose rejections surface as [`ApiError`] bodies.
//!
//! axum's own extractors answer malformed input with plain-text bodies; these
//! wrappers route the same rejections through [`ApiError::BadRequest`].

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::ApiError;

/// A typed path segment, e.g. the lead id in `/leads/{id}`.
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct Path<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Query<T>(pub T);

/// A JSON request body. Responses still use [`axum::Json`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
