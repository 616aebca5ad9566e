//! Errors raised while mapping and binding a request, plus the ones reported at startup.
//!
//! Request-time errors ([`BindError`], [`DecodeError`], [`WebError`]) all map onto a
//! client error status and are written back by their [`Responder`](crate::responder::Responder)
//! implementation before any handler logic runs.

use crate::binder::ValueKind;
use http::{Method, StatusCode};
use std::io;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindError {
    #[error("required parameter '{name}' is not present")]
    MissingParameter { name: String },

    #[error("failed to convert value '{raw}' of parameter '{name}' to {kind}")]
    TypeMismatch { name: String, raw: String, kind: ValueKind },
}

impl BindError {
    pub fn missing_parameter<S: ToString>(name: S) -> Self {
        Self::MissingParameter { name: name.to_string() }
    }

    pub fn type_mismatch<S: ToString, R: ToString>(name: S, raw: R, kind: ValueKind) -> Self {
        Self::TypeMismatch { name: name.to_string(), raw: raw.to_string(), kind }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("content type '{content_type}' is not supported")]
    UnsupportedMediaType { content_type: String },

    #[error("malformed json body: {reason}")]
    Malformed { reason: String },

    #[error("required field '{field}' is missing")]
    MissingField { field: String },

    #[error("field '{field}' has an invalid value")]
    InvalidField { field: String },

    #[error("request body is not valid utf-8")]
    InvalidUtf8,
}

impl DecodeError {
    pub fn unsupported_media_type<S: ToString>(content_type: S) -> Self {
        Self::UnsupportedMediaType { content_type: content_type.to_string() }
    }

    pub fn malformed<S: ToString>(reason: S) -> Self {
        Self::Malformed { reason: reason.to_string() }
    }

    pub fn missing_field<S: ToString>(field: S) -> Self {
        Self::MissingField { field: field.to_string() }
    }

    pub fn invalid_field<S: ToString>(field: S) -> Self {
        Self::InvalidField { field: field.to_string() }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            DecodeError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

/// Everything that can stop a request before its handler runs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WebError {
    #[error("no route for {method} {path}")]
    RouteNotFound { method: Method, path: String },

    #[error(transparent)]
    Bind(#[from] BindError),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl WebError {
    pub fn route_not_found<S: ToString>(method: Method, path: S) -> Self {
        Self::RouteNotFound { method, path: path.to_string() }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            WebError::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            WebError::Bind(_) => StatusCode::BAD_REQUEST,
            WebError::Decode(e) => e.status_code(),
        }
    }
}

/// Problems in a route declaration, reported by [`RouterBuilder::build`](crate::router::RouterBuilder::build).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("invalid path template '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("path variable '{name}' appears more than once in '{path}'")]
    DuplicateVariable { path: String, name: String },

    #[error("invalid constraint expression '{expr}'")]
    InvalidConstraint { expr: String },

    #[error("invalid media type '{expr}'")]
    InvalidMediaType { expr: String },
}

impl RouteError {
    pub fn invalid_path<P: ToString, S: ToString>(path: P, reason: S) -> Self {
        Self::InvalidPath { path: path.to_string(), reason: reason.to_string() }
    }

    pub fn duplicate_variable<P: ToString, S: ToString>(path: P, name: S) -> Self {
        Self::DuplicateVariable { path: path.to_string(), name: name.to_string() }
    }

    pub fn invalid_constraint<S: ToString>(expr: S) -> Self {
        Self::InvalidConstraint { expr: expr.to_string() }
    }

    pub fn invalid_media_type<S: ToString>(expr: S) -> Self {
        Self::InvalidMediaType { expr: expr.to_string() }
    }
}

#[derive(Error, Debug)]
pub enum ServerBuildError {
    #[error("router must be set")]
    MissingRouter,

    #[error("invalid address '{address}': {source}")]
    InvalidAddress { address: String, source: io::Error },
}
