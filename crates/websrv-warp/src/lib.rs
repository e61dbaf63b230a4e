// SPDX-FileCopyrightText: Copyright (C) 2018-2026 Uwe Klotz <uwedotklotzatgmaildotcom> et al.
// SPDX-License-Identifier: AGPL-3.0-or-later

use std::{convert::Infallible, error::Error as StdError, result::Result as StdResult};

use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use warp::{
    Filter, Reply,
    http::StatusCode,
    hyper::body::Bytes,
    reject::{self, MethodNotAllowed, Reject, Rejection},
};

use albums_backend_webapi_json as api;
use albums_repo::prelude::RepoError;
use albums_storage::{self as storage, gatekeeper::Gatekeeper};
use albums_usecases as uc;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    BadRequest(anyhow::Error),

    #[error("Invalid JSON")]
    InvalidJson(#[source] serde_json::Error),

    #[error("payload too large")]
    PayloadTooLarge,

    #[error("album not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("service unavailable")]
    ServiceUnavailable,

    #[error("timeout: {reason}")]
    Timeout { reason: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<api::Error> for Error {
    fn from(err: api::Error) -> Self {
        use api::Error::*;
        match err {
            UseCase(err) => err.into(),
        }
    }
}

impl From<uc::Error> for Error {
    fn from(err: uc::Error) -> Self {
        use uc::Error::*;
        match err {
            Input(err) => Self::BadRequest(err.into()),
            Repository(err) => match err {
                RepoError::NotFound => Self::NotFound,
                RepoError::Conflict => Self::Conflict,
            },
        }
    }
}

impl From<storage::Error> for Error {
    fn from(err: storage::Error) -> Self {
        use storage::Error::*;
        match err {
            TaskTimeout { reason } => Self::Timeout { reason },
            Decommissioned => Self::ServiceUnavailable,
        }
    }
}

pub type Result<T> = StdResult<T, Error>;

impl Reject for Error {}

pub fn reject_on_error(err: impl Into<Error>) -> Rejection {
    reject::custom(err.into())
}

pub fn after_task_finished<T, E1, E2>(res: StdResult<StdResult<T, E1>, E2>) -> StdResult<T, Rejection>
where
    E1: Into<Error>,
    E2: Into<Error>,
{
    res.map_err(reject_on_error)
        .and_then(|res| res.map_err(reject_on_error))
}

/// Collect the request body up to `limit` bytes.
///
/// A `Content-Length` header is optional. Requests without a body
/// yield an empty buffer.
#[must_use]
pub fn request_body_bytes(limit: u64) -> impl Filter<Extract = (Bytes,), Error = Rejection> + Clone {
    warp::header::optional::<u64>("content-length")
        .and_then(move |content_length: Option<u64>| async move {
            if content_length.is_some_and(|content_length| content_length > limit) {
                return Err(reject_on_error(Error::PayloadTooLarge));
            }
            Ok::<_, Rejection>(())
        })
        .untuple_one()
        .and(warp::body::bytes())
        .and_then(move |bytes: Bytes| async move {
            if !u64::try_from(bytes.len()).is_ok_and(|len| len <= limit) {
                return Err(reject_on_error(Error::PayloadTooLarge));
            }
            Ok::<_, Rejection>(bytes)
        })
}

/// Decode a JSON request body regardless of its content type.
pub fn decode_json_body<T>(body: &[u8]) -> Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_slice(body).map_err(Error::InvalidJson)
}

/// Run a task with exclusive access to the repository.
pub async fn run_write_task<R, H, T, E>(
    gatekeeper: &Gatekeeper<R>,
    handler: H,
) -> StdResult<T, Rejection>
where
    H: FnOnce(&mut R) -> StdResult<T, E>,
    E: Into<Error>,
{
    after_task_finished(gatekeeper.run_write_task(handler).await)
}

/// Run a task with shared access to the repository.
pub async fn run_read_task<R, H, T, E>(
    gatekeeper: &Gatekeeper<R>,
    handler: H,
) -> StdResult<T, Rejection>
where
    H: FnOnce(&R) -> StdResult<T, E>,
    E: Into<Error>,
{
    after_task_finished(gatekeeper.run_read_task(handler).await)
}

/// An API error serializable to JSON.
///
/// Rejected input is reported with an `error` field, all other
/// failures with a `message` field.
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ErrorResponseBody {
    Error {
        error: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        details: Option<String>,
    },
    Message {
        message: String,
    },
}

fn status_code_to_string(code: StatusCode) -> String {
    code.canonical_reason()
        .unwrap_or_else(|| code.as_str())
        .to_string()
}

fn source_or_self_to_string(err: &(dyn StdError + 'static)) -> String {
    err.source()
        .map_or_else(|| err.to_string(), ToString::to_string)
}

#[allow(clippy::unused_async)] // async needed for warp filter
pub async fn handle_rejection(reject: Rejection) -> StdResult<impl Reply, Infallible> {
    let code;
    let body;

    if reject.is_not_found() {
        code = StatusCode::NOT_FOUND;
        body = ErrorResponseBody::Message {
            message: status_code_to_string(code),
        };
    } else if let Some(err) = reject.find::<Error>() {
        match err {
            Error::BadRequest(err) => {
                code = StatusCode::BAD_REQUEST;
                body = ErrorResponseBody::Error {
                    error: err.to_string(),
                    details: None,
                };
            }
            Error::InvalidJson(_) => {
                code = StatusCode::BAD_REQUEST;
                body = ErrorResponseBody::Error {
                    error: err.to_string(),
                    details: Some(source_or_self_to_string(err)),
                };
            }
            Error::PayloadTooLarge => {
                code = StatusCode::PAYLOAD_TOO_LARGE;
                body = ErrorResponseBody::Message {
                    message: status_code_to_string(code),
                };
            }
            Error::NotFound => {
                code = StatusCode::NOT_FOUND;
                body = ErrorResponseBody::Message {
                    message: err.to_string(),
                };
            }
            Error::Conflict => {
                code = StatusCode::CONFLICT;
                body = ErrorResponseBody::Message {
                    message: status_code_to_string(code),
                };
            }
            Error::ServiceUnavailable => {
                code = StatusCode::SERVICE_UNAVAILABLE;
                body = ErrorResponseBody::Message {
                    message: status_code_to_string(code),
                };
            }
            Error::Timeout { reason } => {
                code = StatusCode::SERVICE_UNAVAILABLE;
                body = ErrorResponseBody::Message {
                    message: reason.clone(),
                };
            }
            Error::Other(err) => {
                log::error!("Internal error: {err}");
                code = StatusCode::INTERNAL_SERVER_ERROR;
                body = ErrorResponseBody::Message {
                    message: err.to_string(),
                };
            }
        }
    } else if let Some(err) = reject.find::<MethodNotAllowed>() {
        // This must have the least priority, because most rejections
        // contain a MethodNotAllowed element!
        code = StatusCode::METHOD_NOT_ALLOWED;
        body = ErrorResponseBody::Message {
            message: err.to_string(),
        };
    } else {
        log::error!("Unhandled rejection {reject:?}");
        code = StatusCode::INTERNAL_SERVER_ERROR;
        body = ErrorResponseBody::Message {
            message: format!("{reject:?}"),
        };
    }

    let json_reply = warp::reply::json(&body);

    Ok(warp::reply::with_status(json_reply, code))
}
