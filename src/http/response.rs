//! Response rendering.
//!
//! # Responsibilities
//! - Turn controller outcomes into HTML pages or redirects
//! - Map every error kind to a status code and an error page
//!
//! # Design Decisions
//! - Redirects are 303 See Other so PATCH/DELETE results are followed with GET
//! - Database failures are logged but never echoed to the client

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};

use crate::http::request::PayloadError;
use crate::restaurants::controller::{ControllerError, Outcome};
use crate::restaurants::model::ParamsError;
use crate::restaurants::views;
use crate::routing::RouteError;

impl IntoResponse for Outcome {
    fn into_response(self) -> Response {
        match self {
            Outcome::Render(view) => Html(views::render(&view).into_string()).into_response(),
            Outcome::Redirect(location) => Redirect::to(&location).into_response(),
        }
    }
}

/// Render an error page with the given status.
pub fn error_page(status: StatusCode, detail: &str) -> Response {
    let heading = status.canonical_reason().unwrap_or("Error");
    let page = views::error(status.as_u16(), heading, detail);
    (status, Html(page.into_string())).into_response()
}

impl IntoResponse for ControllerError {
    fn into_response(self) -> Response {
        match &self {
            ControllerError::NotFound { .. } => error_page(StatusCode::NOT_FOUND, &self.to_string()),
            ControllerError::Params(ParamsError::ParameterMissing(_)) => {
                error_page(StatusCode::BAD_REQUEST, &self.to_string())
            }
            ControllerError::Store(err) => {
                tracing::error!(error = %err, "Restaurant store failure");
                error_page(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "We're sorry, but something went wrong.",
                )
            }
        }
    }
}

impl IntoResponse for RouteError {
    fn into_response(self) -> Response {
        error_page(StatusCode::NOT_FOUND, &self.to_string())
    }
}

impl IntoResponse for PayloadError {
    fn into_response(self) -> Response {
        let status = match self {
            PayloadError::TooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            PayloadError::InvalidJson(_) => StatusCode::BAD_REQUEST,
        };
        error_page(status, &self.to_string())
    }
}
