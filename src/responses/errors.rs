// src/responses/errors.rs
use astra::{Body, Response, ResponseBuilder};

use crate::errors::ServerError;

/// Convert a ServerError into a proper HTML response.
pub fn error_to_response(err: ServerError) -> Response {
    match err {
        ServerError::NotFound => html_error_response(404, "Not Found"),
        ServerError::BadRequest(msg) => html_error_response(400, &msg),
        ServerError::Unauthorized(msg) => html_error_response(401, &msg),
        ServerError::Unavailable(msg) => html_error_response(503, &msg),
        ServerError::DbError(msg) => html_error_response(500, &msg),
        ServerError::InternalError => html_error_response(500, "Internal Server Error"),
    }
}

/// Build a bare HTML error page.
pub fn html_error_response(status: u16, message: &str) -> Response {
    let page = maud::html! {
        (maud::DOCTYPE)
        html lang="en" {
            head { meta charset="utf-8"; title { "Error " (status) } }
            body {
                h1 { "Error " (status) }
                p { (message) }
                p { a href="/" { "Back to the request form" } }
            }
        }
    };

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::new(page.into_string()))
        .unwrap_or_else(|_| Response::new(Body::empty()))
}
