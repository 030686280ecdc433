use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use maud::Markup;

pub fn html_response(markup: Markup) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(markup.into_string()))
        .map_err(|_| ServerError::InternalError)
}

pub fn redirect(location: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(302)
        .header("Location", location)
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}

/// Redirect that also sets (or clears) the session cookie.
pub fn redirect_with_cookie(location: &str, cookie: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(302)
        .header("Location", location)
        .header("Set-Cookie", cookie)
        .body(Body::empty())
        .map_err(|_| ServerError::InternalError)
}
