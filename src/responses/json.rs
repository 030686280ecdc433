use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use serde_json::Value;

pub fn json_response(status: u16, value: &Value) -> ResultResp {
    let body = serde_json::to_string(value).map_err(|_| ServerError::InternalError)?;

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "application/json; charset=utf-8")
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}
