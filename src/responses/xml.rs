use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};

/// Serve a pre-built XML document (sitemap, RSS).
pub fn xml_response(body: String, content_type: &str) -> ResultResp {
    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", content_type)
        .body(Body::from(body))
        .map_err(|_| ServerError::InternalError)
}
