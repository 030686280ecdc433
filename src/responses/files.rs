use crate::errors::ServerError;
use crate::responses::ResultResp;
use astra::{Body, ResponseBuilder};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Serve a file from under `root`, mapping the extension to a MIME type.
/// The request path must not escape `root`.
pub fn file_response(root: &str, request_path: &str) -> ResultResp {
    let relative = sanitize(request_path).ok_or(ServerError::NotFound)?;
    let full = Path::new(root).join(relative);

    let bytes = fs::read(&full).map_err(|_| ServerError::NotFound)?;

    let content_type = content_type_for(&full);

    ResponseBuilder::new()
        .status(200)
        .header("Content-Type", content_type)
        .header("Cache-Control", "public, max-age=3600")
        .body(Body::from(bytes))
        .map_err(|_| ServerError::InternalError)
}

/// Reject absolute paths and any `..` component.
fn sanitize(request_path: &str) -> Option<PathBuf> {
    let trimmed = request_path.trim_start_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    let path = Path::new(trimmed);
    for component in path.components() {
        match component {
            Component::Normal(_) => {}
            _ => return None,
        }
    }
    Some(path.to_path_buf())
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("css") => mime::TEXT_CSS.as_ref(),
        Some("js") => "text/javascript",
        Some("jpg") | Some("jpeg") => mime::IMAGE_JPEG.as_ref(),
        Some("png") => mime::IMAGE_PNG.as_ref(),
        Some("webp") => "image/webp",
        Some("svg") => mime::IMAGE_SVG.as_ref(),
        Some("ico") => "image/x-icon",
        Some("xml") => mime::TEXT_XML.as_ref(),
        _ => mime::APPLICATION_OCTET_STREAM.as_ref(),
    }
}
