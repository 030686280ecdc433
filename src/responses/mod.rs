pub mod errors;
pub mod files;
pub mod html;
pub mod json;
pub mod xlsx;
pub mod xml;

pub use errors::{error_to_response, ResultResp};
pub use files::file_response;
pub use html::{html_response, redirect, redirect_with_cookie};
pub use json::json_response;
pub use xlsx::xlsx_response;
pub use xml::xml_response;

use astra::Response;

/// Security headers carried on every response.
pub fn with_security_headers(mut resp: Response) -> Response {
    let headers = resp.headers_mut();
    headers.insert("X-Frame-Options", "SAMEORIGIN".parse().unwrap());
    headers.insert("X-Content-Type-Options", "nosniff".parse().unwrap());
    headers.insert(
        "Referrer-Policy",
        "origin-when-cross-origin".parse().unwrap(),
    );
    headers.insert(
        "Permissions-Policy",
        "camera=(), microphone=(), geolocation=()".parse().unwrap(),
    );
    resp
}
