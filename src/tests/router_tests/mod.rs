mod admin_tests;
mod auth_tests;
mod lead_tests;
mod public_tests;

use astra::{Body, Request, Response};
use http::Method;
use std::io::Read;

pub fn get(path: &str) -> Request {
    let mut req = Request::new(Body::empty());
    *req.method_mut() = Method::GET;
    *req.uri_mut() = path.parse().unwrap();
    req
}

pub fn get_with_cookie(path: &str, session_token: &str) -> Request {
    let mut req = get(path);
    req.headers_mut().insert(
        "cookie",
        format!("session={session_token}").parse().unwrap(),
    );
    req
}

pub fn post_form(path: &str, body: &str) -> Request {
    let mut req = Request::new(Body::from(body.as_bytes().to_vec()));
    *req.method_mut() = Method::POST;
    *req.uri_mut() = path.parse().unwrap();
    req.headers_mut().insert(
        "content-type",
        "application/x-www-form-urlencoded".parse().unwrap(),
    );
    req
}

pub fn post_json(path: &str, body: &str) -> Request {
    let mut req = Request::new(Body::from(body.as_bytes().to_vec()));
    *req.method_mut() = Method::POST;
    *req.uri_mut() = path.parse().unwrap();
    req.headers_mut().insert(
        "content-type",
        "application/json".parse().unwrap(),
    );
    req
}

pub fn post_form_with_cookie(path: &str, body: &str, session_token: &str) -> Request {
    let mut req = post_form(path, body);
    req.headers_mut().insert(
        "cookie",
        format!("session={session_token}").parse().unwrap(),
    );
    req
}

pub fn body_string(resp: Response) -> String {
    let mut out = String::new();
    resp.into_body()
        .reader()
        .read_to_string(&mut out)
        .expect("response body is utf-8");
    out
}

pub fn location(resp: &Response) -> String {
    resp.headers()
        .get("Location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}
