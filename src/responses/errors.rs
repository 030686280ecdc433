use crate::errors::ServerError;
use astra::{Body, Response, ResponseBuilder};

pub type ResultResp = Result<Response, ServerError>;

/// Convert a ServerError into a proper HTML response.
pub fn error_to_response(err: ServerError) -> Response {
    let status = err.status();
    let message = match &err {
        ServerError::NotFound => "Página não encontrada".to_string(),
        ServerError::BadRequest(msg) => msg.clone(),
        ServerError::Unauthorized(msg) => msg.clone(),
        ServerError::UploadError(msg) => msg.clone(),
        // Never leak SQL or IO details to the page.
        ServerError::DbError(_) | ServerError::XlsxError(_) | ServerError::InternalError => {
            "Erro interno do servidor".to_string()
        }
    };
    html_error_response(status, &message)
}

/// Build an HTML error page.
pub fn html_error_response(status: u16, message: &str) -> Response {
    let escaped = maud::html! { (message) }.into_string();
    let html = format!(
        "<!DOCTYPE html>
        <html lang=\"pt-BR\">
        <head><meta charset=\"utf-8\"><title>Erro {status}</title></head>
        <body>
            <h1>Erro {status}</h1>
            <p>{escaped}</p>
            <p><a href=\"/\">Voltar para a página inicial</a></p>
        </body>
        </html>"
    );

    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(html))
        .unwrap_or_else(|_| Response::new(Body::from("Internal Server Error")))
}
