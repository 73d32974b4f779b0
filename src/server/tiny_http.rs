//! tiny_http server adapter
//!
//! Handles routing, body parsing, and response conversion for tiny_http.

use std::io::Cursor;

use serde::{Serialize, de::DeserializeOwned};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

use bizpulse::api::{
    self, AnalyzeRequest, ApiContext, ApiError, ApiResponse, ChatRequest, RecommendRequest,
};
use bizpulse::dataset::RawPost;

/// Status code and JSON body of a routed request
#[derive(Debug, PartialEq, Eq)]
pub struct Reply {
    /// HTTP status
    pub status: u16,
    /// Serialized [`ApiResponse`]
    pub body: String,
}

// =============================================================================
// SERVER LOOP
// =============================================================================

/// Serve requests one at a time until the listener closes
pub fn serve(ctx: &mut ApiContext, addr: &str) -> anyhow::Result<()> {
    let server = Server::http(addr).map_err(|e| anyhow::anyhow!("Failed to start server: {e}"))?;
    log::info!("listening on http://{addr}/api");

    for mut request in server.incoming_requests() {
        let response = handle_api_request(ctx, &mut request);
        log::debug!("{} {} -> {}", request.method(), request.url(), response.status_code().0);
        if let Err(e) = request.respond(response) {
            log::warn!("failed to send response: {e}");
        }
    }
    Ok(())
}

// =============================================================================
// REQUEST HANDLING
// =============================================================================

/// Handle an API request and return a response
pub fn handle_api_request(ctx: &mut ApiContext, request: &mut Request) -> Response<Cursor<Vec<u8>>> {
    let method = request.method().clone();
    let url = request.url().to_string();

    let mut body = String::new();
    let read = match method {
        Method::Post => request.as_reader().read_to_string(&mut body).map(|_| ()),
        _ => Ok(()),
    };
    if let Err(e) = read {
        let err = ApiError::bad_request(format!("Failed to read request body: {e}"));
        return into_response(error_reply(&err));
    }

    into_response(dispatch(ctx, &method, &url, &body))
}

/// Map a method, URL and body to a handler
///
/// Paths are accepted under both `/api/v1` and `/api`.
pub fn dispatch(ctx: &mut ApiContext, method: &Method, url: &str, body: &str) -> Reply {
    let (path, query) = url.split_once('?').unwrap_or((url, ""));
    let api_path = path
        .strip_prefix("/api/v1")
        .or_else(|| path.strip_prefix("/api"))
        .unwrap_or(path);

    match (method, api_path) {
        (&Method::Get, "/health") => success_reply(api::health()),
        (&Method::Get, "/statistics") => success_reply(api::statistics(ctx)),
        (&Method::Get, "/trend") => handle_result(api::trend(ctx, query_param(query, "granularity"))),
        (&Method::Get, "/resources") => success_reply(api::catalog(ctx)),
        (&Method::Get, "/chat") => success_reply(api::chat_status(ctx)),

        (&Method::Get, "/posts") => match query_param(query, "count").map(str::parse::<usize>) {
            Some(Err(_)) => error_reply(&ApiError::bad_request("count must be a number")),
            count => success_reply(api::posts(ctx, count.and_then(Result::ok))),
        },

        (&Method::Post, "/analyze") => match parse_body::<AnalyzeRequest>(body) {
            Ok(req) => handle_result(api::analyze(ctx, &req)),
            Err(e) => error_reply(&e),
        },

        (&Method::Post, "/recommend") => match parse_body::<RecommendRequest>(body) {
            Ok(req) => handle_result(api::recommend(ctx, &req)),
            Err(e) => error_reply(&e),
        },

        (&Method::Post, "/posts") => match parse_body::<RawPost>(body) {
            Ok(raw) => handle_result(api::ingest_post(ctx, raw)),
            Err(e) => error_reply(&e),
        },

        (&Method::Post, "/chat") => match parse_body::<ChatRequest>(body) {
            Ok(req) => handle_result(api::submit_chat(ctx, &req)),
            Err(e) => error_reply(&e),
        },

        // Catalog lookup: GET /resources/{topic}
        _ if *method == Method::Get && api_path.starts_with("/resources/") => {
            let topic = api_path.strip_prefix("/resources/").unwrap_or("");
            handle_result(api::resources(ctx, topic))
        },

        _ => error_reply(&ApiError::not_found(format!(
            "API endpoint not found: {method} {api_path}"
        ))),
    }
}

fn query_param<'q>(query: &'q str, key: &str) -> Option<&'q str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, v)| v)
}

// =============================================================================
// BODY PARSING
// =============================================================================

fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::bad_request(format!("Invalid JSON: {e}")))
}

// =============================================================================
// RESPONSE CONVERSION
// =============================================================================

fn handle_result<T: Serialize>(result: Result<T, ApiError>) -> Reply {
    match result {
        Ok(data) => success_reply(data),
        Err(e) => error_reply(&e),
    }
}

fn success_reply<T: Serialize>(data: T) -> Reply {
    json_reply(&ApiResponse::success(data), 200)
}

fn error_reply(error: &ApiError) -> Reply {
    let response = ApiResponse::<()>::error(error.code.as_str(), &error.message);
    json_reply(&response, error.status_code())
}

fn json_reply<T: Serialize>(data: &T, status: u16) -> Reply {
    let body = serde_json::to_string(data).unwrap_or_else(|_| r#"{"success":false}"#.to_string());
    Reply { status, body }
}

fn into_response(reply: Reply) -> Response<Cursor<Vec<u8>>> {
    let response = Response::from_data(reply.body.into_bytes()).with_status_code(StatusCode(reply.status));
    match Header::from_bytes("Content-Type", "application/json") {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}
