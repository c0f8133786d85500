//! # FileServer Access Logging Middleware
//!
//! File: cli/src/commands/serve/access_log.rs
//! Project: fileserver (static directory hosting and service management)
//!
//! ## Overview
//!
//! Axum middleware that emits one access-log line to standard output per
//! completed request. Each line carries the completion timestamp, the elapsed
//! wall-clock duration, the client IP, the HTTP method, and the request path
//! with its raw query string appended (separated by `?`) when one is present.
//!
//! Error responses (404 and friends) come from the static-file service and
//! still produce a log line; this middleware never alters the response.
//!
use axum::extract::{ConnectInfo, Request};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::Response;
use chrono::Local;
use std::net::SocketAddr;
use std::time::{Duration, Instant};

/// # Log Request (`log_request`)
///
/// Middleware entry point. Captures the request line and peer address, runs
/// the inner service, then prints the access-log line once the response is
/// complete. The log write is a single `println!`; stdout is line-buffered,
/// so concurrent requests interleave at line granularity only.
pub async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let query = req.uri().query().map(str::to_owned);
    let client_ip = client_ip(&req);

    let started = Instant::now();
    let response = next.run(req).await;
    let elapsed = started.elapsed();

    let completed = Local::now().format("%Y/%m/%d %H:%M:%S").to_string();
    let target = request_target(&path, query.as_deref());
    println!(
        "{}",
        format_access_line(&completed, elapsed, &client_ip, &method, &target)
    );

    response
}

/// Extracts the caller's IP from the connection's remote address.
/// Returns the empty string when the `ConnectInfo` extension is absent
/// (e.g. when the router is driven directly in tests).
fn client_ip(req: &Request) -> String {
    req.extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_default()
}

/// Joins the request path with its raw query string. The `?` separator is
/// only added when the query is present and non-empty.
fn request_target(path: &str, query: Option<&str>) -> String {
    match query {
        Some(q) if !q.is_empty() => format!("{path}?{q}"),
        _ => path.to_string(),
    }
}

/// Renders one access-log line with the original column layout:
/// timestamp, right-aligned latency, right-aligned client IP, left-aligned
/// method, quoted target.
fn format_access_line(
    timestamp: &str,
    elapsed: Duration,
    client_ip: &str,
    method: &Method,
    target: &str,
) -> String {
    format!(
        "[http] {} | {:>13} | {:>15} | {:<4} \"{}\"",
        timestamp,
        format!("{elapsed:?}"),
        client_ip,
        method.as_str(),
        target
    )
}
