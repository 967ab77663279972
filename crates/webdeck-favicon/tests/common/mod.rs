//! Minimal HTTP/1.1 server for favicon resolver integration tests.
//!
//! Serves a fixed route table, optionally rejects HEAD (simulating the
//! embedded servers that do), and records every request so tests can
//! assert on probe order and deduplication. Runs in a background thread
//! until the test process exits.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// One servable path.
#[derive(Clone)]
pub struct Route {
    pub path: &'static str,
    pub status: u16,
    pub content_type: &'static str,
    pub body: Vec<u8>,
    pub location: Option<String>,
}

impl Route {
    pub fn html(path: &'static str, body: &str) -> Self {
        Self {
            path,
            status: 200,
            content_type: "text/html; charset=utf-8",
            body: body.as_bytes().to_vec(),
            location: None,
        }
    }

    pub fn icon(path: &'static str, content_type: &'static str) -> Self {
        Self {
            path,
            status: 200,
            content_type,
            body: vec![0_u8; 64],
            location: None,
        }
    }

    pub fn error(path: &'static str, status: u16) -> Self {
        Self {
            path,
            status,
            content_type: "text/plain",
            body: b"error".to_vec(),
            location: None,
        }
    }

    pub fn redirect(path: &'static str, location: String) -> Self {
        Self {
            path,
            status: 302,
            content_type: "text/plain",
            body: Vec::new(),
            location: Some(location),
        }
    }
}

pub struct TestServer {
    base_url: String,
    log: Arc<Mutex<Vec<String>>>,
}

impl TestServer {
    pub fn start(routes: Vec<Route>) -> Self {
        Self::start_with_options(routes, true)
    }

    /// `head_allowed: false` makes the server answer 405 to every HEAD.
    pub fn start_with_options(routes: Vec<Route>, head_allowed: bool) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind test server");
        let port = listener.local_addr().expect("local addr").port();
        let log = Arc::new(Mutex::new(Vec::new()));
        let accept_log = Arc::clone(&log);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let routes = routes.clone();
                let log = Arc::clone(&accept_log);
                thread::spawn(move || handle(stream, &routes, head_allowed, &log));
            }
        });
        Self {
            base_url: format!("http://127.0.0.1:{port}"),
            log,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Every request seen so far, as `"METHOD /path"` strings in order.
    pub fn requests(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    /// How many requests (any method) hit `path`.
    pub fn hits(&self, path: &str) -> usize {
        self.log
            .lock()
            .unwrap()
            .iter()
            .filter(|line| line.ends_with(&format!(" {path}")))
            .count()
    }
}

fn handle(mut stream: TcpStream, routes: &[Route], head_allowed: bool, log: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));

    let mut buf = [0_u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let Ok(request) = std::str::from_utf8(&buf[..n]) else {
        return;
    };
    let mut parts = request.split_whitespace();
    let (Some(method), Some(path)) = (parts.next(), parts.next()) else {
        return;
    };
    log.lock().unwrap().push(format!("{method} {path}"));

    if method.eq_ignore_ascii_case("HEAD") && !head_allowed {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        return;
    }

    let Some(route) = routes.iter().find(|r| r.path == path) else {
        let _ = stream.write_all(
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        );
        return;
    };

    let mut response = format!(
        "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nContent-Type: {}\r\nConnection: close\r\n",
        route.status,
        reason(route.status),
        route.body.len(),
        route.content_type,
    );
    if let Some(location) = &route.location {
        response.push_str(&format!("Location: {location}\r\n"));
    }
    response.push_str("\r\n");

    let _ = stream.write_all(response.as_bytes());
    if !method.eq_ignore_ascii_case("HEAD") {
        let _ = stream.write_all(&route.body);
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        302 => "Found",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "OK",
    }
}
