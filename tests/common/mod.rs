//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tempfile::TempDir;

/// One canned HTTP reply
#[derive(Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
    pub delay: Duration,
}

impl Reply {
    pub fn ok(body: &str) -> Self {
        Self { status: 200, body: body.to_string(), delay: Duration::ZERO }
    }

    pub fn status(status: u16) -> Self {
        Self { status, body: r#"{"error": "boom"}"#.to_string(), delay: Duration::ZERO }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A request as the server saw it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub body: String,
}

/// Local HTTP server answering one connection per scripted reply, in order
pub struct ScriptedServer {
    url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: Option<JoinHandle<()>>,
}

impl ScriptedServer {
    pub fn start(replies: Vec<Reply>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind test server");
        let url = format!("http://{}", listener.local_addr().expect("No local address"));
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = Arc::clone(&requests);
        let handle = thread::spawn(move || {
            for reply in replies {
                let Ok((stream, _)) = listener.accept() else {
                    return;
                };
                if let Some(request) = serve(stream, &reply) {
                    recorded.lock().unwrap().push(request);
                }
            }
        });

        Self { url, requests, handle: Some(handle) }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Wait for every scripted reply to be served, then return what was received
    pub fn finish(mut self) -> Vec<RecordedRequest> {
        if let Some(handle) = self.handle.take() {
            handle.join().expect("Test server panicked");
        }
        self.requests.lock().unwrap().clone()
    }
}

fn serve(stream: TcpStream, reply: &Reply) -> Option<RecordedRequest> {
    let mut reader = BufReader::new(stream.try_clone().ok()?);

    let mut request_line = String::new();
    reader.read_line(&mut request_line).ok()?;
    let mut parts = request_line.split_whitespace();
    let method = parts.next()?.to_string();
    let path = parts.next()?.to_string();

    let mut content_length = 0;
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).ok()?;
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':')
            && name.eq_ignore_ascii_case("content-length")
        {
            content_length = value.trim().parse().unwrap_or(0);
        }
    }

    let mut body = vec![0; content_length];
    reader.read_exact(&mut body).ok()?;

    thread::sleep(reply.delay);

    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.status,
        reason(reply.status),
        reply.body.len(),
        reply.body
    );
    let mut stream = stream;
    // The client may have given up already (timeout tests)
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();

    Some(RecordedRequest { method, path, body: String::from_utf8_lossy(&body).to_string() })
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}

/// Temp directory holding a history file path that does not exist yet
pub struct HistoryDir {
    temp_dir: TempDir,
}

impl HistoryDir {
    pub fn new() -> Self {
        Self { temp_dir: TempDir::new().expect("Failed to create temp dir") }
    }

    pub fn root(&self) -> PathBuf {
        self.temp_dir.path().to_path_buf()
    }

    pub fn history_path(&self) -> PathBuf {
        self.temp_dir.path().join("data").join("history.json")
    }

    /// Write raw contents into the history slot
    pub fn with_contents(self, contents: &str) -> Self {
        let path = self.history_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, contents).unwrap();
        self
    }
}

/// Response body in the shape the backend's `/api/process` returns
pub fn process_response(answer: &str, names: &[(&str, &str)], cited: &[&str]) -> String {
    let matches: Vec<_> = names
        .iter()
        .map(|(id, name)| {
            serde_json::json!({
                "id": id,
                "name": name,
                "subject": "Calculus",
                "rating": 4.5,
                "final_score": 0.91,
                "chunk_preview": format!("{} explains limits clearly", name),
            })
        })
        .collect();

    serde_json::json!({
        "llm_answer": answer,
        "matches": matches,
        "sources_used": cited,
        "total_found": names.len(),
    })
    .to_string()
}
