//! Minimal HTTP/1.1 server replaying scripted run-status responses.
//!
//! Each GET gets the next scripted response; the last one repeats. Request heads
//! are recorded so tests can assert on paths and headers.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

/// One scripted response: HTTP status code and JSON body.
#[derive(Debug, Clone)]
pub struct Reply {
    pub code: u16,
    pub body: String,
}

impl Reply {
    pub fn status(status: &str) -> Self {
        Self {
            code: 200,
            body: format!(r#"{{"id": 1, "status": "{}"}}"#, status),
        }
    }

    pub fn complete(exit_code: i64) -> Self {
        Self {
            code: 200,
            body: format!(r#"{{"id": 1, "status": "complete", "user_exit_code": {}}}"#, exit_code),
        }
    }

    pub fn http(code: u16) -> Self {
        Self {
            code,
            body: r#"{"error": "nope"}"#.to_string(),
        }
    }
}

/// Handle to a running server.
pub struct StatusServer {
    pub base_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl StatusServer {
    /// Raw request heads received so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

/// Starts a server in a background thread. Runs until the process exits.
pub fn start(script: Vec<Reply>) -> StatusServer {
    assert!(!script.is_empty());
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);
    thread::spawn(move || {
        let mut next = 0usize;
        for stream in listener.incoming().flatten() {
            let reply = script[next.min(script.len() - 1)].clone();
            next += 1;
            handle(stream, &reply, &seen);
        }
    });
    StatusServer {
        base_url: format!("http://127.0.0.1:{}/api/", port),
        requests,
    }
}

fn handle(mut stream: std::net::TcpStream, reply: &Reply, seen: &Mutex<Vec<String>>) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let head = String::from_utf8_lossy(&buf[..n]).to_string();
    seen.lock().unwrap().push(head);

    let reason = match reply.code {
        200 => "OK",
        401 => "Unauthorized",
        404 => "Not Found",
        _ => "Error",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        reply.code,
        reason,
        reply.body.len(),
        reply.body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
