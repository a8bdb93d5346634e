//! Minimal HTTP/1.1 server for integration tests.
//!
//! Serves a single body for every path. HEAD and GET both carry the
//! configured `Last-Modified` header (if any). Counts GET and HEAD requests
//! so tests can assert how many downloads happened.

#![allow(dead_code)]

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, SystemTime};

#[derive(Default)]
struct State {
    body: Mutex<Vec<u8>>,
    /// Raw header value; `None` omits the header.
    last_modified: Mutex<Option<String>>,
    get_status: Mutex<Option<u16>>,
    head_status: Mutex<Option<u16>>,
    /// GET advertises more bytes than it sends, then closes.
    truncate: Mutex<bool>,
    stall: Mutex<Option<Duration>>,
    gets: AtomicUsize,
    heads: AtomicUsize,
}

pub struct TestServer {
    pub url: String,
    state: Arc<State>,
}

impl TestServer {
    /// Starts a server in a background thread serving `body`. The server runs until the process exits.
    pub fn start(body: Vec<u8>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let state = Arc::new(State::default());
        *state.body.lock().unwrap() = body;
        let server_state = Arc::clone(&state);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let state = Arc::clone(&server_state);
                thread::spawn(move || handle(stream, &state));
            }
        });
        TestServer {
            url: format!("http://127.0.0.1:{}/resource.txt", port),
            state,
        }
    }

    pub fn set_body(&self, body: Vec<u8>) {
        *self.state.body.lock().unwrap() = body;
    }

    /// Sets the raw `Last-Modified` value; `None` omits the header.
    pub fn set_last_modified(&self, value: Option<&str>) {
        *self.state.last_modified.lock().unwrap() = value.map(str::to_string);
    }

    pub fn set_last_modified_time(&self, time: SystemTime) {
        let value = localcopy_core::http_date::format(time);
        self.set_last_modified(Some(&value));
    }

    /// Makes GET respond with `code` (body unchanged). HEAD is unaffected.
    pub fn set_get_status(&self, code: u16) {
        *self.state.get_status.lock().unwrap() = Some(code);
    }

    /// Makes HEAD respond with `code` (headers unchanged).
    pub fn set_head_status(&self, code: u16) {
        *self.state.head_status.lock().unwrap() = Some(code);
    }

    /// Makes GET send a `Content-Length` larger than the body and close the
    /// connection after the body, so the client sees a short transfer.
    pub fn set_truncate(&self, truncate: bool) {
        *self.state.truncate.lock().unwrap() = truncate;
    }

    /// Delay every response by `delay`.
    pub fn set_stall(&self, delay: Duration) {
        *self.state.stall.lock().unwrap() = Some(delay);
    }

    pub fn get_count(&self) -> usize {
        self.state.gets.load(Ordering::SeqCst)
    }

    pub fn head_count(&self) -> usize {
        self.state.heads.load(Ordering::SeqCst)
    }
}

fn handle(mut stream: TcpStream, state: &State) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let method = request.split_whitespace().next().unwrap_or("");

    let stall = *state.stall.lock().unwrap();
    if let Some(delay) = stall {
        thread::sleep(delay);
    }

    let body = state.body.lock().unwrap().clone();
    let last_modified = match state.last_modified.lock().unwrap().as_deref() {
        Some(v) => format!("Last-Modified: {}\r\n", v),
        None => String::new(),
    };

    if method.eq_ignore_ascii_case("HEAD") {
        state.heads.fetch_add(1, Ordering::SeqCst);
        let code = state.head_status.lock().unwrap().unwrap_or(200);
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
            code,
            reason(code),
            body.len(),
            last_modified
        );
        let _ = stream.write_all(response.as_bytes());
        return;
    }
    if method.eq_ignore_ascii_case("GET") {
        state.gets.fetch_add(1, Ordering::SeqCst);
        let code = state.get_status.lock().unwrap().unwrap_or(200);
        let advertised = if *state.truncate.lock().unwrap() {
            body.len() + 1024
        } else {
            body.len()
        };
        let response = format!(
            "HTTP/1.1 {} {}\r\nContent-Length: {}\r\n{}Connection: close\r\n\r\n",
            code,
            reason(code),
            advertised,
            last_modified
        );
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.write_all(&body);
        return;
    }
    let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\n\r\n");
}

fn reason(code: u16) -> &'static str {
    match code {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}
