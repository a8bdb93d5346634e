//! Streamed GET response body.
//!
//! curl's easy interface pushes body chunks through a callback, so the
//! transfer runs on a worker thread and hands chunks over a bounded channel
//! to a `Read` implementation on the caller's side.

use std::io::{self, Read};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread::{self, JoinHandle};

use crate::error::TransportError;

/// Chunks buffered between the transfer thread and the reader.
const BODY_CHANNEL_CHUNKS: usize = 16;

enum Event {
    Data(Vec<u8>),
    Done(Result<u32, curl::Error>),
}

/// Response body of a GET request. Dropping it aborts an unfinished transfer
/// and waits for the transfer thread to exit.
///
/// A failed transfer keeps failing: every read after the first error returns
/// an error of the same kind, never a clean end of stream.
pub struct BodyReader {
    url: String,
    rx: Option<Receiver<Event>>,
    chunk: Vec<u8>,
    pos: usize,
    finished: bool,
    failure: Option<(io::ErrorKind, String)>,
    worker: Option<JoinHandle<()>>,
}

impl BodyReader {
    /// Starts the transfer and waits for the first chunk (or the end of the
    /// transfer), so connection failures are reported here instead of as read errors.
    pub(crate) fn start(easy: curl::easy::Easy, url: &str) -> Result<Self, TransportError> {
        let (tx, rx) = mpsc::sync_channel(BODY_CHANNEL_CHUNKS);
        let worker = thread::spawn(move || {
            let mut easy = easy;
            let result = perform(&mut easy, tx.clone());
            let _ = tx.send(Event::Done(result));
        });

        let mut reader = BodyReader {
            url: url.to_string(),
            rx: Some(rx),
            chunk: Vec::new(),
            pos: 0,
            finished: false,
            failure: None,
            worker: Some(worker),
        };

        let first = reader.rx.as_ref().map(|rx| rx.recv());
        match first {
            Some(Ok(Event::Done(Err(source)))) => {
                return Err(TransportError::Curl {
                    method: "GET",
                    url: url.to_string(),
                    source,
                });
            }
            Some(Ok(event)) => {
                let _ = reader.apply(event);
            }
            // Worker gone without a result; the first read reports it.
            Some(Err(_)) | None => {}
        }
        Ok(reader)
    }

    fn apply(&mut self, event: Event) -> io::Result<()> {
        match event {
            Event::Data(data) => {
                self.chunk = data;
                self.pos = 0;
                Ok(())
            }
            Event::Done(Ok(code)) => {
                tracing::debug!("GET {} finished with HTTP {}", self.url, code);
                self.finished = true;
                Ok(())
            }
            Event::Done(Err(e)) => {
                let message = format!("transfer of {} failed: {}", self.url, e);
                Err(self.fail(io::ErrorKind::Other, message))
            }
        }
    }

    /// Records a terminal failure and returns it as an `io::Error`.
    fn fail(&mut self, kind: io::ErrorKind, message: String) -> io::Error {
        tracing::debug!("{}", message);
        self.finished = true;
        self.failure = Some((kind, message.clone()));
        io::Error::new(kind, message)
    }
}

fn perform(easy: &mut curl::easy::Easy, tx: SyncSender<Event>) -> Result<u32, curl::Error> {
    easy.write_function(move |data| {
        if tx.send(Event::Data(data.to_vec())).is_err() {
            // Reader dropped: abort the transfer.
            return Ok(0);
        }
        Ok(data.len())
    })?;
    easy.perform()?;
    easy.response_code()
}

impl Read for BodyReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            if self.pos < self.chunk.len() {
                let n = buf.len().min(self.chunk.len() - self.pos);
                buf[..n].copy_from_slice(&self.chunk[self.pos..self.pos + n]);
                self.pos += n;
                return Ok(n);
            }
            if let Some((kind, message)) = &self.failure {
                return Err(io::Error::new(*kind, message.clone()));
            }
            if self.finished || buf.is_empty() {
                return Ok(0);
            }
            let event = match self.rx.as_ref().map(|rx| rx.recv()) {
                Some(Ok(event)) => event,
                Some(Err(_)) | None => {
                    let message = format!("transfer of {} ended without completing", self.url);
                    return Err(self.fail(io::ErrorKind::UnexpectedEof, message));
                }
            };
            self.apply(event)?;
        }
    }
}

impl Drop for BodyReader {
    fn drop(&mut self) {
        drop(self.rx.take());
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!("GET {} transfer thread panicked", self.url);
            } else if !self.finished {
                tracing::debug!("GET {} aborted before the body was fully read", self.url);
            }
        }
    }
}
