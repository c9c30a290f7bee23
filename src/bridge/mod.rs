//! The request/response loop.
//!
//! Reads one request per line, answers each with exactly one line, in
//! order, flushing after every write. Failures inside a request become
//! `{"error": ...}` responses and the loop keeps reading. End of input is
//! the only normal way out.

mod error;

pub use error::RequestFailure;

use std::io::{self, BufRead, Write};
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, trace, warn};

use crate::engine::{InferenceEngine, PositionConvention};
use crate::protocol::{encode_line, InferenceRequest, Response};

/// Loop state. `Reading` is initial; `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Reading,
    Processing,
    Stopped,
}

/// Counters reported when the loop stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BridgeSummary {
    pub requests: u64,
    pub failures: u64,
}

pub struct Bridge<E> {
    engine: E,
    convention: PositionConvention,
}

impl<E: InferenceEngine> Bridge<E> {
    pub fn new(engine: E, convention: PositionConvention) -> Self {
        Self { engine, convention }
    }

    /// Serve requests from `input` until it reaches end of stream.
    ///
    /// Returns `Err` only when a stream itself fails. A read failure is
    /// reported once on `output` before returning; a write failure is
    /// returned as is.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> io::Result<BridgeSummary> {
        let mut summary = BridgeSummary::default();
        let mut line = Vec::new();
        let mut state = State::Reading;

        while state != State::Stopped {
            trace!(?state, "bridge");
            match state {
                State::Reading => {
                    line.clear();
                    match input.read_until(b'\n', &mut line) {
                        Ok(0) => state = State::Stopped,
                        Ok(_) => state = State::Processing,
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                        Err(e) => {
                            warn!(error = %e, "input stream failed");
                            emit(&mut output, &Response::failure(e.to_string()))?;
                            return Err(e);
                        }
                    }
                }
                State::Processing => {
                    summary.requests += 1;
                    let response = self.handle_line(&line);
                    if matches!(response, Response::Failure { .. }) {
                        summary.failures += 1;
                    }
                    emit(&mut output, &response)?;
                    state = State::Reading;
                }
                State::Stopped => {}
            }
        }

        debug!(requests = summary.requests, failures = summary.failures, "end of input");
        Ok(summary)
    }

    /// Answer one raw input line. Never fails; failures become responses.
    pub fn handle_line(&mut self, line: &[u8]) -> Response {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.process(line)))
            .unwrap_or_else(|payload| Err(RequestFailure::from_panic(payload)));

        match outcome {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "request failed");
                Response::failure(e.to_string())
            }
        }
    }

    fn process(&mut self, line: &[u8]) -> Result<Response, RequestFailure> {
        let text = std::str::from_utf8(line)?;
        let request: InferenceRequest = serde_json::from_str(text)?;
        let pos = self
            .convention
            .normalize(&request.source, request.line, request.column)?;

        let candidates = self.engine.infer(&request.source, &request.path, pos)?;
        debug!(
            path = %request.path,
            line = request.line,
            column = request.column,
            candidates = candidates.len(),
            "inferred"
        );

        // Only the first candidate is ever reported.
        Ok(candidates.into_iter().next().into())
    }
}

/// Write one response line and flush it.
fn emit<W: Write>(output: &mut W, response: &Response) -> io::Result<()> {
    let bytes = match encode_line(response) {
        Ok(bytes) => bytes,
        Err(e) => encode_line(&Response::failure(e.to_string()))?,
    };
    output.write_all(&bytes)?;
    output.flush()
}
