//! Shared test double: an in-memory transport that records every option set

#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use fetchkit_client::{
    Handle, InfoKey, InfoValue, OptionKey, OptionSet, ResponseBody, Transport, TransportReply,
};

#[derive(Debug, Clone)]
enum Outcome {
    Respond { status: i64, body: String },
    Fail { code: i32, message: String },
}

/// Transport that never touches the network.
///
/// Every `open` and `invoke` records the handle's option set so tests can
/// assert on exactly what a real transport would have been asked to do.
#[derive(Debug)]
pub struct RecordingTransport {
    outcome: Mutex<Outcome>,
    opened: Mutex<Vec<OptionSet>>,
    invoked: Mutex<Vec<OptionSet>>,
    closed: AtomicUsize,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::responding(200, "")
    }

    pub fn responding(status: i64, body: &str) -> Self {
        Self {
            outcome: Mutex::new(Outcome::Respond {
                status,
                body: body.to_string(),
            }),
            opened: Mutex::new(Vec::new()),
            invoked: Mutex::new(Vec::new()),
            closed: AtomicUsize::new(0),
        }
    }

    pub fn failing(code: i32, message: &str) -> Self {
        let transport = Self::new();
        *transport.outcome.lock().unwrap() = Outcome::Fail {
            code,
            message: message.to_string(),
        };
        transport
    }

    pub fn opened(&self) -> Vec<OptionSet> {
        self.opened.lock().unwrap().clone()
    }

    pub fn invoked(&self) -> Vec<OptionSet> {
        self.invoked.lock().unwrap().clone()
    }

    pub fn last_invoked(&self) -> OptionSet {
        self.invoked
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("transport was never invoked")
    }

    pub fn invoke_count(&self) -> usize {
        self.invoked.lock().unwrap().len()
    }

    pub fn closed_count(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Transport for RecordingTransport {
    fn open(&self, options: OptionSet) -> fetchkit_client::error::Result<Handle> {
        self.opened.lock().unwrap().push(options.clone());
        Ok(Handle::new(options))
    }

    fn invoke(&self, handle: &mut Handle) -> TransportReply {
        self.invoked.lock().unwrap().push(handle.options().clone());

        match self.outcome.lock().unwrap().clone() {
            Outcome::Respond { status, body } => {
                handle.record(InfoKey::ResponseCode, InfoValue::Int(status));
                if let Some(url) = handle.options().text(&OptionKey::URL) {
                    let url = url.to_string();
                    handle.record(InfoKey::EffectiveUrl, InfoValue::Text(url));
                }
                TransportReply::success(ResponseBody::Buffered(body))
            }
            Outcome::Fail { code, message } => TransportReply::failure(code, message),
        }
    }

    fn close(&self, _handle: Handle) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
