//! In-memory transport for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use forcelink_client::{Request, Response, Transport};

/// Records every request and answers with canned responses in order.
#[derive(Debug, Default)]
pub(crate) struct FakeTransport {
    requests: Mutex<Vec<Request>>,
    responses: Mutex<VecDeque<Response>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue a response.
    pub(crate) fn respond(self, response: Response) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    /// Requests seen so far.
    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    async fn execute(&self, request: Request) -> Response {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Response::new(500, "no canned response queued"))
    }
}
